use super::{
    FetchIdsError, FetchMetadataError, ListIdsError, MetadataController, MetadataControllerError,
};
use std::time::Instant;
use thiserror::Error;
use tracing::info;
use vecmeta_core::MetadataReport;

#[derive(Debug, Error)]
pub enum CollectError {
    #[error("vector id enumeration failed with: {0}")]
    FetchIdsError(#[from] FetchIdsError),

    #[error("metadata lookup failed with: {0}")]
    FetchMetadataError(#[from] FetchMetadataError),

    #[error("vector id listing failed with: {0}")]
    ListIdsError(#[from] ListIdsError),
}

#[derive(Debug, Clone, Copy)]
enum IdSource {
    ZeroQuery,
    Listing,
}

impl MetadataController {
    /// Enumerates ids, then fetches their metadata. The lookup is skipped
    /// when the index returns no ids.
    pub async fn collect(&self) -> Result<MetadataReport, MetadataControllerError> {
        Ok(self.collect_impl(IdSource::ZeroQuery).await?)
    }

    /// Same as [`MetadataController::collect`], but pages through the whole
    /// index instead of stopping at `top_k` ids.
    pub async fn collect_all(&self) -> Result<MetadataReport, MetadataControllerError> {
        Ok(self.collect_impl(IdSource::Listing).await?)
    }

    async fn collect_impl(&self, source: IdSource) -> Result<MetadataReport, CollectError> {
        let start = Instant::now();
        let ids = match source {
            IdSource::ZeroQuery => self.fetch_ids_impl().await?,
            IdSource::Listing => self.list_ids_impl().await?,
        };
        info!("Query time : {:?}", start.elapsed());

        if ids.is_empty() {
            return Ok(MetadataReport::empty());
        }

        let start = Instant::now();
        let metadata = self.fetch_metadata_impl(&ids).await?;
        info!("Lookup time : {:?}", start.elapsed());

        Ok(MetadataReport::new(ids, metadata))
    }
}
