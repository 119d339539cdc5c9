use super::{MetadataController, MetadataControllerError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};
use vecmeta_core::{Metadata, VectorId, VectorRecord};
use vecmeta_vector_index::VectorIndexError;

/// Ids sent per lookup call.
pub const LOOKUP_BATCH_SIZE: usize = 100;

#[derive(Debug, Error)]
pub enum FetchMetadataError {
    #[error("vector index action failed with: {0}")]
    VectorIndexError(#[from] VectorIndexError),
}

impl MetadataController {
    /// Looks up `ids` in batches of [`LOOKUP_BATCH_SIZE`] and returns one
    /// metadata slot per returned record.
    pub async fn fetch_metadata(
        &self,
        ids: &[VectorId],
    ) -> Result<Vec<Option<Metadata>>, MetadataControllerError> {
        Ok(self.fetch_metadata_impl(ids).await?)
    }

    pub(crate) async fn fetch_metadata_impl(
        &self,
        ids: &[VectorId],
    ) -> Result<Vec<Option<Metadata>>, FetchMetadataError> {
        let vector_index = Arc::clone(&self.vector_index);
        let mut records: Vec<VectorRecord> = Vec::with_capacity(ids.len());
        for batch in ids.chunks(LOOKUP_BATCH_SIZE) {
            records.extend(vector_index.get_by_ids(batch).await?);
        }

        if records.len() != ids.len() {
            debug!(
                "requested {} ids but the index returned {} records",
                ids.len(),
                records.len()
            );
        }

        let metadata: Vec<Option<Metadata>> = records.into_iter().map(|r| r.metadata).collect();
        info!(
            "retrieved metadata for {} of {} records",
            metadata.iter().filter(|m| m.is_some()).count(),
            metadata.len()
        );
        Ok(metadata)
    }
}
