use super::{MetadataController, MetadataControllerError};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use vecmeta_core::{IndexQuery, VectorId};
use vecmeta_vector_index::VectorIndexError;

#[derive(Debug, Error)]
pub enum FetchIdsError {
    #[error("vector index action failed with: {0}")]
    VectorIndexError(#[from] VectorIndexError),
}

impl MetadataController {
    /// Enumerates up to `top_k` ids by querying with an all-zero vector.
    pub async fn fetch_ids(&self) -> Result<Vec<VectorId>, MetadataControllerError> {
        Ok(self.fetch_ids_impl().await?)
    }

    pub(crate) async fn fetch_ids_impl(&self) -> Result<Vec<VectorId>, FetchIdsError> {
        let vector_index = Arc::clone(&self.vector_index);
        let query = IndexQuery::zero(self.settings.dimensions, self.settings.top_k)
            .with_return_metadata(self.settings.return_metadata)
            .with_return_values(self.settings.return_values);

        let ids: Vec<VectorId> = vector_index
            .query(&query)
            .await?
            .into_iter()
            .map(|m| m.id)
            .collect();

        info!("retrieved {} vector ids", ids.len());
        Ok(ids)
    }
}
