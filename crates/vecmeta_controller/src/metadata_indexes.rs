use super::{MetadataController, MetadataControllerError};
use std::sync::Arc;
use thiserror::Error;
use vecmeta_core::MetadataIndex;
use vecmeta_vector_index::VectorIndexError;

#[derive(Debug, Error)]
pub enum MetadataIndexesError {
    #[error("vector index action failed with: {0}")]
    VectorIndexError(#[from] VectorIndexError),
}

impl MetadataController {
    pub async fn metadata_indexes(&self) -> Result<Vec<MetadataIndex>, MetadataControllerError> {
        Ok(self.metadata_indexes_impl().await?)
    }

    async fn metadata_indexes_impl(&self) -> Result<Vec<MetadataIndex>, MetadataIndexesError> {
        let vector_index = Arc::clone(&self.vector_index);
        Ok(vector_index.list_metadata_indexes().await?)
    }
}
