mod collect;
mod fetch_ids;
mod fetch_metadata;
mod list_ids;
mod metadata_indexes;

pub use collect::CollectError;
pub use fetch_ids::FetchIdsError;
pub use fetch_metadata::FetchMetadataError;
pub use list_ids::ListIdsError;
pub use metadata_indexes::MetadataIndexesError;

use std::sync::Arc;
use thiserror::Error;
use typed_builder::TypedBuilder;
use vecmeta_config::{AppConfig, QuerySettings};
use vecmeta_vector_index::{VectorIndex, VectorIndexBase};

#[derive(Debug, Error)]
pub enum MetadataControllerError {
    #[error("vector id enumeration failed with: {0}")]
    FetchIdsError(#[from] FetchIdsError),

    #[error("metadata lookup failed with: {0}")]
    FetchMetadataError(#[from] FetchMetadataError),

    #[error("vector id listing failed with: {0}")]
    ListIdsError(#[from] ListIdsError),

    #[error("metadata collection failed with: {0}")]
    CollectError(#[from] CollectError),

    #[error("metadata index listing failed with: {0}")]
    MetadataIndexesError(#[from] MetadataIndexesError),
}

/// Enumerates vector ids from an index and looks up their metadata.
#[derive(TypedBuilder, Clone)]
pub struct MetadataController {
    vector_index: Arc<dyn VectorIndexBase + Send + Sync>,
    #[builder(default)]
    settings: QuerySettings,
}

impl MetadataController {
    pub fn from_config(config: &AppConfig) -> Self {
        Self::builder()
            .vector_index(VectorIndex::from_config(config.vector_index()))
            .settings(config.query.clone())
            .build()
    }

    pub fn settings(&self) -> &QuerySettings {
        &self.settings
    }
}
