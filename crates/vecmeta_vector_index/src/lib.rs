mod cloudflare;

use async_trait::async_trait;
use lazy_static::lazy_static;
use reqwest::Client;
use std::sync::Arc;
use thiserror::Error;
use vecmeta_core::{
    IndexQuery, Match, MetadataIndex, QueryError, VectorId, VectorPage, VectorRecord,
};

pub use cloudflare::Cloudflare;

lazy_static! {
    static ref client: Client = Client::new();
}

#[derive(Error, Debug)]
pub enum VectorIndexError {
    #[error("request to vector index failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("vector index responded with status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("vector index response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid query: {0}")]
    InvalidQuery(#[from] QueryError),
}

impl VectorIndexError {
    /// HTTP status of an API rejection, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            VectorIndexError::Api { status, .. } => Some(*status),
            VectorIndexError::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, VectorIndexError>;

pub struct VectorIndex;

impl VectorIndex {
    pub fn from_config(
        config: vecmeta_config::VectorIndex,
    ) -> Arc<dyn VectorIndexBase + Send + Sync> {
        match config {
            vecmeta_config::VectorIndex::Cloudflare(cloudflare) => {
                Arc::new(Cloudflare::new(cloudflare)) as Arc<dyn VectorIndexBase + Send + Sync>
            }
        }
    }
}

#[async_trait]
pub trait VectorIndexBase {
    async fn query(&self, query: &IndexQuery) -> Result<Vec<Match>>;

    async fn get_by_ids(&self, ids: &[VectorId]) -> Result<Vec<VectorRecord>>;

    async fn list_metadata_indexes(&self) -> Result<Vec<MetadataIndex>>;

    /// Lists up to `count` ids starting at `cursor`, or at the beginning of
    /// the index when `cursor` is `None`.
    async fn list_vectors(&self, cursor: Option<&str>, count: usize) -> Result<VectorPage>;
}
