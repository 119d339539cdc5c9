use crate::{Result, VectorIndexBase, VectorIndexError, client};
use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::{debug, warn};
use vecmeta_config::Auth;
use vecmeta_core::{
    IndexQuery, Match, Metadata, MetadataIndex, ReturnMetadata, VectorId, VectorPage,
    VectorRecord, validate_list_count,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'q> {
    vector: &'q [f32],
    top_k: usize,
    filter: &'q Metadata,
    return_values: bool,
    return_metadata: ReturnMetadata,
}

#[derive(Serialize)]
struct GetByIdsRequest<'q> {
    ids: &'q [VectorId],
}

#[derive(Deserialize)]
struct ApiEnvelope<T> {
    result: Option<T>,
    #[serde(default = "default_success")]
    success: bool,
}

fn default_success() -> bool {
    true
}

#[derive(Deserialize, Default)]
struct QueryResult {
    #[serde(default)]
    matches: Vec<Match>,
}

#[derive(Deserialize, Default)]
struct MetadataIndexList {
    #[serde(default, rename = "metadataIndexes")]
    metadata_indexes: Vec<MetadataIndex>,
}

#[derive(Deserialize)]
struct ListedVector {
    id: VectorId,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct VectorList {
    #[serde(default)]
    vectors: Vec<ListedVector>,
    #[serde(default)]
    is_truncated: bool,
    next_cursor: Option<String>,
    total_count: Option<usize>,
}

impl From<VectorList> for VectorPage {
    fn from(list: VectorList) -> Self {
        let next_cursor = if list.is_truncated {
            list.next_cursor.filter(|cursor| !cursor.is_empty())
        } else {
            None
        };

        VectorPage {
            ids: list.vectors.into_iter().map(|v| v.id).collect(),
            next_cursor,
            total_count: list.total_count,
        }
    }
}

pub struct Cloudflare {
    account_id: String,
    index_name: String,
    auth: Auth,
    base_url: String,
    timeout: Duration,
}

impl Cloudflare {
    pub fn new(config: vecmeta_config::Cloudflare) -> Self {
        Self {
            account_id: config.account_id,
            index_name: config.index_name,
            auth: config.auth,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    fn endpoint(&self, operation: &str) -> String {
        format!(
            "{}/accounts/{}/vectorize/v2/indexes/{}/{}",
            self.base_url, self.account_id, self.index_name, operation
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            Auth::ApiToken { token } => request.header("Authorization", format!("Bearer {token}")),
            Auth::GlobalKey { email, key } => request
                .header("X-Auth-Email", email)
                .header("X-Auth-Key", key),
        }
    }

    /// Sends `request` and unwraps the `result` field of the response
    /// envelope. Anything other than a 200 with `success: true` is an API
    /// error carrying the raw body.
    async fn execute<T>(&self, operation: &str, request: RequestBuilder) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let response = self
            .authorize(request)
            .timeout(self.timeout)
            .send()
            .await
            .inspect_err(|err| warn!("{operation} could not reach the index: {err}"))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .inspect_err(|err| warn!("{operation} response body could not be read: {err}"))?;

        if status != StatusCode::OK {
            warn!("{operation} failed with status {}", status.as_u16());
            return Err(VectorIndexError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: ApiEnvelope<T> = serde_json::from_str(&body).inspect_err(|err| {
            warn!("{operation} returned an undecodable body: {err}");
        })?;

        if !envelope.success {
            warn!("{operation} was rejected by the index");
            return Err(VectorIndexError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(envelope.result)
    }
}

#[async_trait]
impl VectorIndexBase for Cloudflare {
    async fn query(&self, query: &IndexQuery) -> Result<Vec<Match>> {
        query.validate()?;

        let url = self.endpoint("query");
        debug!("querying {url} with top_k={}", query.top_k());

        let body = QueryRequest {
            vector: query.vector(),
            top_k: query.top_k(),
            filter: query.filter(),
            return_values: query.return_values(),
            return_metadata: query.return_metadata(),
        };

        let result: Option<QueryResult> = self
            .execute("vector query", client.post(&url).json(&body))
            .await?;

        Ok(result.unwrap_or_default().matches)
    }

    async fn get_by_ids(&self, ids: &[VectorId]) -> Result<Vec<VectorRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.endpoint("get_by_ids");
        debug!("fetching {} vectors from {url}", ids.len());

        let result: Option<Vec<VectorRecord>> = self
            .execute(
                "metadata query",
                client.post(&url).json(&GetByIdsRequest { ids }),
            )
            .await?;

        Ok(result.unwrap_or_default())
    }

    async fn list_metadata_indexes(&self) -> Result<Vec<MetadataIndex>> {
        let url = self.endpoint("metadata_index/list");
        debug!("listing metadata indexes from {url}");

        let result: Option<MetadataIndexList> = self
            .execute("metadata index listing", client.get(&url))
            .await?;

        Ok(result.unwrap_or_default().metadata_indexes)
    }

    async fn list_vectors(&self, cursor: Option<&str>, count: usize) -> Result<VectorPage> {
        validate_list_count(count)?;

        let url = self.endpoint("list");
        debug!("listing up to {count} vectors from {url}");

        let mut request = client.get(&url).query(&[("count", count.to_string())]);
        if let Some(cursor) = cursor {
            request = request.query(&[("cursor", cursor)]);
        }

        let result: Option<VectorList> = self.execute("vector listing", request).await?;

        Ok(result.unwrap_or_default().into())
    }
}
