use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub mod query;
pub mod report;
pub mod vector_id;

pub use crate::{query::*, report::*, vector_id::*};

pub type HashSet<T> = rustc_hash::FxHashSet<T>;

/// Arbitrary JSON object attached to a vector.
pub type Metadata = Map<String, Value>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Match {
    pub id: VectorId,
    #[serde(default)]
    pub score: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// A stored vector as returned by a lookup by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VectorRecord {
    pub id: VectorId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<f32>>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// One page of a cursor-based id listing. `next_cursor` is `None` on the
/// last page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct VectorPage {
    pub ids: Vec<VectorId>,
    pub next_cursor: Option<String>,
    pub total_count: Option<usize>,
}

impl VectorPage {
    pub fn is_last(&self) -> bool {
        self.next_cursor.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MetadataIndex {
    pub property_name: String,
    pub index_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn match_tolerates_missing_optional_fields() {
        let m: Match = serde_json::from_value(json!({ "id": "doc-1", "score": 0.5 })).unwrap();
        assert_eq!(m.id.as_str(), "doc-1");
        assert!(m.metadata.is_none());
        assert!(m.values.is_none());
    }

    #[test]
    fn match_accepts_null_or_missing_score() {
        let m: Match = serde_json::from_value(json!({ "id": "doc-1", "score": null })).unwrap();
        assert!(m.score.is_none());

        let m: Match = serde_json::from_value(json!({ "id": "doc-1" })).unwrap();
        assert!(m.score.is_none());
    }

    #[test]
    fn record_keeps_null_metadata_slot() {
        let record: VectorRecord =
            serde_json::from_value(json!({ "id": "doc-2", "metadata": null })).unwrap();
        assert!(record.metadata.is_none());
        assert_eq!(serde_json::to_value(&record).unwrap()["metadata"], Value::Null);
    }

    #[test]
    fn metadata_index_uses_camel_case() {
        let index: MetadataIndex = serde_json::from_value(json!({
            "propertyName": "slug",
            "indexType": "String"
        }))
        .unwrap();
        assert_eq!(index.property_name, "slug");
        assert_eq!(index.index_type, "String");
    }
}
