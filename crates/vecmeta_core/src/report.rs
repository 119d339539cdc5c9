use crate::{HashSet, Metadata, VectorId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct MetadataStats {
    pub total_entries: usize,
    pub unique_titles: usize,
    pub metadata_fields: Vec<String>,
}

impl MetadataStats {
    /// Stats over the slots that carry metadata. Each entry is identified by
    /// its `id`, which is therefore always listed as a field.
    pub fn from_slots(slots: &[Option<Metadata>]) -> Self {
        let mut titles: HashSet<&str> = HashSet::default();
        let mut fields: Vec<String> = Vec::new();
        let mut entries = 0;

        for metadata in slots.iter().flatten() {
            entries += 1;
            if let Some(Value::String(title)) = metadata.get("title") {
                if !title.is_empty() {
                    titles.insert(title.as_str());
                }
            }
            fields.extend(metadata.keys().cloned());
        }

        if entries > 0 {
            fields.push("id".to_string());
        }

        fields.sort_unstable();
        fields.dedup();

        Self {
            total_entries: entries,
            unique_titles: titles.len(),
            metadata_fields: fields,
        }
    }
}

/// Result of one enumerate-then-lookup run against an index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetadataReport {
    pub ids: Vec<VectorId>,
    /// One slot per record returned by the lookup, `None` where the record
    /// carries no metadata.
    pub metadata: Vec<Option<Metadata>>,
    pub stats: MetadataStats,
    pub timestamp: DateTime<Utc>,
}

impl MetadataReport {
    pub fn new(ids: Vec<VectorId>, metadata: Vec<Option<Metadata>>) -> Self {
        let stats = MetadataStats::from_slots(&metadata);
        Self {
            ids,
            metadata,
            stats,
            timestamp: Utc::now(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metadata(value: Value) -> Option<Metadata> {
        match value {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    #[test]
    fn stats_count_titles_and_fields() {
        let slots = vec![
            metadata(json!({ "title": "Rust", "slug": "/rust" })),
            metadata(json!({ "title": "Rust", "url": "https://example.com" })),
            metadata(json!({ "title": "", "author": "sam" })),
            None,
            metadata(json!({ "title": "Go" })),
        ];

        let stats = MetadataStats::from_slots(&slots);
        assert_eq!(stats.total_entries, 4);
        assert_eq!(stats.unique_titles, 2);
        assert_eq!(
            stats.metadata_fields,
            vec!["author", "id", "slug", "title", "url"]
        );
    }

    #[test]
    fn non_string_titles_are_ignored() {
        let slots = vec![metadata(json!({ "title": 42 }))];
        let stats = MetadataStats::from_slots(&slots);
        assert_eq!(stats.unique_titles, 0);
        assert_eq!(stats.metadata_fields, vec!["id", "title"]);
    }

    #[test]
    fn slots_without_metadata_are_not_entries() {
        let stats = MetadataStats::from_slots(&[None, None]);
        assert_eq!(stats, MetadataStats::default());
    }

    #[test]
    fn empty_report_has_zeroed_stats() {
        let report = MetadataReport::empty();
        assert!(report.is_empty());
        assert_eq!(report.stats, MetadataStats::default());
    }

    #[test]
    fn report_serializes_timestamp_as_rfc3339() {
        let report = MetadataReport::new(
            vec![VectorId::new("a").unwrap()],
            vec![metadata(json!({ "title": "A" }))],
        );
        let value = serde_json::to_value(&report).unwrap();
        let timestamp = value["timestamp"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(timestamp).is_ok());
        assert_eq!(value["stats"]["total_entries"], 1);
    }
}
