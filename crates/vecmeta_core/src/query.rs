use crate::Metadata;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;
use typed_builder::TypedBuilder;

/// Largest `top_k` the index accepts for a single query.
pub const MAX_TOP_K: usize = 100;

/// Largest page the index returns from a single listing call.
pub const MAX_LIST_COUNT: usize = 1000;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum QueryError {
    #[error("top_k must be in range [1, 100], got {0}")]
    InvalidTopK(usize),

    #[error("query vector cannot be empty")]
    EmptyQueryVector,

    #[error("query vector contains a non-finite component at position {0}")]
    NonFiniteComponent(usize),

    #[error("list count must be in range [1, 1000], got {0}")]
    InvalidListCount(usize),
}

pub fn validate_list_count(count: usize) -> Result<(), QueryError> {
    if !(1..=MAX_LIST_COUNT).contains(&count) {
        return Err(QueryError::InvalidListCount(count));
    }
    Ok(())
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown return_metadata mode '{0}', expected one of: none, indexed, all")]
pub struct ParseReturnMetadataError(String);

/// How much metadata the index attaches to each match.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReturnMetadata {
    #[default]
    None,
    Indexed,
    All,
}

impl ReturnMetadata {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReturnMetadata::None => "none",
            ReturnMetadata::Indexed => "indexed",
            ReturnMetadata::All => "all",
        }
    }
}

impl fmt::Display for ReturnMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReturnMetadata {
    type Err = ParseReturnMetadataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(ReturnMetadata::None),
            "indexed" => Ok(ReturnMetadata::Indexed),
            "all" => Ok(ReturnMetadata::All),
            other => Err(ParseReturnMetadataError(other.to_string())),
        }
    }
}

#[derive(TypedBuilder, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexQuery {
    vector: Vec<f32>,
    #[builder(default = MAX_TOP_K)]
    top_k: usize,
    #[builder(default)]
    filter: Metadata,
    #[builder(default = false)]
    return_values: bool,
    #[builder(default)]
    return_metadata: ReturnMetadata,
}

impl IndexQuery {
    /// A query with an all-zero vector, used to enumerate ids rather than to
    /// rank by similarity.
    pub fn zero(dimensions: usize, top_k: usize) -> Self {
        Self::builder()
            .vector(vec![0.0; dimensions])
            .top_k(top_k)
            .build()
    }

    pub fn validate(&self) -> Result<(), QueryError> {
        if self.vector.is_empty() {
            return Err(QueryError::EmptyQueryVector);
        }

        if let Some(position) = self.vector.iter().position(|v| !v.is_finite()) {
            return Err(QueryError::NonFiniteComponent(position));
        }

        if !(1..=MAX_TOP_K).contains(&self.top_k) {
            return Err(QueryError::InvalidTopK(self.top_k));
        }

        Ok(())
    }

    pub fn vector(&self) -> &[f32] {
        &self.vector
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn filter(&self) -> &Metadata {
        &self.filter
    }

    pub fn return_values(&self) -> bool {
        self.return_values
    }

    pub fn return_metadata(&self) -> ReturnMetadata {
        self.return_metadata
    }

    pub fn with_return_metadata(self, return_metadata: ReturnMetadata) -> Self {
        Self {
            return_metadata,
            ..self
        }
    }

    pub fn with_return_values(self, return_values: bool) -> Self {
        Self {
            return_values,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_query_has_requested_shape() {
        let query = IndexQuery::zero(768, 100);
        assert_eq!(query.vector().len(), 768);
        assert!(query.vector().iter().all(|v| *v == 0.0));
        assert_eq!(query.top_k(), 100);
        assert!(query.filter().is_empty());
        assert_eq!(query.return_metadata(), ReturnMetadata::None);
        assert!(query.validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_top_k() {
        assert_eq!(
            IndexQuery::zero(8, 0).validate(),
            Err(QueryError::InvalidTopK(0))
        );
        assert_eq!(
            IndexQuery::zero(8, MAX_TOP_K + 1).validate(),
            Err(QueryError::InvalidTopK(MAX_TOP_K + 1))
        );
    }

    #[test]
    fn validate_rejects_empty_and_non_finite_vectors() {
        assert_eq!(
            IndexQuery::zero(0, 10).validate(),
            Err(QueryError::EmptyQueryVector)
        );

        let query = IndexQuery::builder()
            .vector(vec![0.0, f32::NAN, 1.0])
            .build();
        assert_eq!(query.validate(), Err(QueryError::NonFiniteComponent(1)));
    }

    #[test]
    fn list_count_bounds() {
        assert!(validate_list_count(1).is_ok());
        assert!(validate_list_count(MAX_LIST_COUNT).is_ok());
        assert_eq!(validate_list_count(0), Err(QueryError::InvalidListCount(0)));
        assert_eq!(
            validate_list_count(MAX_LIST_COUNT + 1),
            Err(QueryError::InvalidListCount(MAX_LIST_COUNT + 1))
        );
    }

    #[test]
    fn return_metadata_parses_case_insensitively() {
        assert_eq!("ALL".parse::<ReturnMetadata>(), Ok(ReturnMetadata::All));
        assert_eq!(
            " indexed ".parse::<ReturnMetadata>(),
            Ok(ReturnMetadata::Indexed)
        );
        assert!("some".parse::<ReturnMetadata>().is_err());
    }
}
