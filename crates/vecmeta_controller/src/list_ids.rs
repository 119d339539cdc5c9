use super::{MetadataController, MetadataControllerError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};
use vecmeta_core::VectorId;
use vecmeta_vector_index::VectorIndexError;

#[derive(Debug, Error)]
pub enum ListIdsError {
    #[error("vector index action failed with: {0}")]
    VectorIndexError(#[from] VectorIndexError),

    #[error("listing cursor '{0}' did not advance")]
    StalledCursor(String),
}

impl MetadataController {
    /// Lists every id in the index, following the listing cursor until the
    /// last page.
    pub async fn list_ids(&self) -> Result<Vec<VectorId>, MetadataControllerError> {
        Ok(self.list_ids_impl().await?)
    }

    pub(crate) async fn list_ids_impl(&self) -> Result<Vec<VectorId>, ListIdsError> {
        let vector_index = Arc::clone(&self.vector_index);
        let mut ids: Vec<VectorId> = Vec::new();
        let mut cursor: Option<String> = None;
        let mut pages = 0;

        loop {
            let page = vector_index
                .list_vectors(cursor.as_deref(), self.settings.page_size)
                .await?;
            pages += 1;
            debug!("page {pages} listed {} ids", page.ids.len());
            ids.extend(page.ids);

            match page.next_cursor {
                None => break,
                Some(next) if cursor.as_deref() == Some(next.as_str()) => {
                    return Err(ListIdsError::StalledCursor(next));
                }
                Some(next) => cursor = Some(next),
            }
        }

        info!("listed {} vector ids over {pages} pages", ids.len());
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use crate::{test_support::FakeIndex, ListIdsError, MetadataController, MetadataControllerError};
    use std::sync::Arc;
    use vecmeta_config::QuerySettings;
    use vecmeta_core::VectorId;

    fn ids(raw: &[&str]) -> Vec<VectorId> {
        raw.iter().map(|id| VectorId::new(*id).unwrap()).collect()
    }

    #[tokio::test]
    async fn follows_cursor_across_pages() {
        let index = Arc::new(FakeIndex {
            pages: vec![vec!["a", "b"], vec!["c", "d"], vec!["e"]],
            ..Default::default()
        });
        let controller = MetadataController::builder()
            .vector_index(index.clone())
            .settings(QuerySettings {
                page_size: 2,
                ..Default::default()
            })
            .build();

        let listed = controller.list_ids().await.unwrap();
        assert_eq!(listed, ids(&["a", "b", "c", "d", "e"]));

        let listings = index.listings.lock().unwrap();
        assert_eq!(
            *listings,
            vec![
                (None, 2),
                (Some("1".to_string()), 2),
                (Some("2".to_string()), 2),
            ]
        );
    }

    #[tokio::test]
    async fn empty_index_takes_one_call() {
        let index = Arc::new(FakeIndex::default());
        let controller = MetadataController::builder()
            .vector_index(index.clone())
            .build();

        let listed = controller.list_ids().await.unwrap();
        assert!(listed.is_empty());
        assert_eq!(index.listings.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn repeated_cursor_stops_the_listing() {
        let index = Arc::new(FakeIndex {
            pages: vec![vec!["a"]],
            stuck_cursor: Some("same"),
            ..Default::default()
        });
        let controller = MetadataController::builder()
            .vector_index(index.clone())
            .build();

        let err = controller.list_ids().await.unwrap_err();
        assert!(matches!(
            err,
            MetadataControllerError::ListIdsError(ListIdsError::StalledCursor(ref cursor)) if cursor == "same"
        ));
        assert_eq!(index.listings.lock().unwrap().len(), 2);
    }
}
