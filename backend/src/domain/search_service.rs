//! Community search service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{SearchError, SearchIndex, SearchUseCases};
use crate::domain::text::required_text;
use crate::domain::{SearchQuery, SearchResults};

const MAX_QUERY_CHARS: usize = 200;

/// Search service implementing [`SearchUseCases`].
pub struct SearchService<S: ?Sized> {
    index: Arc<S>,
}

impl<S: ?Sized> SearchService<S> {
    pub fn new(index: Arc<S>) -> Self {
        Self { index }
    }
}

#[async_trait]
impl<S> SearchUseCases for SearchService<S>
where
    S: SearchIndex + ?Sized,
{
    async fn search(&self, mut query: SearchQuery) -> Result<SearchResults, SearchError> {
        query.text =
            required_text("q", &query.text, MAX_QUERY_CHARS).map_err(SearchError::invalid_input)?;
        Ok(self.index.search(&query).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockSearchIndex;
    use crate::domain::test_fixtures::id;
    use crate::domain::{PageRequest, SearchKind};

    fn query(text: &str) -> SearchQuery {
        SearchQuery {
            community_id: id(100),
            text: text.to_owned(),
            kind: SearchKind::All,
            page: PageRequest::default(),
        }
    }

    #[tokio::test]
    async fn trims_text_and_uses_default_page() {
        let mut index = MockSearchIndex::new();
        index
            .expect_search()
            .withf(|query| query.text == "rust" && query.page.limit() == 20 && query.page.offset() == 0)
            .times(1)
            .return_once(|query| {
                Ok(SearchResults {
                    hits: Vec::new(),
                    total: 0,
                    limit: query.page.limit(),
                    offset: query.page.offset(),
                })
            });
        let service = SearchService::new(Arc::new(index));

        let results = service.search(query("  rust ")).await.expect("searched");
        assert_eq!((results.limit, results.offset), (20, 0));
    }

    #[tokio::test]
    async fn blank_text_is_rejected_before_searching() {
        let mut index = MockSearchIndex::new();
        index.expect_search().times(0);
        let service = SearchService::new(Arc::new(index));

        let error = service.search(query("   ")).await.expect_err("blank");
        assert!(matches!(error, SearchError::InvalidInput { .. }));
    }
}
