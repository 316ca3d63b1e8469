//! Driven port for community search.

use async_trait::async_trait;

use crate::domain::{SearchQuery, SearchResults};

use super::RepositoryError;

/// Text search over the live posts, courses, and members of a community.
///
/// Matching is case-insensitive substring matching on titles, bodies, and
/// display names. Hits are ranked newest first before the page window is
/// applied; `total` counts every match.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchIndex: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResults, RepositoryError>;
}
