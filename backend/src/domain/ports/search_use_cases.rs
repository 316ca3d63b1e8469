//! Driving port for community search.

use async_trait::async_trait;

use crate::domain::{SearchQuery, SearchResults};

use super::define_use_case_error;

define_use_case_error! {
    /// Failures of search use cases.
    pub enum SearchError {
        InvalidInput { message: String } => "invalid search input: {message}" as InvalidRequest,
    }
}

/// Search use cases.
#[async_trait]
pub trait SearchUseCases: Send + Sync {
    async fn search(&self, query: SearchQuery) -> Result<SearchResults, SearchError>;
}
