//! Query-string paging shared by list endpoints.

use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::domain::{DEFAULT_PAGE_LIMIT, PageRequest};

pub(crate) fn default_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}

/// `?limit=&offset=` with `limit` defaulting to 20 and `offset` to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Items per page, 1 to 100.
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100, message = "must be between 1 and 100"))]
    #[param(minimum = 1, maximum = 100, default = 20)]
    pub limit: u32,
    /// Items to skip.
    #[serde(default)]
    #[param(default = 0)]
    pub offset: u32,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl From<PageQuery> for PageRequest {
    fn from(query: PageQuery) -> Self {
        PageRequest::new(query.limit, query.offset)
    }
}
