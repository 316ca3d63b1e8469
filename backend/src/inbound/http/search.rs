//! Community search handler.
//!
//! ```text
//! GET /api/v1/communities/{id}/search?q=borrow&kind=posts&limit=20&offset=0
//! ```

use actix_web::{get, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::domain::{PageRequest, SearchHit, SearchKind, SearchQuery, SearchResults};
use crate::inbound::http::ApiResult;
use crate::inbound::http::paging::default_limit;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, not_blank, parse_optional_label, parse_uuid, validated,
};

/// Query of the search endpoint; `limit` defaults to 20 and `offset` to 0.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Text to look for.
    #[validate(
        length(min = 1, max = 200, message = "must be between 1 and 200 characters"),
        custom(function = "not_blank")
    )]
    pub q: String,
    /// `all` (default), `posts`, `courses` or `members`.
    pub kind: Option<String>,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100, message = "must be between 1 and 100"))]
    #[param(minimum = 1, maximum = 100, default = 20)]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

/// One ranked search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchHitResponse {
    pub id: Uuid,
    /// `posts`, `courses` or `members`.
    pub kind: String,
    pub title: String,
    pub snippet: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}

impl From<SearchHit> for SearchHitResponse {
    fn from(hit: SearchHit) -> Self {
        Self {
            id: hit.id,
            kind: hit.kind.as_str().to_owned(),
            title: hit.title,
            snippet: hit.snippet,
            created_at: hit.created_at,
        }
    }
}

/// A page of hits plus the total match count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultsResponse {
    pub hits: Vec<SearchHitResponse>,
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
}

impl From<SearchResults> for SearchResultsResponse {
    fn from(results: SearchResults) -> Self {
        Self {
            hits: results.hits.into_iter().map(Into::into).collect(),
            total: results.total,
            limit: results.limit,
            offset: results.offset,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/communities/{id}/search",
    params(("id" = String, Path, description = "Community identifier"), SearchParams),
    responses(
        (status = 200, description = "Search results", body = SearchResultsResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["search"],
    operation_id = "search"
)]
#[get("/communities/{id}/search")]
pub async fn search(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<SearchParams>,
) -> ApiResult<web::Json<SearchResultsResponse>> {
    let community_id = parse_uuid(&path.into_inner(), FieldName::new("id"))?;
    let params = validated(query.into_inner())?;
    let kind = parse_optional_label(params.kind.as_deref(), FieldName::new("kind"))?
        .unwrap_or(SearchKind::All);
    let results = state
        .search
        .search(SearchQuery {
            community_id,
            text: params.q,
            kind,
            page: PageRequest::new(params.limit, params.offset),
        })
        .await?;
    Ok(web::Json(results.into()))
}
