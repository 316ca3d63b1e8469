//! Community search.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::PageRequest;
use super::label::define_label_enum;

define_label_enum! {
    /// Which records a search covers.
    pub enum SearchKind {
        All => "all",
        Posts => "posts",
        Courses => "courses",
        Members => "members",
    }
}

impl SearchKind {
    /// Whether results of `kind` are wanted.
    pub fn includes(self, kind: SearchKind) -> bool {
        self == Self::All || self == kind
    }
}

/// A search over one community.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub community_id: Uuid,
    pub text: String,
    pub kind: SearchKind,
    pub page: PageRequest,
}

/// One matching record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub id: Uuid,
    /// Never [`SearchKind::All`].
    pub kind: SearchKind,
    pub title: String,
    pub snippet: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A page of hits plus the total number of matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    pub hits: Vec<SearchHit>,
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
}

const SNIPPET_CHARS: usize = 160;

/// Shorten `text` to a snippet on a character boundary.
pub fn snippet(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(SNIPPET_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}

/// Order hits newest first, breaking ties by id.
pub fn rank_hits(hits: &mut [SearchHit]) {
    hits.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
}
