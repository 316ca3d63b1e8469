//! Spaces group channels inside a community.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::label::define_label_enum;

define_label_enum! {
    /// Who can see a space.
    pub enum SpaceVisibility {
        Public => "public",
        Private => "private",
    }
}

/// A named area of a community.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Space {
    pub id: Uuid,
    pub community_id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub visibility: SpaceVisibility,
    pub position: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Input for creating a space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSpace {
    pub community_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub visibility: SpaceVisibility,
}

/// Partial update of a space.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpaceChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub visibility: Option<SpaceVisibility>,
    pub position: Option<u32>,
}
