//! Appending content versions for editable records.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::ports::{ContentVersionRepository, RepositoryError};
use super::{ContentKind, ContentVersion};

/// Text captured in one revision.
pub(crate) struct Revision<'a> {
    pub content_id: Uuid,
    pub kind: ContentKind,
    pub title: &'a str,
    pub body: &'a str,
    pub editor_id: Uuid,
}

/// Record `revision` as the next version after the latest stored one.
pub(crate) async fn append_revision<V>(
    versions: &V,
    revision: Revision<'_>,
    now: DateTime<Utc>,
) -> Result<ContentVersion, RepositoryError>
where
    V: ContentVersionRepository + ?Sized,
{
    let latest = versions.latest_version(&revision.content_id).await?;
    let version = ContentVersion {
        id: Uuid::new_v4(),
        content_id: revision.content_id,
        content_kind: revision.kind,
        version: latest.map_or(1, |number| number.saturating_add(1)),
        title: Some(revision.title.to_owned()),
        body: revision.body.to_owned(),
        editor_id: revision.editor_id,
        created_at: now,
    };
    versions.create(&version).await?;
    Ok(version)
}
