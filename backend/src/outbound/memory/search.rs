//! Substring search across posts, courses, and members.

use async_trait::async_trait;

use crate::domain::ports::{RepositoryError, SearchIndex};
use crate::domain::{
    CourseStatus, SearchHit, SearchKind, SearchQuery, SearchResults, rank_hits, snippet,
};

use super::MemoryStore;

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

impl MemoryStore {
    fn post_hits(&self, query: &SearchQuery, needle: &str) -> Result<Vec<SearchHit>, RepositoryError> {
        Ok(self
            .posts
            .select(|post| {
                post.community_id == query.community_id
                    && (contains(&post.title, needle) || contains(&post.content, needle))
            })?
            .into_iter()
            .map(|post| SearchHit {
                id: post.id,
                kind: SearchKind::Posts,
                title: post.title,
                snippet: Some(snippet(&post.content)),
                created_at: post.created_at,
            })
            .collect())
    }

    fn course_hits(
        &self,
        query: &SearchQuery,
        needle: &str,
    ) -> Result<Vec<SearchHit>, RepositoryError> {
        Ok(self
            .courses
            .select(|course| {
                course.community_id == query.community_id
                    && course.status == CourseStatus::Published
                    && (contains(&course.title, needle)
                        || course
                            .description
                            .as_deref()
                            .is_some_and(|text| contains(text, needle)))
            })?
            .into_iter()
            .map(|course| SearchHit {
                id: course.id,
                kind: SearchKind::Courses,
                title: course.title,
                snippet: course.description.as_deref().map(snippet),
                created_at: course.created_at,
            })
            .collect())
    }

    fn member_hits(
        &self,
        query: &SearchQuery,
        needle: &str,
    ) -> Result<Vec<SearchHit>, RepositoryError> {
        let memberships = self
            .memberships
            .select(|membership| membership.community_id == query.community_id)?;
        let mut hits = Vec::new();
        for membership in memberships {
            let Some(record) = self.users.get(&membership.user_id)? else {
                continue;
            };
            if contains(&record.user.display_name, needle) {
                hits.push(SearchHit {
                    id: record.user.id,
                    kind: SearchKind::Members,
                    title: record.user.display_name,
                    snippet: record.user.bio.as_deref().map(snippet),
                    created_at: membership.joined_at,
                });
            }
        }
        Ok(hits)
    }
}

#[async_trait]
impl SearchIndex for MemoryStore {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResults, RepositoryError> {
        let needle = query.text.to_lowercase();
        let mut hits = Vec::new();
        if query.kind.includes(SearchKind::Posts) {
            hits.extend(self.post_hits(query, &needle)?);
        }
        if query.kind.includes(SearchKind::Courses) {
            hits.extend(self.course_hits(query, &needle)?);
        }
        if query.kind.includes(SearchKind::Members) {
            hits.extend(self.member_hits(query, &needle)?);
        }

        rank_hits(&mut hits);
        let total = hits.len() as u64;
        Ok(SearchResults {
            hits: query.page.slice(hits),
            total,
            limit: query.page.limit(),
            offset: query.page.offset(),
        })
    }
}
