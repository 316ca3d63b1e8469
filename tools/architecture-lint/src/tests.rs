//! Unit tests for the architecture lint.

use std::path::PathBuf;

use rstest::rstest;

use super::*;

fn lint_one(file: &str, contents: &str) -> Result<(), ArchitectureLintError> {
    lint_sources(&[LintSource {
        file: PathBuf::from(file),
        contents: contents.to_owned(),
    }])
}

#[rstest]
#[case(
    "inbound/http/comments.rs",
    "use crate::domain::NewComment; fn handler() { let _ = NewComment::default; }",
    true
)]
#[case(
    "inbound/http/comments.rs",
    "use crate::outbound::persistence::DieselCommentRepository; fn handler() {}",
    false
)]
#[case(
    "inbound/http/comments.rs",
    "use commons::outbound::memory::MemoryStore; fn handler() {}",
    false
)]
#[case("inbound/http/comments.rs", "use diesel::prelude::*; fn handler() {}", false)]
#[case(
    "domain/comment_service.rs",
    "use crate::inbound::http::ApiResult; fn thing() {}",
    false
)]
#[case(
    "domain/comment.rs",
    "use utoipa::ToSchema; #[derive(ToSchema)] struct Comment;",
    false
)]
#[case(
    "domain/comment.rs",
    "fn render() { let _ = actix_web::HttpResponse::Ok(); }",
    false
)]
#[case(
    "outbound/persistence/diesel_comment_repository.rs",
    "use crate::inbound::http; fn thing() {}",
    false
)]
#[case(
    "outbound/persistence/diesel_comment_repository.rs",
    "use crate::domain::ports::CommentRepository; use diesel::prelude::*; fn thing() {}",
    true
)]
fn detects_boundary_violations(#[case] file: &str, #[case] contents: &str, #[case] ok: bool) {
    let result = lint_one(file, contents);
    assert_eq!(result.is_ok(), ok, "result: {result:?}");
}

#[rstest]
fn cfg_test_items_are_skipped() {
    let contents = r"
        use crate::domain::Post;

        #[cfg(test)]
        mod tests {
            use crate::outbound::security::HmacWebhookVerifier;
        }
    ";
    assert!(lint_one("inbound/http/payments.rs", contents).is_ok());
}

#[rstest]
#[case("inbound/http/test_utils.rs")]
#[case("domain/post_service_tests.rs")]
#[case("domain/test_fixtures.rs")]
fn test_only_files_are_skipped(#[case] file: &str) {
    assert!(lint_one(file, "use crate::outbound::memory::in_memory_repositories;").is_ok());
}

#[rstest]
fn files_outside_layers_are_rejected() {
    let result = lint_one("server/mod.rs", "fn main() {}");
    assert!(matches!(result, Err(ArchitectureLintError::Parse { .. })));
}

#[rstest]
fn violations_are_listed_once_per_rule() {
    let contents = "use crate::outbound::a; use crate::outbound::b; fn f() {}";
    let Err(ArchitectureLintError::Violations(violations)) =
        lint_one("inbound/http/posts.rs", contents)
    else {
        panic!("expected violations");
    };
    assert_eq!(violations.len(), 1);
    assert_eq!(
        violations[0].message,
        "inbound module must not depend on crate::outbound"
    );
}
