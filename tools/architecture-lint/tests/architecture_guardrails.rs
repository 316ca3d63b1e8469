//! Guardrails run against source trees written to disk.

use std::fs;
use std::path::Path;

use architecture_lint::{ArchitectureLintError, lint_backend_sources};
use rstest::{fixture, rstest};
use tempfile::TempDir;

#[fixture]
fn backend() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    write(
        dir.path(),
        "domain/post.rs",
        "use uuid::Uuid; pub struct Post { pub id: Uuid }",
    );
    write(
        dir.path(),
        "inbound/http/posts.rs",
        "use crate::domain::Post; use actix_web::web; pub fn handler(_: web::Json<()>) {}",
    );
    write(
        dir.path(),
        "outbound/persistence/diesel_post_repository.rs",
        "use crate::domain::Post; use diesel::prelude::*;",
    );
    dir
}

fn write(backend: &Path, relative: &str, contents: &str) {
    let path = backend.join("src").join(relative);
    fs::create_dir_all(path.parent().expect("parent dir")).expect("create dirs");
    fs::write(path, contents).expect("write source");
}

#[rstest]
fn layered_tree_passes(backend: TempDir) {
    lint_backend_sources(backend.path()).expect("clean tree");
}

#[rstest]
fn every_cross_layer_import_is_reported(backend: TempDir) {
    write(
        backend.path(),
        "inbound/http/comments.rs",
        "use commons::outbound::persistence::DieselCommentRepository;",
    );
    write(
        backend.path(),
        "domain/comment.rs",
        "use actix_web::HttpResponse;",
    );

    let Err(ArchitectureLintError::Violations(violations)) = lint_backend_sources(backend.path())
    else {
        panic!("expected violations");
    };
    let mut files: Vec<String> = violations
        .iter()
        .map(|violation| violation.file.display().to_string())
        .collect();
    files.sort();
    assert_eq!(files, ["domain/comment.rs", "inbound/http/comments.rs"]);
}
