//! Import graphs shared by integration tests. The project root is `/proj`.
#![allow(dead_code)]

use std::sync::Arc;

use gopkgviewer::domain::builder::GraphBuilder;
use gopkgviewer::domain::locality::LocalityClassifier;
use gopkgviewer::domain::policy::BuildPolicy;

use super::mock::MockResolver;

pub const ROOT: &str = "proj";
pub const PROJECT_ROOT: &str = "/proj";

pub fn builder_for(resolver: Arc<MockResolver>, policy: BuildPolicy) -> GraphBuilder {
    GraphBuilder::new(
        resolver,
        LocalityClassifier::new(PROJECT_ROOT).unwrap(),
        policy,
    )
}

/// proj → {proj/x, fmt}; proj/x → github.com/foo/bar
pub fn scenario_project() -> MockResolver {
    MockResolver::new()
        .with_local("proj", &["proj/x", "fmt"])
        .with_local("proj/x", &["github.com/foo/bar"])
        .with_std("fmt")
        .with_ext("github.com/foo/bar", &["github.com/foo/baz"])
        .with_ext("github.com/foo/baz", &[])
}

pub fn empty_project() -> MockResolver {
    MockResolver::new().with_local("proj", &[])
}

/// proj → proj/a → proj/b → {proj/a, proj}
pub fn cycle_project() -> MockResolver {
    MockResolver::new()
        .with_local("proj", &["proj/a"])
        .with_local("proj/a", &["proj/b"])
        .with_local("proj/b", &["proj/a", "proj"])
}

/// proj → {proj/b, proj/a}; proj/a → proj/b; proj/b → fmt
///
/// proj/b is discovered before proj/a but imported by it.
pub fn diamond_project() -> MockResolver {
    MockResolver::new()
        .with_local("proj", &["proj/b", "proj/a"])
        .with_local("proj/a", &["proj/b"])
        .with_local("proj/b", &["fmt"])
        .with_std("fmt")
}

/// proj → {proj/a, example.com/missing, fmt}; the middle import cannot be resolved
pub fn unresolvable_project() -> MockResolver {
    MockResolver::new()
        .with_local("proj", &["proj/a", "example.com/missing", "fmt"])
        .with_local("proj/a", &[])
        .with_std("fmt")
}

/// proj → {example.com/missing, fmt}; the very first import fails
pub fn failing_first_import_project() -> MockResolver {
    MockResolver::new()
        .with_local("proj", &["example.com/missing", "fmt"])
        .with_std("fmt")
}

/// proj → proj/internal/sys, which the resolver also flags as standard
pub fn local_flagged_standard_project() -> MockResolver {
    MockResolver::new()
        .with_local("proj", &["proj/internal/sys"])
        .with_package("proj/internal/sys", "/proj/internal/sys", true, &[])
}
