//! Mock implementations for integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Result, anyhow};
use gopkgviewer::domain::ports::{PackageResolver, ResolvedPackage};

/// Mock PackageResolver serving packages from an in-memory map.
///
/// Paths that were never registered fail to resolve. Every call is counted.
pub struct MockResolver {
    packages: HashMap<String, ResolvedPackage>,
    calls: Mutex<HashMap<String, usize>>,
}

impl MockResolver {
    pub fn new() -> Self {
        Self {
            packages: HashMap::new(),
            calls: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_package(
        mut self,
        import_path: &str,
        dir: &str,
        is_standard: bool,
        imports: &[&str],
    ) -> Self {
        self.packages.insert(
            import_path.to_string(),
            ResolvedPackage {
                dir: PathBuf::from(dir),
                is_standard,
                imports: imports.iter().map(|s| s.to_string()).collect(),
            },
        );
        self
    }

    /// Local package: its directory is derived from the import path under `/proj`.
    pub fn with_local(self, import_path: &str, imports: &[&str]) -> Self {
        let dir = format!("/{import_path}");
        self.with_package(import_path, &dir, false, imports)
    }

    pub fn with_std(self, import_path: &str) -> Self {
        let dir = format!("/usr/local/go/src/{import_path}");
        self.with_package(import_path, &dir, true, &[])
    }

    pub fn with_ext(self, import_path: &str, imports: &[&str]) -> Self {
        let dir = format!("/home/dev/go/pkg/mod/{import_path}@v1.0.0");
        self.with_package(import_path, &dir, false, imports)
    }

    pub fn calls(&self, import_path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(import_path)
            .copied()
            .unwrap_or(0)
    }
}

impl Default for MockResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageResolver for MockResolver {
    fn resolve(&self, import_path: &str) -> Result<ResolvedPackage> {
        *self
            .calls
            .lock()
            .unwrap()
            .entry(import_path.to_string())
            .or_default() += 1;

        self.packages
            .get(import_path)
            .cloned()
            .ok_or_else(|| anyhow!("cannot find package \"{}\"", import_path))
    }
}
