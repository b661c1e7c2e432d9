use crate::domain::ports::{PackageResolver, ResolvedPackage};
use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::path::PathBuf;
use std::process::Command;

/// Subset of `go list -json` output we care about
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListedPackage {
    #[serde(default)]
    import_path: String,
    #[serde(default)]
    dir: String,
    #[serde(default)]
    goroot: bool,
    #[serde(default)]
    standard: bool,
    #[serde(default)]
    imports: Vec<String>,
    error: Option<ListError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListError {
    #[serde(default)]
    err: String,
}

/// Resolves packages with `go list -e -json <path>`, run from the project root
/// so that the module's `go.mod` governs resolution.
pub struct GoListResolver {
    project_root: PathBuf,
    go_binary: PathBuf,
}

impl GoListResolver {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            go_binary: PathBuf::from("go"),
        }
    }

    pub fn with_go_binary(mut self, go_binary: impl Into<PathBuf>) -> Self {
        self.go_binary = go_binary.into();
        self
    }
}

impl PackageResolver for GoListResolver {
    fn resolve(&self, import_path: &str) -> Result<ResolvedPackage> {
        let output = Command::new(&self.go_binary)
            .args(["list", "-e", "-json", import_path])
            .current_dir(&self.project_root)
            .output()
            .with_context(|| format!("Failed to run {}", self.go_binary.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "go list {} exited with {}: {}",
                import_path,
                output.status,
                stderr.trim()
            );
        }

        parse_list_output(&output.stdout)
            .with_context(|| format!("Failed to resolve package {}", import_path))
    }
}

/// Decode one `go list -json` object. A populated `Error` field is a failure.
pub(crate) fn parse_list_output(stdout: &[u8]) -> Result<ResolvedPackage> {
    let listed: ListedPackage =
        serde_json::from_slice(stdout).context("Failed to parse go list output")?;

    if let Some(error) = listed.error {
        return Err(anyhow!("{}", error.err.trim()));
    }

    tracing::trace!(import_path = %listed.import_path, dir = %listed.dir, "go list");

    Ok(ResolvedPackage {
        dir: PathBuf::from(listed.dir),
        is_standard: listed.goroot || listed.standard,
        imports: listed.imports,
    })
}
