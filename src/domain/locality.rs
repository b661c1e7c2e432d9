//! Locality classification: does a package live under the project root?

use anyhow::{Context as _, Result};
use std::path::{Component, Path, PathBuf};

/// Decides whether a resolved package directory belongs to the project.
#[derive(Debug, Clone)]
pub struct LocalityClassifier {
    project_root: PathBuf,
}

impl LocalityClassifier {
    /// Fails when the root cannot be made absolute; the build cannot proceed without it.
    pub fn new(project_root: impl AsRef<Path>) -> Result<Self> {
        let project_root = resolve_path(project_root.as_ref()).with_context(|| {
            format!(
                "Failed to resolve project root: {}",
                project_root.as_ref().display()
            )
        })?;
        Ok(Self { project_root })
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// True iff `dir` equals the project root or is nested under it.
    ///
    /// The comparison is component-wise, so `/work/proj-old` is not under `/work/proj`.
    /// An empty `dir` means the package has no on-disk source and is never local.
    /// Symlinks are resolved for directories that exist.
    pub fn is_local(&self, dir: &Path) -> Result<bool> {
        if dir.as_os_str().is_empty() {
            return Ok(false);
        }
        let dir = resolve_path(dir)
            .with_context(|| format!("Failed to resolve package dir: {}", dir.display()))?;
        Ok(dir.starts_with(&self.project_root))
    }
}

/// Physical path of `path` when it exists, its lexically normalized absolute form otherwise.
pub fn resolve_path(path: &Path) -> Result<PathBuf> {
    std::fs::canonicalize(path).or_else(|_| absolutize(path))
}

/// Absolute, lexically normalized form of `path` (no filesystem access besides cwd).
fn absolutize(path: &Path) -> Result<PathBuf> {
    let abs = std::path::absolute(path)?;
    Ok(normalize(&abs))
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root
                if !matches!(
                    out.components().next_back(),
                    None | Some(Component::RootDir) | Some(Component::Prefix(_))
                ) {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_and_equal_dirs_are_local() {
        let c = LocalityClassifier::new("/work/proj").unwrap();
        assert!(c.is_local(Path::new("/work/proj")).unwrap());
        assert!(c.is_local(Path::new("/work/proj/internal/graph")).unwrap());
    }

    #[test]
    fn test_sibling_with_shared_prefix_is_not_local() {
        let c = LocalityClassifier::new("/work/proj").unwrap();
        assert!(!c.is_local(Path::new("/work/proj-old/pkg")).unwrap());
        assert!(!c.is_local(Path::new("/usr/local/go/src/fmt")).unwrap());
    }

    #[test]
    fn test_dot_segments_are_folded_before_comparison() {
        let c = LocalityClassifier::new("/work/proj/./").unwrap();
        assert_eq!(c.project_root(), Path::new("/work/proj"));
        assert!(c.is_local(Path::new("/work/other/../proj/x")).unwrap());
        assert!(!c.is_local(Path::new("/work/proj/../other")).unwrap());
    }

    #[test]
    fn test_relative_dirs_resolve_against_cwd() {
        let cwd = std::env::current_dir().unwrap().canonicalize().unwrap();
        let c = LocalityClassifier::new(&cwd).unwrap();
        assert!(c.is_local(Path::new("src/domain")).unwrap());
        assert!(c.is_local(Path::new(".")).unwrap());
    }

    #[test]
    fn test_empty_dir_is_never_local() {
        let c = LocalityClassifier::new("/work/proj").unwrap();
        assert!(!c.is_local(Path::new("")).unwrap());
    }

    #[test]
    fn test_normalize_stops_at_root() {
        assert_eq!(normalize(Path::new("/../a/./b/..")), PathBuf::from("/a"));
    }

    #[cfg(unix)]
    #[test]
    fn test_root_reached_through_symlink_matches_physical_package_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let real = tmp.path().join("real");
        std::fs::create_dir_all(real.join("internal/greet")).unwrap();
        let link = tmp.path().join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        // go list reports physical directories
        let c = LocalityClassifier::new(&link).unwrap();
        assert_eq!(c.project_root(), real.canonicalize().unwrap());
        assert!(c.is_local(&real.join("internal/greet")).unwrap());
        assert!(c.is_local(&link.join("internal/greet")).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_package_dir_pointing_outside_is_not_local() {
        let tmp = tempfile::tempdir().unwrap();
        let proj = tmp.path().join("proj");
        let vendored = tmp.path().join("elsewhere");
        std::fs::create_dir_all(&proj).unwrap();
        std::fs::create_dir_all(&vendored).unwrap();
        std::os::unix::fs::symlink(&vendored, proj.join("dep")).unwrap();

        let c = LocalityClassifier::new(&proj).unwrap();
        assert!(!c.is_local(&proj.join("dep")).unwrap());
    }
}
