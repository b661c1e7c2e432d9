use crate::domain::node::ImportPath;
use anyhow::Result;
use std::path::PathBuf;

/// What the build system knows about one package
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedPackage {
    /// On-disk directory holding the package source (may be empty)
    pub dir: PathBuf,
    /// Shipped with the toolchain's base distribution
    pub is_standard: bool,
    /// Direct imports of the package's non-test sources
    pub imports: Vec<ImportPath>,
}

/// Package resolver port (implemented by Infrastructure)
pub trait PackageResolver: Send + Sync {
    /// Resolve an import path. An error abandons only the branch that asked for it.
    fn resolve(&self, import_path: &str) -> Result<ResolvedPackage>;
}

/// Module identity read from the project manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleInfo {
    /// Root import path declared by the manifest
    pub module_path: ImportPath,
    /// Directory that contains the manifest
    pub project_root: PathBuf,
}

/// Module manifest port (implemented by Infrastructure)
pub trait ModuleSource {
    fn load(&self) -> Result<ModuleInfo>;
}
