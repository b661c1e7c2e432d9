use serde::{Deserialize, Serialize};

/// Package import path (e.g. `github.com/foo/bar`)
pub type ImportPath = String;

/// Package classification relative to the project being viewed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PackageType {
    /// Source lives under the project root
    #[serde(rename = "loc")]
    Local,
    /// Shipped with the Go toolchain
    #[serde(rename = "std")]
    Standard,
    /// Third-party dependency
    #[serde(rename = "ext")]
    External,
}

impl PackageType {
    /// Local wins over standard, standard wins over the external default.
    pub fn classify(is_local: bool, is_standard: bool) -> Self {
        if is_local {
            PackageType::Local
        } else if is_standard {
            PackageType::Standard
        } else {
            PackageType::External
        }
    }
}

/// One package in the rendered graph.
///
/// Equality covers both fields: the same import path seen with two different
/// types yields two distinct nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "Name")]
    pub name: ImportPath,
    #[serde(rename = "Type")]
    pub package_type: PackageType,
}

impl Node {
    pub fn new(name: impl Into<ImportPath>, package_type: PackageType) -> Self {
        Self {
            name: name.into(),
            package_type,
        }
    }

    pub fn local(name: impl Into<ImportPath>) -> Self {
        Self::new(name, PackageType::Local)
    }
}
