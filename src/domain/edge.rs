use crate::domain::node::ImportPath;
use serde::{Deserialize, Serialize};

/// Import relationship: `from` directly imports `to`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    #[serde(rename = "From")]
    pub from: ImportPath,
    #[serde(rename = "To")]
    pub to: ImportPath,
}

impl Edge {
    pub fn new(from: impl Into<ImportPath>, to: impl Into<ImportPath>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}
