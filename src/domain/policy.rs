/// What to do with the remaining imports of a package when one of them fails to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildFailure {
    /// Stop processing the package's remaining imports
    AbortSiblings,
    /// Log and move on to the next import
    SkipChild,
}

/// How a discovered parent package is emitted into the node list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfNode {
    /// Always append, even if the package was already emitted as someone's import
    Always,
    /// Append only when no equal node is present yet
    Dedup,
}

/// Build policy for the graph builder.
///
/// `literal()` reproduces the historical output byte for byte; `corrected()`
/// keeps sibling imports after a failure and never repeats a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildPolicy {
    pub on_child_failure: ChildFailure,
    pub self_node: SelfNode,
}

impl Default for BuildPolicy {
    fn default() -> Self {
        Self::literal()
    }
}

impl BuildPolicy {
    pub fn literal() -> Self {
        Self {
            on_child_failure: ChildFailure::AbortSiblings,
            self_node: SelfNode::Always,
        }
    }

    pub fn corrected() -> Self {
        Self {
            on_child_failure: ChildFailure::SkipChild,
            self_node: SelfNode::Dedup,
        }
    }

    pub fn name(&self) -> &'static str {
        match (self.on_child_failure, self.self_node) {
            (ChildFailure::AbortSiblings, SelfNode::Always) => "literal",
            (ChildFailure::SkipChild, SelfNode::Dedup) => "corrected",
            _ => "custom",
        }
    }
}
