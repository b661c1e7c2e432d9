use crate::domain::edge::Edge;
use crate::domain::graph::PackageGraph;
use crate::domain::locality::LocalityClassifier;
use crate::domain::node::{ImportPath, Node, PackageType};
use crate::domain::policy::{BuildPolicy, ChildFailure, SelfNode};
use crate::domain::ports::{PackageResolver, ResolvedPackage};
use anyhow::Result;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Graph builder - Domain Service for constructing PackageGraph
///
/// Holds only configuration; every `build` call owns its own traversal state,
/// so independent builds never interfere.
pub struct GraphBuilder {
    resolver: Arc<dyn PackageResolver>,
    classifier: LocalityClassifier,
    policy: BuildPolicy,
}

impl GraphBuilder {
    pub fn new(
        resolver: Arc<dyn PackageResolver>,
        classifier: LocalityClassifier,
        policy: BuildPolicy,
    ) -> Self {
        Self {
            resolver,
            classifier,
            policy,
        }
    }

    pub fn policy(&self) -> BuildPolicy {
        self.policy
    }

    /// Discover every package reachable from `root` through local imports and
    /// linearize the result.
    ///
    /// Unresolvable packages only cut their own branch. The only error is a
    /// path that cannot be made absolute during classification.
    pub fn build(&self, root: &str) -> Result<PackageGraph> {
        let mut traversal = Traversal::new(self);
        traversal.visit(root)?;
        let graph = traversal.linearize(root);

        info!(
            root,
            policy = self.policy.name(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "package graph built"
        );
        Ok(graph)
    }
}

/// State of a single build
struct Traversal<'b> {
    builder: &'b GraphBuilder,
    /// Direct imports of each parent, in import order
    packages: HashMap<ImportPath, Vec<Node>>,
    /// Parents in the order they first produced an edge
    discovery: Vec<ImportPath>,
    discovered: HashSet<ImportPath>,
    visited: HashSet<ImportPath>,
    /// Successful resolutions; the resolver is deterministic within a build
    resolved: HashMap<ImportPath, Rc<ResolvedPackage>>,
}

impl<'b> Traversal<'b> {
    fn new(builder: &'b GraphBuilder) -> Self {
        Self {
            builder,
            packages: HashMap::new(),
            discovery: Vec::new(),
            discovered: HashSet::new(),
            visited: HashSet::new(),
            resolved: HashMap::new(),
        }
    }

    fn resolve(&mut self, import_path: &str) -> Result<Rc<ResolvedPackage>> {
        if let Some(hit) = self.resolved.get(import_path) {
            return Ok(Rc::clone(hit));
        }
        let package = Rc::new(self.builder.resolver.resolve(import_path)?);
        self.resolved
            .insert(import_path.to_string(), Rc::clone(&package));
        Ok(package)
    }

    fn visit(&mut self, import_path: &str) -> Result<()> {
        if !self.visited.insert(import_path.to_string()) {
            return Ok(());
        }

        let package = match self.resolve(import_path) {
            Ok(package) => package,
            Err(e) => {
                warn!(import_path, error = %e, "failed to resolve package");
                return Ok(());
            }
        };
        debug!(import_path, imports = package.imports.len(), "visiting package");

        for child in &package.imports {
            let resolved = match self.resolve(child) {
                Ok(resolved) => resolved,
                Err(e) => {
                    warn!(import_path, import = %child, error = %e, "failed to resolve import");
                    match self.builder.policy.on_child_failure {
                        ChildFailure::AbortSiblings => break,
                        ChildFailure::SkipChild => continue,
                    }
                }
            };

            let is_local = self.builder.classifier.is_local(&resolved.dir)?;
            let package_type = PackageType::classify(is_local, resolved.is_standard);

            self.packages
                .entry(import_path.to_string())
                .or_default()
                .push(Node::new(child.clone(), package_type));

            // Records the parent, and only on its first edge
            if self.discovered.insert(import_path.to_string()) {
                self.discovery.push(import_path.to_string());
            }

            if package_type == PackageType::Local {
                self.visit(child)?;
            }
        }

        Ok(())
    }

    /// Emit parents last-discovered first, each after the imports it owns.
    fn linearize(self, root: &str) -> PackageGraph {
        let mut nodes: Vec<Node> = Vec::new();
        let mut seen: HashSet<Node> = HashSet::new();
        let mut edges: Vec<Edge> = Vec::new();

        for import_path in self.discovery.iter().rev() {
            for child in self.packages.get(import_path).into_iter().flatten() {
                if seen.insert(child.clone()) {
                    nodes.push(child.clone());
                }
                edges.push(Edge::new(import_path.clone(), child.name.clone()));
            }

            let own = Node::local(import_path.clone());
            match self.builder.policy.self_node {
                SelfNode::Always => {
                    seen.insert(own.clone());
                    nodes.push(own);
                }
                SelfNode::Dedup => {
                    if seen.insert(own.clone()) {
                        nodes.push(own);
                    }
                }
            }
        }

        // A root without a single resolved import still shows up
        if !self.discovered.contains(root) {
            let own = Node::local(root);
            if seen.insert(own.clone()) {
                nodes.push(own);
            }
        }

        PackageGraph { nodes, edges }
    }
}
