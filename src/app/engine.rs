use crate::adapters::go::{GoListResolver, GoModFile};
use crate::app::dto::HealthResponse;
use crate::domain::builder::GraphBuilder;
use crate::domain::graph::PackageGraph;
use crate::domain::locality::LocalityClassifier;
use crate::domain::policy::BuildPolicy;
use crate::domain::ports::{ModuleInfo, ModuleSource, PackageResolver};
use anyhow::{Context as _, Result};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

/// A built graph together with its encoded `/data` payload.
///
/// The payload is encoded before the snapshot exists, so a failed encode never
/// replaces a served graph.
#[derive(Debug)]
pub struct GraphSnapshot {
    pub graph: PackageGraph,
    pub json: Vec<u8>,
}

impl GraphSnapshot {
    pub fn encode(graph: PackageGraph) -> Result<Self> {
        let json = graph.to_json().context("Failed to encode graph as JSON")?;
        Ok(Self { graph, json })
    }
}

#[derive(Clone)]
pub struct ViewerEngine {
    inner: Arc<RwLock<EngineData>>,
}

struct EngineData {
    module: ModuleInfo,
    builder: Arc<GraphBuilder>,
    snapshot: Arc<GraphSnapshot>,
}

impl ViewerEngine {
    /// Read `go.mod`, resolve packages through the Go toolchain, and build the
    /// first snapshot. Any failure here is a configuration error.
    pub fn load(manifest: &Path, policy: BuildPolicy) -> Result<Self> {
        let module = GoModFile::new(manifest).load()?;
        info!(
            module = %module.module_path,
            root = %module.project_root.display(),
            "loaded module manifest"
        );
        let resolver = Arc::new(GoListResolver::new(module.project_root.clone()));
        Self::from_parts(module, resolver, policy)
    }

    /// Construct an engine from an already-loaded module and any resolver.
    ///
    /// Used for testing or when packages are resolved by something other than `go list`.
    pub fn from_parts(
        module: ModuleInfo,
        resolver: Arc<dyn PackageResolver>,
        policy: BuildPolicy,
    ) -> Result<Self> {
        let classifier = LocalityClassifier::new(&module.project_root)?;
        let builder = Arc::new(GraphBuilder::new(resolver, classifier, policy));
        let snapshot = Arc::new(build_snapshot(&builder, &module)?);

        Ok(Self {
            inner: Arc::new(RwLock::new(EngineData {
                module,
                builder,
                snapshot,
            })),
        })
    }

    pub fn snapshot(&self) -> Arc<GraphSnapshot> {
        let data = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&data.snapshot)
    }

    pub fn health(&self) -> HealthResponse {
        let data = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        health_of(&data)
    }

    /// Rebuild the graph from scratch and swap it in. Blocking.
    ///
    /// The lock is only held for the swap, so readers keep getting the old
    /// snapshot while the build runs.
    pub fn reload(&self) -> Result<HealthResponse> {
        let (builder, module) = {
            let data = self.inner.read().unwrap_or_else(PoisonError::into_inner);
            (Arc::clone(&data.builder), data.module.clone())
        };
        let snapshot = Arc::new(build_snapshot(&builder, &module)?);

        let mut data = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        data.snapshot = snapshot;
        Ok(health_of(&data))
    }
}

fn build_snapshot(builder: &GraphBuilder, module: &ModuleInfo) -> Result<GraphSnapshot> {
    let graph = builder
        .build(&module.module_path)
        .with_context(|| format!("Failed to build graph for {}", module.module_path))?;
    GraphSnapshot::encode(graph)
}

fn health_of(data: &EngineData) -> HealthResponse {
    HealthResponse {
        module_path: data.module.module_path.clone(),
        project_root: data.module.project_root.to_string_lossy().to_string(),
        policy: data.builder.policy().name().to_string(),
        node_count: data.snapshot.graph.node_count(),
        edge_count: data.snapshot.graph.edge_count(),
    }
}
