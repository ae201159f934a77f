//! File-level dependency graph
//!
//! Nodes are project file paths, edges are resolved local imports.
//! Multi-edges and self-edges are kept as-is. Both sets are capped; once
//! a cap is hit later inserts are dropped in discovery order. That is a
//! deliberate lossy projection: callers must not assume every file or
//! edge is represented on very large projects.

use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::FxHashMap;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use tracing::debug;

/// Node cap; first 1000 files in enumeration order survive.
pub const MAX_NODES: usize = 1000;

/// Edge cap; first 2000 resolved imports in discovery order survive.
pub const MAX_EDGES: usize = 2000;

/// Directed file-import graph with capped, insertion-ordered storage.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    graph: DiGraph<String, ()>,
    index: FxHashMap<String, NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node unless the cap is hit. Re-adding an existing path is a
    /// no-op. Returns whether the path is present afterwards.
    pub fn add_node(&mut self, path: &str) -> bool {
        if self.index.contains_key(path) {
            return true;
        }
        if self.graph.node_count() >= MAX_NODES {
            debug!("Node cap reached; dropping {}", path);
            return false;
        }
        let idx = self.graph.add_node(path.to_string());
        self.index.insert(path.to_string(), idx);
        true
    }

    /// Add an edge between two present nodes unless the edge cap is hit.
    /// Parallel edges and self-edges are allowed.
    pub fn add_edge(&mut self, from: &str, to: &str) -> bool {
        if self.graph.edge_count() >= MAX_EDGES {
            return false;
        }
        let (Some(&a), Some(&b)) = (self.index.get(from), self.index.get(to)) else {
            return false;
        };
        self.graph.add_edge(a, b, ());
        true
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Edges divided by nodes; proxy for architectural entanglement.
    pub fn coupling_ratio(&self) -> f64 {
        self.graph.edge_count() as f64 / self.graph.node_count().max(1) as f64
    }

    /// Node paths in insertion order.
    pub fn nodes(&self) -> Vec<&str> {
        self.graph.node_weights().map(|w| w.as_str()).collect()
    }

    /// Edges in discovery order as (source, target) paths.
    pub fn edges(&self) -> Vec<(&str, &str)> {
        self.graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_endpoints(e))
            .map(|(a, b)| (self.graph[a].as_str(), self.graph[b].as_str()))
            .collect()
    }
}

impl Serialize for DependencyGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(serde::Serialize)]
        struct Edge<'a> {
            from: &'a str,
            to: &'a str,
        }

        let edges: Vec<Edge> = self
            .edges()
            .into_iter()
            .map(|(from, to)| Edge { from, to })
            .collect();

        let mut s = serializer.serialize_struct("DependencyGraph", 2)?;
        s.serialize_field("nodes", &self.nodes())?;
        s.serialize_field("edges", &edges)?;
        s.end()
    }
}
