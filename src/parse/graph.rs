//! petgraph-based directed graph wrapper for the visual workflow.

use std::collections::{HashMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use petgraph::visit::Dfs;

use super::types::{WorkflowEdge, WorkflowNode};

pub struct WorkflowGraph {
    pub graph: DiGraph<String, String>,
    pub node_indices: HashMap<String, NodeIndex>,
    dangling_edges: Vec<String>,
}

impl WorkflowGraph {
    /// Build the adjacency graph. Every node gets a vertex even without
    /// outgoing edges; nodes sharing an id share a vertex. Edges whose
    /// source or target is not a known node are skipped, not rejected.
    pub fn build(nodes: &[WorkflowNode], edges: &[WorkflowEdge]) -> Self {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();
        let mut dangling_edges = Vec::new();

        for node in nodes {
            node_indices
                .entry(node.id().to_string())
                .or_insert_with(|| graph.add_node(node.id().to_string()));
        }

        for edge in edges {
            match (node_indices.get(&edge.source), node_indices.get(&edge.target)) {
                (Some(&s), Some(&t)) => {
                    graph.add_edge(s, t, edge.id.clone());
                }
                _ => {
                    log::debug!(
                        "skipping edge '{}' ({} -> {}): endpoint is not a node",
                        edge.id,
                        edge.source,
                        edge.target
                    );
                    dangling_edges.push(edge.id.clone());
                }
            }
        }

        WorkflowGraph {
            graph,
            node_indices,
            dangling_edges,
        }
    }

    /// Ids of edges that were left out because an endpoint is missing.
    pub fn dangling_edges(&self) -> &[String] {
        &self.dangling_edges
    }

    /// Whether `to` can be reached from `from` along directed edges.
    /// Each vertex is visited at most once, so cycles terminate.
    pub fn is_reachable(&self, from: &str, to: &str) -> bool {
        let (Some(&start), Some(&goal)) = (self.node_indices.get(from), self.node_indices.get(to))
        else {
            return false;
        };

        let mut dfs = Dfs::new(&self.graph, start);
        while let Some(nx) = dfs.next(&self.graph) {
            if nx == goal {
                return true;
            }
        }
        false
    }

    /// Ids of the nodes with an edge into `node_id`, or `None` when no node
    /// has that id. Edges skipped during build do not count.
    pub fn upstream_ids(&self, node_id: &str) -> Option<HashSet<&str>> {
        let &idx = self.node_indices.get(node_id)?;
        Some(
            self.graph
                .neighbors_directed(idx, Direction::Incoming)
                .map(|n| self.graph[n].as_str())
                .collect(),
        )
    }
}
