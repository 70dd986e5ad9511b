// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Graph builders and seeded random graphs for tests.

use ged_core::Prng;
use ged_graph::{EdgeRecord, GraphError, NodeId, NodeRecord, VersionedGraph};

/// Fluent builder for small [`VersionedGraph`] fixtures.
///
/// # Example
///
/// ```
/// use ged_dry_tests::GraphBuilder;
/// use ged_graph::Graph;
///
/// let g = GraphBuilder::new()
///     .nodes(["a", "b", "c"])
///     .edge(0, 1)
///     .labeled_edge(1, 2, "next")
///     .build()
///     .unwrap();
/// assert_eq!(g.edge_count(), 2);
/// assert_eq!(g.edge_label(1), Some("next"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    nodes: Vec<NodeRecord>,
    edges: Vec<EdgeRecord>,
}

impl GraphBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node with `label`.
    pub fn node(mut self, label: &str) -> Self {
        self.nodes.push(NodeRecord::new(label));
        self
    }

    /// Append one node per label, in order.
    pub fn nodes<'a>(mut self, labels: impl IntoIterator<Item = &'a str>) -> Self {
        self.nodes.extend(labels.into_iter().map(NodeRecord::new));
        self
    }

    /// Append a node with `label` and type `tag`.
    pub fn tagged_node(mut self, label: &str, tag: u8) -> Self {
        self.nodes.push(NodeRecord::new(label).tagged(tag));
        self
    }

    /// Append an unlabeled unit-weight edge.
    pub fn edge(mut self, from: NodeId, to: NodeId) -> Self {
        self.edges.push(EdgeRecord::new(from, to));
        self
    }

    /// Append a labeled edge.
    pub fn labeled_edge(mut self, from: NodeId, to: NodeId, label: &str) -> Self {
        self.edges.push(EdgeRecord::new(from, to).labeled(label));
        self
    }

    /// Append an edge with `weight`.
    pub fn weighted_edge(mut self, from: NodeId, to: NodeId, weight: f64) -> Self {
        self.edges.push(EdgeRecord::new(from, to).weighted(weight));
        self
    }

    /// Build version `0`.
    ///
    /// # Errors
    /// Returns [`GraphError::MissingEndpoint`] if an edge names a node that
    /// was never added.
    pub fn build(self) -> Result<VersionedGraph, GraphError> {
        VersionedGraph::from_records(self.nodes, self.edges)
    }
}

/// `n` edgeless nodes labeled `n0`, `n1`, ...
#[must_use]
pub fn isolated_nodes(n: usize) -> VersionedGraph {
    (0..n).fold(VersionedGraph::new(), |g, i| {
        g.with_node_record(NodeRecord::new(format!("n{i}")))
    })
}

/// Directed path `n0 -> n1 -> ... -> n{n-1}`.
#[must_use]
#[allow(clippy::expect_used)]
pub fn path_graph(n: usize) -> VersionedGraph {
    let nodes = (0..n).map(|i| NodeRecord::new(format!("n{i}"))).collect();
    let edges = (1..n).map(|i| EdgeRecord::new(i - 1, i)).collect();
    VersionedGraph::from_records(nodes, edges).expect("path endpoints are in range")
}

/// Random graph with `nodes` nodes and `edges` edges drawn from `seed`.
///
/// Node labels are drawn from `labels`; edge endpoints are
/// uniform and may repeat or form self-loops. Equal arguments give equal
/// graphs. With `nodes == 0` the result has no edges.
#[must_use]
#[allow(clippy::expect_used)]
pub fn seeded_graph(nodes: usize, edges: usize, labels: &[&str], seed: u64) -> VersionedGraph {
    let mut prng = Prng::from_seed_u64(seed);
    let ids: Vec<NodeId> = (0..nodes).collect();
    let node_records = (0..nodes)
        .map(|i| {
            let label = prng
                .choose(labels)
                .map_or_else(|| format!("n{i}"), |l| (*l).to_string());
            NodeRecord::new(label)
        })
        .collect();
    let mut edge_records = Vec::with_capacity(edges);
    if !ids.is_empty() {
        for _ in 0..edges {
            let (Some(&from), Some(&to)) = (prng.choose(&ids), prng.choose(&ids)) else {
                break;
            };
            edge_records.push(EdgeRecord::new(from, to));
        }
    }
    VersionedGraph::from_records(node_records, edge_records)
        .expect("endpoints are drawn from existing nodes")
}
