// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The graph capability consumed by edit operations and comparators.
//!
//! A [`Graph`] is an immutable version: every structural change goes through
//! one of the `with_*` / `without_*` factory methods and yields a new version,
//! leaving the receiver untouched. Ids are dense and version-local.

use thiserror::Error;

/// Dense, version-local node identifier.
pub type NodeId = usize;
/// Dense, version-local edge identifier.
pub type EdgeId = usize;

/// Structural precondition failures reported by the version factories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Referenced a node id that does not exist in this version.
    #[error("missing node: {0}")]
    MissingNode(NodeId),
    /// Referenced an edge id that does not exist in this version.
    #[error("missing edge: {0}")]
    MissingEdge(EdgeId),
    /// An edge endpoint does not exist in this version.
    #[error("missing edge endpoint {endpoint} (edge {from} -> {to})")]
    MissingEndpoint {
        /// Requested source node.
        from: NodeId,
        /// Requested destination node.
        to: NodeId,
        /// The endpoint that was not found.
        endpoint: NodeId,
    },
    /// Tried to delete a node that still has incident edges.
    ///
    /// Node deletion must not cascade; callers delete the edges first.
    #[error("node {node} is not isolated (degree {degree})")]
    NodeNotIsolated {
        /// The node that was targeted.
        node: NodeId,
        /// Its in-degree plus out-degree.
        degree: usize,
    },
}

/// Read and version-producing capability over one immutable graph version.
///
/// Lookups return `None` for ids that do not exist in this version.
pub trait Graph: Sized {
    /// Number of nodes; also the id the next added node receives.
    fn node_count(&self) -> usize;

    /// Number of edges; also the id the next added edge receives.
    fn edge_count(&self) -> usize;

    /// Label of `node`.
    fn node_label(&self, node: NodeId) -> Option<&str>;

    /// Label of `edge` (empty string when the edge was added unlabeled).
    fn edge_label(&self, edge: EdgeId) -> Option<&str>;

    /// Single-byte classification tag of `node`.
    fn node_tag(&self, node: NodeId) -> Option<u8>;

    /// Single-byte classification tag of `edge`.
    fn edge_tag(&self, edge: EdgeId) -> Option<u8>;

    /// Numeric weight of `edge`.
    fn edge_weight(&self, edge: EdgeId) -> Option<f64>;

    /// `(from, to)` of `edge`.
    fn edge_endpoints(&self, edge: EdgeId) -> Option<(NodeId, NodeId)>;

    /// Number of edges ending at `node`.
    fn in_degree(&self, node: NodeId) -> Option<usize>;

    /// Number of edges starting at `node`.
    fn out_degree(&self, node: NodeId) -> Option<usize>;

    /// In-degree plus out-degree (a self-loop counts twice).
    fn degree(&self, node: NodeId) -> Option<usize> {
        Some(self.in_degree(node)? + self.out_degree(node)?)
    }

    /// Returns `true` if `node` exists and has no incident edges.
    fn is_isolated(&self, node: NodeId) -> bool {
        self.degree(node) == Some(0)
    }

    /// New version with an extra node labeled `label`, id = `node_count()`.
    fn with_node(&self, label: &str) -> Result<Self, GraphError>;

    /// New version without the isolated `node`; nodes above it shift down by one.
    fn without_node(&self, node: NodeId) -> Result<Self, GraphError>;

    /// New version with a directed edge `from -> to`, id = `edge_count()`.
    fn with_edge(
        &self,
        from: NodeId,
        to: NodeId,
        label: Option<&str>,
    ) -> Result<Self, GraphError>;

    /// New version without `edge`; edges above it shift down by one.
    fn without_edge(&self, edge: EdgeId) -> Result<Self, GraphError>;

    /// New version where `node` carries `label`.
    fn with_node_label(&self, node: NodeId, label: &str) -> Result<Self, GraphError>;
}
