// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Reference in-memory implementation of [`Graph`].
use std::sync::Arc;

use ciborium::ser::into_writer;
use serde::Serialize;

use crate::graph::{EdgeId, Graph, GraphError, NodeId};
use crate::record::{EdgeRecord, NodeRecord};

/// Blake3 digest of a version's canonical bytes.
pub type Hash32 = [u8; 32];

/// Error returned when canonical CBOR encoding fails.
pub type CanonicalError = ciborium::ser::Error<std::io::Error>;

#[derive(Debug, Default, Serialize)]
struct Contents {
    nodes: Vec<NodeRecord>,
    edges: Vec<EdgeRecord>,
    #[serde(skip)]
    in_degree: Vec<usize>,
    #[serde(skip)]
    out_degree: Vec<usize>,
}

impl Contents {
    fn rebuild_degrees(&mut self) {
        self.in_degree = vec![0; self.nodes.len()];
        self.out_degree = vec![0; self.nodes.len()];
        for edge in &self.edges {
            self.out_degree[edge.from] += 1;
            self.in_degree[edge.to] += 1;
        }
    }
}

/// Immutable graph version with dense node and edge ids.
///
/// Each factory call copies the contents into a fresh version and bumps
/// [`VersionedGraph::version`]; the receiver is never modified, so a single
/// start version can be shared by any number of independent edit replays.
///
/// Deleting node `k` shifts every node above `k` down by one and rewrites
/// edge endpoints to match; deleting edge `k` shifts every edge above it.
#[derive(Debug, Clone)]
pub struct VersionedGraph {
    contents: Arc<Contents>,
    version: u64,
}

impl Default for VersionedGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for VersionedGraph {
    /// Structural equality; the version counter is ignored.
    fn eq(&self, other: &Self) -> bool {
        self.contents.nodes == other.contents.nodes && self.contents.edges == other.contents.edges
    }
}

impl VersionedGraph {
    /// Creates an empty graph at version `0`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            contents: Arc::new(Contents::default()),
            version: 0,
        }
    }

    /// Builds version `0` from raw records.
    ///
    /// # Errors
    /// Returns [`GraphError::MissingEndpoint`] if an edge references a node
    /// index outside `nodes`.
    pub fn from_records(
        nodes: Vec<NodeRecord>,
        edges: Vec<EdgeRecord>,
    ) -> Result<Self, GraphError> {
        for edge in &edges {
            for endpoint in [edge.from, edge.to] {
                if endpoint >= nodes.len() {
                    return Err(GraphError::MissingEndpoint {
                        from: edge.from,
                        to: edge.to,
                        endpoint,
                    });
                }
            }
        }
        let mut contents = Contents {
            nodes,
            edges,
            ..Contents::default()
        };
        contents.rebuild_degrees();
        Ok(Self {
            contents: Arc::new(contents),
            version: 0,
        })
    }

    /// How many versions separate this graph from the one it was built from.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// All node records in id order.
    pub fn nodes(&self) -> &[NodeRecord] {
        &self.contents.nodes
    }

    /// All edge records in id order.
    pub fn edges(&self) -> &[EdgeRecord] {
        &self.contents.edges
    }

    /// Node record for `node`, if present.
    pub fn node(&self, node: NodeId) -> Option<&NodeRecord> {
        self.contents.nodes.get(node)
    }

    /// Edge record for `edge`, if present.
    pub fn edge(&self, edge: EdgeId) -> Option<&EdgeRecord> {
        self.contents.edges.get(edge)
    }

    /// New version with an extra fully specified node record.
    pub fn with_node_record(&self, record: NodeRecord) -> Self {
        self.derive(|c| {
            c.nodes.push(record);
            c.in_degree.push(0);
            c.out_degree.push(0);
        })
    }

    /// New version with an extra fully specified edge record.
    ///
    /// # Errors
    /// Returns [`GraphError::MissingEndpoint`] if either endpoint is absent.
    pub fn with_edge_record(&self, record: EdgeRecord) -> Result<Self, GraphError> {
        self.check_endpoints(record.from, record.to)?;
        Ok(self.derive(|c| {
            c.out_degree[record.from] += 1;
            c.in_degree[record.to] += 1;
            c.edges.push(record);
        }))
    }

    /// Canonical CBOR encoding of the nodes and edges, in id order.
    ///
    /// Ids are positional, so two versions with equal canonical bytes are
    /// structurally identical including their numbering.
    pub fn to_canonical_bytes(&self) -> Result<Vec<u8>, CanonicalError> {
        let mut bytes = Vec::new();
        into_writer(self.contents.as_ref(), &mut bytes)?;
        Ok(bytes)
    }

    /// Blake3 hash of [`VersionedGraph::to_canonical_bytes`].
    pub fn compute_hash(&self) -> Result<Hash32, CanonicalError> {
        Ok(blake3::hash(&self.to_canonical_bytes()?).into())
    }

    fn check_endpoints(&self, from: NodeId, to: NodeId) -> Result<(), GraphError> {
        for endpoint in [from, to] {
            if endpoint >= self.contents.nodes.len() {
                return Err(GraphError::MissingEndpoint { from, to, endpoint });
            }
        }
        Ok(())
    }

    fn derive(&self, edit: impl FnOnce(&mut Contents)) -> Self {
        let mut contents = Contents {
            nodes: self.contents.nodes.clone(),
            edges: self.contents.edges.clone(),
            in_degree: self.contents.in_degree.clone(),
            out_degree: self.contents.out_degree.clone(),
        };
        edit(&mut contents);
        Self {
            contents: Arc::new(contents),
            version: self.version + 1,
        }
    }
}

impl Graph for VersionedGraph {
    fn node_count(&self) -> usize {
        self.contents.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.contents.edges.len()
    }

    fn node_label(&self, node: NodeId) -> Option<&str> {
        self.node(node).map(|n| n.label.as_str())
    }

    fn edge_label(&self, edge: EdgeId) -> Option<&str> {
        self.edge(edge).map(|e| e.label.as_str())
    }

    fn node_tag(&self, node: NodeId) -> Option<u8> {
        self.node(node).map(|n| n.tag)
    }

    fn edge_tag(&self, edge: EdgeId) -> Option<u8> {
        self.edge(edge).map(|e| e.tag)
    }

    fn edge_weight(&self, edge: EdgeId) -> Option<f64> {
        self.edge(edge).map(|e| e.weight)
    }

    fn edge_endpoints(&self, edge: EdgeId) -> Option<(NodeId, NodeId)> {
        self.edge(edge).map(|e| (e.from, e.to))
    }

    fn in_degree(&self, node: NodeId) -> Option<usize> {
        self.contents.in_degree.get(node).copied()
    }

    fn out_degree(&self, node: NodeId) -> Option<usize> {
        self.contents.out_degree.get(node).copied()
    }

    fn with_node(&self, label: &str) -> Result<Self, GraphError> {
        Ok(self.with_node_record(NodeRecord::new(label)))
    }

    fn without_node(&self, node: NodeId) -> Result<Self, GraphError> {
        let degree = self.degree(node).ok_or(GraphError::MissingNode(node))?;
        if degree != 0 {
            return Err(GraphError::NodeNotIsolated { node, degree });
        }
        Ok(self.derive(|c| {
            c.nodes.remove(node);
            c.in_degree.remove(node);
            c.out_degree.remove(node);
            for edge in &mut c.edges {
                if edge.from > node {
                    edge.from -= 1;
                }
                if edge.to > node {
                    edge.to -= 1;
                }
            }
        }))
    }

    fn with_edge(
        &self,
        from: NodeId,
        to: NodeId,
        label: Option<&str>,
    ) -> Result<Self, GraphError> {
        let record = EdgeRecord::new(from, to).labeled(label.unwrap_or_default());
        self.with_edge_record(record)
    }

    fn without_edge(&self, edge: EdgeId) -> Result<Self, GraphError> {
        let (from, to) = self
            .edge_endpoints(edge)
            .ok_or(GraphError::MissingEdge(edge))?;
        Ok(self.derive(|c| {
            c.edges.remove(edge);
            c.out_degree[from] -= 1;
            c.in_degree[to] -= 1;
        }))
    }

    fn with_node_label(&self, node: NodeId, label: &str) -> Result<Self, GraphError> {
        if node >= self.node_count() {
            return Err(GraphError::MissingNode(node));
        }
        Ok(self.derive(|c| {
            c.nodes[node].label = label.to_owned();
        }))
    }
}
