// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Atomic edit operations and their apply contract.
//!
//! An [`EditOperation`] is a pure value: it holds no reference to any graph
//! and is applied by a single exhaustive `match` over [`EditKind`]. Applying
//! never mutates the input version; success yields a new version and a
//! structural precondition violation yields the [`GraphError`] reported by
//! the graph factory.
use core::fmt;

use ged_graph::{EdgeId, Graph, GraphError, NodeId};
use serde::{Deserialize, Serialize};

use crate::cost::Cost;

/// Discriminant of an edit operation.
///
/// Declaration order is the replay priority used by
/// [`replay_order`](crate::replay_order): additions first (they append to
/// the end of the id space), then relabels, then edge deletions, then node
/// deletions (which need their nodes already isolated).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OperationCode {
    /// Insert a node.
    AddNode,
    /// Insert a directed edge.
    AddEdge,
    /// Replace a node's label.
    RelabelNode,
    /// Remove an edge.
    DeleteEdge,
    /// Remove an isolated node.
    DeleteNode,
}

impl OperationCode {
    /// Every code in replay priority order.
    pub const ALL: [Self; 5] = [
        Self::AddNode,
        Self::AddEdge,
        Self::RelabelNode,
        Self::DeleteEdge,
        Self::DeleteNode,
    ];

    /// Position in [`OperationCode::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Self::AddNode => 0,
            Self::AddEdge => 1,
            Self::RelabelNode => 2,
            Self::DeleteEdge => 3,
            Self::DeleteNode => 4,
        }
    }

    /// Stable short name used in logs and `Display`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::AddNode => "add-node",
            Self::AddEdge => "add-edge",
            Self::RelabelNode => "relabel-node",
            Self::DeleteEdge => "del-edge",
            Self::DeleteNode => "del-node",
        }
    }

    /// Returns `true` for operations that create an element (no target id).
    pub const fn creates(self) -> bool {
        matches!(self, Self::AddNode | Self::AddEdge)
    }
}

impl fmt::Display for OperationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Payload of an edit operation, one variant per [`OperationCode`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditKind {
    /// Insert a node labeled `label`; its id becomes the current node count.
    AddNode {
        /// Label of the new node.
        label: String,
    },
    /// Remove `node`, which must exist and be isolated.
    DeleteNode {
        /// Node to remove.
        node: NodeId,
    },
    /// Insert `from -> to`; its id becomes the current edge count.
    AddEdge {
        /// Source node.
        from: NodeId,
        /// Destination node.
        to: NodeId,
        /// Optional edge label.
        label: Option<String>,
    },
    /// Remove `edge`, which must exist.
    DeleteEdge {
        /// Edge to remove.
        edge: EdgeId,
    },
    /// Give `node` the label `label`.
    RelabelNode {
        /// Node to relabel.
        node: NodeId,
        /// Replacement label.
        label: String,
    },
}

/// One atomic, costed graph edit.
///
/// Observable as the 5-tuple `(code, cost, target, label, endpoints)`; two
/// operations are equal exactly when all five agree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EditOperation {
    kind: EditKind,
    cost: Cost,
}

impl EditOperation {
    /// Wraps an arbitrary payload.
    pub fn new(kind: EditKind, cost: Cost) -> Self {
        Self { kind, cost }
    }

    /// Insert a node labeled `label`.
    pub fn add_node(label: impl Into<String>, cost: Cost) -> Self {
        Self::new(
            EditKind::AddNode {
                label: label.into(),
            },
            cost,
        )
    }

    /// Delete the isolated `node`.
    pub fn delete_node(node: NodeId, cost: Cost) -> Self {
        Self::new(EditKind::DeleteNode { node }, cost)
    }

    /// Insert an unlabeled edge `from -> to`.
    pub fn add_edge(from: NodeId, to: NodeId, cost: Cost) -> Self {
        Self::new(
            EditKind::AddEdge {
                from,
                to,
                label: None,
            },
            cost,
        )
    }

    /// Insert an edge `from -> to` labeled `label`.
    pub fn add_labeled_edge(
        from: NodeId,
        to: NodeId,
        label: impl Into<String>,
        cost: Cost,
    ) -> Self {
        Self::new(
            EditKind::AddEdge {
                from,
                to,
                label: Some(label.into()),
            },
            cost,
        )
    }

    /// Delete `edge`.
    pub fn delete_edge(edge: EdgeId, cost: Cost) -> Self {
        Self::new(EditKind::DeleteEdge { edge }, cost)
    }

    /// Relabel `node` to `label`.
    pub fn relabel_node(node: NodeId, label: impl Into<String>, cost: Cost) -> Self {
        Self::new(
            EditKind::RelabelNode {
                node,
                label: label.into(),
            },
            cost,
        )
    }

    /// Same operation with a different cost.
    pub fn with_cost(&self, cost: Cost) -> Self {
        Self::new(self.kind.clone(), cost)
    }

    /// The payload.
    pub fn kind(&self) -> &EditKind {
        &self.kind
    }

    /// The operation's code.
    pub fn code(&self) -> OperationCode {
        match self.kind {
            EditKind::AddNode { .. } => OperationCode::AddNode,
            EditKind::DeleteNode { .. } => OperationCode::DeleteNode,
            EditKind::AddEdge { .. } => OperationCode::AddEdge,
            EditKind::DeleteEdge { .. } => OperationCode::DeleteEdge,
            EditKind::RelabelNode { .. } => OperationCode::RelabelNode,
        }
    }

    /// The operation's cost.
    pub fn cost(&self) -> Cost {
        self.cost
    }

    /// Id of the element acted upon; `None` for operations that create one.
    pub fn target(&self) -> Option<usize> {
        match self.kind {
            EditKind::AddNode { .. } | EditKind::AddEdge { .. } => None,
            EditKind::DeleteNode { node } | EditKind::RelabelNode { node, .. } => Some(node),
            EditKind::DeleteEdge { edge } => Some(edge),
        }
    }

    /// String payload: new node label, relabel target, or edge label.
    pub fn label(&self) -> Option<&str> {
        match &self.kind {
            EditKind::AddNode { label } | EditKind::RelabelNode { label, .. } => {
                Some(label.as_str())
            }
            EditKind::AddEdge { label, .. } => label.as_deref(),
            EditKind::DeleteNode { .. } | EditKind::DeleteEdge { .. } => None,
        }
    }

    /// `(from, to)` for edge insertions.
    pub fn endpoints(&self) -> Option<(NodeId, NodeId)> {
        match self.kind {
            EditKind::AddEdge { from, to, .. } => Some((from, to)),
            _ => None,
        }
    }

    /// Applies the operation to `graph`, producing the next version.
    ///
    /// # Errors
    /// Propagates the graph's [`GraphError`] when the precondition of the
    /// operation does not hold for `graph`.
    pub fn apply<G: Graph>(&self, graph: &G) -> Result<G, GraphError> {
        match &self.kind {
            EditKind::AddNode { label } => graph.with_node(label),
            EditKind::DeleteNode { node } => graph.without_node(*node),
            EditKind::AddEdge { from, to, label } => graph.with_edge(*from, *to, label.as_deref()),
            EditKind::DeleteEdge { edge } => graph.without_edge(*edge),
            EditKind::RelabelNode { node, label } => graph.with_node_label(*node, label),
        }
    }
}

impl fmt::Display for EditOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            EditKind::AddNode { label } => write!(f, "{}({label:?})", self.code())?,
            EditKind::DeleteNode { node } => write!(f, "{}({node})", self.code())?,
            EditKind::AddEdge { from, to, label } => {
                write!(f, "{}({from}->{to}", self.code())?;
                if let Some(label) = label {
                    write!(f, ", {label:?}")?;
                }
                f.write_str(")")?;
            }
            EditKind::DeleteEdge { edge } => write!(f, "{}({edge})", self.code())?,
            EditKind::RelabelNode { node, label } => {
                write!(f, "{}({node}, {label:?})", self.code())?;
            }
        }
        write!(f, " @{}", self.cost)
    }
}
