// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Ergonomic edit-list construction for tests.

use ged_core::{Cost, EditList, EditOperation};
use ged_graph::{EdgeId, NodeId};

/// Builder that appends unit-cost operations unless told otherwise.
///
/// # Example
///
/// ```
/// use ged_dry_tests::EditListBuilder;
///
/// let list = EditListBuilder::new()
///     .add_edge(0, 1)
///     .add_edge(1, 2)
///     .delete_edge(0)
///     .build();
/// assert_eq!(list.len(), 3);
/// assert_eq!(list.cost(), 3.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EditListBuilder {
    list: EditList,
    cost: Option<Cost>,
}

impl EditListBuilder {
    /// Create an empty builder charging [`Cost::UNIT`] per operation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Charge `cost` for every operation appended after this call.
    pub fn costing(mut self, cost: Cost) -> Self {
        self.cost = Some(cost);
        self
    }

    fn push(mut self, make: impl FnOnce(Cost) -> EditOperation) -> Self {
        let op = make(self.cost.unwrap_or(Cost::UNIT));
        self.list.push(op);
        self
    }

    /// Append `AddNode(label)`.
    pub fn add_node(self, label: &str) -> Self {
        self.push(|c| EditOperation::add_node(label, c))
    }

    /// Append `DeleteNode(node)`.
    pub fn delete_node(self, node: NodeId) -> Self {
        self.push(|c| EditOperation::delete_node(node, c))
    }

    /// Append an unlabeled `AddEdge(from, to)`.
    pub fn add_edge(self, from: NodeId, to: NodeId) -> Self {
        self.push(|c| EditOperation::add_edge(from, to, c))
    }

    /// Append `DeleteEdge(edge)`.
    pub fn delete_edge(self, edge: EdgeId) -> Self {
        self.push(|c| EditOperation::delete_edge(edge, c))
    }

    /// Append `RelabelNode(node, label)`.
    pub fn relabel_node(self, node: NodeId, label: &str) -> Self {
        self.push(|c| EditOperation::relabel_node(node, label, c))
    }

    /// Append an arbitrary operation with its own cost.
    pub fn op(mut self, op: EditOperation) -> Self {
        self.list.push(op);
        self
    }

    /// Finish, keeping insertion order.
    pub fn build(self) -> EditList {
        self.list
    }
}
