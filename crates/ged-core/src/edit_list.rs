// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Ordered, costed sequences of edit operations.
use core::hash::{Hash, Hasher};

use ged_graph::{Graph, GraphError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::op::{EditOperation, OperationCode};

/// Relative tolerance between the running cost and a fresh scan.
///
/// Sorting changes the summation order, so the two may differ in the last
/// few bits.
const COST_TOLERANCE: f64 = 1e-9;

/// Error returned when a list cannot be replayed on a start graph.
///
/// The whole list is inapplicable to that graph; no partial result exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("edit {index} ({operation}) failed: {source}")]
pub struct ApplyError {
    /// Position of the failing operation in the list.
    pub index: usize,
    /// The failing operation.
    pub operation: EditOperation,
    /// The structural failure reported by the graph.
    pub source: GraphError,
}

/// An ordered sequence of edit operations with its aggregate cost.
///
/// Order is replay order and is part of the list's identity: equality and
/// hashing compare the operation sequences element-wise, while the aggregate
/// cost is derived and excluded. The aggregate is maintained incrementally by
/// [`EditList::push`] and always agrees with a scan (see
/// [`EditList::verify_cost`]).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<EditOperation>", into = "Vec<EditOperation>")]
pub struct EditList {
    ops: Vec<EditOperation>,
    cost: f64,
}

impl EditList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty list with room for `capacity` operations.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ops: Vec::with_capacity(capacity),
            cost: 0.0,
        }
    }

    /// Appends `op` and adds its cost to the aggregate.
    pub fn push(&mut self, op: EditOperation) {
        self.cost += op.cost().get();
        self.ops.push(op);
        debug_assert!(self.verify_cost(), "aggregate cost drifted from scan");
    }

    /// Sum of every operation's cost.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns `true` if the list holds no operations.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Operations in current order.
    pub fn ops(&self) -> &[EditOperation] {
        &self.ops
    }

    /// Iterates operations in current order.
    pub fn iter(&self) -> core::slice::Iter<'_, EditOperation> {
        self.ops.iter()
    }

    /// Checks the aggregate cost against a fresh scan.
    pub fn verify_cost(&self) -> bool {
        let scanned: f64 = self.ops.iter().map(|op| op.cost().get()).sum();
        (self.cost - scanned).abs() <= COST_TOLERANCE * scanned.abs().max(1.0)
    }

    /// Replays every operation on `start`, in current order.
    ///
    /// Each step's output is the next step's input. The first failing
    /// operation aborts the replay; intermediate versions are dropped.
    ///
    /// # Errors
    /// Returns [`ApplyError`] naming the first operation whose precondition
    /// did not hold.
    #[instrument(skip_all, fields(ops = self.ops.len(), cost = self.cost))]
    pub fn apply_operations<G: Graph + Clone>(&self, start: &G) -> Result<G, ApplyError> {
        let mut current: Option<G> = None;
        for (index, op) in self.ops.iter().enumerate() {
            let graph = current.as_ref().unwrap_or(start);
            match op.apply(graph) {
                Ok(next) => current = Some(next),
                Err(source) => {
                    debug!(index, %op, %source, "edit list replay aborted");
                    return Err(ApplyError {
                        index,
                        operation: op.clone(),
                        source,
                    });
                }
            }
        }
        Ok(current.unwrap_or_else(|| start.clone()))
    }

    /// Order-preserving sub-list of the operations with `code`.
    pub fn filter_by_kind(&self, code: OperationCode) -> Self {
        self.ops
            .iter()
            .filter(|op| op.code() == code)
            .cloned()
            .collect()
    }

    /// Number of operations per code, indexed like [`OperationCode::ALL`].
    pub fn count_by_kind(&self) -> [usize; 5] {
        let mut counts = [0; 5];
        for op in &self.ops {
            counts[op.code().index()] += 1;
        }
        counts
    }

    /// Returns `true` if the list contains an operation with `code`.
    pub fn contains_kind(&self, code: OperationCode) -> bool {
        self.ops.iter().any(|op| op.code() == code)
    }

    /// Reorders the list into replay-safe order.
    ///
    /// This is the only reordering that preserves replay safety; sorting an
    /// already sorted list leaves it unchanged.
    pub fn sort(&mut self) {
        self.ops.sort();
        debug_assert!(self.verify_cost(), "aggregate cost drifted from scan");
    }

    /// Consuming variant of [`EditList::sort`].
    pub fn sorted(mut self) -> Self {
        self.sort();
        self
    }

    /// Returns `true` if the list is already in replay-safe order.
    pub fn is_replay_ordered(&self) -> bool {
        self.ops.windows(2).all(|w| w[0] <= w[1])
    }
}

impl PartialEq for EditList {
    fn eq(&self, other: &Self) -> bool {
        self.ops == other.ops
    }
}

impl Eq for EditList {}

impl Hash for EditList {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ops.hash(state);
    }
}

impl From<Vec<EditOperation>> for EditList {
    fn from(ops: Vec<EditOperation>) -> Self {
        ops.into_iter().collect()
    }
}

impl From<EditList> for Vec<EditOperation> {
    fn from(list: EditList) -> Self {
        list.ops
    }
}

impl FromIterator<EditOperation> for EditList {
    fn from_iter<I: IntoIterator<Item = EditOperation>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl Extend<EditOperation> for EditList {
    fn extend<I: IntoIterator<Item = EditOperation>>(&mut self, iter: I) {
        for op in iter {
            self.push(op);
        }
        debug_assert!(self.verify_cost(), "aggregate cost drifted from scan");
    }
}

impl IntoIterator for EditList {
    type Item = EditOperation;
    type IntoIter = std::vec::IntoIter<EditOperation>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

impl<'a> IntoIterator for &'a EditList {
    type Item = &'a EditOperation;
    type IntoIter = core::slice::Iter<'a, EditOperation>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use std::collections::hash_map::DefaultHasher;

    use ged_graph::{NodeRecord, VersionedGraph};

    use super::*;
    use crate::cost::Cost;

    fn hash_of(list: &EditList) -> u64 {
        let mut hasher = DefaultHasher::new();
        list.hash(&mut hasher);
        hasher.finish()
    }

    fn three() -> Vec<EditOperation> {
        vec![
            EditOperation::add_node("a", Cost::UNIT),
            EditOperation::delete_edge(3, Cost::new(0.5).expect("valid")),
            EditOperation::relabel_node(1, "b", Cost::new(2.0).expect("valid")),
        ]
    }

    #[test]
    fn push_accumulates_cost() {
        let list: EditList = three().into_iter().collect();
        assert_eq!(list.len(), 3);
        assert!((list.cost() - 3.5).abs() < f64::EPSILON);
        assert!(list.verify_cost());
    }

    #[test]
    fn sorting_mixed_costs_keeps_the_aggregate() {
        let mut list = EditList::from(vec![
            EditOperation::delete_node(1, Cost::new(0.1).expect("valid")),
            EditOperation::add_edge(0, 1, Cost::new(0.2).expect("valid")),
            EditOperation::relabel_node(2, "r", Cost::new(0.7).expect("valid")),
            EditOperation::add_node("n", Cost::ZERO),
        ]);
        let before = list.cost();
        list.sort();
        assert!(list.is_replay_ordered());
        assert_eq!(list.cost(), before);
        assert!(list.verify_cost());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "aggregate cost drifted from scan")]
    fn drifted_aggregate_is_caught_on_sort() {
        let mut list = EditList {
            ops: three(),
            cost: 0.0,
        };
        list.sort();
    }

    #[test]
    fn equality_is_order_sensitive_and_ignores_cost_field() {
        let a = EditList::from(three());
        let b = EditList::from(three());
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));

        let mut reversed = three();
        reversed.reverse();
        let c = EditList::from(reversed);
        assert_ne!(a, c);
    }

    #[test]
    fn filter_preserves_order() {
        let list = EditList::from(vec![
            EditOperation::relabel_node(0, "x", Cost::UNIT),
            EditOperation::add_node("n", Cost::UNIT),
            EditOperation::relabel_node(4, "y", Cost::UNIT),
        ]);
        let relabels = list.filter_by_kind(OperationCode::RelabelNode);
        assert_eq!(relabels.len(), 2);
        assert_eq!(relabels.ops()[0].target(), Some(0));
        assert_eq!(relabels.ops()[1].target(), Some(4));
        assert!((relabels.cost() - 2.0).abs() < f64::EPSILON);
        assert!(list.filter_by_kind(OperationCode::DeleteNode).is_empty());
    }

    #[test]
    fn empty_list_returns_start() {
        let g = VersionedGraph::from_records(vec![NodeRecord::new("a")], Vec::new())
            .expect("records");
        let out = EditList::new().apply_operations(&g).expect("nothing to fail");
        assert_eq!(out, g);
    }

    #[test]
    fn replay_fails_fast_with_index() {
        let g = VersionedGraph::new();
        let list = EditList::from(vec![
            EditOperation::add_node("a", Cost::UNIT),
            EditOperation::delete_node(4, Cost::UNIT),
            EditOperation::add_node("b", Cost::UNIT),
        ]);
        let err = list.apply_operations(&g).expect_err("node 4 does not exist");
        assert_eq!(err.index, 1);
        assert_eq!(err.source, GraphError::MissingNode(4));
        assert_eq!(err.operation, list.ops()[1]);
    }

    #[test]
    fn counts_by_kind() {
        let list = EditList::from(three());
        assert_eq!(list.count_by_kind(), [1, 0, 1, 1, 0]);
        assert!(list.contains_kind(OperationCode::DeleteEdge));
        assert!(!list.contains_kind(OperationCode::DeleteNode));
    }

    #[test]
    fn serde_round_trip_recomputes_cost() {
        let list = EditList::from(three());
        let json = serde_json::to_string(&list).expect("serialize");
        let back: EditList = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, list);
        assert!((back.cost() - list.cost()).abs() < f64::EPSILON);
    }
}
