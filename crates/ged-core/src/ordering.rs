// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Replay-safe ordering of edit operations.
//!
//! Keys, compared in sequence until one differs:
//! 1. operation code, in [`OperationCode`](crate::OperationCode) declaration order;
//! 2. target id, descending (highest id first, so deleting it cannot shift
//!    the ids still queued behind it);
//! 3. cost, ascending;
//! 4. label, with `None` after every `Some`, otherwise lexicographic;
//! 5. endpoint ids `(from, to)`, ascending.
//!
//! Two operations compare `Equal` only when all five keys tie, which is
//! exactly when they are equal values.
use core::cmp::Ordering;

use crate::op::EditOperation;

/// Strict total order placing `a` and `b` in replay-safe order.
pub fn replay_order(a: &EditOperation, b: &EditOperation) -> Ordering {
    a.code()
        .cmp(&b.code())
        .then_with(|| b.target().cmp(&a.target()))
        .then_with(|| a.cost().cmp(&b.cost()))
        .then_with(|| label_order(a.label(), b.label()))
        .then_with(|| a.endpoints().cmp(&b.endpoints()))
}

fn label_order(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl PartialOrd for EditOperation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EditOperation {
    fn cmp(&self, other: &Self) -> Ordering {
        replay_order(self, other)
    }
}
