// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Ascending/descending scalar comparators for scored candidate pairs.
use core::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Direction of a scalar comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ScalarOrder {
    /// Smaller first.
    #[default]
    Ascending,
    /// Larger first.
    Descending,
}

impl ScalarOrder {
    /// Compares two scores in this direction (`f64::total_cmp`).
    pub fn compare(self, a: f64, b: f64) -> Ordering {
        match self {
            Self::Ascending => a.total_cmp(&b),
            Self::Descending => b.total_cmp(&a),
        }
    }
}

/// A candidate correspondence `left -> right` with its score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredPair {
    /// Element id in the first graph.
    pub left: usize,
    /// Element id in the second graph.
    pub right: usize,
    /// Score of the pairing.
    pub score: f64,
}

/// Sorts `pairs` by score in `order`; equal scores fall back to
/// `(left, right)` ascending.
pub fn sort_scored(pairs: &mut [ScoredPair], order: ScalarOrder) {
    pairs.sort_by(|a, b| {
        order
            .compare(a.score, b.score)
            .then_with(|| (a.left, a.right).cmp(&(b.left, b.right)))
    });
}
