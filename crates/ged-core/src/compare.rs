// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Cross-graph element comparators.
//!
//! A comparator ranks an element of one graph against an element of another
//! (or the same) graph. The result is a sort key for assignment matrices, not
//! a distance. Every comparison is deterministic, including for ids that do
//! not exist in their graph: a missing element orders before a present one.
use core::cmp::Ordering;

use ged_graph::{Graph, NodeId};
use serde::{Deserialize, Serialize};

/// Which element family a comparator reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// Node ids.
    Node,
    /// Edge ids.
    Edge,
}

/// Which degree a [`ElementComparator::Degree`] reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DegreeDirection {
    /// Incoming edges.
    In,
    /// Outgoing edges.
    Out,
    /// Incoming plus outgoing.
    Total,
}

/// Comparison policy, selected and composed by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementComparator {
    /// Always `Equal`; neutral filler when no signal is wanted.
    AlwaysEqual,
    /// Lexicographic label order. An empty label on the second side is a
    /// wildcard that matches anything.
    Label {
        /// Element family to read labels from.
        kind: ElementKind,
    },
    /// Node degree order.
    ///
    /// Ascending compares `g1[id1]` with `g2[id2]`. Descending swaps the
    /// graph read for each side and compares `g1[id2]` with `g2[id1]`; this
    /// is not the negated ascending result unless both handles are the same
    /// graph.
    Degree {
        /// Degree to read.
        direction: DegreeDirection,
        /// Reverse the order by swapping the graph read on each side.
        descending: bool,
    },
    /// Same/different test against a reserved tag value: `Equal` when both
    /// sides carry `sentinel` or neither does, `Greater` otherwise.
    TypeTag {
        /// Element family to read tags from.
        kind: ElementKind,
        /// Reserved tag value.
        sentinel: u8,
    },
    /// Ascending edge weight.
    EdgeWeight,
}

impl ElementComparator {
    /// Binds the policy to the two graphs it compares across.
    pub fn bind<'g, A: Graph, B: Graph>(
        self,
        g1: &'g A,
        g2: &'g B,
    ) -> BoundComparator<'g, A, B> {
        BoundComparator {
            policy: self,
            g1,
            g2,
        }
    }
}

/// A comparison policy fixed to `(g1, g2)`.
#[derive(Debug)]
pub struct BoundComparator<'g, A, B> {
    policy: ElementComparator,
    g1: &'g A,
    g2: &'g B,
}

impl<A, B> Clone for BoundComparator<'_, A, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A, B> Copy for BoundComparator<'_, A, B> {}

impl<A: Graph, B: Graph> BoundComparator<'_, A, B> {
    /// Ranks element `id1` of the first graph against `id2` of the second.
    pub fn compare(&self, id1: usize, id2: usize) -> Ordering {
        match self.policy {
            ElementComparator::AlwaysEqual => Ordering::Equal,
            ElementComparator::Label { kind } => {
                let right = label(self.g2, kind, id2);
                if right == Some("") {
                    return Ordering::Equal;
                }
                label(self.g1, kind, id1).cmp(&right)
            }
            ElementComparator::Degree {
                direction,
                descending,
            } => {
                if descending {
                    degree(self.g1, direction, id2).cmp(&degree(self.g2, direction, id1))
                } else {
                    degree(self.g1, direction, id1).cmp(&degree(self.g2, direction, id2))
                }
            }
            ElementComparator::TypeTag { kind, sentinel } => {
                let left = tag(self.g1, kind, id1) == Some(sentinel);
                let right = tag(self.g2, kind, id2) == Some(sentinel);
                if left == right {
                    Ordering::Equal
                } else {
                    Ordering::Greater
                }
            }
            ElementComparator::EdgeWeight => {
                match (self.g1.edge_weight(id1), self.g2.edge_weight(id2)) {
                    (Some(a), Some(b)) => a.total_cmp(&b),
                    (a, b) => a.is_some().cmp(&b.is_some()),
                }
            }
        }
    }

    /// [`BoundComparator::compare`] as a signed rank in `{-1, 0, 1}`.
    pub fn rank(&self, id1: usize, id2: usize) -> i8 {
        self.compare(id1, id2) as i8
    }

    /// Signed ranks for every `(row, col)` pair, row-major.
    pub fn compatibility_matrix(&self, rows: &[usize], cols: &[usize]) -> Vec<Vec<i8>> {
        rows.iter()
            .map(|&r| cols.iter().map(|&c| self.rank(r, c)).collect())
            .collect()
    }
}

fn label<G: Graph>(graph: &G, kind: ElementKind, id: usize) -> Option<&str> {
    match kind {
        ElementKind::Node => graph.node_label(id),
        ElementKind::Edge => graph.edge_label(id),
    }
}

fn tag<G: Graph>(graph: &G, kind: ElementKind, id: usize) -> Option<u8> {
    match kind {
        ElementKind::Node => graph.node_tag(id),
        ElementKind::Edge => graph.edge_tag(id),
    }
}

fn degree<G: Graph>(graph: &G, direction: DegreeDirection, node: NodeId) -> Option<usize> {
    match direction {
        DegreeDirection::In => graph.in_degree(node),
        DegreeDirection::Out => graph.out_degree(node),
        DegreeDirection::Total => graph.degree(node),
    }
}
