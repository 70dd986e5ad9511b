// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Graph record types: nodes and edges.

use serde::{Deserialize, Serialize};

use crate::graph::NodeId;

/// Materialised record for a single node.
///
/// The node identifier is not embedded here; it is the record's position in
/// the owning version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Node label.
    pub label: String,
    /// Single-byte classification tag.
    pub tag: u8,
}

impl NodeRecord {
    /// Node with `label` and tag `0`.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            tag: 0,
        }
    }

    /// Same record with `tag`.
    pub fn tagged(mut self, tag: u8) -> Self {
        self.tag = tag;
        self
    }
}

/// Materialised record for a single directed edge.
///
/// Invariants
/// - `from` and `to` reference existing nodes in the same version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Source node identifier.
    pub from: NodeId,
    /// Destination node identifier.
    pub to: NodeId,
    /// Edge label (empty when unlabeled).
    pub label: String,
    /// Single-byte classification tag.
    pub tag: u8,
    /// Numeric weight or score.
    pub weight: f64,
}

impl EdgeRecord {
    /// Unlabeled edge `from -> to` with tag `0` and weight `1.0`.
    pub fn new(from: NodeId, to: NodeId) -> Self {
        Self {
            from,
            to,
            label: String::new(),
            tag: 0,
            weight: 1.0,
        }
    }

    /// Same record with `label`.
    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Same record with `tag`.
    pub fn tagged(mut self, tag: u8) -> Self {
        self.tag = tag;
        self
    }

    /// Same record with `weight`.
    pub fn weighted(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}
