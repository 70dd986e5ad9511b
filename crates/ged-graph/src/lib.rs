// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! ged-graph: the versioned graph capability behind graph edit-distance tooling.
//!
//! [`Graph`] is the contract edit operations and comparators are written
//! against: immutable versions, dense version-local ids, and factory methods
//! that return a new version or a structural [`GraphError`].
//! [`VersionedGraph`] is the in-memory reference implementation.
#![forbid(unsafe_code)]

mod graph;
mod record;
mod store;

/// Graph capability trait, id aliases and structural errors.
pub use graph::{EdgeId, Graph, GraphError, NodeId};
/// Node and edge record types.
pub use record::{EdgeRecord, NodeRecord};
/// Reference immutable-version store and its canonical fingerprint helpers.
pub use store::{CanonicalError, Hash32, VersionedGraph};
