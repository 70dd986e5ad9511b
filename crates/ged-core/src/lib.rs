// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! ged-core: edit representation and compatibility scoring for graph edit distance.
//!
//! Search procedures built on this crate generate or receive sequences of
//! atomic [`EditOperation`]s, collect them in an [`EditList`], put the list in
//! replay-safe order with [`EditList::sort`], replay it on a start graph with
//! [`EditList::apply_operations`], and score candidate node/edge
//! correspondences across two graphs with an [`ElementComparator`].
//!
//! Everything here is generic over [`ged_graph::Graph`]; graph versions are
//! immutable, so many replays may share one start graph.
#![forbid(unsafe_code)]

mod compare;
mod config;
mod cost;
mod edit_list;
mod generate;
mod op;
mod ordering;
mod prng;
mod scalar;

/// Cross-graph comparison policies.
pub use compare::{BoundComparator, DegreeDirection, ElementComparator, ElementKind};
/// Generator configuration and its JSON storage port.
pub use config::{ConfigError, ConfigService, ConfigStore, CostTable, GeneratorConfig};
/// Validated edit costs.
pub use cost::{Cost, CostError};
/// Ordered edit sequences and replay failures.
pub use edit_list::{ApplyError, EditList};
/// Randomized edit-list generation.
pub use generate::{generate, GenerateError, Generated, MAX_REJECTED_DRAWS};
/// Atomic edit operations.
pub use op::{EditKind, EditOperation, OperationCode};
/// Replay-safe operation order.
pub use ordering::replay_order;
/// Deterministic PRNG used by the generator.
pub use prng::Prng;
/// Ascending/descending scalar comparators.
pub use scalar::{sort_scored, ScalarOrder, ScoredPair};
