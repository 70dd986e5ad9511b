// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for the GED crates.
#![forbid(unsafe_code)]
//!
//! # Modules
//!
//! - [`config`] - In-memory config store fake for testing without filesystem
//! - [`graphs`] - Graph builders and seeded random graphs
//! - [`edits`] - Unit-cost edit-list builder

pub mod config;
pub mod edits;
pub mod graphs;

pub use config::InMemoryConfigStore;
pub use edits::EditListBuilder;
pub use graphs::{isolated_nodes, path_graph, seeded_graph, GraphBuilder};
