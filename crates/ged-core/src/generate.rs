// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Randomized, structurally valid edit-list generation.
//!
//! Used to build fixtures for edit-distance search: starting from a graph, the
//! generator accepts exactly `edits` random operations, applying each one to a
//! working graph so later draws see the current structure. Rules:
//!
//! - a run that accepted an `AddNode` never accepts a `DeleteNode`, and the
//!   other way round;
//! - only isolated nodes are deleted;
//! - elements created or modified earlier in the run ("touched") are not
//!   deleted or relabeled again;
//! - a relabel always changes the label;
//! - the accepted prefix must replay to the working graph both in generation
//!   order and after [`EditList::sort`].
//!
//! The kind of each candidate is drawn uniformly from the enabled kinds; a
//! draw whose guard fails is discarded and redrawn. Before each draw the
//! generator checks that some enabled kind still has a candidate, and it gives
//! up after [`MAX_REJECTED_DRAWS`] consecutive rejections, so an
//! unsatisfiable request ends in [`GenerateError::Exhausted`] instead of
//! spinning forever.
use std::collections::BTreeSet;

use ged_graph::{EdgeId, Graph, GraphError, NodeId};
use thiserror::Error;
use tracing::{debug, instrument, trace};

use crate::config::GeneratorConfig;
use crate::edit_list::EditList;
use crate::op::{EditKind, EditOperation, OperationCode};
use crate::prng::Prng;

/// Consecutive rejected draws after which a run is reported as exhausted.
pub const MAX_REJECTED_DRAWS: usize = 10_000;

/// Errors produced by [`generate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// No enabled kind has an eligible candidate left.
    #[error("no eligible edit after accepting {accepted} of {requested} operations")]
    Exhausted {
        /// Operations accepted before the run stalled.
        accepted: usize,
        /// Operations requested.
        requested: usize,
    },
    /// The config enables no kind at all.
    #[error("no operation kind is enabled")]
    NoKindsEnabled,
    /// An accepted operation failed to apply to the working graph.
    #[error("generated edit failed to apply: {0}")]
    Graph(#[from] GraphError),
}

/// Output of a generation run.
///
/// `list` replays on the start graph to `graph` in generation order, and
/// also after [`EditList::sort`].
#[derive(Debug, Clone)]
pub struct Generated<G> {
    /// The accepted operations, in generation order.
    pub list: EditList,
    /// The working graph after every accepted operation.
    pub graph: G,
}

/// Elements created or modified earlier in the current run.
///
/// Lives beside the working graph, never inside it, and follows the graph's
/// renumbering when a deletion shifts ids down.
#[derive(Debug, Default, Clone)]
pub(crate) struct TouchedSet {
    nodes: BTreeSet<NodeId>,
    edges: BTreeSet<EdgeId>,
}

impl TouchedSet {
    pub(crate) fn touch_node(&mut self, node: NodeId) {
        self.nodes.insert(node);
    }

    pub(crate) fn touch_edge(&mut self, edge: EdgeId) {
        self.edges.insert(edge);
    }

    pub(crate) fn node(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    pub(crate) fn edge(&self, edge: EdgeId) -> bool {
        self.edges.contains(&edge)
    }

    pub(crate) fn node_removed(&mut self, node: NodeId) {
        self.nodes = shift_down(&self.nodes, node);
    }

    pub(crate) fn edge_removed(&mut self, edge: EdgeId) {
        self.edges = shift_down(&self.edges, edge);
    }
}

fn shift_down(ids: &BTreeSet<usize>, removed: usize) -> BTreeSet<usize> {
    ids.iter()
        .filter(|&&id| id != removed)
        .map(|&id| if id > removed { id - 1 } else { id })
        .collect()
}

struct Run<'c, G> {
    config: &'c GeneratorConfig,
    graph: G,
    touched: TouchedSet,
    prng: Prng,
    added_node: bool,
    deleted_node: bool,
}

impl<G: Graph> Run<'_, G> {
    fn deletable_nodes(&self) -> Vec<NodeId> {
        if self.added_node {
            return Vec::new();
        }
        (0..self.graph.node_count())
            .filter(|&n| !self.touched.node(n) && self.graph.is_isolated(n))
            .collect()
    }

    fn deletable_edges(&self) -> Vec<EdgeId> {
        (0..self.graph.edge_count())
            .filter(|&e| !self.touched.edge(e))
            .collect()
    }

    fn relabel_choices(&self, node: NodeId) -> Vec<&str> {
        let current = self.graph.node_label(node);
        self.config
            .label_pool
            .iter()
            .map(String::as_str)
            .filter(|label| Some(*label) != current)
            .collect()
    }

    fn relabelable_nodes(&self) -> Vec<NodeId> {
        (0..self.graph.node_count())
            .filter(|&n| !self.touched.node(n) && !self.relabel_choices(n).is_empty())
            .collect()
    }

    fn has_candidate(&self, code: OperationCode) -> bool {
        match code {
            OperationCode::AddNode => !self.deleted_node,
            OperationCode::AddEdge => self.graph.node_count() > 0,
            OperationCode::DeleteNode => !self.deletable_nodes().is_empty(),
            OperationCode::DeleteEdge => !self.deletable_edges().is_empty(),
            OperationCode::RelabelNode => !self.relabelable_nodes().is_empty(),
        }
    }

    /// One draw for `code`; `None` when its guard fails.
    fn draw(&mut self, code: OperationCode) -> Option<EditKind> {
        match code {
            OperationCode::AddNode => {
                if self.deleted_node {
                    return None;
                }
                let label = self
                    .prng
                    .choose(&self.config.label_pool)
                    .unwrap_or(&self.config.default_label)
                    .clone();
                Some(EditKind::AddNode { label })
            }
            OperationCode::DeleteNode => {
                let candidates = self.deletable_nodes();
                let node = *self.prng.choose(&candidates)?;
                Some(EditKind::DeleteNode { node })
            }
            OperationCode::AddEdge => {
                let nodes: Vec<NodeId> = (0..self.graph.node_count()).collect();
                let from = *self.prng.choose(&nodes)?;
                let to = *self.prng.choose(&nodes)?;
                Some(EditKind::AddEdge {
                    from,
                    to,
                    label: None,
                })
            }
            OperationCode::DeleteEdge => {
                let candidates = self.deletable_edges();
                let edge = *self.prng.choose(&candidates)?;
                Some(EditKind::DeleteEdge { edge })
            }
            OperationCode::RelabelNode => {
                let nodes: Vec<NodeId> = (0..self.graph.node_count())
                    .filter(|&n| !self.touched.node(n))
                    .collect();
                let node = *self.prng.choose(&nodes)?;
                let choices: Vec<String> = self
                    .relabel_choices(node)
                    .into_iter()
                    .map(str::to_owned)
                    .collect();
                let label = self.prng.choose(&choices)?.clone();
                Some(EditKind::RelabelNode { node, label })
            }
        }
    }

    /// Installs `next` (the result of `op`) as the working graph and updates
    /// the run bookkeeping.
    fn accept(&mut self, op: &EditOperation, next: G) {
        let nodes_before = self.graph.node_count();
        let edges_before = self.graph.edge_count();
        self.graph = next;
        match *op.kind() {
            EditKind::AddNode { .. } => {
                self.added_node = true;
                self.touched.touch_node(nodes_before);
            }
            EditKind::DeleteNode { node } => {
                self.deleted_node = true;
                self.touched.node_removed(node);
            }
            EditKind::AddEdge { .. } => self.touched.touch_edge(edges_before),
            EditKind::DeleteEdge { edge } => self.touched.edge_removed(edge),
            EditKind::RelabelNode { node, .. } => self.touched.touch_node(node),
        }
    }
}

/// Whether `list` followed by `op` still reaches `expected` from `start`
/// once put in replay order.
fn replays_sorted<G>(start: &G, list: &EditList, op: &EditOperation, expected: &G) -> bool
where
    G: Graph + Clone + PartialEq,
{
    let mut candidate = list.clone();
    candidate.push(op.clone());
    candidate
        .sorted()
        .apply_operations(start)
        .is_ok_and(|graph| graph == *expected)
}

/// Generates exactly `config.edits` operations starting from `start`.
///
/// The returned list replays on `start` without failure and yields the
/// returned graph, both in generation order and after [`EditList::sort`].
/// Equal inputs produce equal outputs.
///
/// # Errors
/// [`GenerateError::NoKindsEnabled`] when the config enables no kind, and
/// [`GenerateError::Exhausted`] when the working graph runs out of
/// candidates for every enabled kind, or [`MAX_REJECTED_DRAWS`] draws in a
/// row are rejected, before the target count is reached.
#[instrument(skip_all, fields(edits = config.edits, seed = config.seed))]
pub fn generate<G: Graph + Clone + PartialEq>(
    start: &G,
    config: &GeneratorConfig,
) -> Result<Generated<G>, GenerateError> {
    let kinds = config.enabled_kinds();
    if kinds.is_empty() && config.edits > 0 {
        return Err(GenerateError::NoKindsEnabled);
    }
    let mut run = Run {
        config,
        graph: start.clone(),
        touched: TouchedSet::default(),
        prng: Prng::from_seed_u64(config.seed),
        added_node: false,
        deleted_node: false,
    };
    let mut list = EditList::with_capacity(config.edits);
    let mut rejected = 0;
    while list.len() < config.edits {
        if rejected >= MAX_REJECTED_DRAWS || !kinds.iter().any(|&code| run.has_candidate(code)) {
            debug!(accepted = list.len(), rejected, "generation exhausted");
            return Err(GenerateError::Exhausted {
                accepted: list.len(),
                requested: config.edits,
            });
        }
        let Some(&code) = run.prng.choose(&kinds) else {
            return Err(GenerateError::NoKindsEnabled);
        };
        let Some(kind) = run.draw(code) else {
            trace!(%code, "draw rejected");
            rejected += 1;
            continue;
        };
        let op = EditOperation::new(kind, config.costs.cost_of(code));
        let next = op.apply(&run.graph)?;
        if !replays_sorted(start, &list, &op, &next) {
            trace!(%op, "draw rejected: replay order would change the result");
            rejected += 1;
            continue;
        }
        run.accept(&op, next);
        rejected = 0;
        debug!(index = list.len(), %op, "accepted");
        list.push(op);
    }
    Ok(Generated {
        list,
        graph: run.graph,
    })
}
