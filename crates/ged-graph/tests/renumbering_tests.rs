// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Id renumbering and degree bookkeeping across graph versions.
#![allow(clippy::expect_used, clippy::unwrap_used)]

use ged_graph::{EdgeRecord, Graph, GraphError, NodeRecord, VersionedGraph};
use proptest::prelude::*;

fn path(n: usize) -> VersionedGraph {
    let nodes = (0..n).map(|i| NodeRecord::new(format!("n{i}"))).collect();
    let edges = (1..n).map(|i| EdgeRecord::new(i - 1, i)).collect();
    VersionedGraph::from_records(nodes, edges).expect("path records are valid")
}

#[test]
fn deleting_edge_shifts_higher_edges_down() {
    let g = path(4);
    let h = g.without_edge(0).expect("edge 0 exists");
    assert_eq!(h.edge_count(), 2);
    assert_eq!(h.edge_endpoints(0), Some((1, 2)));
    assert_eq!(h.edge_endpoints(1), Some((2, 3)));
    assert_eq!(g.edge_count(), 3, "source version is unchanged");
}

#[test]
fn deleting_missing_edge_fails() {
    let g = path(2);
    assert_eq!(g.without_edge(1), Err(GraphError::MissingEdge(1)));
}

#[test]
fn relabel_missing_node_fails() {
    let g = path(2);
    assert_eq!(g.with_node_label(2, "x"), Err(GraphError::MissingNode(2)));
}

#[test]
fn new_elements_take_the_next_dense_id() {
    let g = path(3);
    let h = g.with_node("tail").expect("add node");
    assert_eq!(h.node_label(3), Some("tail"));
    let h = h.with_edge(2, 3, Some("link")).expect("add edge");
    assert_eq!(h.edge_endpoints(2), Some((2, 3)));
    assert_eq!(h.edge_label(2), Some("link"));
    assert_eq!(h.edge_weight(2), Some(1.0));
}

#[test]
fn canonical_hash_distinguishes_numbering() {
    let a = VersionedGraph::from_records(
        vec![NodeRecord::new("x"), NodeRecord::new("y")],
        Vec::new(),
    )
    .expect("records");
    let b = VersionedGraph::from_records(
        vec![NodeRecord::new("y"), NodeRecord::new("x")],
        Vec::new(),
    )
    .expect("records");
    assert_ne!(a.compute_hash().expect("hash"), b.compute_hash().expect("hash"));
}

proptest! {
    #[test]
    fn degrees_match_edge_scan(deletions in prop::collection::vec(0usize..8, 0..6)) {
        let mut g = path(8)
            .with_edge(7, 0, None)
            .and_then(|g| g.with_edge(3, 3, None))
            .expect("extra edges");
        for pick in deletions {
            if g.edge_count() == 0 {
                break;
            }
            g = g.without_edge(pick % g.edge_count()).expect("edge in range");
        }
        for node in 0..g.node_count() {
            let out = g.edges().iter().filter(|e| e.from == node).count();
            let inn = g.edges().iter().filter(|e| e.to == node).count();
            prop_assert_eq!(g.out_degree(node), Some(out));
            prop_assert_eq!(g.in_degree(node), Some(inn));
        }
        let isolated: Vec<_> = (0..g.node_count()).filter(|&n| g.is_isolated(n)).collect();
        if let Some(&victim) = isolated.first() {
            let before = g.edges().to_vec();
            let h = g.without_node(victim).expect("isolated node deletes");
            for (old, new) in before.iter().zip(h.edges()) {
                let shift = |id: usize| if id > victim { id - 1 } else { id };
                prop_assert_eq!(new.from, shift(old.from));
                prop_assert_eq!(new.to, shift(old.to));
            }
        }
    }
}
