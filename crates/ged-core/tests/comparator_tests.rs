// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Element comparators bound across two different graphs.
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::cmp::Ordering;

use ged_core::{
    sort_scored, DegreeDirection, ElementComparator, ElementKind, ScalarOrder, ScoredPair,
};
use ged_dry_tests::{path_graph, GraphBuilder};
use ged_graph::VersionedGraph;

/// Total degrees `[2, 1, 1]`.
fn star() -> VersionedGraph {
    GraphBuilder::new()
        .nodes(["hub", "left", "right"])
        .edge(0, 1)
        .edge(0, 2)
        .build()
        .unwrap()
}

#[test]
fn label_wildcard_on_second_side() {
    let g1 = GraphBuilder::new().nodes(["red"]).build().unwrap();
    let g2 = GraphBuilder::new().nodes(["", "blue"]).build().unwrap();
    let cmp = ElementComparator::Label {
        kind: ElementKind::Node,
    }
    .bind(&g1, &g2);
    assert_eq!(cmp.compare(0, 0), Ordering::Equal);
    assert_eq!(cmp.compare(0, 1), Ordering::Greater);
}

#[test]
fn edge_labels_compare_lexicographically() {
    let g1 = GraphBuilder::new()
        .nodes(["a", "b"])
        .labeled_edge(0, 1, "knows")
        .build()
        .unwrap();
    let g2 = GraphBuilder::new()
        .nodes(["a", "b"])
        .labeled_edge(0, 1, "likes")
        .edge(1, 0)
        .build()
        .unwrap();
    let cmp = ElementComparator::Label {
        kind: ElementKind::Edge,
    }
    .bind(&g1, &g2);
    assert_eq!(cmp.compare(0, 0), Ordering::Less);
    // Unlabeled edges carry "", which the second side treats as a wildcard.
    assert_eq!(cmp.compare(0, 1), Ordering::Equal);
}

#[test]
fn descending_degree_reads_swapped_graphs() {
    let g1 = star();
    let g2 = path_graph(3); // total degrees [1, 2, 1]
    let asc = ElementComparator::Degree {
        direction: DegreeDirection::Total,
        descending: false,
    }
    .bind(&g1, &g2);
    let desc = ElementComparator::Degree {
        direction: DegreeDirection::Total,
        descending: true,
    }
    .bind(&g1, &g2);

    // g1[0] = 2 vs g2[2] = 1.
    assert_eq!(asc.compare(0, 2), Ordering::Greater);
    // g1[2] = 1 vs g2[0] = 1: not the reverse of the ascending result.
    assert_eq!(desc.compare(0, 2), Ordering::Equal);
}

#[test]
fn descending_degree_on_one_graph_is_reversed() {
    let g = star();
    let desc = ElementComparator::Degree {
        direction: DegreeDirection::Total,
        descending: true,
    }
    .bind(&g, &g);
    let mut nodes = vec![1, 0, 2];
    nodes.sort_by(|&a, &b| desc.compare(a, b));
    assert_eq!(nodes[0], 0, "highest degree first");
}

#[test]
fn in_and_out_degree_differ() {
    let g1 = star();
    let g2 = star();
    let out = ElementComparator::Degree {
        direction: DegreeDirection::Out,
        descending: false,
    }
    .bind(&g1, &g2);
    let inc = ElementComparator::Degree {
        direction: DegreeDirection::In,
        descending: false,
    }
    .bind(&g1, &g2);
    assert_eq!(out.rank(0, 1), 1);
    assert_eq!(inc.rank(0, 1), -1);
}

#[test]
fn type_tags_across_graphs() {
    let g1 = GraphBuilder::new()
        .tagged_node("a", 3)
        .node("b")
        .build()
        .unwrap();
    let g2 = GraphBuilder::new()
        .node("x")
        .tagged_node("y", 3)
        .build()
        .unwrap();
    let cmp = ElementComparator::TypeTag {
        kind: ElementKind::Node,
        sentinel: 3,
    }
    .bind(&g1, &g2);
    assert_eq!(
        cmp.compatibility_matrix(&[0, 1], &[0, 1]),
        vec![vec![1, 0], vec![0, 1]]
    );
}

#[test]
fn edge_weights_feed_scored_pairs() {
    let g1 = GraphBuilder::new()
        .nodes(["a", "b"])
        .weighted_edge(0, 1, 0.5)
        .weighted_edge(1, 0, 4.0)
        .build()
        .unwrap();
    let g2 = GraphBuilder::new()
        .nodes(["a", "b"])
        .weighted_edge(0, 1, 2.0)
        .build()
        .unwrap();
    let cmp = ElementComparator::EdgeWeight.bind(&g1, &g2);
    assert_eq!(cmp.compare(0, 0), Ordering::Less);
    assert_eq!(cmp.compare(1, 0), Ordering::Greater);

    let mut pairs: Vec<ScoredPair> = [0, 1]
        .into_iter()
        .map(|left| ScoredPair {
            left,
            right: 0,
            score: f64::from(cmp.rank(left, 0)),
        })
        .collect();
    sort_scored(&mut pairs, ScalarOrder::Descending);
    assert_eq!(pairs[0].left, 1);
}
