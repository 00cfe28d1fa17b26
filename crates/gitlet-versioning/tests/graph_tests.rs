// Copyright (C) 2026  Gitlet Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//! Commit graph split-point tests
//!
//! Covers:
//! - Linear history
//! - Divergent branches
//! - Histories containing merge commits
//! - Rebuilding the graph from stored commits

use chrono::{TimeZone, Utc};
use gitlet_versioning::{Commit, CommitGraph, Oid, Parents, Tree};

fn oid(name: &str) -> Oid {
    Oid::hash(name.as_bytes())
}

/// Build a graph from `(parent, child)` edges rooted at "A"
fn graph(edges: &[(&str, &str)]) -> CommitGraph {
    let mut graph = CommitGraph::new(oid("A"));
    for (parent, child) in edges {
        graph.add_edge(oid(parent), oid(child));
    }
    graph
}

/// A ── B ── C ── D
#[test]
fn test_linear_history() {
    let g = graph(&[("A", "B"), ("B", "C"), ("C", "D")]);

    assert_eq!(g.split_point(&oid("B"), &oid("D")).unwrap(), oid("B"));
    assert_eq!(g.split_point(&oid("D"), &oid("B")).unwrap(), oid("B"));
    assert_eq!(g.split_point(&oid("A"), &oid("D")).unwrap(), oid("A"));
    assert_eq!(g.split_point(&oid("D"), &oid("D")).unwrap(), oid("D"));
}

/// A ── B ── C ── D
///       \
///        E ── F
#[test]
fn test_divergent_branches() {
    let g = graph(&[("A", "B"), ("B", "C"), ("C", "D"), ("B", "E"), ("E", "F")]);

    assert_eq!(g.split_point(&oid("D"), &oid("F")).unwrap(), oid("B"));
    assert_eq!(g.split_point(&oid("F"), &oid("C")).unwrap(), oid("B"));
    assert_eq!(g.split_point(&oid("E"), &oid("F")).unwrap(), oid("E"));
}

/// A ── B ── C ─── M ── N
///       \        /
///        D ─────┘
///
/// M is reached through C first (C was discovered before D), so the path to
/// N runs A-B-C-M-N and the split point of N and D is B, not D.
#[test]
fn test_after_merge_commit() {
    let g = graph(&[("A", "B"), ("B", "C"), ("B", "D"), ("D", "M"), ("C", "M"), ("M", "N")]);

    assert_eq!(g.split_point(&oid("N"), &oid("D")).unwrap(), oid("B"));
    assert_eq!(g.split_point(&oid("N"), &oid("C")).unwrap(), oid("C"));
}

/// A ── B ── C ──┐
///  \            M
///   D ── E ─────┘
///
/// M lies at depth 3 through both C and E. BFS dequeues C before E (B was
/// discovered before D), so M's shortest-path parent is C even though E is
/// also an ancestor of M.
#[test]
fn test_tie_break_follows_first_discovery() {
    let g = graph(&[
        ("A", "B"),
        ("A", "D"),
        ("B", "C"),
        ("D", "E"),
        ("E", "M"),
        ("C", "M"),
    ]);

    assert_eq!(g.split_point(&oid("M"), &oid("C")).unwrap(), oid("C"));
    assert_eq!(g.split_point(&oid("M"), &oid("E")).unwrap(), oid("A"));
}

#[test]
fn test_unknown_commit_is_error() {
    let g = graph(&[("A", "B")]);
    assert!(g.split_point(&oid("B"), &oid("nope")).is_err());
}

#[test]
fn test_rebuild_matches_incremental_graph() {
    let ts = |s: i64| Utc.timestamp_opt(s, 0).unwrap();

    let root = Commit::initial();
    let root_oid = root.oid().unwrap();
    let b = Commit::with_timestamp("b", Parents::Single(root_oid), Tree::new(), ts(100));
    let b_oid = b.oid().unwrap();
    let c = Commit::with_timestamp("c", Parents::Single(b_oid), Tree::new(), ts(200));
    let c_oid = c.oid().unwrap();
    let d = Commit::with_timestamp("d", Parents::Single(b_oid), Tree::new(), ts(300));
    let d_oid = d.oid().unwrap();

    let mut expected = CommitGraph::new(root_oid);
    expected.add_edge(root_oid, b_oid);
    expected.add_edge(b_oid, c_oid);
    expected.add_edge(b_oid, d_oid);

    // Input order does not matter; timestamps decide
    let rebuilt = CommitGraph::rebuild(vec![
        (d_oid, d),
        (root_oid, root),
        (c_oid, c),
        (b_oid, b),
    ])
    .unwrap();

    assert_eq!(rebuilt, expected);
    assert_eq!(rebuilt.split_point(&c_oid, &d_oid).unwrap(), b_oid);
}

#[test]
fn test_rebuild_merge_edges_match_merge_order() {
    let ts = |s: i64| Utc.timestamp_opt(s, 0).unwrap();

    let root = Commit::initial();
    let root_oid = root.oid().unwrap();
    let c = Commit::with_timestamp("c", Parents::Single(root_oid), Tree::new(), ts(100));
    let c_oid = c.oid().unwrap();
    let g = Commit::with_timestamp("g", Parents::Single(root_oid), Tree::new(), ts(200));
    let g_oid = g.oid().unwrap();
    let m = Commit::with_timestamp("m", Parents::Merge(c_oid, g_oid), Tree::new(), ts(300));
    let m_oid = m.oid().unwrap();

    let mut expected = CommitGraph::new(root_oid);
    expected.add_edge(root_oid, c_oid);
    expected.add_edge(root_oid, g_oid);
    expected.add_edge(g_oid, m_oid);
    expected.add_edge(c_oid, m_oid);

    let rebuilt =
        CommitGraph::rebuild(vec![(m_oid, m), (g_oid, g), (c_oid, c), (root_oid, root)]).unwrap();
    assert_eq!(rebuilt, expected);
}

#[test]
fn test_rebuild_requires_initial_commit() {
    let orphan = Commit::new("orphan", oid("missing"), Tree::new());
    let orphan_oid = orphan.oid().unwrap();
    assert!(CommitGraph::rebuild(vec![(orphan_oid, orphan)]).is_err());
}
