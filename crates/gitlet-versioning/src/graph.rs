// Gitlet - Local Version Control
// Copyright (C) 2025 Gitlet Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published
// by the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.

//! Commit history graph and split-point computation
//!
//! The graph stores parent→child edges between commit ids. Each id gets a
//! dense integer label the first time it is seen; the root commit is label
//! 0. Labels are an internal detail and never leave this module.
//!
//! # Split point
//!
//! A breadth-first search from the root builds a shortest-path tree. The
//! root→node label paths of the two commits are compared and the last label
//! on which they agree is the split point. When a node can be reached by
//! several shortest paths, the one discovered first wins: children are
//! visited in edge insertion order.
//!
//! ```text
//!   A ── B ── C ── D
//!         \
//!          E ── F
//! ```
//!
//! `split_point(D, F) == B`, `split_point(B, D) == B`.

use crate::{Commit, Oid, VcsError, VcsResult};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use tracing::debug;

/// Directed acyclic graph of commit ids
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitGraph {
    /// Label → commit id
    nodes: Vec<Oid>,

    /// Label → child labels, in insertion order
    edges: Vec<Vec<usize>>,

    /// Commit id → label, rebuilt after loading
    #[serde(skip)]
    labels: HashMap<Oid, usize>,
}

impl CommitGraph {
    /// Create a graph holding only the root commit
    pub fn new(root: Oid) -> Self {
        let mut graph = Self::default();
        graph.label_of(root);
        graph
    }

    /// Id of the root commit, if the graph is non-empty
    pub fn root(&self) -> Option<Oid> {
        self.nodes.first().copied()
    }

    /// Most recently labelled commit
    pub fn latest(&self) -> Option<Oid> {
        self.nodes.last().copied()
    }

    /// Number of commits in the graph
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the graph has no commits
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check whether `oid` is part of the graph
    pub fn contains(&self, oid: &Oid) -> bool {
        self.labels.contains_key(oid)
    }

    /// Record that `child` has `parent` as a parent
    ///
    /// Unknown ids are labelled on first sight. Adding the same edge twice
    /// has no effect.
    pub fn add_edge(&mut self, parent: Oid, child: Oid) {
        let from = self.label_of(parent);
        let to = self.label_of(child);
        if !self.edges[from].contains(&to) {
            self.edges[from].push(to);
            debug!(parent = %parent, child = %child, "Added graph edge");
        }
    }

    /// Children of `oid`, in insertion order
    pub fn children(&self, oid: &Oid) -> Vec<Oid> {
        self.labels
            .get(oid)
            .map(|&label| self.edges[label].iter().map(|&c| self.nodes[c]).collect())
            .unwrap_or_default()
    }

    /// Latest common ancestor of `a` and `b` along BFS shortest paths
    ///
    /// # Errors
    ///
    /// [`VcsError::CommitNotFound`] if either id is not in the graph.
    pub fn split_point(&self, a: &Oid, b: &Oid) -> VcsResult<Oid> {
        let la = self.existing_label(a)?;
        let lb = self.existing_label(b)?;

        let edge_to = self.bfs_tree();
        let path_a = Self::path_from_root(&edge_to, la);
        let path_b = Self::path_from_root(&edge_to, lb);

        let split = path_a
            .iter()
            .zip(path_b.iter())
            .take_while(|(x, y)| x == y)
            .last()
            .map(|(&x, _)| x)
            .unwrap_or(0);

        debug!(a = %a, b = %b, split = %self.nodes[split], "Computed split point");
        Ok(self.nodes[split])
    }

    /// Rebuild a graph from stored commits
    ///
    /// Commits are replayed oldest first (ties broken by id) so labels come
    /// out in creation order.
    pub fn rebuild(commits: impl IntoIterator<Item = (Oid, Commit)>) -> VcsResult<Self> {
        let mut commits: Vec<(Oid, Commit)> = commits.into_iter().collect();
        commits.sort_by(|(oa, ca), (ob, cb)| ca.timestamp.cmp(&cb.timestamp).then(oa.cmp(ob)));

        let root = commits
            .iter()
            .find(|(_, c)| c.is_initial())
            .map(|(oid, _)| *oid)
            .ok_or_else(|| VcsError::corrupt("no initial commit found while rebuilding graph"))?;

        let mut graph = Self::new(root);
        for (oid, commit) in &commits {
            // Merge edges were recorded given tip first
            for parent in commit.parents.to_vec().into_iter().rev() {
                graph.add_edge(parent, *oid);
            }
        }

        debug!(commits = graph.len(), "Rebuilt commit graph");
        Ok(graph)
    }

    /// Encode as JSON
    pub fn to_json(&self) -> VcsResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode from JSON and restore the id index
    ///
    /// # Errors
    ///
    /// [`VcsError::Corrupt`] if the record is malformed or an edge points
    /// outside the node list.
    pub fn from_json(data: &[u8]) -> VcsResult<Self> {
        let mut graph: CommitGraph = serde_json::from_slice(data)?;

        if graph.nodes.len() != graph.edges.len() {
            return Err(VcsError::corrupt("graph node and edge lists differ in length"));
        }
        let n = graph.nodes.len();
        if graph.edges.iter().flatten().any(|&c| c >= n) {
            return Err(VcsError::corrupt("graph edge refers to unknown label"));
        }

        graph.labels = graph
            .nodes
            .iter()
            .enumerate()
            .map(|(label, oid)| (*oid, label))
            .collect();
        if graph.labels.len() != n {
            return Err(VcsError::corrupt("graph contains duplicate commit ids"));
        }

        Ok(graph)
    }

    fn label_of(&mut self, oid: Oid) -> usize {
        if let Some(&label) = self.labels.get(&oid) {
            return label;
        }
        let label = self.nodes.len();
        self.nodes.push(oid);
        self.edges.push(Vec::new());
        self.labels.insert(oid, label);
        label
    }

    fn existing_label(&self, oid: &Oid) -> VcsResult<usize> {
        self.labels
            .get(oid)
            .copied()
            .ok_or_else(|| VcsError::CommitNotFound(oid.to_hex()))
    }

    /// BFS from the root; `edge_to[v]` is the label v was discovered from
    fn bfs_tree(&self) -> Vec<Option<usize>> {
        let n = self.nodes.len();
        let mut edge_to = vec![None; n];
        let mut marked = vec![false; n];
        let mut queue = VecDeque::new();

        if n > 0 {
            marked[0] = true;
            queue.push_back(0);
        }

        while let Some(v) = queue.pop_front() {
            for &w in &self.edges[v] {
                if !marked[w] {
                    marked[w] = true;
                    edge_to[w] = Some(v);
                    queue.push_back(w);
                }
            }
        }

        edge_to
    }

    fn path_from_root(edge_to: &[Option<usize>], target: usize) -> Vec<usize> {
        let mut path = vec![target];
        let mut current = target;
        while let Some(prev) = edge_to[current] {
            path.push(prev);
            current = prev;
        }
        path.reverse();
        path
    }
}
