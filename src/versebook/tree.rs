//! # Study Forest
//!
//! The user's notebook is an ordered forest of [`StudyNode`]s. This module owns
//! the structural operations on it: add, delete, content update and lookup.
//!
//! ## Rebuild, Don't Patch
//!
//! Every mutator takes `&self` and returns a [`Mutation`] holding a freshly
//! rebuilt forest. The previous forest value is never touched, so a caller
//! holding the old value can compare old and new without aliasing surprises.
//! Each mutation is a full depth-first pass, O(n) in the number of nodes,
//! which is fine for hand-authored notebooks.
//!
//! ## Invalid Requests Are No-Ops
//!
//! Unknown parent, unknown node, a folder id given to a content update, or an
//! empty name all leave the forest unchanged. Rather than leave callers
//! guessing, each [`Mutation`] carries a [`MutationOutcome`] saying whether
//! the change was applied and, if not, why. Nothing here returns an error.
//!
//! ## Lookup Order
//!
//! [`StudyForest::find_node`] is depth-first, parents before children, in
//! sibling order. Since ids are unique across the forest, the order only
//! matters for cost.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::model::{NodeKind, StudyNode};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudyForest {
    nodes: Vec<StudyNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    EmptyName,
    DuplicateId,
    ParentNotFound,
    ParentNotFolder,
    NodeNotFound,
    NotAReference,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::EmptyName => "name is empty",
            SkipReason::DuplicateId => "id is already in use",
            SkipReason::ParentNotFound => "parent not found",
            SkipReason::ParentNotFolder => "parent is not a folder",
            SkipReason::NodeNotFound => "node not found",
            SkipReason::NotAReference => "node is not a reference",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied { id: String },
    Skipped(SkipReason),
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied { .. })
    }
}

/// The result of a structural change: the rebuilt forest and what happened.
#[derive(Debug, Clone)]
pub struct Mutation {
    pub forest: StudyForest,
    pub outcome: MutationOutcome,
}

impl Mutation {
    fn applied(forest: StudyForest, id: &str) -> Self {
        Self {
            forest,
            outcome: MutationOutcome::Applied { id: id.to_string() },
        }
    }

    fn skipped(forest: &StudyForest, reason: SkipReason) -> Self {
        Self {
            forest: forest.clone(),
            outcome: MutationOutcome::Skipped(reason),
        }
    }
}

pub fn new_node_id() -> String {
    Uuid::new_v4().to_string()
}

impl StudyForest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_nodes(nodes: Vec<StudyNode>) -> Self {
        Self { nodes }
    }

    /// Top-level nodes in insertion order.
    pub fn nodes(&self) -> &[StudyNode] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of nodes at every depth.
    pub fn count(&self) -> usize {
        self.walk().len()
    }

    pub fn contains(&self, node_id: &str) -> bool {
        self.find_node(node_id).is_some()
    }

    /// Adds a node with a freshly generated id.
    pub fn add(&self, kind: NodeKind, parent_id: Option<&str>, name: &str) -> Mutation {
        self.add_with_id(kind, parent_id, name, new_node_id())
    }

    /// Adds a node under `parent_id` (or at the root when `None`) using a
    /// caller-assigned id.
    pub fn add_with_id(
        &self,
        kind: NodeKind,
        parent_id: Option<&str>,
        name: &str,
        id: String,
    ) -> Mutation {
        if name.trim().is_empty() {
            return Mutation::skipped(self, SkipReason::EmptyName);
        }
        if self.contains(&id) {
            return Mutation::skipped(self, SkipReason::DuplicateId);
        }

        let node = StudyNode::new(kind, id.clone(), name.to_string());

        match parent_id {
            None => {
                let mut nodes = self.nodes.clone();
                nodes.push(node);
                Mutation::applied(Self::from_nodes(nodes), &id)
            }
            Some(parent_id) => match self.find_node(parent_id) {
                None => Mutation::skipped(self, SkipReason::ParentNotFound),
                Some(parent) if !parent.is_folder() => {
                    Mutation::skipped(self, SkipReason::ParentNotFolder)
                }
                Some(_) => {
                    let nodes = rebuild_with_child(&self.nodes, parent_id, &node);
                    Mutation::applied(Self::from_nodes(nodes), &id)
                }
            },
        }
    }

    /// Removes the node wherever it sits, together with its subtree.
    pub fn delete(&self, node_id: &str) -> Mutation {
        if !self.contains(node_id) {
            return Mutation::skipped(self, SkipReason::NodeNotFound);
        }
        let nodes = rebuild_without(&self.nodes, node_id);
        Mutation::applied(Self::from_nodes(nodes), node_id)
    }

    /// Replaces the note text of a reference.
    pub fn update_reference_content(&self, node_id: &str, content: &str) -> Mutation {
        match self.find_node(node_id) {
            None => Mutation::skipped(self, SkipReason::NodeNotFound),
            Some(node) if node.is_folder() => Mutation::skipped(self, SkipReason::NotAReference),
            Some(_) => {
                let nodes = rebuild_with_content(&self.nodes, node_id, content);
                Mutation::applied(Self::from_nodes(nodes), node_id)
            }
        }
    }

    pub fn find_node(&self, node_id: &str) -> Option<&StudyNode> {
        find_in(&self.nodes, node_id)
    }

    /// The chain of nodes from a root down to `node_id`, inclusive.
    pub fn find_path(&self, node_id: &str) -> Option<Vec<&StudyNode>> {
        let mut path = Vec::new();
        if path_in(&self.nodes, node_id, &mut path) {
            Some(path)
        } else {
            None
        }
    }

    /// Depth-first listing with depth (0 for top-level nodes).
    pub fn walk(&self) -> Vec<(usize, &StudyNode)> {
        let mut out = Vec::new();
        walk_into(&self.nodes, 0, &mut out);
        out
    }

    /// Number of nodes in the subtree rooted at `node_id`, itself included.
    pub fn subtree_size(&self, node_id: &str) -> usize {
        self.find_node(node_id).map(subtree_len).unwrap_or(0)
    }
}

fn find_in<'a>(nodes: &'a [StudyNode], node_id: &str) -> Option<&'a StudyNode> {
    for node in nodes {
        if node.id() == node_id {
            return Some(node);
        }
        if let Some(found) = find_in(node.children(), node_id) {
            return Some(found);
        }
    }
    None
}

fn path_in<'a>(nodes: &'a [StudyNode], node_id: &str, path: &mut Vec<&'a StudyNode>) -> bool {
    for node in nodes {
        path.push(node);
        if node.id() == node_id || path_in(node.children(), node_id, path) {
            return true;
        }
        path.pop();
    }
    false
}

fn walk_into<'a>(nodes: &'a [StudyNode], depth: usize, out: &mut Vec<(usize, &'a StudyNode)>) {
    for node in nodes {
        out.push((depth, node));
        walk_into(node.children(), depth + 1, out);
    }
}

fn subtree_len(node: &StudyNode) -> usize {
    1 + node.children().iter().map(subtree_len).sum::<usize>()
}

fn rebuild_with_child(nodes: &[StudyNode], parent_id: &str, child: &StudyNode) -> Vec<StudyNode> {
    nodes
        .iter()
        .map(|node| match node {
            StudyNode::Folder { id, name, children } => {
                let mut children = rebuild_with_child(children, parent_id, child);
                if id == parent_id {
                    children.push(child.clone());
                }
                StudyNode::Folder {
                    id: id.clone(),
                    name: name.clone(),
                    children,
                }
            }
            reference => reference.clone(),
        })
        .collect()
}

fn rebuild_without(nodes: &[StudyNode], target: &str) -> Vec<StudyNode> {
    nodes
        .iter()
        .filter(|node| node.id() != target)
        .map(|node| match node {
            StudyNode::Folder { id, name, children } => StudyNode::Folder {
                id: id.clone(),
                name: name.clone(),
                children: rebuild_without(children, target),
            },
            reference => reference.clone(),
        })
        .collect()
}

fn rebuild_with_content(nodes: &[StudyNode], target: &str, new_content: &str) -> Vec<StudyNode> {
    nodes
        .iter()
        .map(|node| match node {
            StudyNode::Folder { id, name, children } => StudyNode::Folder {
                id: id.clone(),
                name: name.clone(),
                children: rebuild_with_content(children, target, new_content),
            },
            StudyNode::Reference { id, name, .. } if id == target => StudyNode::Reference {
                id: id.clone(),
                name: name.clone(),
                content: new_content.to_string(),
            },
            reference => reference.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn applied_id(mutation: &Mutation) -> String {
        match &mutation.outcome {
            MutationOutcome::Applied { id } => id.clone(),
            MutationOutcome::Skipped(reason) => panic!("expected applied, got {reason}"),
        }
    }

    /// Folder F containing reference R, plus a top-level reference T.
    fn sample() -> (StudyForest, String, String) {
        let forest = StudyForest::new();
        let m = forest.add(NodeKind::Folder, None, "F");
        let folder_id = applied_id(&m);
        let m = m.forest.add(NodeKind::Reference, Some(&folder_id), "R");
        let ref_id = applied_id(&m);
        let m = m.forest.add(NodeKind::Reference, None, "T");
        (m.forest, folder_id, ref_id)
    }

    #[test]
    fn add_reference_at_root() {
        let m = StudyForest::new().add(NodeKind::Reference, None, "X");
        let id = applied_id(&m);
        let node = m.forest.find_node(&id).unwrap();
        assert_eq!(node.kind(), NodeKind::Reference);
        assert_eq!(node.name(), "X");
        assert_eq!(node.content(), Some(""));
    }

    #[test]
    fn add_reference_inside_folder() {
        let (forest, folder_id, ref_id) = sample();
        let folder = forest.find_node(&folder_id).unwrap();
        assert_eq!(folder.children().len(), 1);
        assert_eq!(folder.children()[0].id(), ref_id);

        let path = forest.find_path(&ref_id).unwrap();
        let names: Vec<_> = path.iter().map(|n| n.name()).collect();
        assert_eq!(names, vec!["F", "R"]);
    }

    #[test]
    fn children_keep_insertion_order() {
        let (forest, folder_id, _) = sample();
        let m = forest.add(NodeKind::Folder, Some(&folder_id), "B");
        let m = m.forest.add(NodeKind::Reference, Some(&folder_id), "A");
        let names: Vec<_> = m
            .forest
            .find_node(&folder_id)
            .unwrap()
            .children()
            .iter()
            .map(|n| n.name().to_string())
            .collect();
        assert_eq!(names, vec!["R", "B", "A"]);
    }

    #[test]
    fn delete_folder_removes_subtree() {
        let (forest, folder_id, ref_id) = sample();
        assert_eq!(forest.subtree_size(&folder_id), 2);
        let m = forest.delete(&folder_id);
        assert!(m.outcome.is_applied());
        assert!(m.forest.find_node(&folder_id).is_none());
        assert!(m.forest.find_node(&ref_id).is_none());
        assert_eq!(m.forest.count(), 1);
        // previous value untouched
        assert!(forest.find_node(&ref_id).is_some());
    }

    #[test]
    fn delete_nested_reference_only() {
        let (forest, folder_id, ref_id) = sample();
        let m = forest.delete(&ref_id);
        assert!(m.forest.find_node(&folder_id).unwrap().children().is_empty());
    }

    #[test]
    fn update_content_is_idempotent() {
        let (forest, _, ref_id) = sample();
        let once = forest.update_reference_content(&ref_id, "note text");
        let twice = once.forest.update_reference_content(&ref_id, "note text");
        assert_eq!(once.forest, twice.forest);
        assert_eq!(
            twice.forest.find_node(&ref_id).unwrap().content(),
            Some("note text")
        );
    }

    #[test]
    fn invalid_requests_leave_forest_unchanged() {
        let (forest, folder_id, ref_id) = sample();

        let m = forest.add(NodeKind::Reference, Some("missing"), "N");
        assert_eq!(m.forest, forest);
        assert_eq!(m.outcome, MutationOutcome::Skipped(SkipReason::ParentNotFound));

        let m = forest.add(NodeKind::Reference, Some(&ref_id), "N");
        assert_eq!(m.forest, forest);
        assert_eq!(m.outcome, MutationOutcome::Skipped(SkipReason::ParentNotFolder));

        let m = forest.delete("missing");
        assert_eq!(m.forest, forest);
        assert_eq!(m.outcome, MutationOutcome::Skipped(SkipReason::NodeNotFound));

        let m = forest.update_reference_content(&folder_id, "x");
        assert_eq!(m.forest, forest);
        assert_eq!(m.outcome, MutationOutcome::Skipped(SkipReason::NotAReference));

        let m = forest.add(NodeKind::Folder, None, "   ");
        assert_eq!(m.outcome, MutationOutcome::Skipped(SkipReason::EmptyName));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let (forest, folder_id, _) = sample();
        let m = forest.add_with_id(NodeKind::Folder, None, "Again", folder_id);
        assert_eq!(m.outcome, MutationOutcome::Skipped(SkipReason::DuplicateId));
        assert_eq!(m.forest, forest);
    }

    #[test]
    fn walk_reports_depth() {
        let (forest, _, _) = sample();
        let listing: Vec<_> = forest
            .walk()
            .into_iter()
            .map(|(depth, n)| (depth, n.name().to_string()))
            .collect();
        assert_eq!(
            listing,
            vec![(0, "F".to_string()), (1, "R".to_string()), (0, "T".to_string())]
        );
    }

    fn arb_node() -> impl Strategy<Value = StudyNode> {
        let leaf = ("[a-z0-9]{1,8}", ".{0,12}", ".{0,24}").prop_map(|(id, name, content)| {
            StudyNode::Reference { id, name, content }
        });
        leaf.prop_recursive(4, 32, 5, |inner| {
            ("[a-z0-9]{1,8}", ".{0,12}", prop::collection::vec(inner, 0..5)).prop_map(
                |(id, name, children)| StudyNode::Folder { id, name, children },
            )
        })
    }

    proptest! {
        #[test]
        fn forest_survives_json_round_trip(nodes in prop::collection::vec(arb_node(), 0..6)) {
            let forest = StudyForest::from_nodes(nodes);
            let json = serde_json::to_string(&forest).unwrap();
            let back: StudyForest = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(back, forest);
        }
    }
}
