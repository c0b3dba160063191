#![forbid(unsafe_code)]

use crate::ids::NodeId;
use std::collections::HashMap;

/// One flat row as projected from the record source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub key: String,
    pub parent_key: Option<String>,
    pub label: String,
}

impl Record {
    pub fn root(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            parent_key: None,
            label: label.into(),
        }
    }

    pub fn child(
        key: impl Into<String>,
        parent_key: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            parent_key: Some(parent_key.into()),
            label: label.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    pub parent_id: Option<NodeId>,
    /// In record order.
    pub children: Vec<NodeId>,
}

impl Node {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Validated hierarchy. Every parent reference resolves inside the tree and
/// the parent graph is acyclic; nodes iterate in the order their records
/// arrived.
#[derive(Clone, Debug, Default)]
pub struct Tree {
    pub(super) nodes: Vec<Node>,
    pub(super) index: HashMap<NodeId, usize>,
}

impl Tree {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: &NodeId) -> Option<&Node> {
        self.index.get(id).map(|&pos| &self.nodes[pos])
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    /// Nodes in record order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn roots(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|node| node.is_root())
    }

    pub fn children(&self, id: &NodeId) -> impl Iterator<Item = &Node> {
        self.get(id)
            .into_iter()
            .flat_map(|node| node.children.iter())
            .filter_map(|child| self.get(child))
    }

    /// Number of ancestors above `id`; roots sit at depth 0.
    pub fn depth(&self, id: &NodeId) -> Option<usize> {
        let mut node = self.get(id)?;
        let mut depth = 0usize;
        while let Some(parent) = node.parent_id.as_ref() {
            node = self.get(parent)?;
            depth += 1;
        }
        Some(depth)
    }
}
