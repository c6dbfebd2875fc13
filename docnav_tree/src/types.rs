// Copyright 2025 the Docnav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the navigation tree: node identifiers, flags, and the sidebar render contract.

use serde::{Deserialize, Serialize};

/// Identifier for a node in the tree.
///
/// A small, copyable handle into a [`TreeIndex`](crate::TreeIndex).
/// Nodes are created once when the index is built and never removed, so a
/// `NodeId` stays valid for the lifetime of the index that produced it.
/// Ids are assigned in document order, which makes them usable as a cheap
/// reading-order key.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32) -> Self {
        Self(idx)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Position of the node in document order.
    pub const fn index(self) -> usize {
        self.idx()
    }
}

bitflags::bitflags! {
    /// Node flags describing structure and navigation state.
    ///
    /// [`HAS_CHILDREN`](Self::HAS_CHILDREN) is fixed at build time.
    /// [`EXPANDED`](Self::EXPANDED) and [`ACTIVE`](Self::ACTIVE) are the only
    /// flags that change afterwards.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node owns a child list.
        const HAS_CHILDREN = 0b0000_0001;
        /// Node's child list is shown.
        const EXPANDED     = 0b0000_0010;
        /// Node is the highlighted topic.
        const ACTIVE       = 0b0000_0100;
    }
}

/// One rendered sidebar list (a top-level list or a nested child list).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarList {
    /// Optional heading shown above a top-level list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Whether the list was rendered hidden (collapsed).
    #[serde(default)]
    pub hidden: bool,
    /// Items in display order.
    #[serde(default)]
    pub items: Vec<SidebarItem>,
}

/// One rendered sidebar entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarItem {
    /// Target path of the entry's link; doubles as the node's stable identifier.
    pub link: String,
    /// Display text of the link.
    #[serde(default)]
    pub label: String,
    /// The "has children" marker rendered on the item.
    #[serde(default)]
    pub has_children: bool,
    /// Whether the page pre-marked this item as the active topic.
    #[serde(default)]
    pub active: bool,
    /// Nested child list, if one was rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<SidebarList>,
}

impl SidebarItem {
    /// A leaf entry pointing at `link`.
    pub fn leaf(link: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            ..Default::default()
        }
    }

    /// A container entry pointing at `link` with a child list.
    pub fn branch(link: impl Into<String>, hidden: bool, items: Vec<Self>) -> Self {
        Self {
            link: link.into(),
            has_children: true,
            children: Some(SidebarList {
                title: None,
                hidden,
                items,
            }),
            ..Default::default()
        }
    }

    /// Mark the entry as pre-selected.
    #[must_use]
    pub fn with_active(mut self) -> Self {
        self.active = true;
        self
    }
}

/// The chain of currently shown child lists, outermost first.
///
/// Each element is the node that owns the shown list. The first element is a
/// root-level node and every following element is a child of the one before
/// it, so the path never has gaps.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpandedPath {
    pub(crate) nodes: Vec<NodeId>,
}

impl ExpandedPath {
    /// Create an empty path.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Owners of the shown lists, outermost first.
    pub fn as_slice(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Innermost shown list's owner.
    pub fn last(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    /// Number of shown nested lists.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no nested list is shown.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if `node`'s child list is part of the path.
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    /// Append an inner list.
    pub fn push(&mut self, node: NodeId) {
        self.nodes.push(node);
    }

    /// Remove and return the innermost list.
    pub fn pop(&mut self) -> Option<NodeId> {
        self.nodes.pop()
    }
}
