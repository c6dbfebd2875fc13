// Copyright 2025 the Docnav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core index implementation: build from the render snapshot, structure queries, flag updates.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::types::{ExpandedPath, NodeFlags, NodeId, SidebarItem, SidebarList};

/// Static index over the sidebar tree.
///
/// Built once by [`TreeIndex::build`]; afterwards only the
/// [`EXPANDED`](NodeFlags::EXPANDED) and [`ACTIVE`](NodeFlags::ACTIVE) flags change.
#[derive(Clone, Default)]
pub struct TreeIndex {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    by_link: HashMap<String, NodeId>,
}

impl core::fmt::Debug for TreeIndex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let expanded = self
            .nodes
            .iter()
            .filter(|n| n.flags.contains(NodeFlags::EXPANDED))
            .count();
        let active = self
            .nodes
            .iter()
            .position(|n| n.flags.contains(NodeFlags::ACTIVE));
        f.debug_struct("TreeIndex")
            .field("nodes_total", &self.nodes.len())
            .field("roots", &self.roots.len())
            .field("expanded", &expanded)
            .field("active", &active)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
struct Node {
    link: String,
    label: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    flags: NodeFlags,
    // Child list rendered shown; only meaningful while building.
    shown: bool,
}

/// Result of [`TreeIndex::build`].
#[derive(Clone, Debug)]
pub struct Build {
    /// The index itself, flags already reflecting the initial state.
    pub index: TreeIndex,
    /// Node the page pre-marked as active, if any.
    pub active: Option<NodeId>,
    /// Chain of child lists the page rendered shown.
    pub expanded: ExpandedPath,
}

impl TreeIndex {
    /// Scan the rendered sidebar lists once and index every entry.
    ///
    /// Never fails. Structural problems are logged and degraded:
    /// - an item marked "has children" without a (non-empty) child list becomes a leaf;
    /// - a child list rendered shown that does not extend the single expanded
    ///   chain is left out of the initial [`ExpandedPath`];
    /// - when several items claim the same link, lookups resolve to the first.
    pub fn build(lists: &[SidebarList]) -> Build {
        let mut index = Self::default();
        for list in lists {
            for item in &list.items {
                let id = index.insert(None, item);
                index.roots.push(id);
            }
        }

        let mut active = None;
        for id in index.reading_order() {
            let node = index.node(id);
            if !node.flags.contains(NodeFlags::ACTIVE) {
                continue;
            }
            if active.is_none() {
                active = Some(id);
            } else {
                warn!(link = %node.link, "more than one pre-selected sidebar item; keeping the first");
            }
        }
        for node in &mut index.nodes {
            node.flags.remove(NodeFlags::ACTIVE);
        }
        if let Some(id) = active {
            index.set_flag(id, NodeFlags::ACTIVE, true);
        }

        let expanded = index.initial_path();
        debug!(
            nodes = index.nodes.len(),
            expanded = expanded.len(),
            active = ?active,
            "sidebar index built"
        );
        Build {
            index,
            active,
            expanded,
        }
    }

    fn insert(&mut self, parent: Option<NodeId>, item: &SidebarItem) -> NodeId {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices by design."
        )]
        let id = NodeId::new(self.nodes.len() as u32);
        let mut flags = NodeFlags::empty();
        if item.active {
            flags |= NodeFlags::ACTIVE;
        }
        self.nodes.push(Node {
            link: item.link.clone(),
            label: item.label.clone(),
            parent,
            children: Vec::new(),
            flags,
            shown: false,
        });
        if self.by_link.contains_key(&item.link) {
            warn!(link = %item.link, "duplicate sidebar link; lookups resolve to the first item");
        } else {
            self.by_link.insert(item.link.clone(), id);
        }

        match &item.children {
            Some(list) if !list.items.is_empty() => {
                if !item.has_children {
                    warn!(link = %item.link, "child list rendered without the has-children marker");
                }
                let node = self.node_mut(id);
                node.flags |= NodeFlags::HAS_CHILDREN;
                node.shown = !list.hidden;
                for child in &list.items {
                    let child_id = self.insert(Some(id), child);
                    self.node_mut(id).children.push(child_id);
                }
            }
            _ => {
                if item.has_children {
                    warn!(link = %item.link, "has-children item without a child list; treating as leaf");
                }
            }
        }
        id
    }

    // Walk down from the roots following shown lists, keeping a single chain.
    fn initial_path(&mut self) -> ExpandedPath {
        let mut path = ExpandedPath::new();
        let mut level: Vec<NodeId> = self.roots.clone();
        loop {
            let shown: Vec<NodeId> = level
                .iter()
                .copied()
                .filter(|id| self.node(*id).shown)
                .collect();
            let Some(&first) = shown.first() else {
                break;
            };
            for extra in &shown[1..] {
                warn!(link = %self.node(*extra).link, "second expanded branch in sidebar; ignoring");
            }
            self.set_flag(first, NodeFlags::EXPANDED, true);
            path.push(first);
            level = self.node(first).children.clone();
        }
        let orphaned = self
            .nodes
            .iter()
            .filter(|n| n.shown && !n.flags.contains(NodeFlags::EXPANDED))
            .count();
        if orphaned > 0 {
            debug!(orphaned, "shown child lists outside the expanded chain were dropped");
        }
        for node in &mut self.nodes {
            node.shown = false;
        }
        path
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.idx()]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.idx()]
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.idx())
    }

    /// Number of indexed nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the sidebar had no entries.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Top-level nodes in display order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Look up a node by its link.
    pub fn get(&self, link: &str) -> Option<NodeId> {
        self.by_link.get(link).copied()
    }

    /// Returns true if `id` belongs to this index.
    pub fn contains(&self, id: NodeId) -> bool {
        id.idx() < self.nodes.len()
    }

    /// Link (stable identifier) of a node.
    pub fn link(&self, id: NodeId) -> Option<&str> {
        self.node_opt(id).map(|n| n.link.as_str())
    }

    /// Display label of a node.
    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.node_opt(id).map(|n| n.label.as_str())
    }

    /// Parent of a node, `None` for roots and unknown ids.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Children of a node in display order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Current flags of a node.
    pub fn flags(&self, id: NodeId) -> NodeFlags {
        self.node_opt(id).map_or(NodeFlags::empty(), |n| n.flags)
    }

    /// Returns true if the node owns a child list.
    pub fn has_children(&self, id: NodeId) -> bool {
        self.flags(id).contains(NodeFlags::HAS_CHILDREN)
    }

    /// Set or clear a flag. [`NodeFlags::HAS_CHILDREN`] is structural and ignored here.
    ///
    /// Returns true if the flags changed.
    pub fn set_flag(&mut self, id: NodeId, flag: NodeFlags, on: bool) -> bool {
        let flag = flag - NodeFlags::HAS_CHILDREN;
        let Some(node) = self.nodes.get_mut(id.idx()) else {
            return false;
        };
        let before = node.flags;
        node.flags.set(flag, on);
        before != node.flags
    }

    /// Returns true if `ancestor` is a strict ancestor of `node`.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = self.parent(node);
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.parent(p);
        }
        false
    }

    /// Path from the root down to `id` (inclusive), outermost first.
    pub fn path_to_root(&self, mut id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.contains(id) {
            return out;
        }
        loop {
            out.push(id);
            match self.parent(id) {
                Some(p) => id = p,
                None => break,
            }
        }
        out.reverse();
        out
    }

    /// All nodes in document (pre-)order.
    pub fn reading_order(&self) -> impl Iterator<Item = NodeId> + '_ {
        // Insertion is depth-first, so slot order is document order.
        (0..self.nodes.len()).map(|i| {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            NodeId::new(i as u32)
        })
    }
}
