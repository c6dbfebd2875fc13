// Copyright 2025 the Docnav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation state: the active sidebar node and the expanded path.
//!
//! ## Transitions
//!
//! [`NavigationState::select_node`] moves the highlight and then calls
//! [`NavigationState::update_expansion`], which computes the minimal change
//! between the old and new expanded path:
//!
//! - Collapses are emitted from inner-most to outer-most, stopping at the
//!   first list that still contains the new node (the branching point).
//! - Expands are emitted from outer-most to inner-most, down to the new node's
//!   parent, and finally for the node's own child list when it has one.
//!
//! The sidebar scroll adjustment depends on the geometry after those changes,
//! so it is a separate query ([`NavigationState::sidebar_scroll_delta`]) that
//! the caller evaluates once the host has applied the effects.
//!
//! ## Minimal example
//!
//! ```
//! use docnav_sync::navigation::NavigationState;
//! use docnav_sync::types::Effect;
//! use docnav_tree::{SidebarItem, SidebarList, TreeIndex};
//!
//! let sidebar = vec![SidebarList {
//!     items: vec![
//!         SidebarItem::branch("/a", true, vec![SidebarItem::leaf("/a1"), SidebarItem::leaf("/a2")]),
//!         SidebarItem::leaf("/b"),
//!     ],
//!     ..Default::default()
//! }];
//! let mut nav = NavigationState::new(TreeIndex::build(&sidebar));
//! let a = nav.tree().get("/a").unwrap();
//! let a1 = nav.tree().get("/a1").unwrap();
//! let b = nav.tree().get("/b").unwrap();
//!
//! assert_eq!(
//!     nav.select_node(a1),
//!     vec![Effect::Activate(a1), Effect::Expand(a), Effect::ReplaceLocation("/a1".into())]
//! );
//! assert_eq!(
//!     nav.select_node(b),
//!     vec![
//!         Effect::Deactivate(a1),
//!         Effect::Activate(b),
//!         Effect::Collapse(a),
//!         Effect::ReplaceLocation("/b".into()),
//!     ]
//! );
//! assert!(nav.expanded().is_empty());
//! ```

use docnav_tree::{Build, ExpandedPath, NodeFlags, NodeId, TreeIndex};
use tracing::debug;

use crate::types::{Effect, Layout, SectionId};

/// Active node and expanded path over a [`TreeIndex`].
///
/// The only writer of the tree's [`NodeFlags::ACTIVE`] and
/// [`NodeFlags::EXPANDED`] flags after start-up.
#[derive(Clone, Debug)]
pub struct NavigationState {
    tree: TreeIndex,
    active: Option<NodeId>,
    expanded: ExpandedPath,
    // Sidebar node of each content section, in reading order.
    topics: Vec<Option<NodeId>>,
}

impl NavigationState {
    /// Take over a freshly built index and its initial state.
    pub fn new(build: Build) -> Self {
        Self {
            tree: build.index,
            active: build.active,
            expanded: build.expanded,
            topics: Vec::new(),
        }
    }

    /// Attach the sidebar node of each content section, in reading order.
    ///
    /// `None` entries keep section indices aligned when a section's
    /// back-reference did not resolve.
    #[must_use]
    pub fn with_topics(mut self, topics: Vec<Option<NodeId>>) -> Self {
        self.topics = topics;
        self
    }

    /// The underlying index.
    pub fn tree(&self) -> &TreeIndex {
        &self.tree
    }

    /// Currently active node, if any.
    pub fn active(&self) -> Option<NodeId> {
        self.active
    }

    /// Currently shown chain of nested lists.
    pub fn expanded(&self) -> &ExpandedPath {
        &self.expanded
    }

    /// Number of content sections known to the state.
    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    /// Sidebar node of the i-th section in reading order.
    pub fn topic(&self, index: usize) -> Option<NodeId> {
        self.topics.get(index).copied().flatten()
    }

    /// First section that belongs to `node`.
    pub fn section_of(&self, node: NodeId) -> Option<SectionId> {
        self.topics
            .iter()
            .position(|t| *t == Some(node))
            .map(SectionId)
    }

    /// Make `node` the active node.
    ///
    /// Returns no effects when `node` is already active or unknown.
    pub fn select_node(&mut self, node: NodeId) -> Vec<Effect> {
        if self.active == Some(node) {
            return Vec::new();
        }
        let Some(link) = self.tree.link(node).map(str::to_owned) else {
            debug!(?node, "select ignored: unknown node");
            return Vec::new();
        };

        let mut out = Vec::new();
        if let Some(prev) = self.active.take() {
            self.tree.set_flag(prev, NodeFlags::ACTIVE, false);
            out.push(Effect::Deactivate(prev));
        }
        self.tree.set_flag(node, NodeFlags::ACTIVE, true);
        self.active = Some(node);
        out.push(Effect::Activate(node));

        out.extend(self.update_expansion(node));
        debug!(link = %link, expanded = self.expanded.len(), "active node changed");
        out.push(Effect::ReplaceLocation(link));
        out
    }

    /// Select the sidebar node of the i-th section in reading order.
    pub fn select_node_by_index(&mut self, index: usize) -> Vec<Effect> {
        match self.topic(index) {
            Some(node) => self.select_node(node),
            None => {
                debug!(index, "no sidebar node for section");
                Vec::new()
            }
        }
    }

    /// Adjust the expanded path so that `node` is visible and, if it has
    /// children, its own list is shown.
    pub fn update_expansion(&mut self, node: NodeId) -> Vec<Effect> {
        let mut out = Vec::new();
        if !self.tree.contains(node) {
            return out;
        }

        // Collapse: inner→outer, up to the first list containing `node`.
        while let Some(last) = self.expanded.last() {
            if last == node || self.tree.is_ancestor(last, node) {
                break;
            }
            self.expanded.pop();
            self.tree.set_flag(last, NodeFlags::EXPANDED, false);
            out.push(Effect::Collapse(last));
        }

        // Expand: outer→inner, ancestors below the kept prefix.
        let mut ancestors = self.tree.path_to_root(node);
        ancestors.pop();
        let start = match self.expanded.last() {
            None => 0,
            Some(last) => ancestors
                .iter()
                .position(|a| *a == last)
                .map_or(ancestors.len(), |i| i + 1),
        };
        for &a in &ancestors[start..] {
            self.expand(a, &mut out);
        }

        if self.tree.has_children(node) && self.expanded.last() != Some(node) {
            self.expand(node, &mut out);
        }
        out
    }

    fn expand(&mut self, node: NodeId, out: &mut Vec<Effect>) {
        self.tree.set_flag(node, NodeFlags::EXPANDED, true);
        self.expanded.push(node);
        out.push(Effect::Expand(node));
    }

    /// Signed distance to scroll the sidebar so that `node`'s entry is visible.
    ///
    /// `None` when the entry is fully inside the sidebar viewport or not laid
    /// out. Otherwise the exact overflow past the top (negative) or the bottom
    /// (positive) edge; the entry is not re-centred.
    pub fn sidebar_scroll_delta(&self, node: NodeId, layout: &impl Layout) -> Option<f64> {
        let bounds = layout.node_bounds(node)?;
        let viewport = layout.sidebar_viewport();
        if bounds.y0 < viewport.y0 {
            Some(bounds.y0 - viewport.y0)
        } else if bounds.y1 > viewport.y1 {
            Some(bounds.y1 - viewport.y1)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docnav_tree::{SidebarItem, SidebarList};
    use kurbo::Rect;

    fn sidebar(items: Vec<SidebarItem>) -> Vec<SidebarList> {
        vec![SidebarList {
            items,
            ..Default::default()
        }]
    }

    // A > [A1 > [A1x, A1y], A2], B > [B1], C
    fn deep() -> NavigationState {
        NavigationState::new(TreeIndex::build(&sidebar(vec![
            SidebarItem::branch(
                "/a",
                true,
                vec![
                    SidebarItem::branch(
                        "/a1",
                        true,
                        vec![SidebarItem::leaf("/a1x"), SidebarItem::leaf("/a1y")],
                    ),
                    SidebarItem::leaf("/a2"),
                ],
            ),
            SidebarItem::branch("/b", true, vec![SidebarItem::leaf("/b1")]),
            SidebarItem::leaf("/c"),
        ])))
    }

    fn id(nav: &NavigationState, link: &str) -> NodeId {
        nav.tree().get(link).unwrap()
    }

    fn assert_invariants(nav: &NavigationState) {
        let tree = nav.tree();
        let active: Vec<_> = tree
            .reading_order()
            .filter(|n| tree.flags(*n).contains(NodeFlags::ACTIVE))
            .collect();
        assert_eq!(active, nav.active().into_iter().collect::<Vec<_>>());

        let path = nav.expanded().as_slice();
        let expanded: Vec<_> = tree
            .reading_order()
            .filter(|n| tree.flags(*n).contains(NodeFlags::EXPANDED))
            .collect();
        let mut sorted = path.to_vec();
        sorted.sort();
        assert_eq!(sorted, expanded, "flags mirror the path");
        if let Some(first) = path.first() {
            assert_eq!(tree.parent(*first), None, "path starts at the root level");
        }
        for pair in path.windows(2) {
            assert_eq!(tree.parent(pair[1]), Some(pair[0]), "path has a gap");
        }
        if let Some(active) = nav.active() {
            let expected_tail = if tree.has_children(active) {
                Some(active)
            } else {
                tree.parent(active)
            };
            assert_eq!(nav.expanded().last(), expected_tail);
        }
    }

    #[test]
    fn scenario_select_a1_then_b() {
        let mut nav = NavigationState::new(TreeIndex::build(&sidebar(vec![
            SidebarItem::branch(
                "/a",
                true,
                vec![SidebarItem::leaf("/a1"), SidebarItem::leaf("/a2")],
            ),
            SidebarItem::leaf("/b"),
        ])));
        let a = id(&nav, "/a");
        let a1 = id(&nav, "/a1");
        let b = id(&nav, "/b");
        assert_eq!(nav.active(), None);

        let ev = nav.select_node(a1);
        assert!(ev.contains(&Effect::Expand(a)));
        assert_eq!(nav.expanded().as_slice(), &[a]);
        assert_eq!(nav.active(), Some(a1));

        let ev = nav.select_node(b);
        assert!(ev.contains(&Effect::Collapse(a)));
        assert!(nav.expanded().is_empty());
        assert_eq!(nav.active(), Some(b));
        assert_invariants(&nav);
    }

    #[test]
    fn reselect_is_noop() {
        let mut nav = deep();
        let a1x = id(&nav, "/a1x");
        assert!(!nav.select_node(a1x).is_empty());
        let before = (nav.active(), nav.expanded().clone());
        assert!(nav.select_node(a1x).is_empty(), "second select emits nothing");
        assert_eq!((nav.active(), nav.expanded().clone()), before);
    }

    #[test]
    fn sibling_keeps_shared_ancestors() {
        let mut nav = deep();
        let a = id(&nav, "/a");
        let a1 = id(&nav, "/a1");
        let a1x = id(&nav, "/a1x");
        let a1y = id(&nav, "/a1y");
        let a2 = id(&nav, "/a2");

        let ev = nav.select_node(a1x);
        assert_eq!(
            ev,
            vec![
                Effect::Activate(a1x),
                Effect::Expand(a),
                Effect::Expand(a1),
                Effect::ReplaceLocation("/a1x".into()),
            ]
        );

        // Same parent: no expansion changes at all.
        let ev = nav.select_node(a1y);
        assert_eq!(
            ev,
            vec![
                Effect::Deactivate(a1x),
                Effect::Activate(a1y),
                Effect::ReplaceLocation("/a1y".into()),
            ]
        );

        // Cousin: only the inner list collapses.
        let ev = nav.select_node(a2);
        assert_eq!(
            ev,
            vec![
                Effect::Deactivate(a1y),
                Effect::Activate(a2),
                Effect::Collapse(a1),
                Effect::ReplaceLocation("/a2".into()),
            ]
        );
        assert_eq!(nav.expanded().as_slice(), &[a]);
        assert_invariants(&nav);
    }

    #[test]
    fn container_exposes_its_own_list() {
        let mut nav = deep();
        let a = id(&nav, "/a");
        let a1 = id(&nav, "/a1");
        let ev = nav.select_node(a1);
        assert_eq!(
            ev,
            vec![
                Effect::Activate(a1),
                Effect::Expand(a),
                Effect::Expand(a1),
                Effect::ReplaceLocation("/a1".into()),
            ]
        );
        assert_eq!(nav.expanded().as_slice(), &[a, a1]);

        // Selecting the parent container collapses the child's list.
        let ev = nav.select_node(a);
        assert!(ev.contains(&Effect::Collapse(a1)));
        assert_eq!(nav.expanded().as_slice(), &[a]);
        assert_invariants(&nav);
    }

    #[test]
    fn deep_jump_from_partial_path_has_no_gap() {
        let mut nav = deep();
        let a = id(&nav, "/a");
        let a1 = id(&nav, "/a1");
        let a2 = id(&nav, "/a2");
        let a1y = id(&nav, "/a1y");
        let _ = nav.select_node(a2);
        assert_eq!(nav.expanded().as_slice(), &[a]);
        let ev = nav.select_node(a1y);
        assert!(ev.contains(&Effect::Expand(a1)));
        assert!(!ev.contains(&Effect::Expand(a)), "shared ancestor stays as is");
        assert_eq!(nav.expanded().as_slice(), &[a, a1]);
        assert_invariants(&nav);
    }

    #[test]
    fn random_selection_sequences_keep_invariants() {
        let mut nav = deep();
        let nodes: Vec<_> = nav.tree().reading_order().collect();
        // Small LCG; deterministic across runs.
        let mut seed = 0x2545_f491_4f6c_dd1d_u64;
        for _ in 0..500 {
            seed = seed
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            let pick = nodes[(seed >> 33) as usize % nodes.len()];
            let _ = nav.select_node(pick);
            assert_eq!(nav.active(), Some(pick));
            assert_invariants(&nav);
        }
    }

    #[test]
    fn select_by_index_uses_topics() {
        let nav = deep();
        let a1x = id(&nav, "/a1x");
        let c = id(&nav, "/c");
        let mut nav = nav.with_topics(vec![Some(a1x), None, Some(c)]);
        assert_eq!(nav.section_of(c), Some(SectionId(2)));
        assert!(nav.select_node_by_index(1).is_empty(), "unresolved section");
        assert!(nav.select_node_by_index(9).is_empty(), "out of range");
        assert!(!nav.select_node_by_index(2).is_empty());
        assert_eq!(nav.active(), Some(c));
    }

    #[test]
    fn pre_marked_state_is_adopted() {
        let nav = NavigationState::new(TreeIndex::build(&sidebar(vec![
            SidebarItem::branch("/a", false, vec![SidebarItem::leaf("/a1").with_active()]),
        ])));
        let a = id(&nav, "/a");
        let a1 = id(&nav, "/a1");
        assert_eq!(nav.active(), Some(a1));
        assert_eq!(nav.expanded().as_slice(), &[a]);
        assert_invariants(&nav);
    }

    struct Fixed {
        viewport: Rect,
        row: Option<Rect>,
    }

    impl Layout for Fixed {
        fn sidebar_viewport(&self) -> Rect {
            self.viewport
        }
        fn node_bounds(&self, _node: NodeId) -> Option<Rect> {
            self.row
        }
        fn section_bounds(&self, _section: SectionId) -> Option<Rect> {
            None
        }
    }

    #[test]
    fn sidebar_delta_is_exact_overflow() {
        let nav = deep();
        let a = id(&nav, "/a");
        let viewport = Rect::new(0.0, 0.0, 200.0, 400.0);
        let at = |y0: f64, y1: f64| Fixed {
            viewport,
            row: Some(Rect::new(0.0, y0, 200.0, y1)),
        };
        assert_eq!(nav.sidebar_scroll_delta(a, &at(10.0, 30.0)), None);
        assert_eq!(nav.sidebar_scroll_delta(a, &at(-25.0, -5.0)), Some(-25.0));
        assert_eq!(nav.sidebar_scroll_delta(a, &at(390.0, 410.0)), Some(10.0));
        let hidden = Fixed {
            viewport,
            row: None,
        };
        assert_eq!(nav.sidebar_scroll_delta(a, &hidden), None);
    }
}
