// Copyright 2025 the Docnav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the engine: ids, events in, effects out, and the host seams.
//!
//! ## Overview
//!
//! The engine is driven by [`Event`] messages and answers with [`Effect`]
//! values. It never mutates the page itself: a [`Host`] applies effects
//! and answers geometry queries through [`Layout`].

use docnav_tree::NodeId;
use kurbo::Rect;

/// Position of a content section in reading order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct SectionId(pub usize);

/// Position of a snippet group in document order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub usize);

/// Position of a field-list entry in document (pre-)order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct FieldId(pub usize);

/// A page mutation requested by the engine.
///
/// Produced by the navigation components and delivered, in order, to
/// [`Host::apply`] by the [`Controller`](crate::controller::Controller).
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Mark a sidebar node as the highlighted topic.
    Activate(NodeId),
    /// Remove the highlight from a sidebar node.
    Deactivate(NodeId),
    /// Show the child list owned by a sidebar node.
    Expand(NodeId),
    /// Hide the child list owned by a sidebar node.
    Collapse(NodeId),
    /// Scroll the sidebar viewport by a signed delta (positive scrolls down).
    ScrollSidebarBy(f64),
    /// Programmatically jump the content pane to a section.
    ScrollContentTo(SectionId),
    /// Replace the current navigable location without reloading.
    ReplaceLocation(String),
    /// Mark a group's display element for `lang` as selected.
    SelectSnippet {
        /// Group to update.
        group: GroupId,
        /// Language tag of the element.
        lang: String,
    },
    /// Clear the selected mark of a group's display element for `lang`.
    DeselectSnippet {
        /// Group to update.
        group: GroupId,
        /// Language tag of the element.
        lang: String,
    },
    /// Set a group's selector value without firing its change event.
    SetSelectorValue {
        /// Group owning the selector.
        group: GroupId,
        /// New selector value.
        lang: String,
    },
    /// Show a collapsed nested field list owned by a field entry.
    ExpandField(FieldId),
    /// Scroll a field entry into view.
    RevealField(FieldId),
}

/// Input events, one per host callback.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// The user clicked a sidebar entry.
    SidebarClick {
        /// Link target of the clicked entry.
        link: String,
    },
    /// The user clicked a link inside the content pane.
    AnchorClick {
        /// The link's target, e.g. `#users-create` or `/users/create`.
        href: String,
    },
    /// The content pane scrolled.
    Scroll {
        /// New vertical scroll offset of the content pane.
        offset: f64,
    },
    /// The user changed a snippet group's language selector.
    LanguageSelected {
        /// Group whose selector fired.
        group: GroupId,
        /// Selected language tag.
        lang: String,
    },
}

/// What the host should do with the originating browser event.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Let the default action run.
    Continue,
    /// The event was handled; suppress the default action.
    Consumed,
}

/// Live geometry of the rendered page.
///
/// All rectangles are in viewport coordinates of their pane: `y = 0` is the
/// top edge of the visible area, so a section scrolled past has a negative top.
/// Values are queried on demand and never cached by the engine.
pub trait Layout {
    /// Visible rectangle of the sidebar pane.
    fn sidebar_viewport(&self) -> Rect;
    /// Rendered bounds of a sidebar node, if it is laid out.
    fn node_bounds(&self, node: NodeId) -> Option<Rect>;
    /// Rendered bounds of a content section, if it is laid out.
    fn section_bounds(&self, section: SectionId) -> Option<Rect>;
}

/// The page the engine drives.
pub trait Host: Layout {
    /// Apply one effect. Called in the order effects were produced.
    fn apply(&mut self, effect: &Effect);
}
