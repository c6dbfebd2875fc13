// Copyright 2025 the Docnav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Docnav Tree: the static sidebar index of a documentation viewer.
//!
//! ## Overview
//!
//! A documentation page renders a hierarchical sidebar of topics. This crate
//! captures that sidebar once, at start-up, as an immutable index:
//!
//! - every entry becomes a node identified by its link target;
//! - parent and child relations are recorded for ancestry queries;
//! - the entries the page rendered as active or expanded seed the initial
//!   navigation state.
//!
//! After [`TreeIndex::build`] the structure never changes. Only the
//! [`NodeFlags::EXPANDED`] and [`NodeFlags::ACTIVE`] flags move, and the
//! navigation layer (`docnav_sync`) is their single writer.
//!
//! ## Render contract
//!
//! The page describes its sidebar with [`SidebarList`] and [`SidebarItem`]
//! values. Each item carries its link, a "has children" marker and, when it
//! is a container, a nested list that is either shown or hidden. Malformed
//! input never fails the build: a container without a child list is
//! indexed as a leaf and a warning is logged through `tracing`.
//!
//! ## Expanded path
//!
//! Only one chain of nested lists is shown at a time. [`ExpandedPath`]
//! holds the owners of the shown lists, outermost first; the build keeps
//! the first contiguous chain the page rendered and drops anything else.
//!
//! ## Example
//!
//! ```
//! use docnav_tree::{NodeFlags, SidebarItem, SidebarList, TreeIndex};
//!
//! let sidebar = vec![SidebarList {
//!     title: Some("Endpoints".into()),
//!     hidden: false,
//!     items: vec![
//!         SidebarItem::branch("/users", false, vec![SidebarItem::leaf("/users/create").with_active()]),
//!         SidebarItem::leaf("/health"),
//!     ],
//! }];
//!
//! let build = TreeIndex::build(&sidebar);
//! let users = build.index.get("/users").unwrap();
//! let create = build.index.get("/users/create").unwrap();
//!
//! assert_eq!(build.active, Some(create));
//! assert_eq!(build.expanded.as_slice(), &[users]);
//! assert!(build.index.flags(users).contains(NodeFlags::EXPANDED));
//! assert!(build.index.is_ancestor(users, create));
//! ```

mod tree;
mod types;

pub use tree::{Build, TreeIndex};
pub use types::{ExpandedPath, NodeFlags, NodeId, SidebarItem, SidebarList};
