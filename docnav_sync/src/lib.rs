// Copyright 2025 the Docnav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Docnav Sync: keep a documentation viewer's sidebar, content pane and code
//! snippets in step.
//!
//! ## Overview
//!
//! A single-page API reference shows a hierarchical sidebar next to a long
//! scrolling content pane. This crate keeps the two synchronized:
//!
//! - [`navigation`]: the active sidebar node and the single expanded chain of
//!   nested lists, updated with a minimal collapse/expand diff.
//! - [`scroll_spy`]: turns scroll offsets into section transitions using
//!   configurable thresholds, with one-shot suppression of self-triggered
//!   scrolls.
//! - [`language`]: a snippet language chosen in one group applies to all.
//! - [`deep_link`]: start-up location parsing and field-list expansion.
//! - [`controller`]: the composition root routing [`Event`]s to the above.
//!
//! The engine does not touch the page. It returns [`Effect`] values for a
//! [`Host`] to apply and reads live geometry through [`Layout`].
//!
//! ## Example
//!
//! ```
//! use docnav_sync::{Config, Controller, Document, Effect, Event, Host, Layout, Outcome, SectionId};
//! use docnav_tree::{NodeId, SidebarItem, SidebarList};
//! use kurbo::Rect;
//!
//! #[derive(Default)]
//! struct Page { applied: Vec<Effect> }
//! impl Layout for Page {
//!     fn sidebar_viewport(&self) -> Rect { Rect::new(0.0, 0.0, 200.0, 600.0) }
//!     fn node_bounds(&self, n: NodeId) -> Option<Rect> {
//!         let y = n.index() as f64 * 20.0;
//!         Some(Rect::new(0.0, y, 200.0, y + 20.0))
//!     }
//!     fn section_bounds(&self, _: SectionId) -> Option<Rect> { None }
//! }
//! impl Host for Page {
//!     fn apply(&mut self, effect: &Effect) { self.applied.push(effect.clone()); }
//! }
//!
//! let document = Document {
//!     sidebar: vec![SidebarList {
//!         items: vec![SidebarItem::leaf("/users"), SidebarItem::leaf("/health")],
//!         ..Default::default()
//!     }],
//!     ..Default::default()
//! };
//! let mut controller = Controller::new(&document, Config::default()).unwrap();
//! let mut page = Page::default();
//!
//! let outcome = controller.handle(Event::SidebarClick { link: "/health".into() }, &mut page);
//! assert_eq!(outcome, Outcome::Consumed);
//! assert!(page.applied.contains(&Effect::ReplaceLocation("/health".into())));
//! ```

pub mod config;
pub mod controller;
pub mod deep_link;
pub mod document;
pub mod error;
pub mod language;
pub mod navigation;
pub mod scroll_spy;
pub mod types;

pub use config::{Config, ScrollThresholds};
pub use controller::Controller;
pub use deep_link::{FieldIndex, Location};
pub use document::{Document, FieldEntry, FieldList, SectionEntry, SnippetGroup, SnippetVariant};
pub use error::{Error, Result};
pub use language::LanguageBroadcast;
pub use navigation::NavigationState;
pub use scroll_spy::ScrollSpy;
pub use types::{Effect, Event, FieldId, GroupId, Host, Layout, Outcome, SectionId};
