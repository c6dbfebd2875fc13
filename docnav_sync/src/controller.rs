// Copyright 2025 the Docnav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controller: route host events to the navigation components.
//!
//! ## Overview
//!
//! The controller owns every component and is the only place where they
//! meet. The scroll spy never talks to the navigation state directly; the
//! controller forwards the spy's section index, so the data flow stays
//! one-directional: spy → controller → navigation.
//!
//! ## Event handling
//!
//! - Sidebar and anchor clicks resolve a link, select its node and jump the
//!   content pane to the node's section. The jump's own scroll event is
//!   suppressed. Clicks are always [`Outcome::Consumed`], even on a miss.
//! - Scroll events feed the scroll spy; a section transition selects the
//!   section's sidebar node. Scrolling is [`Outcome::Continue`].
//! - Language selections are broadcast to every snippet group.
//!
//! After every selection the sidebar is scrolled just enough to show the
//! active entry, measured after the host has applied the selection effects.

use core::fmt;
use std::collections::HashMap;

use docnav_tree::{NodeId, TreeIndex};
use tracing::{debug, warn};

use crate::config::Config;
use crate::deep_link::{FieldIndex, Location};
use crate::document::Document;
use crate::error::Result;
use crate::language::LanguageBroadcast;
use crate::navigation::NavigationState;
use crate::scroll_spy::ScrollSpy;
use crate::types::{Effect, Event, Host, Outcome, SectionId};

/// Composition root of the engine.
pub struct Controller {
    nav: NavigationState,
    spy: ScrollSpy,
    language: LanguageBroadcast,
    fields: FieldIndex,
    // Article element id to its position in reading order.
    sections: HashMap<String, SectionId>,
    config: Config,
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("active", &self.nav.active())
            .field("section", &self.spy.current())
            .field("language", &self.language.current())
            .finish_non_exhaustive()
    }
}

impl Controller {
    /// Build all components from a page snapshot.
    ///
    /// Fails only if `config` is out of range; malformed snapshots degrade.
    pub fn new(document: &Document, config: Config) -> Result<Self> {
        config.validate()?;
        let build = TreeIndex::build(&document.sidebar);
        let topics: Vec<Option<NodeId>> = document
            .sections
            .iter()
            .map(|section| {
                let node = build.index.get(&section.node_link);
                if node.is_none() {
                    warn!(
                        section = %section.id,
                        link = %section.node_link,
                        "section refers to no sidebar entry"
                    );
                }
                node
            })
            .collect();
        let mut sections = HashMap::new();
        for (i, section) in document.sections.iter().enumerate() {
            if sections.contains_key(&section.id) {
                warn!(section = %section.id, "duplicate section id; keeping the first");
            } else {
                sections.insert(section.id.clone(), SectionId(i));
            }
        }
        let spy = ScrollSpy::new(topics.len(), config.scroll);
        let language = LanguageBroadcast::new(&document.snippet_groups, &*config.language_param);
        let fields = FieldIndex::build(&document.field_lists);
        debug!(
            nodes = build.index.len(),
            sections = topics.len(),
            groups = language.group_count(),
            fields = fields.len(),
            "engine ready"
        );
        Ok(Self {
            nav: NavigationState::new(build).with_topics(topics),
            spy,
            language,
            fields,
            sections,
            config,
        })
    }

    /// Navigation state.
    pub fn navigation(&self) -> &NavigationState {
        &self.nav
    }

    /// Scroll spy.
    pub fn scroll_spy(&self) -> &ScrollSpy {
        &self.spy
    }

    /// Language broadcast.
    pub fn language(&self) -> &LanguageBroadcast {
        &self.language
    }

    /// Field-list index.
    pub fn fields(&self) -> &FieldIndex {
        &self.fields
    }

    /// Active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run start-up against the initial location.
    ///
    /// Aligns the scroll spy with a pre-marked active node, brings snippet
    /// groups onto one language, applies the language parameter and expands
    /// the field entry named by the fragment. Returns the parsed location.
    pub fn start(&mut self, location: &str, host: &mut impl Host) -> Location {
        let location = Location::parse(location, &self.config.language_param);
        if let Some(active) = self.nav.active() {
            if let Some(section) = self.nav.section_of(active) {
                self.spy.sync_to(section.0);
            }
            self.reveal_in_sidebar(active, host);
        }
        let effects = self.language.normalize();
        apply(host, &effects);
        if let Some(lang) = &location.lang {
            let effects = self.language.apply_initial(lang);
            apply(host, &effects);
        }
        if let Some(fragment) = &location.fragment {
            let effects = self.fields.expand_to(fragment);
            apply(host, &effects);
        }
        location
    }

    /// Handle one host event.
    pub fn handle(&mut self, event: Event, host: &mut impl Host) -> Outcome {
        match event {
            Event::SidebarClick { link } => {
                self.navigate_to(&link, host);
                Outcome::Consumed
            }
            Event::AnchorClick { href } => {
                self.follow_anchor(&href, host);
                Outcome::Consumed
            }
            Event::Scroll { offset } => {
                if let Some(index) = self.spy.on_scroll(offset, &*host) {
                    let effects = self.nav.select_node_by_index(index);
                    apply(host, &effects);
                    if let Some(active) = self.nav.active() {
                        self.reveal_in_sidebar(active, host);
                    }
                }
                Outcome::Continue
            }
            Event::LanguageSelected { group, lang } => {
                let effects = self.language.select_language(&lang, Some(group));
                apply(host, &effects);
                Outcome::Consumed
            }
        }
    }

    fn navigate_to(&mut self, link: &str, host: &mut impl Host) {
        let Some(node) = self.nav.tree().get(link) else {
            debug!(link, "click on unknown link");
            return;
        };
        let section = self.nav.section_of(node);
        self.select_and_jump(Some(node), section, host);
    }

    // Sidebar links first (as given, then without `#`), then article ids.
    fn follow_anchor(&mut self, href: &str, host: &mut impl Host) {
        let key = href.strip_prefix('#').unwrap_or(href);
        let tree = self.nav.tree();
        if let Some(node) = tree.get(href).or_else(|| tree.get(key)) {
            let section = self.nav.section_of(node);
            self.select_and_jump(Some(node), section, host);
        } else if let Some(&section) = self.sections.get(key) {
            let node = self.nav.topic(section.0);
            self.select_and_jump(node, Some(section), host);
        } else {
            debug!(href, "anchor names no sidebar entry or section");
        }
    }

    fn select_and_jump(
        &mut self,
        node: Option<NodeId>,
        section: Option<SectionId>,
        host: &mut impl Host,
    ) {
        if let Some(node) = node {
            let effects = self.nav.select_node(node);
            apply(host, &effects);
            self.reveal_in_sidebar(node, host);
        }
        if let Some(section) = section {
            self.spy.suppress_next();
            self.spy.sync_to(section.0);
            host.apply(&Effect::ScrollContentTo(section));
        }
    }

    fn reveal_in_sidebar(&self, node: NodeId, host: &mut impl Host) {
        if let Some(delta) = self.nav.sidebar_scroll_delta(node, &*host) {
            host.apply(&Effect::ScrollSidebarBy(delta));
        }
    }
}

fn apply(host: &mut impl Host, effects: &[Effect]) {
    for effect in effects {
        host.apply(effect);
    }
}
