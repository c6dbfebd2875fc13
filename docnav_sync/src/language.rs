// Copyright 2025 the Docnav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Language broadcast: keep every snippet group on the same language.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::{debug, warn};

use crate::document::SnippetGroup;
use crate::types::{Effect, GroupId};

// Characters left unescaped in a query value.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Clone, Debug)]
struct Group {
    langs: Vec<String>,
    // Language whose display element is marked selected.
    shown: Option<String>,
    // Extra elements the page rendered selected; cleared by `normalize`.
    stale: Vec<String>,
}

impl Group {
    fn has(&self, lang: &str) -> bool {
        self.langs.iter().any(|l| l == lang)
    }

    // Move this group's selection to `lang`.
    fn show(&mut self, id: GroupId, lang: &str, origin: Option<GroupId>, out: &mut Vec<Effect>) {
        if self.shown.as_deref() == Some(lang) {
            return;
        }
        if let Some(prev) = self.shown.replace(lang.to_owned()) {
            out.push(Effect::DeselectSnippet {
                group: id,
                lang: prev,
            });
        }
        out.push(Effect::SelectSnippet {
            group: id,
            lang: lang.to_owned(),
        });
        if origin != Some(id) {
            out.push(Effect::SetSelectorValue {
                group: id,
                lang: lang.to_owned(),
            });
        }
    }
}

/// The selected snippet language, shared by all snippet groups.
#[derive(Clone, Debug)]
pub struct LanguageBroadcast {
    groups: Vec<Group>,
    current: Option<String>,
    param: String,
}

impl LanguageBroadcast {
    /// Capture the snippet groups of a page.
    ///
    /// The initial language is the first variant the page marked selected,
    /// otherwise the first variant of the first group. Groups rendered with
    /// a different selection are brought into line by
    /// [`LanguageBroadcast::normalize`].
    pub fn new(groups: &[SnippetGroup], param: impl Into<String>) -> Self {
        let current = groups
            .iter()
            .flat_map(|g| g.variants.iter())
            .find(|v| v.selected)
            .or_else(|| groups.first().and_then(|g| g.variants.first()))
            .map(|v| v.lang.clone());
        let groups: Vec<Group> = groups
            .iter()
            .enumerate()
            .map(|(i, g)| {
                let mut selected = g
                    .variants
                    .iter()
                    .filter(|v| v.selected)
                    .map(|v| v.lang.clone());
                let shown = selected.next();
                let stale: Vec<String> = selected.collect();
                if !stale.is_empty() {
                    warn!(group = i, ?stale, "snippet group rendered several selected variants");
                }
                let offers_current = current
                    .as_deref()
                    .is_some_and(|c| g.variants.iter().any(|v| v.lang == c));
                if shown.is_some() && shown != current && offers_current {
                    warn!(group = i, ?shown, "snippet group disagrees with the page language");
                }
                Group {
                    langs: g.variants.iter().map(|v| v.lang.clone()).collect(),
                    shown,
                    stale,
                }
            })
            .collect();
        Self {
            groups,
            current,
            param: param.into(),
        }
    }

    /// Currently selected language.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Number of snippet groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Language whose display element is selected in `group`.
    pub fn shown(&self, group: GroupId) -> Option<&str> {
        self.groups.get(group.0).and_then(|g| g.shown.as_deref())
    }

    /// Bring every group that offers the current language onto it, and clear
    /// extra selections the page rendered.
    ///
    /// Groups lacking the current language keep a single selection.
    pub fn normalize(&mut self) -> Vec<Effect> {
        let mut out = Vec::new();
        for (i, group) in self.groups.iter_mut().enumerate() {
            let id = GroupId(i);
            for lang in group.stale.drain(..) {
                out.push(Effect::DeselectSnippet { group: id, lang });
            }
            if let Some(current) = self.current.as_deref().filter(|c| group.has(c)) {
                group.show(id, current, None, &mut out);
            }
        }
        out
    }

    /// Select `lang` everywhere.
    ///
    /// `origin` is the group whose selector fired; its selector already shows
    /// `lang` and is left alone. Returns no effects if `lang` is already
    /// selected. Groups without a `lang` variant keep their current display.
    pub fn select_language(&mut self, lang: &str, origin: Option<GroupId>) -> Vec<Effect> {
        let mut out = self.switch(lang, origin);
        if !out.is_empty() {
            out.push(Effect::ReplaceLocation(self.location_query(lang)));
        }
        out
    }

    /// Select a language taken from the start-up location without writing it back.
    pub fn apply_initial(&mut self, lang: &str) -> Vec<Effect> {
        self.switch(lang, None)
    }

    fn switch(&mut self, lang: &str, origin: Option<GroupId>) -> Vec<Effect> {
        if self.current.as_deref() == Some(lang) {
            return Vec::new();
        }
        if !self.groups.iter().any(|g| g.has(lang)) {
            debug!(lang, "no snippet group offers language; ignoring");
            return Vec::new();
        }
        let previous = self.current.replace(lang.to_owned());

        let mut out = Vec::new();
        for (i, group) in self.groups.iter_mut().enumerate() {
            if !group.has(lang) {
                debug!(group = i, lang, "snippet group lacks language");
                continue;
            }
            group.show(GroupId(i), lang, origin, &mut out);
        }
        debug!(lang, previous = ?previous, "snippet language changed");
        out
    }

    fn location_query(&self, lang: &str) -> String {
        format!("?{}={}", self.param, utf8_percent_encode(lang, QUERY_VALUE))
    }
}
