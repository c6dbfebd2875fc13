// Copyright 2025 the Docnav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deep links: parse the start-up location and reveal a nested field entry.

use std::collections::HashMap;

use percent_encoding::percent_decode_str;
use tracing::{debug, warn};

use crate::document::FieldEntry;
use crate::types::{Effect, FieldId};

/// A navigable location split into its parts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Location {
    /// Path component, without query or fragment.
    pub path: String,
    /// Decoded value of the language query parameter.
    pub lang: Option<String>,
    /// Fragment, without the leading `#`.
    pub fragment: Option<String>,
}

impl Location {
    /// Split `raw` into path, language parameter `param` and fragment.
    ///
    /// Other query parameters are ignored. Empty values count as absent.
    /// The query value is form-decoded (`+` is a space, `%2B` a plus); the
    /// fragment is only percent-decoded.
    pub fn parse(raw: &str, param: &str) -> Self {
        let (rest, fragment) = match raw.split_once('#') {
            Some((rest, f)) => (rest, Some(f)),
            None => (raw, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (rest, None),
        };
        let lang = query.and_then(|q| {
            q.split('&')
                .filter_map(|pair| pair.split_once('='))
                .find(|(k, _)| *k == param)
                .map(|(_, v)| decode(&v.replace('+', " ")))
        });
        Self {
            path: path.to_owned(),
            lang: lang.filter(|l| !l.is_empty()),
            fragment: fragment.filter(|f| !f.is_empty()).map(decode),
        }
    }
}

fn decode(s: &str) -> String {
    percent_decode_str(s).decode_utf8_lossy().into_owned()
}

#[derive(Clone, Debug)]
struct Field {
    anchor: String,
    parent: Option<FieldId>,
    // Whether this entry's own nested list is collapsed.
    collapsed: bool,
}

/// Flat index over the nested field lists of a page.
#[derive(Clone, Debug, Default)]
pub struct FieldIndex {
    fields: Vec<Field>,
    by_anchor: HashMap<String, FieldId>,
}

impl FieldIndex {
    /// Index the top-level entries and everything nested below them.
    ///
    /// Ids are assigned in document pre-order. On duplicate anchors the
    /// first entry wins.
    pub fn build(entries: &[FieldEntry]) -> Self {
        let mut index = Self::default();
        for entry in entries {
            index.insert(entry, None);
        }
        index
    }

    fn insert(&mut self, entry: &FieldEntry, parent: Option<FieldId>) {
        let id = FieldId(self.fields.len());
        let collapsed = entry.children.as_ref().is_some_and(|c| c.collapsed);
        self.fields.push(Field {
            anchor: entry.anchor.clone(),
            parent,
            collapsed,
        });
        if self.by_anchor.contains_key(&entry.anchor) {
            warn!(anchor = %entry.anchor, "duplicate field anchor; keeping the first");
        } else {
            self.by_anchor.insert(entry.anchor.clone(), id);
        }
        if let Some(children) = &entry.children {
            for child in &children.entries {
                self.insert(child, Some(id));
            }
        }
    }

    /// Number of indexed entries.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the page has no field entries.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Look up an entry by anchor.
    pub fn get(&self, anchor: &str) -> Option<FieldId> {
        self.by_anchor.get(anchor).copied()
    }

    /// Anchor of an entry.
    pub fn anchor(&self, id: FieldId) -> Option<&str> {
        self.fields.get(id.0).map(|f| f.anchor.as_str())
    }

    /// Entry whose nested list contains `id`.
    pub fn parent(&self, id: FieldId) -> Option<FieldId> {
        self.fields.get(id.0).and_then(|f| f.parent)
    }

    /// Returns true if `id` owns a nested list that is currently collapsed.
    pub fn is_collapsed(&self, id: FieldId) -> bool {
        self.fields.get(id.0).is_some_and(|f| f.collapsed)
    }

    /// Expand every collapsed list enclosing `anchor`, innermost first, then
    /// reveal the entry.
    ///
    /// Unknown anchors produce no effects.
    pub fn expand_to(&mut self, anchor: &str) -> Vec<Effect> {
        let Some(target) = self.get(anchor) else {
            debug!(anchor, "fragment names no field entry");
            return Vec::new();
        };
        let mut out = Vec::new();
        let mut cursor = self.parent(target);
        while let Some(id) = cursor {
            let field = &mut self.fields[id.0];
            if field.collapsed {
                field.collapsed = false;
                out.push(Effect::ExpandField(id));
            }
            cursor = field.parent;
        }
        debug!(anchor, expanded = out.len(), "deep link revealed");
        out.push(Effect::RevealField(target));
        out
    }
}
