// Copyright 2025 the Docnav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document snapshot: the rendered page structure the engine is built from.
//!
//! The page generator renders the sidebar, the content sections, the snippet
//! groups and the nested field lists before the engine starts. The host
//! captures them once into a [`Document`] (directly, or from JSON with
//! [`Document::from_json`]). Later structural changes to the page are not
//! observed.

use docnav_tree::SidebarList;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Immutable snapshot of the rendered page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    /// Sidebar lists in display order.
    pub sidebar: Vec<SidebarList>,
    /// Content sections in reading order.
    pub sections: Vec<SectionEntry>,
    /// Snippet groups in document order.
    pub snippet_groups: Vec<SnippetGroup>,
    /// Top-level field-list entries in document order.
    pub field_lists: Vec<FieldEntry>,
}

impl Document {
    /// Parse a snapshot from JSON.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// One content article.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionEntry {
    /// Element id of the article.
    pub id: String,
    /// Link of the sidebar node this article belongs to.
    pub node_link: String,
}

/// One request example rendered in several languages behind one selector.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetGroup {
    /// Language variants in display order.
    pub variants: Vec<SnippetVariant>,
}

/// One language rendition of a snippet.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetVariant {
    /// Language tag, e.g. `http` or `curl`.
    pub lang: String,
    /// Whether the page rendered this variant as the selected one.
    #[serde(default)]
    pub selected: bool,
}

/// One entry of a (possibly nested) request/response field list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEntry {
    /// Anchor id of the entry.
    pub anchor: String,
    /// Nested field list, if the field has sub-fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<FieldList>,
}

/// A nested field list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldList {
    /// Whether the list was rendered collapsed.
    #[serde(default)]
    pub collapsed: bool,
    /// Entries in display order.
    #[serde(default)]
    pub entries: Vec<FieldEntry>,
}
