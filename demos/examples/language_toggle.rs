// Copyright 2025 the Docnav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Switch the snippet language in one group and see every group follow.
//!
//! Also shows start-up from a deep link: `?lang=` selects the language and
//! the fragment opens the collapsed field lists around a nested field.
//!
//! Run:
//! - `cargo run -p docnav_demos --example language_toggle`

use std::collections::BTreeMap;
use std::path::Path;

use docnav_sync::{Config, Controller, Document, Effect, Event, GroupId, Host, Layout, SectionId};
use docnav_tree::NodeId;
use kurbo::Rect;
use tracing_subscriber::EnvFilter;

// Only the snippet state matters here; the page has no geometry.
#[derive(Default)]
struct Snippets {
    shown: BTreeMap<usize, String>,
    location: Option<String>,
    opened_fields: usize,
}

impl Layout for Snippets {
    fn sidebar_viewport(&self) -> Rect {
        Rect::ZERO
    }

    fn node_bounds(&self, _node: NodeId) -> Option<Rect> {
        None
    }

    fn section_bounds(&self, _section: SectionId) -> Option<Rect> {
        None
    }
}

impl Host for Snippets {
    fn apply(&mut self, effect: &Effect) {
        match effect {
            Effect::SelectSnippet { group, lang } => {
                self.shown.insert(group.0, lang.clone());
            }
            Effect::ReplaceLocation(location) => self.location = Some(location.clone()),
            Effect::ExpandField(_) => self.opened_fields += 1,
            _ => {}
        }
        println!("  {effect:?}");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config_path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/docnav.toml");
    let config = Config::load(&config_path).expect("bundled config is valid");
    let document = Document::from_json(include_str!("../data/petstore.json"))
        .expect("bundled snapshot is valid");
    let mut controller = Controller::new(&document, config).expect("bundled config is in range");
    let mut page = Snippets::default();

    println!("start-up");
    let location = controller.start(
        "/petstore?lang=curl#pets-create.body.tag.color",
        &mut page,
    );
    assert_eq!(location.lang.as_deref(), Some("curl"));
    assert_eq!(page.opened_fields, 2);
    assert_eq!(page.location, None, "start-up does not rewrite the location");

    println!("user picks http in the second group");
    let _ = controller.handle(
        Event::LanguageSelected {
            group: GroupId(1),
            lang: "http".into(),
        },
        &mut page,
    );
    for lang in page.shown.values() {
        assert_eq!(lang, "http");
    }
    assert_eq!(page.location.as_deref(), Some("?lang=http"));
    println!("groups now show: {:?}", page.shown);
}
