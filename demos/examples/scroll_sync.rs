// Copyright 2025 the Docnav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll the content pane of a recorded API page and watch the sidebar follow.
//!
//! The page is a snapshot in `data/petstore.json`; geometry is simulated.
//!
//! Run:
//! - `cargo run -p docnav_demos --example scroll_sync`
//! - `RUST_LOG=docnav_sync=debug cargo run -p docnav_demos --example scroll_sync`

use docnav_sync::{Config, Controller, Document, Effect, Event, Host, Layout, Outcome, SectionId};
use docnav_tree::NodeId;
use kurbo::Rect;
use tracing_subscriber::EnvFilter;

const ROW: f64 = 24.0;

struct Page {
    heights: Vec<f64>,
    offset: f64,
    sidebar_scroll: f64,
    sidebar_height: f64,
}

impl Page {
    fn top_of(&self, index: usize) -> f64 {
        self.heights[..index].iter().sum()
    }
}

impl Layout for Page {
    fn sidebar_viewport(&self) -> Rect {
        Rect::new(0.0, 0.0, 240.0, self.sidebar_height)
    }

    fn node_bounds(&self, node: NodeId) -> Option<Rect> {
        let y = node.index() as f64 * ROW - self.sidebar_scroll;
        Some(Rect::new(0.0, y, 240.0, y + ROW))
    }

    fn section_bounds(&self, section: SectionId) -> Option<Rect> {
        let height = *self.heights.get(section.0)?;
        let y = self.top_of(section.0) - self.offset;
        Some(Rect::new(0.0, y, 960.0, y + height))
    }
}

impl Host for Page {
    fn apply(&mut self, effect: &Effect) {
        match effect {
            Effect::ScrollContentTo(section) => self.offset = self.top_of(section.0),
            Effect::ScrollSidebarBy(delta) => self.sidebar_scroll += delta,
            _ => {}
        }
        println!("  {effect:?}");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let document = Document::from_json(include_str!("../data/petstore.json"))
        .expect("bundled snapshot is valid");
    let mut controller = Controller::new(&document, Config::default()).expect("default config");
    let mut page = Page {
        heights: vec![300.0, 900.0, 1400.0, 700.0, 250.0, 800.0, 600.0, 400.0],
        offset: 0.0,
        sidebar_scroll: 0.0,
        sidebar_height: 5.0 * ROW,
    };
    let total: f64 = page.heights.iter().sum();

    println!("scrolling down");
    let mut offset = 0.0;
    let mut last = controller.scroll_spy().current();
    while offset < total {
        offset += 40.0;
        page.offset = offset;
        let outcome = controller.handle(Event::Scroll { offset }, &mut page);
        assert_eq!(outcome, Outcome::Continue);
        let now = controller.scroll_spy().current();
        assert!(now >= last, "scroll spy moved backwards while scrolling down");
        if now != last {
            println!("offset {offset:>6}: section {now}");
        }
        last = now;
    }
    let health = controller.navigation().tree().get("#health");
    assert_eq!(controller.navigation().active(), health);

    println!("clicking \"Create a pet\"");
    let outcome = controller.handle(
        Event::SidebarClick {
            link: "#pets-create".into(),
        },
        &mut page,
    );
    assert_eq!(outcome, Outcome::Consumed);
    // The jump's own scroll event is swallowed.
    let jumped = page.offset;
    let _ = controller.handle(Event::Scroll { offset: jumped }, &mut page);
    assert_eq!(controller.scroll_spy().current(), 2);

    let nav = controller.navigation();
    let path: Vec<_> = nav
        .expanded()
        .as_slice()
        .iter()
        .filter_map(|n| nav.tree().link(*n))
        .collect();
    println!("expanded path: {path:?}");
    assert_eq!(path, ["#pets"]);
}
