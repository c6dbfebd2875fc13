// Copyright 2025 the Docnav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll spy: turn continuous scroll offsets into discrete section transitions.
//!
//! ## Model
//!
//! The section being read is the last one whose top has crossed the
//! `near_bottom` line of the content viewport. The spy does not recompute
//! that from scratch on every event; it starts from the current index and
//! only moves in the scroll direction, which keeps the index monotonic for
//! monotonic scrolling and makes each evaluation proportional to the
//! distance travelled.
//!
//! - Down: the current section must have risen past `near_top` and the next
//!   one must have entered the `near_bottom` band. Large jumps keep advancing
//!   while both conditions hold for the following sections.
//! - Up: offsets within `top_snap` of the top snap to the first section.
//!   Otherwise, once the current section's top has dropped below
//!   `near_bottom`, walk back to the nearest earlier section still in the band.
//!
//! ## Feedback suppression
//!
//! A programmatic jump of the content pane produces a scroll event of its own.
//! [`ScrollSpy::suppress_next`] arms a one-shot flag that swallows exactly the
//! next event, so the jump never feeds back into a transition.
//!
//! ```
//! use docnav_sync::config::ScrollThresholds;
//! use docnav_sync::scroll_spy::ScrollSpy;
//! use docnav_sync::types::{Layout, SectionId};
//! use docnav_tree::NodeId;
//! use kurbo::Rect;
//!
//! // Three 500-unit sections stacked from the top of the document.
//! struct Page { offset: f64 }
//! impl Layout for Page {
//!     fn sidebar_viewport(&self) -> Rect { Rect::ZERO }
//!     fn node_bounds(&self, _: NodeId) -> Option<Rect> { None }
//!     fn section_bounds(&self, s: SectionId) -> Option<Rect> {
//!         let top = s.0 as f64 * 500.0 - self.offset;
//!         Some(Rect::new(0.0, top, 800.0, top + 500.0))
//!     }
//! }
//!
//! let mut spy = ScrollSpy::new(3, ScrollThresholds::default());
//! assert_eq!(spy.on_scroll(450.0, &Page { offset: 450.0 }), Some(1));
//! assert_eq!(spy.on_scroll(460.0, &Page { offset: 460.0 }), None);
//! assert_eq!(spy.on_scroll(10.0, &Page { offset: 10.0 }), Some(0));
//! ```

use tracing::debug;

use crate::config::ScrollThresholds;
use crate::types::{Layout, SectionId};

/// Scroll direction derived from two successive offsets.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Direction {
    Up,
    Down,
}

/// Tracks which content section is presumed to be in view.
#[derive(Clone, Debug)]
pub struct ScrollSpy {
    current: usize,
    len: usize,
    last_offset: f64,
    suppress_next: bool,
    thresholds: ScrollThresholds,
}

impl ScrollSpy {
    /// Create a spy over `len` sections, starting at the first one with offset `0`.
    pub fn new(len: usize, thresholds: ScrollThresholds) -> Self {
        Self {
            current: 0,
            len,
            last_offset: 0.0,
            suppress_next: false,
            thresholds,
        }
    }

    /// Index of the section presumed in view.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Number of sections observed.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if there are no sections.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Last scroll offset seen.
    pub fn last_offset(&self) -> f64 {
        self.last_offset
    }

    /// Returns true if the next scroll event will be swallowed.
    pub fn is_suppressed(&self) -> bool {
        self.suppress_next
    }

    /// Swallow the next scroll event (set right before a programmatic scroll).
    pub fn suppress_next(&mut self) {
        self.suppress_next = true;
    }

    /// Align the current index with a section the content was jumped to.
    pub fn sync_to(&mut self, index: usize) {
        if index < self.len {
            self.current = index;
        }
    }

    /// Evaluate a scroll event and return the new section index on a transition.
    pub fn on_scroll(&mut self, offset: f64, layout: &impl Layout) -> Option<usize> {
        if self.suppress_next {
            self.suppress_next = false;
            self.last_offset = offset;
            debug!(offset, "scroll event suppressed");
            return None;
        }
        let direction = if offset > self.last_offset {
            Direction::Down
        } else if offset < self.last_offset {
            Direction::Up
        } else {
            return None;
        };
        self.last_offset = offset;
        if self.len == 0 {
            return None;
        }

        let next = match direction {
            Direction::Up => self.scan_up(offset, layout),
            Direction::Down => self.scan_down(layout),
        }?;
        if next == self.current {
            return None;
        }
        debug!(from = self.current, to = next, ?direction, "section in view changed");
        self.current = next;
        Some(next)
    }

    fn top(&self, index: usize, layout: &impl Layout) -> Option<f64> {
        layout.section_bounds(SectionId(index)).map(|r| r.y0)
    }

    fn in_band(&self, index: usize, layout: &impl Layout) -> bool {
        self.top(index, layout)
            .is_some_and(|top| top <= self.thresholds.near_bottom)
    }

    fn passed(&self, index: usize, layout: &impl Layout) -> bool {
        self.top(index, layout)
            .is_some_and(|top| top <= self.thresholds.near_top)
    }

    fn scan_up(&self, offset: f64, layout: &impl Layout) -> Option<usize> {
        if self.current == 0 {
            return None;
        }
        if offset <= self.thresholds.top_snap {
            return Some(0);
        }
        if self.in_band(self.current, layout) {
            return None;
        }
        let mut i = self.current - 1;
        while i > 0 && !self.in_band(i, layout) {
            i -= 1;
        }
        Some(i)
    }

    fn scan_down(&self, layout: &impl Layout) -> Option<usize> {
        let last = self.len - 1;
        if self.current >= last {
            return None;
        }
        if !self.passed(self.current, layout) || !self.in_band(self.current + 1, layout) {
            return None;
        }
        let mut i = self.current + 1;
        while i < last && self.passed(i, layout) && self.in_band(i + 1, layout) {
            i += 1;
        }
        Some(i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docnav_tree::NodeId;
    use kurbo::Rect;

    // Sections of the given heights stacked from document top; `offset` is the scroll position.
    struct Page {
        tops: Vec<f64>,
        heights: Vec<f64>,
        offset: f64,
    }

    impl Page {
        fn new(heights: &[f64]) -> Self {
            let mut tops = Vec::new();
            let mut y = 0.0;
            for h in heights {
                tops.push(y);
                y += h;
            }
            Self {
                tops,
                heights: heights.to_vec(),
                offset: 0.0,
            }
        }

        fn at(&mut self, offset: f64) -> &Self {
            self.offset = offset;
            self
        }
    }

    impl Layout for Page {
        fn sidebar_viewport(&self) -> Rect {
            Rect::ZERO
        }
        fn node_bounds(&self, _node: NodeId) -> Option<Rect> {
            None
        }
        fn section_bounds(&self, section: SectionId) -> Option<Rect> {
            let top = *self.tops.get(section.0)? - self.offset;
            Some(Rect::new(0.0, top, 800.0, top + self.heights[section.0]))
        }
    }

    fn spy(len: usize) -> ScrollSpy {
        ScrollSpy::new(len, ScrollThresholds::default())
    }

    #[test]
    fn equal_offset_is_noop() {
        let mut page = Page::new(&[500.0, 500.0]);
        let mut s = spy(2);
        assert_eq!(s.on_scroll(0.0, page.at(0.0)), None);
        assert_eq!(s.current(), 0);
    }

    #[test]
    fn down_waits_for_both_thresholds() {
        let mut page = Page::new(&[500.0, 500.0, 500.0]);
        let mut s = spy(3);
        // Section 0 top at -150: not yet past near_top.
        assert_eq!(s.on_scroll(150.0, page.at(150.0)), None);
        // Section 0 top at -250 but section 1 top at 250: not in band.
        assert_eq!(s.on_scroll(250.0, page.at(250.0)), None);
        // Section 1 top at 100: in band.
        assert_eq!(s.on_scroll(400.0, page.at(400.0)), Some(1));
        assert_eq!(s.current(), 1);
    }

    #[test]
    fn down_jump_scans_forward() {
        let mut page = Page::new(&[400.0, 400.0, 400.0, 400.0, 400.0]);
        let mut s = spy(5);
        // Tops: -1300, -900, -500, -100, 300 → section 3 is being read.
        assert_eq!(s.on_scroll(1300.0, page.at(1300.0)), Some(3));
    }

    #[test]
    fn down_stops_at_last() {
        let mut page = Page::new(&[400.0, 400.0]);
        let mut s = spy(2);
        assert_eq!(s.on_scroll(400.0, page.at(400.0)), Some(1));
        assert_eq!(s.on_scroll(5000.0, page.at(5000.0)), None);
        assert_eq!(s.current(), 1);
    }

    #[test]
    fn up_walks_back_and_snaps_to_top() {
        let mut page = Page::new(&[400.0, 400.0, 400.0, 400.0, 400.0]);
        let mut s = spy(5);
        assert_eq!(s.on_scroll(1300.0, page.at(1300.0)), Some(3));
        // Section 3 top at -50: still in band.
        assert_eq!(s.on_scroll(1250.0, page.at(1250.0)), None);
        // Jump up: tops -300, 100, 500 for sections 1..=3 → section 2 is the nearest in band.
        assert_eq!(s.on_scroll(700.0, page.at(700.0)), Some(2));
        // Near the very top snaps to 0 regardless of geometry.
        assert_eq!(s.on_scroll(20.0, page.at(20.0)), Some(0));
        assert_eq!(s.on_scroll(0.0, page.at(0.0)), None, "already at 0");
    }

    #[test]
    fn suppression_consumes_exactly_one_event() {
        let mut page = Page::new(&[400.0, 400.0, 400.0]);
        let mut s = spy(3);
        s.suppress_next();
        assert!(s.is_suppressed());
        assert_eq!(s.on_scroll(800.0, page.at(800.0)), None);
        assert_eq!(s.current(), 0, "suppressed event leaves the index alone");
        assert_eq!(s.last_offset(), 800.0);
        assert!(!s.is_suppressed());
        // The following event is evaluated normally.
        assert_eq!(s.on_scroll(810.0, page.at(810.0)), Some(2));
    }

    #[test]
    fn monotonic_offsets_give_monotonic_index() {
        let heights = [120.0, 800.0, 90.0, 300.0, 1200.0, 60.0, 400.0, 700.0];
        let total: f64 = heights.iter().sum();
        let mut page = Page::new(&heights);
        let mut s = spy(heights.len());

        let mut prev = s.current();
        let mut offset = 0.0;
        while offset < total {
            offset += 37.0;
            let _ = s.on_scroll(offset, page.at(offset));
            assert!(s.current() >= prev, "index went back while scrolling down");
            prev = s.current();
        }
        assert!(prev > 0);
        while offset > 0.0 {
            offset -= 53.0;
            let _ = s.on_scroll(offset, page.at(offset));
            assert!(s.current() <= prev, "index went forward while scrolling up");
            prev = s.current();
        }
        assert_eq!(s.current(), 0);
    }

    #[test]
    fn missing_geometry_blocks_transition() {
        struct Blank;
        impl Layout for Blank {
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
        let mut s = spy(3);
        assert_eq!(s.on_scroll(900.0, &Blank), None);
        assert_eq!(s.current(), 0);
    }

    #[test]
    fn sync_ignores_out_of_range() {
        let mut s = spy(2);
        s.sync_to(1);
        assert_eq!(s.current(), 1);
        s.sync_to(7);
        assert_eq!(s.current(), 1);
    }
}
