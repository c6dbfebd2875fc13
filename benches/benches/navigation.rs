// Copyright 2025 the Docnav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use docnav_sync::{Layout, NavigationState, ScrollSpy, ScrollThresholds, SectionId};
use docnav_tree::{NodeId, SidebarItem, SidebarList, TreeIndex};
use kurbo::Rect;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }
}

// `fanout` children per container, `depth` levels of containers.
fn gen_sidebar(fanout: usize, depth: usize) -> Vec<SidebarList> {
    fn level(prefix: &str, fanout: usize, depth: usize) -> Vec<SidebarItem> {
        (0..fanout)
            .map(|i| {
                let link = format!("{prefix}/{i}");
                if depth == 0 {
                    SidebarItem::leaf(link)
                } else {
                    let children = level(&link, fanout, depth - 1);
                    SidebarItem::branch(link, true, children)
                }
            })
            .collect()
    }
    vec![SidebarList {
        items: level("", fanout, depth),
        ..Default::default()
    }]
}

struct Page {
    heights: Vec<f64>,
    tops: Vec<f64>,
    offset: f64,
}

impl Page {
    fn new(sections: usize) -> Self {
        let mut rng = Rng::new(0xD0C5_7A6E_0000_0001);
        let heights: Vec<f64> = (0..sections).map(|_| 80.0 + rng.below(1200) as f64).collect();
        let mut tops = Vec::with_capacity(sections);
        let mut y = 0.0;
        for h in &heights {
            tops.push(y);
            y += h;
        }
        Self {
            heights,
            tops,
            offset: 0.0,
        }
    }

    fn total(&self) -> f64 {
        self.heights.iter().sum()
    }
}

impl Layout for Page {
    fn sidebar_viewport(&self) -> Rect {
        Rect::new(0.0, 0.0, 240.0, 800.0)
    }
    fn node_bounds(&self, _node: NodeId) -> Option<Rect> {
        None
    }
    fn section_bounds(&self, section: SectionId) -> Option<Rect> {
        let top = *self.tops.get(section.0)? - self.offset;
        Some(Rect::new(0.0, top, 960.0, top + self.heights[section.0]))
    }
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_build");
    for &(fanout, depth) in &[(8usize, 2usize), (16, 2), (6, 4)] {
        let sidebar = gen_sidebar(fanout, depth);
        let nodes = TreeIndex::build(&sidebar).index.len();
        group.throughput(Throughput::Elements(nodes as u64));
        group.bench_function(format!("fanout{fanout}_depth{depth}"), |b| {
            b.iter(|| black_box(TreeIndex::build(black_box(&sidebar))));
        });
    }
    group.finish();
}

fn bench_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_node");
    for &(fanout, depth) in &[(8usize, 2usize), (6, 4)] {
        let sidebar = gen_sidebar(fanout, depth);
        let build = TreeIndex::build(&sidebar);
        let nodes: Vec<_> = build.index.reading_order().collect();
        let mut rng = Rng::new(0x5E1E_C7ED_0000_0002);
        let picks: Vec<_> = (0..1024).map(|_| nodes[rng.below(nodes.len())]).collect();
        group.throughput(Throughput::Elements(picks.len() as u64));
        group.bench_function(format!("random_fanout{fanout}_depth{depth}"), |b| {
            b.iter_batched(
                || NavigationState::new(TreeIndex::build(&sidebar)),
                |mut nav| {
                    let mut effects = 0;
                    for &n in &picks {
                        effects += nav.select_node(n).len();
                    }
                    black_box(effects);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_scroll_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("scroll_spy");
    for &sections in &[64usize, 512] {
        let mut page = Page::new(sections);
        let total = page.total();
        let steps = (total / 16.0) as usize;
        group.throughput(Throughput::Elements(2 * steps as u64));
        group.bench_function(format!("sweep_down_up_{sections}"), |b| {
            b.iter_batched(
                || ScrollSpy::new(sections, ScrollThresholds::default()),
                |mut spy| {
                    let mut transitions = 0;
                    for i in (1..=steps).chain((0..steps).rev()) {
                        page.offset = i as f64 * 16.0;
                        if spy.on_scroll(page.offset, &page).is_some() {
                            transitions += 1;
                        }
                    }
                    black_box(transitions);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_select, bench_scroll_sweep);
criterion_main!(benches);
