// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use understory_spatial_nav::config::ConfigPatch;
use understory_spatial_nav::event::NavEvent;
use understory_spatial_nav::host::{Host, Reentry};
use understory_spatial_nav::navigator::Navigator;
use understory_spatial_nav::resolver::{NavParams, navigate};
use understory_spatial_nav::types::{Direction, ElementFlags, Selector};

fn gen_grid_rects(n: usize, cell: f64, gap: f64) -> Vec<Rect> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * (cell + gap);
            let y0 = y as f64 * (cell + gap);
            out.push(Rect::new(x0, y0, x0 + cell, y0 + cell));
        }
    }
    out
}

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
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_scattered_rects(count: usize, extent: f64, size: f64) -> Vec<Rect> {
    let mut rng = Rng::new(0x5EED_F00D_1234_ABCD);
    (0..count)
        .map(|_| {
            let x0 = rng.next_f64() * extent;
            let y0 = rng.next_f64() * extent;
            Rect::new(x0, y0, x0 + size, y0 + size)
        })
        .collect()
}

fn bench_resolver(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolver");
    let params = NavParams::default();
    for &n in &[16usize, 32, 64] {
        let rects = gen_grid_rects(n, 40.0, 8.0);
        let candidates: Vec<usize> = (0..rects.len()).collect();
        let origin = (n / 2) * n + n / 2;
        let measure = |i: usize| rects.get(i).copied();
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("grid_all_directions_n{n}"), |b| {
            b.iter(|| {
                for d in Direction::ALL {
                    black_box(navigate(origin, d, &candidates, &params, measure));
                }
            });
        });
    }

    let rects = gen_scattered_rects(4096, 4000.0, 30.0);
    let candidates: Vec<usize> = (0..rects.len()).collect();
    let measure = |i: usize| rects.get(i).copied();
    group.bench_function("scattered_4096", |b| {
        b.iter(|| {
            for origin in [0, 1000, 2000, 3000] {
                for d in Direction::ALL {
                    black_box(navigate(origin, d, &candidates, &params, measure));
                }
            }
        });
    });

    let straight = NavParams {
        straight_only: true,
        ..NavParams::default()
    };
    group.bench_function("scattered_4096_straight_only", |b| {
        b.iter(|| {
            for d in Direction::ALL {
                black_box(navigate(2000, d, &candidates, &straight, measure));
            }
        });
    });
    group.finish();
}

struct Grid {
    rects: Vec<Rect>,
    focused: Option<usize>,
}

impl Host for Grid {
    type Element = usize;

    fn measure(&self, element: usize) -> Option<Rect> {
        self.rects.get(element).copied()
    }

    fn query(&self, query: &str) -> Vec<usize> {
        let half = self.rects.len() / 2;
        match query {
            "a" => (0..half).collect(),
            "b" => (half..self.rects.len()).collect(),
            _ => Vec::new(),
        }
    }

    fn matches(&self, element: usize, query: &str) -> bool {
        let half = self.rects.len() / 2;
        match query {
            "a" => element < half,
            "b" => (half..self.rects.len()).contains(&element),
            _ => false,
        }
    }

    fn flags(&self, _element: usize) -> ElementFlags {
        ElementFlags::default()
    }

    fn focus(&mut self, element: usize) {
        self.focused = Some(element);
    }

    fn blur(&mut self, _element: usize) {
        self.focused = None;
    }

    fn focused(&self) -> Option<usize> {
        self.focused
    }

    fn notify(&mut self, _: usize, _: &NavEvent<usize>, _: &mut Reentry<usize>) -> bool {
        true
    }
}

fn bench_navigator(c: &mut Criterion) {
    let mut group = c.benchmark_group("navigator");
    for &n in &[16usize, 32] {
        let mut nav = Navigator::new(Grid {
            rects: gen_grid_rects(n, 40.0, 8.0),
            focused: None,
        });
        nav.add(Some("a"), ConfigPatch::with_selector(Selector::Query("a".into())))
            .unwrap();
        nav.add(Some("b"), ConfigPatch::with_selector(Selector::Query("b".into())))
            .unwrap();
        let start = (n / 2 - 1) * n + n / 2;
        group.bench_function(format!("cross_section_round_trip_n{n}"), |b| {
            b.iter(|| {
                nav.focus(Some(Selector::Elements(vec![start])), true);
                black_box(nav.move_focus(Direction::Down, None));
                black_box(nav.move_focus(Direction::Up, None));
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_resolver, bench_navigator);
criterion_main!(benches);
