// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size};
use understory_placement::{
    Boundary, BoundaryKind, ClipAncestor, OverflowFlags, Placement, PlacementOptions,
    resolve_placement,
};

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

/// Anchors scattered over a 1000x600 viewport, many near an edge.
fn gen_anchors(count: usize, seed: u64) -> Vec<Rect> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| {
            let x = rng.next_f64() * 980.0;
            let y = rng.next_f64() * 580.0;
            let w = 20.0 + rng.next_f64() * 120.0;
            let h = 16.0 + rng.next_f64() * 24.0;
            Rect::new(x, y, x + w, y + h)
        })
        .collect()
}

fn options(placement: Placement) -> PlacementOptions {
    PlacementOptions {
        placement,
        offset: 8.0,
        flip: true,
        prevent_overflow: true,
    }
}

fn bench_resolve(c: &mut Criterion) {
    let anchors = gen_anchors(1_000, 0x5eed);
    let panel = Size::new(200.0, 50.0);
    let boundary = Boundary::new(0.0, 0.0, 1000.0, 600.0);

    let mut group = c.benchmark_group("resolve_placement");
    group.throughput(Throughput::Elements(anchors.len() as u64));
    for placement in [Placement::Top, Placement::RightEnd, Placement::Auto] {
        let opts = options(placement);
        group.bench_function(placement.as_str(), |b| {
            b.iter(|| {
                for &anchor in &anchors {
                    black_box(resolve_placement(
                        black_box(anchor),
                        panel,
                        &opts,
                        &boundary,
                    ));
                }
            });
        });
    }
    group.finish();
}

fn bench_boundary_derive(c: &mut Criterion) {
    let viewport = Rect::new(0.0, 0.0, 1000.0, 600.0);
    let mut ancestors: Vec<ClipAncestor> = (0..16)
        .map(|i| ClipAncestor {
            rect: Rect::new(0.0, 0.0, 1000.0 - i as f64, 600.0),
            overflow: OverflowFlags::empty(),
        })
        .collect();
    ancestors.push(ClipAncestor {
        rect: Rect::new(100.0, 100.0, 700.0, 500.0),
        overflow: OverflowFlags::CLIP_Y,
    });

    c.bench_function("boundary_derive_scroll_ancestor_depth17", |b| {
        b.iter(|| {
            black_box(Boundary::derive(
                BoundaryKind::ScrollAncestor,
                viewport,
                ancestors.iter().copied(),
            ))
        });
    });
}

criterion_group!(benches, bench_resolve, bench_boundary_derive);
criterion_main!(benches);
