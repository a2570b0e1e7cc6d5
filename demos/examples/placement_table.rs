// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Every directional placement for one anchor, then flip and clamp at the edges.
//!
//! Run:
//! - `cargo run -p understory_demos --example placement_table`

use kurbo::{Rect, Size};
use understory_placement::{Boundary, Placement, PlacementOptions, resolve, resolve_placement};

fn main() {
    let anchor = Rect::new(500.0, 100.0, 600.0, 130.0);
    let panel = Size::new(200.0, 50.0);

    println!("anchor {anchor:?}, panel {panel:?}, offset 8");
    for placement in Placement::ALL.iter().filter(|p| !p.is_auto()) {
        let p = resolve(anchor, panel, *placement, 8.0);
        let name = placement.as_str();
        println!("  {name:<13} top={:>6} left={:>6}", p.y, p.x);
    }

    let boundary = Boundary::new(0.0, 0.0, 1000.0, 600.0);
    let scenarios = [
        ("top edge", Rect::new(500.0, 0.0, 600.0, 30.0), Placement::Top),
        ("bottom edge", Rect::new(500.0, 580.0, 600.0, 610.0), Placement::Bottom),
        ("right edge", Rect::new(900.0, 300.0, 990.0, 330.0), Placement::Right),
        ("auto", Rect::new(100.0, 20.0, 200.0, 50.0), Placement::Auto),
    ];
    println!("\nboundary {boundary:?}");
    for (label, anchor, placement) in scenarios {
        let options = PlacementOptions {
            placement,
            offset: 8.0,
            flip: true,
            prevent_overflow: true,
        };
        let r = resolve_placement(anchor, panel, &options, &boundary);
        println!(
            "  {label:<12} requested {:<7} -> {:<7} top={} left={}",
            placement.as_str(),
            r.placement.as_str(),
            r.top(),
            r.left()
        );
    }
}
