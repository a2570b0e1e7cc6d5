// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A context menu anchored at the pointer, dismissed by an outside click.
//!
//! Run:
//! - `cargo run -p understory_demos --example context_menu`

use kurbo::{Point, Rect};
use understory_demos::{Page, Target, init_logging};
use understory_overlay::{
    Animation, Config, DomEvent, EventKind, InstanceRegistry, Outcome, TriggerKind,
};
use understory_placement::Placement;

fn main() {
    init_logging();

    let mut page = Page::new().with_trigger("canvas", Rect::new(0.0, 0.0, 1000.0, 600.0));
    let mut registry = InstanceRegistry::new();

    let config = Config::builder()
        .trigger(TriggerKind::ContextMenu)
        .placement(Placement::BottomStart)
        .animation(Animation::None)
        .arrow(false)
        .offset(0.0)
        .build()
        .unwrap_or_else(|err| panic!("bad config: {err}"));
    let mut handle = registry
        .create(&mut page, "canvas", config)
        .unwrap_or_else(|err| panic!("create failed: {err}"));
    handle.set_content("<ul><li>Cut</li><li>Copy</li><li>Paste</li></ul>");

    // Neither bottom-start nor top-start fits this close to the corner, so it is clamped.
    let outcome = page.dispatch(
        &mut registry,
        Target::Trigger("canvas"),
        DomEvent::at(EventKind::ContextMenu, Point::new(940.0, 580.0)),
    );
    assert_eq!(outcome, Outcome::PreventDefault);

    // The trigger covers the whole canvas, so only a click beyond it dismisses.
    page.dispatch(
        &mut registry,
        Target::Document,
        DomEvent::at(EventKind::PointerDown, Point::new(1200.0, 20.0)),
    );

    registry.destroy_all(&mut page);
    tracing::info!(listeners = page.listener_count(), "done");
}
