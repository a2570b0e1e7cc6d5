// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An interactive hover tooltip: delayed open, panel hover keeps it open,
//! scroll follows the anchor, and the exit animation runs before teardown.
//!
//! Run:
//! - `cargo run -p understory_demos --example tooltip_hover`
//! - `RUST_LOG=trace cargo run -p understory_demos --example tooltip_hover`

use kurbo::Rect;
use understory_demos::{Page, Target, init_logging};
use understory_overlay::{Config, DomEvent, EventKind, InstanceRegistry};

fn main() {
    init_logging();

    let mut page = Page::new().with_trigger("save", Rect::new(40.0, 20.0, 120.0, 48.0));
    let mut registry = InstanceRegistry::new();

    let config = Config::builder()
        .placement_str("bottom-start")
        .and_then(|b| b.interactive(true).build())
        .unwrap_or_else(|err| panic!("bad config: {err}"));
    let mut handle = registry
        .create(&mut page, "save", config)
        .unwrap_or_else(|err| panic!("create failed: {err}"));
    handle.set_content("Save the document (Ctrl+S)");

    let trigger = Target::Trigger("save");
    let enter = DomEvent::new(EventKind::PointerEnter);
    let leave = DomEvent::new(EventKind::PointerLeave);

    page.dispatch(&mut registry, trigger, enter);
    page.advance(&mut registry, 100);
    page.finish_animations(&mut registry);

    // Leave the trigger for the panel; the pending hide is cancelled.
    let panel = Target::Panel(page.last_panel().unwrap_or_default());
    page.dispatch(&mut registry, trigger, leave);
    page.dispatch(&mut registry, panel, enter);
    page.advance(&mut registry, 150);

    page.move_trigger("save", Rect::new(40.0, 220.0, 120.0, 248.0));
    let scroll = DomEvent::new(EventKind::Scroll);
    page.dispatch(&mut registry, Target::Window, scroll);

    page.dispatch(&mut registry, panel, leave);
    page.advance(&mut registry, 100);
    page.finish_animations(&mut registry);

    registry.destroy_all(&mut page);
    tracing::info!(listeners = page.listener_count(), "done");
}
