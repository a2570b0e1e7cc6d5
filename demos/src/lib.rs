// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A toy page that implements [`Host`] by logging, shared by the demos.
//!
//! Time is simulated: [`Page::advance`] moves the clock, and animations run
//! until [`Page::finish_animations`] reports them done.

use std::collections::BTreeMap;
use std::time::Duration;

use kurbo::{Rect, Size};
use tracing::info;
use understory_overlay::{
    Animation, AnimationError, AnimationId, AnimationPhase, ContentRef, DomEvent, EventKind, Host,
    InstanceId, InstanceRegistry, LifecycleEvent, ListenTarget, ListenerId, MountTarget, Outcome,
    Placed, SizeTag, Style, Veto,
};
use tracing_subscriber::EnvFilter;
use web_time::Instant;

/// Install a `fmt` subscriber; `RUST_LOG` overrides the default filter.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,understory_overlay=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Where a demo listener lives.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// A named trigger.
    Trigger(&'static str),
    /// A panel.
    Panel(u64),
    /// The document.
    Document,
    /// The window.
    Window,
}

/// A page with named triggers at fixed rectangles.
#[derive(Debug)]
pub struct Page {
    start: Instant,
    elapsed: Duration,
    next_id: u64,
    triggers: BTreeMap<&'static str, Rect>,
    viewport: Rect,
    panel_size: Size,
    listeners: BTreeMap<ListenerId, (Target, EventKind)>,
    animations: Vec<AnimationId>,
    panels: Vec<u64>,
}

impl Page {
    /// A 1000x600 viewport with 200x50 panels.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            elapsed: Duration::ZERO,
            next_id: 0,
            triggers: BTreeMap::new(),
            viewport: Rect::new(0.0, 0.0, 1000.0, 600.0),
            panel_size: Size::new(200.0, 50.0),
            listeners: BTreeMap::new(),
            animations: Vec::new(),
            panels: Vec::new(),
        }
    }

    /// Add a trigger.
    #[must_use]
    pub fn with_trigger(mut self, name: &'static str, rect: Rect) -> Self {
        self.triggers.insert(name, rect);
        self
    }

    /// Move a trigger, e.g. to simulate scrolling.
    pub fn move_trigger(&mut self, name: &'static str, rect: Rect) {
        self.triggers.insert(name, rect);
    }

    /// Move the simulated clock forward and fire due timers.
    pub fn advance(&mut self, registry: &mut InstanceRegistry<Self>, ms: u64) {
        self.elapsed += Duration::from_millis(ms);
        info!(elapsed = ?self.elapsed, "clock");
        registry.advance(self);
    }

    /// Report every running animation as finished.
    pub fn finish_animations(&mut self, registry: &mut InstanceRegistry<Self>) {
        for id in std::mem::take(&mut self.animations) {
            registry.animation_finished(self, id);
        }
    }

    /// Deliver `event` to every listener on `target`.
    pub fn dispatch(
        &mut self,
        registry: &mut InstanceRegistry<Self>,
        target: Target,
        event: DomEvent,
    ) -> Outcome {
        info!(?target, kind = ?event.kind, "dispatch");
        let ids: Vec<ListenerId> = self
            .listeners
            .iter()
            .filter(|(_, (t, k))| *t == target && *k == event.kind)
            .map(|(id, _)| *id)
            .collect();
        ids.into_iter().fold(Outcome::Continue, |acc, id| {
            acc.merge(registry.handle_event(self, id, &event))
        })
    }

    /// The most recently created panel.
    pub fn last_panel(&self) -> Option<u64> {
        self.panels.last().copied()
    }

    /// Number of installed listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn fresh(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for Page {
    type Trigger = &'static str;
    type Panel = u64;
    type Mount = ();
    type Node = String;

    fn now(&self) -> Instant {
        self.start + self.elapsed
    }

    fn anchor_rect(&self, trigger: &'static str) -> Option<Rect> {
        self.triggers.get(trigger).copied()
    }

    fn viewport(&self) -> Rect {
        self.viewport
    }

    fn create_panel(
        &mut self,
        instance: InstanceId,
        style: Style,
        size: SizeTag,
        arrow: bool,
    ) -> u64 {
        let panel = self.fresh();
        self.panels.push(panel);
        info!(panel, ?instance, %style, %size, arrow, "create panel");
        panel
    }

    fn mount(&mut self, panel: &u64, target: &MountTarget<()>) {
        info!(panel, ?target, "mount");
    }

    fn unmount(&mut self, panel: &u64) {
        info!(panel, "unmount");
    }

    fn set_visible(&mut self, panel: &u64, visible: bool) {
        info!(panel, visible, "set visible");
    }

    fn measure(&mut self, _panel: &u64) -> Size {
        self.panel_size
    }

    fn render_content(&mut self, panel: &u64, content: ContentRef<'_, String>) {
        match content {
            ContentRef::Empty => info!(panel, "render empty"),
            ContentRef::Markup(markup) => info!(panel, markup, "render markup"),
            ContentRef::Node(node) => info!(panel, node = node.as_str(), "render node"),
        }
    }

    fn place(&mut self, panel: &u64, placed: &Placed) {
        info!(
            panel,
            placement = %placed.placement,
            top = placed.coords.y,
            left = placed.coords.x,
            z = placed.z,
            arrow = ?placed.arrow,
            "place"
        );
    }

    fn animate(
        &mut self,
        panel: &u64,
        animation: Animation,
        phase: AnimationPhase,
    ) -> Result<AnimationId, AnimationError> {
        let id = AnimationId(self.fresh());
        info!(panel, %animation, ?phase, ?id, "animate");
        self.animations.push(id);
        Ok(id)
    }

    fn cancel_animation(&mut self, animation: AnimationId) {
        self.animations.retain(|id| *id != animation);
    }

    fn listen(
        &mut self,
        target: ListenTarget<'_, &'static str, u64>,
        kind: EventKind,
    ) -> ListenerId {
        let target = match target {
            ListenTarget::Trigger(name) => Target::Trigger(name),
            ListenTarget::Panel(panel) => Target::Panel(*panel),
            ListenTarget::Document => Target::Document,
            ListenTarget::Window => Target::Window,
        };
        let id = ListenerId(self.fresh());
        self.listeners.insert(id, (target, kind));
        id
    }

    fn unlisten(&mut self, listener: ListenerId) {
        self.listeners.remove(&listener);
    }

    fn emit(&mut self, event: &LifecycleEvent<&'static str>) -> Veto {
        info!(trigger = event.trigger, signal = event.kind.as_str(), "lifecycle");
        Veto::Allow
    }
}
