// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One floating instance: state machine, trigger wiring, timers, placement.
//!
//! ```text
//! hidden --show--> showing --enter done--> visible --hide--> hiding --exit done--> hidden
//!                     ^                                         |
//!                     +------------------show-------------------+
//! ```
//!
//! A `hide` while `showing` aborts the enter animation and goes straight to
//! `hiding`. A `show` while `hiding` cancels the exit animation and returns to
//! `showing` on the same mounted panel.
//!
//! Listener lifetimes follow [`ListenerScope`]: trigger listeners live as
//! long as the instance, panel listeners as long as the panel is mounted, and
//! document/window listeners only while the instance is not `hidden`.

use core::fmt;
use core::time::Duration;

use kurbo::{Rect, Size};
use tracing::{debug, trace, warn};
use understory_placement::{Boundary, Placement, arrow_offset, resolve_placement};

use crate::config::{Animation, Config};
use crate::events::{
    DomEvent, EventKind, LifecycleEvent, LifecycleKind, ListenTarget, ListenerId, ListenerScope,
    ListenerSet, Outcome, Source, Veto,
};
use crate::host::{AnimationId, AnimationPhase, Content, ContentRef, Host, Placed};
use crate::hover::{HoverIntent, HoverTransition, Region};
use crate::registry::InstanceId;
use crate::timer::{RESIZE_DEBOUNCE, TimerKind, Timers};

/// Arrow inset from the panel's corners.
const ARROW_PADDING: f64 = 4.0;

/// Lifecycle state of an instance.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum State {
    /// Not shown; no global listeners.
    #[default]
    Hidden,
    /// Mounted and placed; enter animation running.
    Showing,
    /// Fully shown.
    Visible,
    /// Exit animation running.
    Hiding,
}

impl State {
    /// The lowercase state name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::Showing => "showing",
            Self::Visible => "visible",
            Self::Hiding => "hiding",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct InFlight {
    id: AnimationId,
    phase: AnimationPhase,
}

/// Owns one trigger's panel and drives its transitions.
///
/// Controllers are created and owned by [`InstanceRegistry`](crate::InstanceRegistry);
/// callers reach them through [`InstanceHandle`](crate::InstanceHandle).
pub struct LifecycleController<H: Host> {
    id: InstanceId,
    trigger: H::Trigger,
    config: Config<H::Mount>,
    content: Content<H::Node>,
    state: State,
    panel: Option<H::Panel>,
    placed: Option<Placed>,
    animation: Option<InFlight>,
    timers: Timers,
    listeners: ListenerSet,
    hover: HoverIntent,
    pinned: bool,
    anchor_override: Option<Rect>,
}

impl<H: Host> fmt::Debug for LifecycleController<H>
where
    H::Node: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleController")
            .field("id", &self.id)
            .field("trigger", &self.trigger)
            .field("state", &self.state)
            .field("panel", &self.panel)
            .field("placed", &self.placed)
            .field("listeners", &self.listeners.len())
            .field("pinned", &self.pinned)
            .finish_non_exhaustive()
    }
}

impl<H: Host> LifecycleController<H> {
    pub(crate) fn new(id: InstanceId, trigger: H::Trigger, config: Config<H::Mount>) -> Self {
        Self {
            id,
            trigger,
            config,
            content: Content::Empty,
            state: State::Hidden,
            panel: None,
            placed: None,
            animation: None,
            timers: Timers::new(),
            listeners: ListenerSet::new(),
            hover: HoverIntent::new(),
            pinned: false,
            anchor_override: None,
        }
    }

    /// Instance identifier.
    pub fn id(&self) -> InstanceId {
        self.id
    }

    /// The trigger this instance is attached to.
    pub fn trigger(&self) -> H::Trigger {
        self.trigger
    }

    /// Current configuration.
    pub fn config(&self) -> &Config<H::Mount> {
        &self.config
    }

    /// Current state.
    pub fn state(&self) -> State {
        self.state
    }

    /// The placement chosen at the last layout pass.
    pub fn placement(&self) -> Option<Placement> {
        self.placed.map(|p| p.placement)
    }

    /// Result of the last layout pass.
    pub fn placed(&self) -> Option<&Placed> {
        self.placed.as_ref()
    }

    /// The owned panel node, while mounted.
    pub fn panel(&self) -> Option<&H::Panel> {
        self.panel.as_ref()
    }

    /// Whether a click pinned a hover-click instance open.
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Number of listeners this instance currently holds.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Earliest pending timer.
    pub fn next_deadline(&self) -> Option<web_time::Instant> {
        self.timers.next_deadline()
    }

    pub(crate) fn timers(&self) -> &Timers {
        &self.timers
    }

    pub(crate) fn source_of(&self, listener: ListenerId) -> Option<Source> {
        self.listeners.source_of(listener)
    }

    pub(crate) fn is_animating(&self, animation: AnimationId) -> bool {
        self.animation.is_some_and(|a| a.id == animation)
    }

    // --- operations ---

    /// Install the listeners for the configured trigger kind.
    pub(crate) fn install_trigger_listeners(&mut self, host: &mut H) {
        let descriptor = self.config.trigger().descriptor();
        for kind in descriptor.events() {
            self.listen(
                host,
                ListenerScope::Trigger,
                ListenTarget::Trigger(self.trigger),
                kind,
            );
        }
    }

    pub(crate) fn show(&mut self, host: &mut H) {
        match self.state {
            State::Showing | State::Visible => {
                trace!(instance = ?self.id, state = %self.state, "show ignored");
            }
            State::Hiding => {
                if self.vetoed(host, LifecycleKind::BeforeShow) {
                    return;
                }
                self.cancel_animation(host);
                if let Some(panel) = &self.panel {
                    host.set_visible(panel, true);
                }
                self.set_state(State::Showing);
                self.place(host);
                self.start(host, AnimationPhase::Enter);
            }
            State::Hidden => {
                if self.vetoed(host, LifecycleKind::BeforeShow) {
                    return;
                }
                if self.anchor(host).is_none() {
                    warn!(
                        instance = ?self.id,
                        trigger = ?self.trigger,
                        "trigger is detached; show abandoned"
                    );
                    return;
                }
                self.timers.cancel(TimerKind::AutoHide);
                self.install_global_listeners(host);
                self.ensure_mounted(host);
                self.render(host);
                if let Some(panel) = &self.panel {
                    host.set_visible(panel, true);
                }
                self.set_state(State::Showing);
                self.place(host);
                self.start(host, AnimationPhase::Enter);
            }
        }
    }

    pub(crate) fn hide(&mut self, host: &mut H) {
        if matches!(self.state, State::Hidden | State::Hiding) {
            trace!(instance = ?self.id, state = %self.state, "hide ignored");
            return;
        }
        if self.vetoed(host, LifecycleKind::BeforeHide) {
            return;
        }
        self.timers.cancel_all();
        self.cancel_animation(host);
        self.set_state(State::Hiding);
        self.start(host, AnimationPhase::Exit);
    }

    pub(crate) fn toggle(&mut self, host: &mut H) {
        match self.state {
            State::Hidden | State::Hiding => self.show(host),
            State::Showing | State::Visible => self.hide(host),
        }
    }

    /// Re-resolve placement without animating.
    pub(crate) fn reposition(&mut self, host: &mut H) {
        if self.state != State::Hidden {
            self.place(host);
        }
    }

    pub(crate) fn update(&mut self, host: &mut H, config: Config<H::Mount>) {
        let old = core::mem::replace(&mut self.config, config);

        if old.trigger() != self.config.trigger() {
            self.remove_listeners(host, ListenerScope::Trigger);
            self.install_trigger_listeners(host);
            self.pinned = false;
            self.timers.cancel(TimerKind::ShowDelay);
            self.timers.cancel(TimerKind::HideDelay);
        }

        if self.panel.is_some() {
            self.remove_listeners(host, ListenerScope::Panel);
            if let Some(panel) = &self.panel {
                if old.mount().target != self.config.mount().target {
                    host.unmount(panel);
                    host.mount(panel, &self.config.mount().target);
                    host.set_visible(panel, self.state != State::Hidden);
                }
            }
            self.install_panel_listeners(host);
        }

        if self.state == State::Hidden {
            if self.panel.is_some() && !self.config.mount().persistent {
                self.unmount(host);
            }
        } else {
            self.remove_listeners(host, ListenerScope::Global);
            self.install_global_listeners(host);
            self.place(host);
        }

        if self.state == State::Visible {
            match self.config.auto_hide() {
                Some(delay) if !self.timers.is_armed(TimerKind::AutoHide) => {
                    self.timers.arm(TimerKind::AutoHide, host.now() + delay);
                }
                Some(_) => {}
                None => {
                    self.timers.cancel(TimerKind::AutoHide);
                }
            }
        }
        if !self.keeps_open_on_panel_hover() {
            self.release_panel_hover(host);
        }
        debug!(instance = ?self.id, "config updated");
    }

    pub(crate) fn set_content(&mut self, host: &mut H, content: Content<H::Node>) {
        self.content = content;
        if self.panel.is_some() {
            self.render(host);
            if self.state != State::Hidden {
                self.place(host);
            }
        }
    }

    /// Release everything: animation, timers, listeners, panel.
    ///
    /// Emits `hide` if the instance was not already hidden.
    pub(crate) fn destroy(&mut self, host: &mut H) {
        let was = self.state;
        self.cancel_animation(host);
        self.timers.cancel_all();
        self.remove_listeners(host, ListenerScope::Global);
        self.unmount(host);
        self.remove_listeners(host, ListenerScope::Trigger);
        self.pinned = false;
        self.anchor_override = None;
        if was != State::Hidden {
            self.set_state(State::Hidden);
            self.emit(host, LifecycleKind::Hide);
        }
        debug!(instance = ?self.id, "destroyed");
    }

    // --- host callbacks ---

    /// Route an event delivered on one of this instance's listeners.
    pub(crate) fn handle_event(
        &mut self,
        host: &mut H,
        source: Source,
        event: &DomEvent,
    ) -> Outcome {
        trace!(instance = ?self.id, ?source, kind = ?event.kind, "event");
        match source {
            Source::Trigger => self.on_trigger(host, event),
            Source::Panel => {
                self.on_panel(host, event);
                Outcome::Continue
            }
            Source::Document | Source::Window => {
                self.on_global(host, event);
                Outcome::Continue
            }
        }
    }

    /// The host finished `animation`. Returns false if it is not ours or stale.
    pub(crate) fn animation_finished(&mut self, host: &mut H, animation: AnimationId) -> bool {
        match self.animation {
            Some(running) if running.id == animation => {
                self.complete(host, running.phase);
                true
            }
            _ => false,
        }
    }

    pub(crate) fn fire_timer(&mut self, host: &mut H, kind: TimerKind) {
        self.timers.cancel(kind);
        trace!(instance = ?self.id, ?kind, "timer fired");
        match kind {
            TimerKind::ShowDelay => self.show(host),
            TimerKind::HideDelay | TimerKind::AutoHide => self.hide(host),
            TimerKind::ResizeDebounce => self.reposition(host),
        }
    }

    // --- event routing ---

    fn on_trigger(&mut self, host: &mut H, event: &DomEvent) -> Outcome {
        let descriptor = self.config.trigger().descriptor();
        let kind = event.kind;

        match kind {
            EventKind::Click if descriptor.toggle => {
                if descriptor.persist {
                    self.toggle_pin(host);
                } else {
                    self.toggle(host);
                }
            }
            EventKind::ContextMenu if descriptor.shows_on(kind) => {
                if let Some(point) = event.point {
                    self.anchor_override = Some(Rect::from_origin_size(point, Size::ZERO));
                }
                if matches!(self.state, State::Hidden | State::Hiding) {
                    self.request_show(host, descriptor.delay.show);
                } else {
                    self.place(host);
                }
            }
            EventKind::PointerEnter => {
                if self.hover.enter(Region::Trigger) == Some(HoverTransition::Entered)
                    && descriptor.shows_on(kind)
                {
                    self.request_show(host, descriptor.delay.show);
                }
            }
            EventKind::PointerLeave => {
                if self.hover.leave(Region::Trigger) == Some(HoverTransition::Left)
                    && descriptor.hides_on(kind)
                {
                    self.request_hide(host, descriptor.delay.hide);
                }
            }
            _ if descriptor.shows_on(kind) => self.request_show(host, descriptor.delay.show),
            _ if descriptor.hides_on(kind) => self.request_hide(host, descriptor.delay.hide),
            _ => {}
        }

        if descriptor.prevent_default && descriptor.shows_on(kind) {
            Outcome::PreventDefault
        } else {
            Outcome::Continue
        }
    }

    fn on_panel(&mut self, host: &mut H, event: &DomEvent) {
        if !self.keeps_open_on_panel_hover() {
            return;
        }
        match event.kind {
            EventKind::PointerEnter => {
                if self.hover.enter(Region::Panel) == Some(HoverTransition::Entered) {
                    self.timers.cancel(TimerKind::HideDelay);
                }
            }
            EventKind::PointerLeave => {
                if self.hover.leave(Region::Panel) == Some(HoverTransition::Left) {
                    let delay = self.config.trigger().descriptor().delay.hide;
                    self.request_hide(host, delay);
                }
            }
            _ => {}
        }
    }

    fn on_global(&mut self, host: &mut H, event: &DomEvent) {
        if self.state == State::Hidden {
            return;
        }
        match event.kind {
            EventKind::PointerDown if self.config.dismiss_on_outside_click() => {
                let Some(point) = event.point else {
                    return;
                };
                let in_panel = self.placed.is_some_and(|p| p.rect().contains(point));
                let in_anchor = self.anchor(host).is_some_and(|r| r.contains(point));
                if !in_panel && !in_anchor {
                    debug!(instance = ?self.id, "outside click");
                    self.hide(host);
                }
            }
            EventKind::Scroll => {
                if self.config.dismiss_on_scroll() {
                    self.hide(host);
                } else {
                    self.place(host);
                }
            }
            EventKind::Resize => {
                self.timers
                    .arm(TimerKind::ResizeDebounce, host.now() + RESIZE_DEBOUNCE);
            }
            _ => {}
        }
    }

    fn request_show(&mut self, host: &mut H, delay: Duration) {
        self.timers.cancel(TimerKind::HideDelay);
        if delay.is_zero() {
            self.show(host);
        } else if matches!(self.state, State::Hidden | State::Hiding) {
            self.timers.arm(TimerKind::ShowDelay, host.now() + delay);
        }
    }

    fn request_hide(&mut self, host: &mut H, delay: Duration) {
        self.timers.cancel(TimerKind::ShowDelay);
        if self.pinned {
            trace!(instance = ?self.id, "pinned; hide request ignored");
            return;
        }
        if matches!(self.state, State::Hidden | State::Hiding) {
            return;
        }
        if delay.is_zero() {
            self.hide(host);
        } else {
            self.timers.arm(TimerKind::HideDelay, host.now() + delay);
        }
    }

    /// Drop the panel from the hover union once it no longer reports leaves.
    fn release_panel_hover(&mut self, host: &mut H) {
        if self.hover.leave(Region::Panel) == Some(HoverTransition::Left)
            && self.config.trigger().is_hover()
        {
            let delay = self.config.trigger().descriptor().delay.hide;
            self.request_hide(host, delay);
        }
    }

    fn toggle_pin(&mut self, host: &mut H) {
        if self.pinned {
            self.pinned = false;
            self.hide(host);
        } else {
            self.timers.cancel(TimerKind::ShowDelay);
            self.timers.cancel(TimerKind::HideDelay);
            self.show(host);
            self.pinned = matches!(self.state, State::Showing | State::Visible);
        }
    }

    fn keeps_open_on_panel_hover(&self) -> bool {
        self.config.interactive() && self.config.trigger().is_hover()
    }

    // --- transitions ---

    fn set_state(&mut self, to: State) {
        debug!(instance = ?self.id, from = %self.state, to = %to, "transition");
        self.state = to;
    }

    fn emit(&self, host: &mut H, kind: LifecycleKind) -> Veto {
        let veto = host.emit(&LifecycleEvent {
            kind,
            instance: self.id,
            trigger: self.trigger,
        });
        if kind.is_cancelable() {
            veto
        } else {
            Veto::Allow
        }
    }

    fn vetoed(&self, host: &mut H, kind: LifecycleKind) -> bool {
        let vetoed = self.emit(host, kind) == Veto::Prevent;
        if vetoed {
            debug!(instance = ?self.id, signal = kind.as_str(), "vetoed");
        }
        vetoed
    }

    fn start(&mut self, host: &mut H, phase: AnimationPhase) {
        let animation = self.config.animation();
        let started = match &self.panel {
            Some(panel) if animation != Animation::None => {
                match host.animate(panel, animation, phase) {
                    Ok(id) => Some(id),
                    Err(err) => {
                        warn!(
                            instance = ?self.id,
                            %err,
                            "animation failed; completing immediately"
                        );
                        None
                    }
                }
            }
            _ => None,
        };
        match started {
            Some(id) => self.animation = Some(InFlight { id, phase }),
            None => self.complete(host, phase),
        }
    }

    fn complete(&mut self, host: &mut H, phase: AnimationPhase) {
        self.animation = None;
        match phase {
            AnimationPhase::Enter => {
                self.set_state(State::Visible);
                self.emit(host, LifecycleKind::Show);
                if let Some(delay) = self.config.auto_hide() {
                    self.timers.arm(TimerKind::AutoHide, host.now() + delay);
                }
            }
            AnimationPhase::Exit => {
                self.timers.cancel_all();
                self.remove_listeners(host, ListenerScope::Global);
                if self.config.mount().persistent {
                    if let Some(panel) = &self.panel {
                        host.set_visible(panel, false);
                    }
                    self.hover.forget(Region::Panel);
                } else {
                    self.unmount(host);
                }
                self.pinned = false;
                self.anchor_override = None;
                self.set_state(State::Hidden);
                self.emit(host, LifecycleKind::Hide);
            }
        }
    }

    fn cancel_animation(&mut self, host: &mut H) {
        if let Some(running) = self.animation.take() {
            trace!(instance = ?self.id, animation = ?running.id, "animation cancelled");
            host.cancel_animation(running.id);
        }
    }

    // --- panel ---

    fn anchor(&self, host: &H) -> Option<Rect> {
        self.anchor_override.or_else(|| host.anchor_rect(self.trigger))
    }

    fn ensure_mounted(&mut self, host: &mut H) {
        if self.panel.is_some() {
            return;
        }
        let panel = host.create_panel(
            self.id,
            self.config.style(),
            self.config.size(),
            self.config.arrow(),
        );
        host.mount(&panel, &self.config.mount().target);
        debug!(instance = ?self.id, ?panel, "panel mounted");
        self.panel = Some(panel);
        self.install_panel_listeners(host);
    }

    fn unmount(&mut self, host: &mut H) {
        self.remove_listeners(host, ListenerScope::Panel);
        if let Some(panel) = self.panel.take() {
            host.unmount(&panel);
            debug!(instance = ?self.id, ?panel, "panel unmounted");
        }
        self.hover.forget(Region::Panel);
        self.placed = None;
    }

    fn render(&mut self, host: &mut H) {
        let Some(panel) = &self.panel else {
            return;
        };
        match &mut self.content {
            Content::Empty => host.render_content(panel, ContentRef::Empty),
            Content::Markup(markup) => host.render_content(panel, ContentRef::Markup(markup)),
            Content::Node(node) => host.render_content(panel, ContentRef::Node(node)),
            Content::Factory(factory) => {
                let markup = factory(self.id);
                host.render_content(panel, ContentRef::Markup(&markup));
            }
        }
    }

    /// Measure, resolve, and apply. Keeps the last position if the anchor is gone.
    fn place(&mut self, host: &mut H) {
        let Some(panel) = &self.panel else {
            return;
        };
        let Some(anchor) = self.anchor(host) else {
            debug!(instance = ?self.id, "trigger detached; keeping last position");
            return;
        };
        let size = host.measure(panel);
        let boundary = Boundary::derive(
            self.config.boundary(),
            host.viewport(),
            host.clip_ancestors(self.trigger),
        );
        let resolved = resolve_placement(anchor, size, &self.config.placement_options(), &boundary);
        let arrow = self.config.arrow().then(|| {
            arrow_offset(
                anchor,
                resolved.coords,
                size,
                resolved.placement,
                host.arrow_size(),
                ARROW_PADDING,
            )
        });
        let placed = Placed {
            coords: resolved.coords,
            placement: resolved.placement,
            size,
            z: self.config.stack_order(),
            arrow,
        };
        host.place(panel, &placed);
        trace!(
            instance = ?self.id,
            placement = resolved.placement.as_str(),
            top = placed.coords.y,
            left = placed.coords.x,
            "placed"
        );
        self.placed = Some(placed);
    }

    // --- listeners ---

    fn listen(
        &mut self,
        host: &mut H,
        scope: ListenerScope,
        target: ListenTarget<'_, H::Trigger, H::Panel>,
        kind: EventKind,
    ) {
        let source = target.source();
        let id = host.listen(target, kind);
        trace!(instance = ?self.id, ?scope, ?source, ?kind, listener = ?id, "listening");
        self.listeners.add(scope, source, id);
    }

    fn install_panel_listeners(&mut self, host: &mut H) {
        if !self.keeps_open_on_panel_hover() {
            return;
        }
        let Some(panel) = &self.panel else {
            return;
        };
        for kind in [EventKind::PointerEnter, EventKind::PointerLeave] {
            let id = host.listen(ListenTarget::Panel(panel), kind);
            self.listeners.add(ListenerScope::Panel, Source::Panel, id);
        }
    }

    fn install_global_listeners(&mut self, host: &mut H) {
        if self.listeners.count(ListenerScope::Global) > 0 {
            return;
        }
        if self.config.dismiss_on_outside_click() {
            self.listen(
                host,
                ListenerScope::Global,
                ListenTarget::Document,
                EventKind::PointerDown,
            );
        }
        for kind in [EventKind::Scroll, EventKind::Resize] {
            self.listen(host, ListenerScope::Global, ListenTarget::Window, kind);
        }
    }

    fn remove_listeners(&mut self, host: &mut H, scope: ListenerScope) {
        let ids = self.listeners.drain(scope);
        if !ids.is_empty() {
            trace!(instance = ?self.id, ?scope, count = ids.len(), "unlistening");
        }
        for id in ids {
            host.unlisten(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use kurbo::Point;

    use crate::config::MountTarget;
    use crate::testing::{AnimationMode, ScriptedHost, Target};
    use crate::trigger::TriggerKind;

    const TRIGGER: u32 = 7;

    fn host() -> ScriptedHost {
        ScriptedHost::new().with_trigger(TRIGGER, Rect::new(500.0, 100.0, 600.0, 130.0))
    }

    fn controller(
        host: &mut ScriptedHost,
        config: Config<u32>,
    ) -> LifecycleController<ScriptedHost> {
        let mut c = LifecycleController::new(InstanceId::new(0, 1), TRIGGER, config);
        c.install_trigger_listeners(host);
        c
    }

    fn send(
        c: &mut LifecycleController<ScriptedHost>,
        host: &mut ScriptedHost,
        source: Source,
        kind: EventKind,
    ) {
        c.handle_event(host, source, &DomEvent::new(kind));
    }

    fn finish(c: &mut LifecycleController<ScriptedHost>, host: &mut ScriptedHost) {
        let running: Vec<_> = host.animations.drain(..).map(|(id, _, _)| id).collect();
        for id in running {
            c.animation_finished(host, id);
        }
    }

    fn instant() -> Config<u32> {
        Config::builder()
            .animation(Animation::None)
            .trigger(TriggerKind::Manual)
            .build()
            .unwrap()
    }

    #[test]
    fn show_runs_through_showing_to_visible() {
        let mut h = host();
        let mut c = controller(&mut h, Config::builder().build().unwrap());
        c.show(&mut h);
        assert_eq!(c.state(), State::Showing);
        assert_eq!(h.mounted.len(), 1);
        assert_eq!(c.placement(), Some(Placement::Top));
        assert_eq!(
            h.last_placed().map(|p| p.coords),
            Some(Point::new(450.0, 42.0))
        );
        assert_eq!(h.last_placed().map(|p| p.z), Some(9999));

        finish(&mut c, &mut h);
        assert_eq!(c.state(), State::Visible);
        assert_eq!(
            h.emitted_kinds(),
            vec![LifecycleKind::BeforeShow, LifecycleKind::Show]
        );
    }

    #[test]
    fn show_twice_mounts_and_listens_once() {
        let mut h = host();
        let mut c = controller(&mut h, instant());
        c.show(&mut h);
        let listeners = h.live_listeners();
        c.show(&mut h);
        assert_eq!(c.state(), State::Visible);
        assert_eq!(h.created.len(), 1);
        assert_eq!(h.mounted.len(), 1);
        assert_eq!(h.live_listeners(), listeners);
        assert_eq!(h.emitted_kinds().len(), 2);
    }

    #[test]
    fn vetoed_show_has_no_side_effects() {
        let mut h = host();
        h.veto.insert(LifecycleKind::BeforeShow);
        let mut c = controller(&mut h, instant());
        let before = h.live_listeners();
        c.show(&mut h);
        assert_eq!(c.state(), State::Hidden);
        assert!(h.created.is_empty());
        assert!(h.mounted.is_empty() && h.placements.is_empty());
        assert_eq!(h.live_listeners(), before);
        assert_eq!(h.emitted_kinds(), vec![LifecycleKind::BeforeShow]);
    }

    #[test]
    fn vetoed_hide_keeps_everything_in_place() {
        let mut h = host();
        let mut c = controller(&mut h, instant());
        c.show(&mut h);
        h.veto.insert(LifecycleKind::BeforeHide);
        let listeners = h.live_listeners();
        c.hide(&mut h);
        assert_eq!(c.state(), State::Visible);
        assert_eq!(h.mounted.len(), 1);
        assert_eq!(h.live_listeners(), listeners);
    }

    #[test]
    fn hide_unmounts_and_releases_global_listeners() {
        let mut h = host();
        let mut c = controller(&mut h, Config::builder().build().unwrap());
        c.show(&mut h);
        finish(&mut c, &mut h);
        assert_eq!(h.global_listeners(), 3);

        c.hide(&mut h);
        assert_eq!(c.state(), State::Hiding);
        assert_eq!(h.mounted.len(), 1);
        finish(&mut c, &mut h);
        assert_eq!(c.state(), State::Hidden);
        assert!(h.mounted.is_empty());
        assert_eq!(h.global_listeners(), 0);
        assert_eq!(c.placement(), None);
        assert_eq!(h.emitted_kinds().last(), Some(&LifecycleKind::Hide));
    }

    #[test]
    fn show_during_hiding_reuses_the_mounted_panel() {
        let mut h = host();
        let mut c = controller(&mut h, Config::builder().build().unwrap());
        c.show(&mut h);
        finish(&mut c, &mut h);
        c.hide(&mut h);
        let exit = h.animations[0].0;

        c.show(&mut h);
        assert_eq!(c.state(), State::Showing);
        assert!(h.cancelled.contains(&exit));
        assert_eq!(h.created.len(), 1);
        assert_eq!(h.mounted.len(), 1);
        // The host may still report the cancelled exit; it must be ignored.
        assert!(!c.animation_finished(&mut h, exit));
        finish(&mut c, &mut h);
        assert_eq!(c.state(), State::Visible);
    }

    #[test]
    fn hide_during_showing_aborts_the_enter_animation() {
        let mut h = host();
        let mut c = controller(&mut h, Config::builder().build().unwrap());
        c.show(&mut h);
        let enter = h.animations[0].0;
        c.hide(&mut h);
        assert_eq!(c.state(), State::Hiding);
        assert!(h.cancelled.contains(&enter));
        assert!(!h.emitted_kinds().contains(&LifecycleKind::Show));
        finish(&mut c, &mut h);
        assert_eq!(c.state(), State::Hidden);
    }

    #[test]
    fn failed_animation_completes_immediately() {
        let mut h = host();
        h.animation_mode = AnimationMode::Fail;
        let mut c = controller(&mut h, Config::builder().build().unwrap());
        c.show(&mut h);
        assert_eq!(c.state(), State::Visible);
        c.hide(&mut h);
        assert_eq!(c.state(), State::Hidden);
        assert!(h.mounted.is_empty());
    }

    #[test]
    fn persistent_mount_survives_hide() {
        let mut h = host();
        let config = instant().to_builder().persistent_mount(true).build().unwrap();
        let mut c = controller(&mut h, config);
        c.show(&mut h);
        c.hide(&mut h);
        assert_eq!(c.state(), State::Hidden);
        assert_eq!(h.mounted.len(), 1);
        let panel = h.mounted[0].0;
        assert!(h.invisible.contains(&panel));

        c.show(&mut h);
        assert_eq!(h.created.len(), 1);
        assert!(!h.invisible.contains(&panel));

        c.destroy(&mut h);
        assert!(h.mounted.is_empty());
        assert_eq!(h.live_listeners(), 0);
    }

    #[test]
    fn show_on_detached_trigger_is_abandoned() {
        let mut h = host();
        let mut c = controller(&mut h, instant());
        h.anchors.clear();
        c.show(&mut h);
        assert_eq!(c.state(), State::Hidden);
        assert!(h.mounted.is_empty());
    }

    #[test]
    fn scroll_follows_unless_dismissing() {
        let mut h = host();
        let mut c = controller(&mut h, instant());
        c.show(&mut h);
        h.anchors.insert(TRIGGER, Rect::new(500.0, 300.0, 600.0, 330.0));
        send(&mut c, &mut h, Source::Window, EventKind::Scroll);
        assert_eq!(c.state(), State::Visible);
        assert_eq!(
            h.last_placed().map(|p| p.coords),
            Some(Point::new(450.0, 242.0))
        );
        assert!(h.animations.is_empty());

        let config = instant().to_builder().dismiss_on_scroll(true).build().unwrap();
        c.update(&mut h, config);
        send(&mut c, &mut h, Source::Window, EventKind::Scroll);
        assert_eq!(c.state(), State::Hidden);
    }

    #[test]
    fn resize_is_debounced() {
        let mut h = host();
        let mut c = controller(&mut h, instant());
        c.show(&mut h);
        let placements = h.placements.len();
        send(&mut c, &mut h, Source::Window, EventKind::Resize);
        h.advance_ms(60);
        send(&mut c, &mut h, Source::Window, EventKind::Resize);
        assert_eq!(h.placements.len(), placements);

        let deadline = c.next_deadline().unwrap();
        assert_eq!(deadline, h.now() + RESIZE_DEBOUNCE);
        c.fire_timer(&mut h, TimerKind::ResizeDebounce);
        assert_eq!(h.placements.len(), placements + 1);
        assert!(c.timers().is_empty());
    }

    #[test]
    fn auto_hide_arms_on_visible() {
        let mut h = host();
        let config = instant()
            .to_builder()
            .auto_hide(Duration::from_millis(3000))
            .build()
            .unwrap();
        let mut c = controller(&mut h, config);
        c.show(&mut h);
        assert_eq!(
            c.timers().deadline(TimerKind::AutoHide),
            Some(h.now() + Duration::from_millis(3000))
        );
        c.fire_timer(&mut h, TimerKind::AutoHide);
        assert_eq!(c.state(), State::Hidden);
    }

    #[test]
    fn outside_click_dismisses_inside_click_does_not() {
        let mut h = host();
        let mut c = controller(&mut h, instant());
        c.show(&mut h);
        let panel = c.placed().unwrap().rect();

        let inside = DomEvent::at(EventKind::PointerDown, panel.center());
        c.handle_event(&mut h, Source::Document, &inside);
        let on_anchor = DomEvent::at(EventKind::PointerDown, Point::new(550.0, 110.0));
        c.handle_event(&mut h, Source::Document, &on_anchor);
        assert_eq!(c.state(), State::Visible);

        let outside = DomEvent::at(EventKind::PointerDown, Point::new(5.0, 5.0));
        c.handle_event(&mut h, Source::Document, &outside);
        assert_eq!(c.state(), State::Hidden);
    }

    #[test]
    fn contextmenu_anchors_at_the_pointer_and_prevents_default() {
        let mut h = host();
        let config = instant()
            .to_builder()
            .trigger(TriggerKind::ContextMenu)
            .placement(Placement::BottomStart)
            .build()
            .unwrap();
        let mut c = controller(&mut h, config);
        let event = DomEvent::at(EventKind::ContextMenu, Point::new(300.0, 200.0));
        let outcome = c.handle_event(&mut h, Source::Trigger, &event);
        assert_eq!(outcome, Outcome::PreventDefault);
        assert_eq!(c.state(), State::Visible);
        assert_eq!(
            h.last_placed().map(|p| p.coords),
            Some(Point::new(300.0, 208.0))
        );
    }

    #[test]
    fn hover_delays_and_panel_keeps_open() {
        let mut h = host();
        let config = Config::builder()
            .animation(Animation::None)
            .interactive(true)
            .build()
            .unwrap();
        let mut c = controller(&mut h, config);

        send(&mut c, &mut h, Source::Trigger, EventKind::PointerEnter);
        assert_eq!(c.state(), State::Hidden);
        assert!(c.timers().is_armed(TimerKind::ShowDelay));
        c.fire_timer(&mut h, TimerKind::ShowDelay);
        assert_eq!(c.state(), State::Visible);
        assert_eq!(h.listeners_on(Target::Panel(h.created[0])), 2);

        send(&mut c, &mut h, Source::Trigger, EventKind::PointerLeave);
        assert!(c.timers().is_armed(TimerKind::HideDelay));
        send(&mut c, &mut h, Source::Panel, EventKind::PointerEnter);
        assert!(!c.timers().is_armed(TimerKind::HideDelay));

        send(&mut c, &mut h, Source::Panel, EventKind::PointerLeave);
        assert!(c.timers().is_armed(TimerKind::HideDelay));
        c.fire_timer(&mut h, TimerKind::HideDelay);
        assert_eq!(c.state(), State::Hidden);
        assert_eq!(h.live_listeners(), 2);
    }

    #[test]
    fn panel_hover_is_released_when_interactive_is_turned_off() {
        let mut h = host();
        let config = Config::builder()
            .animation(Animation::None)
            .interactive(true)
            .build()
            .unwrap();
        let mut c = controller(&mut h, config.clone());
        send(&mut c, &mut h, Source::Trigger, EventKind::PointerEnter);
        c.fire_timer(&mut h, TimerKind::ShowDelay);
        send(&mut c, &mut h, Source::Trigger, EventKind::PointerLeave);
        send(&mut c, &mut h, Source::Panel, EventKind::PointerEnter);
        assert!(!c.timers().is_armed(TimerKind::HideDelay));

        let plain = config.to_builder().interactive(false).build().unwrap();
        c.update(&mut h, plain);
        assert_eq!(h.listeners_on(Target::Panel(h.created[0])), 0);
        assert!(!c.hover.is_hovering());
        assert!(c.timers().is_armed(TimerKind::HideDelay));

        send(&mut c, &mut h, Source::Trigger, EventKind::PointerEnter);
        assert!(!c.timers().is_armed(TimerKind::HideDelay));
        send(&mut c, &mut h, Source::Trigger, EventKind::PointerLeave);
        assert!(c.timers().is_armed(TimerKind::HideDelay));
        c.fire_timer(&mut h, TimerKind::HideDelay);
        assert_eq!(c.state(), State::Hidden);
    }

    #[test]
    fn persistent_panel_forgets_pointer_when_hidden() {
        let mut h = host();
        let config = Config::builder()
            .animation(Animation::None)
            .interactive(true)
            .persistent_mount(true)
            .build()
            .unwrap();
        let mut c = controller(&mut h, config);
        send(&mut c, &mut h, Source::Trigger, EventKind::PointerEnter);
        c.fire_timer(&mut h, TimerKind::ShowDelay);
        send(&mut c, &mut h, Source::Trigger, EventKind::PointerLeave);
        send(&mut c, &mut h, Source::Panel, EventKind::PointerEnter);

        c.hide(&mut h);
        assert_eq!(c.state(), State::Hidden);
        assert_eq!(h.mounted.len(), 1);
        assert!(!c.hover.is_hovering());

        send(&mut c, &mut h, Source::Trigger, EventKind::PointerEnter);
        c.fire_timer(&mut h, TimerKind::ShowDelay);
        assert_eq!(c.state(), State::Visible);
        send(&mut c, &mut h, Source::Trigger, EventKind::PointerLeave);
        assert!(c.timers().is_armed(TimerKind::HideDelay));
    }

    #[test]
    fn quick_hover_pass_never_shows() {
        let mut h = host();
        let config = instant()
            .to_builder()
            .trigger(TriggerKind::Hover)
            .build()
            .unwrap();
        let mut c = controller(&mut h, config);
        send(&mut c, &mut h, Source::Trigger, EventKind::PointerEnter);
        send(&mut c, &mut h, Source::Trigger, EventKind::PointerLeave);
        assert!(c.timers().is_empty());
        assert!(h.emitted.is_empty());
    }

    #[test]
    fn hover_click_pins_until_clicked_again() {
        let mut h = host();
        let config = instant()
            .to_builder()
            .trigger(TriggerKind::HoverClick)
            .build()
            .unwrap();
        let mut c = controller(&mut h, config);
        send(&mut c, &mut h, Source::Trigger, EventKind::PointerEnter);
        send(&mut c, &mut h, Source::Trigger, EventKind::Click);
        assert_eq!(c.state(), State::Visible);
        assert!(c.is_pinned());

        send(&mut c, &mut h, Source::Trigger, EventKind::PointerLeave);
        assert!(c.timers().is_empty());
        assert_eq!(c.state(), State::Visible);

        send(&mut c, &mut h, Source::Trigger, EventKind::Click);
        assert_eq!(c.state(), State::Hidden);
        assert!(!c.is_pinned());
    }

    #[test]
    fn content_is_rendered_once_per_show() {
        let mut h = host();
        let mut c = controller(&mut h, instant());
        let mut shown = 0;
        c.set_content(
            &mut h,
            Content::Factory(Box::new(move |_: InstanceId| {
                shown += 1;
                format!("shown {shown}")
            })),
        );
        assert!(h.rendered.is_empty());
        c.show(&mut h);
        c.hide(&mut h);
        c.show(&mut h);
        let texts: Vec<_> = h.rendered.iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(texts, ["shown 1", "shown 2"]);
    }

    #[test]
    fn update_moves_the_panel_between_containers() {
        let mut h = host();
        let mut c = controller(&mut h, instant());
        c.show(&mut h);
        let config = instant()
            .to_builder()
            .mount(MountTarget::Container(3))
            .placement(Placement::Bottom)
            .build()
            .unwrap();
        c.update(&mut h, config);
        assert_eq!(h.mounted.len(), 1);
        assert_eq!(h.mounted[0].1, MountTarget::Container(3));
        assert_eq!(c.placement(), Some(Placement::Bottom));
        assert_eq!(h.global_listeners(), 3);
    }

    #[test]
    fn destroy_while_visible_emits_hide_and_releases_everything() {
        let mut h = host();
        let mut c = controller(&mut h, Config::builder().build().unwrap());
        c.show(&mut h);
        c.destroy(&mut h);
        assert_eq!(c.state(), State::Hidden);
        assert_eq!(h.live_listeners(), 0);
        assert!(h.mounted.is_empty());
        assert!(h.animations.is_empty());
        assert_eq!(h.emitted_kinds().last(), Some(&LifecycleKind::Hide));
    }
}
