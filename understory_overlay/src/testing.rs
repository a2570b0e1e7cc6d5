// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted in-memory host for unit tests.

use std::collections::{BTreeMap, HashMap, HashSet};

use core::time::Duration;

use kurbo::{Rect, Size};
use understory_placement::ClipAncestor;
use web_time::Instant;

use crate::config::{Animation, MountTarget, SizeTag, Style};
use crate::error::AnimationError;
use crate::events::{
    DomEvent, EventKind, LifecycleEvent, LifecycleKind, ListenTarget, ListenerId, Outcome, Veto,
};
use crate::host::{AnimationId, AnimationPhase, ContentRef, Host, Placed};
use crate::registry::{InstanceId, InstanceRegistry};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct PanelId(pub(crate) u64);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Target {
    Trigger(u32),
    Panel(PanelId),
    Document,
    Window,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum AnimationMode {
    /// Animations run until `finish_animations`.
    Deferred,
    /// Every animation is rejected.
    Fail,
}

#[derive(Debug)]
pub(crate) struct ScriptedHost {
    base: Instant,
    elapsed: Duration,
    next_id: u64,
    pub(crate) anchors: HashMap<u32, Rect>,
    pub(crate) viewport: Rect,
    pub(crate) ancestors: Vec<ClipAncestor>,
    pub(crate) panel_size: Size,
    pub(crate) created: Vec<PanelId>,
    pub(crate) mounted: Vec<(PanelId, MountTarget<u32>)>,
    pub(crate) invisible: HashSet<PanelId>,
    pub(crate) placements: Vec<(PanelId, Placed)>,
    pub(crate) rendered: Vec<(PanelId, String)>,
    pub(crate) listeners: BTreeMap<ListenerId, (Target, EventKind)>,
    pub(crate) animations: Vec<(AnimationId, PanelId, AnimationPhase)>,
    pub(crate) cancelled: Vec<AnimationId>,
    pub(crate) animation_mode: AnimationMode,
    pub(crate) emitted: Vec<(LifecycleKind, InstanceId)>,
    pub(crate) veto: HashSet<LifecycleKind>,
}

impl ScriptedHost {
    pub(crate) fn new() -> Self {
        Self {
            base: Instant::now(),
            elapsed: Duration::ZERO,
            next_id: 0,
            anchors: HashMap::new(),
            viewport: Rect::new(0.0, 0.0, 1000.0, 600.0),
            ancestors: Vec::new(),
            panel_size: Size::new(200.0, 50.0),
            created: Vec::new(),
            mounted: Vec::new(),
            invisible: HashSet::new(),
            placements: Vec::new(),
            rendered: Vec::new(),
            listeners: BTreeMap::new(),
            animations: Vec::new(),
            cancelled: Vec::new(),
            animation_mode: AnimationMode::Deferred,
            emitted: Vec::new(),
            veto: HashSet::new(),
        }
    }

    pub(crate) fn with_trigger(mut self, trigger: u32, rect: Rect) -> Self {
        self.anchors.insert(trigger, rect);
        self
    }

    pub(crate) fn advance_ms(&mut self, ms: u64) {
        self.elapsed += Duration::from_millis(ms);
    }

    pub(crate) fn live_listeners(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) fn listeners_on(&self, target: Target) -> usize {
        self.listeners.values().filter(|(t, _)| *t == target).count()
    }

    pub(crate) fn global_listeners(&self) -> usize {
        self.listeners_on(Target::Document) + self.listeners_on(Target::Window)
    }

    pub(crate) fn last_placed(&self) -> Option<Placed> {
        self.placements.last().map(|(_, p)| *p)
    }

    pub(crate) fn emitted_kinds(&self) -> Vec<LifecycleKind> {
        self.emitted.iter().map(|(k, _)| *k).collect()
    }

    fn fresh(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl Host for ScriptedHost {
    type Trigger = u32;
    type Panel = PanelId;
    type Mount = u32;
    type Node = String;

    fn now(&self) -> Instant {
        self.base + self.elapsed
    }

    fn anchor_rect(&self, trigger: u32) -> Option<Rect> {
        self.anchors.get(&trigger).copied()
    }

    fn viewport(&self) -> Rect {
        self.viewport
    }

    fn clip_ancestors(&self, _trigger: u32) -> Vec<ClipAncestor> {
        self.ancestors.clone()
    }

    fn create_panel(
        &mut self,
        _instance: InstanceId,
        _style: Style,
        _size: SizeTag,
        _arrow: bool,
    ) -> PanelId {
        let panel = PanelId(self.fresh());
        self.created.push(panel);
        panel
    }

    fn mount(&mut self, panel: &PanelId, target: &MountTarget<u32>) {
        assert!(
            !self.mounted.iter().any(|(p, _)| p == panel),
            "panel mounted twice"
        );
        self.mounted.push((*panel, target.clone()));
    }

    fn unmount(&mut self, panel: &PanelId) {
        self.mounted.retain(|(p, _)| p != panel);
        self.invisible.remove(panel);
        assert_eq!(
            self.listeners_on(Target::Panel(*panel)),
            0,
            "panel unmounted with listeners attached"
        );
    }

    fn set_visible(&mut self, panel: &PanelId, visible: bool) {
        if visible {
            self.invisible.remove(panel);
        } else {
            self.invisible.insert(*panel);
        }
    }

    fn measure(&mut self, _panel: &PanelId) -> Size {
        self.panel_size
    }

    fn render_content(&mut self, panel: &PanelId, content: ContentRef<'_, String>) {
        let text = match content {
            ContentRef::Empty => String::new(),
            ContentRef::Markup(m) => m.to_owned(),
            ContentRef::Node(n) => format!("<node {n}>"),
        };
        self.rendered.push((*panel, text));
    }

    fn place(&mut self, panel: &PanelId, placed: &Placed) {
        self.placements.push((*panel, *placed));
    }

    fn animate(
        &mut self,
        panel: &PanelId,
        animation: Animation,
        phase: AnimationPhase,
    ) -> Result<AnimationId, AnimationError> {
        match self.animation_mode {
            AnimationMode::Fail => Err(AnimationError::Unsupported(animation.as_str())),
            AnimationMode::Deferred => {
                let id = AnimationId(self.fresh());
                self.animations.push((id, *panel, phase));
                Ok(id)
            }
        }
    }

    fn cancel_animation(&mut self, animation: AnimationId) {
        self.animations.retain(|(id, _, _)| *id != animation);
        self.cancelled.push(animation);
    }

    fn listen(&mut self, target: ListenTarget<'_, u32, PanelId>, kind: EventKind) -> ListenerId {
        let target = match target {
            ListenTarget::Trigger(t) => Target::Trigger(t),
            ListenTarget::Panel(p) => Target::Panel(*p),
            ListenTarget::Document => Target::Document,
            ListenTarget::Window => Target::Window,
        };
        let id = ListenerId(self.fresh());
        self.listeners.insert(id, (target, kind));
        id
    }

    fn unlisten(&mut self, listener: ListenerId) {
        assert!(
            self.listeners.remove(&listener).is_some(),
            "listener removed twice"
        );
    }

    fn emit(&mut self, event: &LifecycleEvent<u32>) -> Veto {
        self.emitted.push((event.kind, event.instance));
        if self.veto.contains(&event.kind) {
            Veto::Prevent
        } else {
            Veto::Allow
        }
    }
}

/// Deliver `event` to every listener installed on `target` for its kind.
pub(crate) fn fire(
    registry: &mut InstanceRegistry<ScriptedHost>,
    host: &mut ScriptedHost,
    target: Target,
    event: DomEvent,
) -> Outcome {
    let ids: Vec<ListenerId> = host
        .listeners
        .iter()
        .filter(|(_, (t, k))| *t == target && *k == event.kind)
        .map(|(id, _)| *id)
        .collect();
    ids.into_iter().fold(Outcome::Continue, |acc, id| {
        acc.merge(registry.handle_event(host, id, &event))
    })
}

/// Complete every running animation, in start order.
pub(crate) fn finish_animations(
    registry: &mut InstanceRegistry<ScriptedHost>,
    host: &mut ScriptedHost,
) {
    let running: Vec<AnimationId> = host.animations.drain(..).map(|(id, _, _)| id).collect();
    for id in running {
        registry.animation_finished(host, id);
    }
}
