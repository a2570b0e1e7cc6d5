// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The single owner of every live instance.

use core::fmt;
use std::collections::HashMap;

use tracing::{debug, warn};
use understory_placement::Placement;
use web_time::Instant;

use crate::config::Config;
use crate::controller::{LifecycleController, State};
use crate::error::CreateError;
use crate::events::{DomEvent, ListenerId, Outcome};
use crate::host::{AnimationId, Content, Host, Placed};
use crate::timer::TimerKind;

/// Identifier for a floating instance.
///
/// A slot index plus a generation counter: destroying an instance frees its
/// slot, and reusing the slot bumps the generation, so a stale `InstanceId`
/// never aliases a newer instance. Check liveness with
/// [`InstanceRegistry::is_alive`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct InstanceId(pub(crate) u32, pub(crate) u32);

impl InstanceId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Generation of the slot this id was issued for.
    pub const fn generation(self) -> u32 {
        self.1
    }
}

/// Live instances keyed by trigger.
///
/// Every operation takes the host by `&mut`; the registry never stores it.
/// A trigger has at most one live instance: [`create`](Self::create) on a
/// registered trigger is rejected with [`CreateError::AlreadyRegistered`].
pub struct InstanceRegistry<H: Host> {
    slots: Vec<Option<LifecycleController<H>>>,
    generations: Vec<u32>,
    free_list: Vec<usize>,
    by_trigger: HashMap<H::Trigger, InstanceId>,
}

impl<H: Host> fmt::Debug for InstanceRegistry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let live = self.by_trigger.len();
        let free = self.free_list.len();
        f.debug_struct("InstanceRegistry")
            .field("slots", &self.slots.len())
            .field("live", &live)
            .field("free_list", &free)
            .finish_non_exhaustive()
    }
}

impl<H: Host> Default for InstanceRegistry<H> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            by_trigger: HashMap::new(),
        }
    }
}

impl<H: Host> InstanceRegistry<H> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new instance for `trigger` and install its trigger listeners.
    ///
    /// Fails if the trigger is not in the document or already has an instance.
    pub fn create<'a>(
        &'a mut self,
        host: &'a mut H,
        trigger: H::Trigger,
        config: Config<H::Mount>,
    ) -> Result<InstanceHandle<'a, H>, CreateError> {
        if let Some(&existing) = self.by_trigger.get(&trigger) {
            warn!(?trigger, instance = ?existing, "trigger already registered");
            return Err(CreateError::AlreadyRegistered(existing));
        }
        if host.anchor_rect(trigger).is_none() {
            warn!(?trigger, "trigger not found");
            return Err(CreateError::TriggerNotFound);
        }

        let id = self.allocate();
        let mut controller = LifecycleController::new(id, trigger, config);
        controller.install_trigger_listeners(host);
        self.slots[id.idx()] = Some(controller);
        self.by_trigger.insert(trigger, id);
        debug!(?trigger, instance = ?id, "created");
        Ok(InstanceHandle {
            registry: self,
            host,
            id,
        })
    }

    /// A handle for a live instance.
    pub fn handle<'a>(
        &'a mut self,
        host: &'a mut H,
        id: InstanceId,
    ) -> Option<InstanceHandle<'a, H>> {
        self.is_alive(id).then_some(InstanceHandle {
            registry: self,
            host,
            id,
        })
    }

    /// The instance registered for `trigger`.
    pub fn get(&self, trigger: H::Trigger) -> Option<InstanceId> {
        self.by_trigger.get(&trigger).copied()
    }

    /// Every live instance, in slot order.
    pub fn get_all(&self) -> impl Iterator<Item = InstanceId> + '_ {
        self.slots.iter().flatten().map(LifecycleController::id)
    }

    /// Read access to an instance.
    pub fn controller(&self, id: InstanceId) -> Option<&LifecycleController<H>> {
        self.slots
            .get(id.idx())
            .and_then(Option::as_ref)
            .filter(|c| c.id() == id)
    }

    /// State of a live instance.
    pub fn state(&self, id: InstanceId) -> Option<State> {
        self.controller(id).map(LifecycleController::state)
    }

    /// Returns true if `id` refers to a live instance.
    pub fn is_alive(&self, id: InstanceId) -> bool {
        self.controller(id).is_some()
    }

    /// Number of live instances.
    pub fn len(&self) -> usize {
        self.by_trigger.len()
    }

    /// Returns true if there are no live instances.
    pub fn is_empty(&self) -> bool {
        self.by_trigger.is_empty()
    }

    /// Destroy the instance registered for `trigger`. Returns false if there was none.
    pub fn destroy(&mut self, host: &mut H, trigger: H::Trigger) -> bool {
        match self.get(trigger) {
            Some(id) => self.remove(host, id),
            None => false,
        }
    }

    /// Destroy every instance.
    pub fn destroy_all(&mut self, host: &mut H) {
        for id in self.ids() {
            self.remove(host, id);
        }
    }

    /// Show every instance.
    pub fn show_all(&mut self, host: &mut H) {
        for id in self.ids() {
            if let Some(c) = self.controller_mut(id) {
                c.show(host);
            }
        }
    }

    /// Hide every instance.
    pub fn hide_all(&mut self, host: &mut H) {
        for id in self.ids() {
            if let Some(c) = self.controller_mut(id) {
                c.hide(host);
            }
        }
    }

    /// Deliver a platform event the host received on `listener`.
    ///
    /// Events for listeners that were already removed are ignored.
    pub fn handle_event(
        &mut self,
        host: &mut H,
        listener: ListenerId,
        event: &DomEvent,
    ) -> Outcome {
        let Some((controller, source)) = self
            .slots
            .iter_mut()
            .flatten()
            .find_map(|c| c.source_of(listener).map(|s| (c, s)))
        else {
            return Outcome::Continue;
        };
        controller.handle_event(host, source, event)
    }

    /// The host finished `animation`. Returns false if no instance was waiting for it.
    pub fn animation_finished(&mut self, host: &mut H, animation: AnimationId) -> bool {
        self.slots
            .iter_mut()
            .flatten()
            .find(|c| c.is_animating(animation))
            .is_some_and(|c| c.animation_finished(host, animation))
    }

    /// Earliest pending deadline across all instances.
    ///
    /// The host should call [`advance`](Self::advance) once this instant passes.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.slots
            .iter()
            .flatten()
            .filter_map(LifecycleController::next_deadline)
            .min()
    }

    /// Fire every timer due at [`Host::now`], earliest first.
    ///
    /// A timer that an earlier one cancelled or re-armed is skipped.
    pub fn advance(&mut self, host: &mut H) {
        let now = host.now();
        let mut due: Vec<(Instant, InstanceId, TimerKind)> = self
            .slots
            .iter()
            .flatten()
            .flat_map(|c| {
                let id = c.id();
                c.timers()
                    .due(now)
                    .into_iter()
                    .map(move |(deadline, kind)| (deadline, id, kind))
            })
            .collect();
        due.sort_by_key(|(deadline, _, _)| *deadline);

        for (deadline, id, kind) in due {
            let Some(c) = self.controller_mut(id) else {
                continue;
            };
            if c.timers().deadline(kind) == Some(deadline) {
                c.fire_timer(host, kind);
            }
        }
    }

    // --- internals ---

    fn ids(&self) -> Vec<InstanceId> {
        self.get_all().collect()
    }

    fn controller_mut(&mut self, id: InstanceId) -> Option<&mut LifecycleController<H>> {
        self.slots
            .get_mut(id.idx())
            .and_then(Option::as_mut)
            .filter(|c| c.id() == id)
    }

    fn allocate(&mut self) -> InstanceId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            (idx, generation)
        } else {
            self.slots.push(None);
            self.generations.push(1);
            (self.slots.len() - 1, 1)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "InstanceId uses 32-bit indices."
        )]
        InstanceId::new(idx as u32, generation)
    }

    fn remove(&mut self, host: &mut H, id: InstanceId) -> bool {
        let Some(mut controller) = self
            .slots
            .get_mut(id.idx())
            .filter(|s| s.as_ref().is_some_and(|c| c.id() == id))
            .and_then(Option::take)
        else {
            return false;
        };
        controller.destroy(host);
        self.by_trigger.remove(&controller.trigger());
        self.free_list.push(id.idx());
        true
    }
}

/// Mutable access to one live instance.
///
/// Borrows the registry and the host for as long as it lives.
pub struct InstanceHandle<'a, H: Host> {
    registry: &'a mut InstanceRegistry<H>,
    host: &'a mut H,
    id: InstanceId,
}

impl<H: Host> fmt::Debug for InstanceHandle<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceHandle")
            .field("id", &self.id)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl<H: Host> InstanceHandle<'_, H> {
    /// Instance identifier.
    pub fn id(&self) -> InstanceId {
        self.id
    }

    /// Current state.
    pub fn state(&self) -> State {
        self.registry.state(self.id).unwrap_or_default()
    }

    /// Placement chosen at the last layout pass.
    pub fn placement(&self) -> Option<Placement> {
        self.registry
            .controller(self.id)
            .and_then(LifecycleController::placement)
    }

    /// Result of the last layout pass.
    pub fn placed(&self) -> Option<Placed> {
        self.registry
            .controller(self.id)
            .and_then(|c| c.placed().copied())
    }

    /// Show the panel; no-op if already showing or visible.
    pub fn show(&mut self) {
        self.with(LifecycleController::show);
    }

    /// Hide the panel; no-op if already hiding or hidden.
    pub fn hide(&mut self) {
        self.with(LifecycleController::hide);
    }

    /// Show if hidden or hiding, hide otherwise.
    pub fn toggle(&mut self) {
        self.with(LifecycleController::toggle);
    }

    /// Re-resolve placement, for callers that know the anchor moved.
    pub fn reposition(&mut self) {
        self.with(LifecycleController::reposition);
    }

    /// Replace the configuration, rewiring listeners and re-placing as needed.
    pub fn update(&mut self, config: Config<H::Mount>) {
        self.with(|c, host| c.update(host, config));
    }

    /// Replace the content; rendered now if mounted, otherwise at the next show.
    pub fn set_content(&mut self, content: impl Into<Content<H::Node>>) {
        let content = content.into();
        self.with(|c, host| c.set_content(host, content));
    }

    /// Destroy the instance.
    pub fn destroy(self) {
        self.registry.remove(self.host, self.id);
    }

    fn with(&mut self, f: impl FnOnce(&mut LifecycleController<H>, &mut H)) {
        if let Some(c) = self.registry.controller_mut(self.id) {
            f(c, self.host);
        }
    }
}
