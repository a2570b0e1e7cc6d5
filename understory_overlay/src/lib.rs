// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_overlay --heading-base-level=0

//! Understory Overlay: lifecycle and trigger wiring for anchored floating panels.
//!
//! ## Overview
//!
//! Tooltips, popovers, and context menus share one engine: a panel attached to a
//! trigger, shown and hidden through a small state machine, and kept in place by
//! [`understory_placement`] as the page scrolls or resizes.
//!
//! - [`InstanceRegistry`] owns every live instance, keyed by trigger.
//! - [`LifecycleController`] drives one instance through
//!   `hidden → showing → visible → hiding → hidden`.
//! - [`Config`] is the validated, immutable per-instance configuration.
//! - [`Host`] is the seam to the document: layout reads, panel nodes, listeners,
//!   animations, and lifecycle signals.
//!
//! ## Host model
//!
//! The engine holds no reference to the document. Each call takes the host by
//! `&mut`, and the host feeds platform activity back in:
//!
//! - events on installed listeners through [`InstanceRegistry::handle_event`];
//! - animation completion through [`InstanceRegistry::animation_finished`];
//! - timers through [`InstanceRegistry::next_deadline`] and [`InstanceRegistry::advance`].
//!
//! Lifecycle signals go out through [`Host::emit`]; `before-show` and
//! `before-hide` can answer [`Veto::Prevent`], which abandons the transition
//! with no side effects.
//!
//! ## Listener hygiene
//!
//! Every listener an instance installs is recorded in a per-instance
//! [`ListenerSet`] and removed through one teardown routine. Document and window
//! listeners exist only while the instance is not hidden, so repeated
//! create/show/hide/destroy cycles leave nothing behind.
//!
//! ## Minimal usage
//!
//! ```
//! use kurbo::{Rect, Size};
//! use understory_overlay::{
//!     Animation, AnimationError, AnimationId, AnimationPhase, Config, ContentRef, EventKind, Host,
//!     InstanceId, InstanceRegistry, LifecycleEvent, ListenTarget, ListenerId, MountTarget, Placed,
//!     SizeTag, State, Style, TriggerKind, Veto,
//! };
//! use understory_placement::Placement;
//! use web_time::Instant;
//!
//! #[derive(Default)]
//! struct Page {
//!     next: u64,
//! }
//!
//! impl Host for Page {
//!     type Trigger = u32;
//!     type Panel = u64;
//!     type Mount = ();
//!     type Node = ();
//!
//!     fn now(&self) -> Instant { Instant::now() }
//!     fn anchor_rect(&self, _: u32) -> Option<Rect> { Some(Rect::new(500.0, 0.0, 600.0, 30.0)) }
//!     fn viewport(&self) -> Rect { Rect::new(0.0, 0.0, 1000.0, 600.0) }
//!     fn create_panel(&mut self, _: InstanceId, _: Style, _: SizeTag, _: bool) -> u64 {
//!         self.next += 1;
//!         self.next
//!     }
//!     fn mount(&mut self, _: &u64, _: &MountTarget<()>) {}
//!     fn unmount(&mut self, _: &u64) {}
//!     fn set_visible(&mut self, _: &u64, _: bool) {}
//!     fn measure(&mut self, _: &u64) -> Size { Size::new(200.0, 50.0) }
//!     fn render_content(&mut self, _: &u64, _: ContentRef<'_, ()>) {}
//!     fn place(&mut self, _: &u64, _: &Placed) {}
//!     fn animate(
//!         &mut self,
//!         _: &u64,
//!         a: Animation,
//!         _: AnimationPhase,
//!     ) -> Result<AnimationId, AnimationError> {
//!         Err(AnimationError::Unsupported(a.as_str()))
//!     }
//!     fn cancel_animation(&mut self, _: AnimationId) {}
//!     fn listen(&mut self, _: ListenTarget<'_, u32, u64>, _: EventKind) -> ListenerId {
//!         self.next += 1;
//!         ListenerId(self.next)
//!     }
//!     fn unlisten(&mut self, _: ListenerId) {}
//!     fn emit(&mut self, _: &LifecycleEvent<u32>) -> Veto { Veto::Allow }
//! }
//!
//! let mut page = Page::default();
//! let mut registry = InstanceRegistry::new();
//! let config = Config::builder().trigger(TriggerKind::Click).build()?;
//!
//! let mut tooltip = registry.create(&mut page, 1, config).unwrap();
//! tooltip.set_content("Saved");
//! tooltip.show();
//! // No room above the trigger, so the panel flips below it.
//! assert_eq!(tooltip.placement(), Some(Placement::Bottom));
//! assert_eq!(tooltip.state(), State::Visible);
//! tooltip.destroy();
//! assert!(registry.is_empty());
//! # Ok::<(), understory_overlay::ConfigError>(())
//! ```

mod config;
mod controller;
mod error;
mod events;
mod host;
pub mod hover;
mod registry;
mod tags;
mod timer;
mod trigger;

#[cfg(test)]
mod testing;

#[cfg(feature = "serde")]
pub use config::RawConfig;
pub use config::{Animation, Config, ConfigBuilder, Mount, MountTarget, SizeTag, Style};
pub use controller::{LifecycleController, State};
pub use error::{AnimationError, ConfigError, CreateError};
pub use events::{
    DomEvent, EventKind, LifecycleEvent, LifecycleKind, ListenTarget, ListenerId, ListenerScope,
    ListenerSet, Outcome, Source, Veto,
};
pub use host::{AnimationId, AnimationPhase, Content, ContentRef, Host, Placed};
pub use registry::{InstanceHandle, InstanceId, InstanceRegistry};
pub use timer::{RESIZE_DEBOUNCE, TimerKind, Timers};
pub use trigger::{Delay, TriggerDescriptor, TriggerKind};
