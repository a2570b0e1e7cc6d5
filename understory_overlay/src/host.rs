// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host seam: everything the engine needs from a document.
//!
//! The engine never touches a DOM directly. A toolkit implements [`Host`] for
//! its document and passes it by `&mut` into every registry call, so the engine
//! stays single-threaded and free of shared mutable state.

use core::fmt;
use core::hash::Hash;

use kurbo::{Point, Rect, Size};
use understory_placement::{ClipAncestor, Placement};
use web_time::Instant;

use crate::config::{Animation, MountTarget, SizeTag, Style};
use crate::error::AnimationError;
use crate::events::{EventKind, LifecycleEvent, ListenTarget, ListenerId, Veto};
use crate::registry::InstanceId;

/// Host-assigned identifier of one running animation.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct AnimationId(pub u64);

/// Direction of an animation.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum AnimationPhase {
    /// Showing.
    Enter,
    /// Hiding.
    Exit,
}

/// Where a panel was put.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placed {
    /// Top-left corner in document coordinates.
    pub coords: Point,
    /// Resolved directional placement.
    pub placement: Placement,
    /// Measured panel size.
    pub size: Size,
    /// Stacking order.
    pub z: i32,
    /// Arrow offset along the facing edge, when the arrow is enabled.
    pub arrow: Option<f64>,
}

impl Placed {
    /// The panel's rectangle in document coordinates.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.coords, self.size)
    }
}

/// Panel content supplied by the caller.
pub enum Content<N> {
    /// Nothing; the host leaves the panel empty.
    Empty,
    /// Raw markup.
    Markup(String),
    /// A host node, rendered by reference.
    Node(N),
    /// Called once per show to produce markup.
    Factory(Box<dyn FnMut(InstanceId) -> String>),
}

impl<N> Default for Content<N> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<N: fmt::Debug> fmt::Debug for Content<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Markup(m) => f.debug_tuple("Markup").field(m).finish(),
            Self::Node(n) => f.debug_tuple("Node").field(n).finish(),
            Self::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

impl<N> From<&str> for Content<N> {
    fn from(markup: &str) -> Self {
        Self::Markup(markup.to_owned())
    }
}

impl<N> From<String> for Content<N> {
    fn from(markup: String) -> Self {
        Self::Markup(markup)
    }
}

/// Content as handed to [`Host::render_content`].
#[derive(Debug)]
pub enum ContentRef<'a, N> {
    /// Nothing.
    Empty,
    /// Markup, either supplied or produced by a factory.
    Markup(&'a str),
    /// A host node.
    Node(&'a N),
}

/// A document the engine can place panels in.
///
/// Method groups:
/// - clock and layout reads: [`now`](Host::now), [`anchor_rect`](Host::anchor_rect),
///   [`viewport`](Host::viewport), [`clip_ancestors`](Host::clip_ancestors),
///   [`measure`](Host::measure);
/// - panel ownership: [`create_panel`](Host::create_panel), [`mount`](Host::mount),
///   [`unmount`](Host::unmount), [`set_visible`](Host::set_visible),
///   [`render_content`](Host::render_content), [`place`](Host::place);
/// - effects: [`animate`](Host::animate), [`cancel_animation`](Host::cancel_animation);
/// - events: [`listen`](Host::listen), [`unlisten`](Host::unlisten), [`emit`](Host::emit).
///
/// All rectangles are in document coordinates.
pub trait Host {
    /// Trigger identity. Instances are keyed by it; the engine never owns the element.
    type Trigger: Copy + Eq + Hash + fmt::Debug;
    /// A panel node. Owned by exactly one instance while it exists.
    type Panel: fmt::Debug;
    /// Container reference for [`MountTarget::Container`].
    type Mount: Clone + PartialEq + fmt::Debug;
    /// Node type accepted as [`Content::Node`].
    type Node;

    /// Monotonic clock used for delays, auto-hide, and debouncing.
    fn now(&self) -> Instant;

    /// Layout box of the trigger, or `None` if it is not in the document.
    fn anchor_rect(&self, trigger: Self::Trigger) -> Option<Rect>;

    /// The visible viewport.
    fn viewport(&self) -> Rect;

    /// The trigger's ancestors, nearest first, for scroll-ancestor boundaries.
    fn clip_ancestors(&self, trigger: Self::Trigger) -> Vec<ClipAncestor> {
        let _ = trigger;
        Vec::new()
    }

    /// Create a detached panel node for `instance`.
    fn create_panel(
        &mut self,
        instance: InstanceId,
        style: Style,
        size: SizeTag,
        arrow: bool,
    ) -> Self::Panel;

    /// Attach `panel` under `target`.
    fn mount(&mut self, panel: &Self::Panel, target: &MountTarget<Self::Mount>);

    /// Detach `panel`.
    fn unmount(&mut self, panel: &Self::Panel);

    /// Show or hide an attached panel without detaching it.
    fn set_visible(&mut self, panel: &Self::Panel, visible: bool);

    /// Force layout and return the panel's size.
    fn measure(&mut self, panel: &Self::Panel) -> Size;

    /// Replace the panel's content.
    fn render_content(&mut self, panel: &Self::Panel, content: ContentRef<'_, Self::Node>);

    /// Apply position and stacking order.
    fn place(&mut self, panel: &Self::Panel, placed: &Placed);

    /// Size of the arrow along the facing edge, in pixels.
    fn arrow_size(&self) -> f64 {
        8.0
    }

    /// Start an animation. Completion is reported through
    /// [`InstanceRegistry::animation_finished`](crate::InstanceRegistry::animation_finished).
    /// An error makes the engine complete the transition immediately.
    fn animate(
        &mut self,
        panel: &Self::Panel,
        animation: Animation,
        phase: AnimationPhase,
    ) -> Result<AnimationId, AnimationError>;

    /// Stop an animation; its completion must not be reported afterwards (if
    /// it is, the engine ignores it).
    fn cancel_animation(&mut self, animation: AnimationId);

    /// Install a listener.
    fn listen(
        &mut self,
        target: ListenTarget<'_, Self::Trigger, Self::Panel>,
        kind: EventKind,
    ) -> ListenerId;

    /// Remove a listener.
    fn unlisten(&mut self, listener: ListenerId);

    /// Dispatch a lifecycle signal on the trigger and collect the handlers' answer.
    fn emit(&mut self, event: &LifecycleEvent<Self::Trigger>) -> Veto;
}
