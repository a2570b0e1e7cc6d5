// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inbound DOM events, outbound lifecycle signals, and per-instance listener bookkeeping.
//!
//! ## Inbound
//!
//! The engine asks the host to [`listen`](crate::Host::listen) on a
//! [`ListenTarget`] for an [`EventKind`] and gets back a [`ListenerId`]. When
//! the platform fires, the host hands that id and a [`DomEvent`] to
//! [`InstanceRegistry::handle_event`](crate::InstanceRegistry::handle_event),
//! which answers with an [`Outcome`].
//!
//! ## Outbound
//!
//! Every transition is announced through [`Host::emit`](crate::Host::emit) as
//! a [`LifecycleEvent`]. `before-show` and `before-hide` honour [`Veto::Prevent`].

use kurbo::Point;

use crate::registry::InstanceId;

/// Kinds of platform events the engine listens for.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EventKind {
    /// Pointer entered the target.
    PointerEnter,
    /// Pointer left the target.
    PointerLeave,
    /// Primary click on the target.
    Click,
    /// Target gained focus.
    FocusIn,
    /// Target lost focus.
    FocusOut,
    /// Secondary click / context menu request.
    ContextMenu,
    /// Pointer pressed anywhere (document-level, used for outside-click dismissal).
    PointerDown,
    /// Document or ancestor scrolled.
    Scroll,
    /// Window resized.
    Resize,
}

/// A platform event delivered to the engine.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DomEvent {
    /// What happened.
    pub kind: EventKind,
    /// Pointer position in document coordinates, for pointer events.
    pub point: Option<Point>,
}

impl DomEvent {
    /// An event without a position.
    pub const fn new(kind: EventKind) -> Self {
        Self { kind, point: None }
    }

    /// An event at `point`.
    pub const fn at(kind: EventKind, point: Point) -> Self {
        Self {
            kind,
            point: Some(point),
        }
    }
}

/// Where a listener is installed.
#[derive(Debug)]
pub enum ListenTarget<'a, T, P> {
    /// The trigger element.
    Trigger(T),
    /// The instance's own panel node.
    Panel(&'a P),
    /// The document (outside-click detection).
    Document,
    /// The window (scroll and resize).
    Window,
}

impl<T, P> ListenTarget<'_, T, P> {
    /// The target without its payload.
    pub fn source(&self) -> Source {
        match self {
            Self::Trigger(_) => Source::Trigger,
            Self::Panel(_) => Source::Panel,
            Self::Document => Source::Document,
            Self::Window => Source::Window,
        }
    }
}

/// Payload-free form of [`ListenTarget`], remembered per listener.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Source {
    /// The trigger element.
    Trigger,
    /// The panel node.
    Panel,
    /// The document.
    Document,
    /// The window.
    Window,
}

/// Host-assigned identifier of one installed listener.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Lifetime group of a listener.
///
/// - `Trigger`: installed at creation, removed at destroy.
/// - `Panel`: installed at mount, removed at unmount.
/// - `Global`: installed when leaving `hidden`, removed on every return to it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ListenerScope {
    /// Trigger element listeners.
    Trigger,
    /// Panel node listeners.
    Panel,
    /// Document and window listeners.
    Global,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Installed {
    id: ListenerId,
    scope: ListenerScope,
    source: Source,
}

/// Listeners one instance has installed, grouped by [`ListenerScope`].
///
/// Teardown goes through [`ListenerSet::drain`], so every exit path removes
/// exactly what was added.
#[derive(Clone, Debug, Default)]
pub struct ListenerSet {
    installed: Vec<Installed>,
}

impl ListenerSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a listener.
    pub fn add(&mut self, scope: ListenerScope, source: Source, id: ListenerId) {
        self.installed.push(Installed { id, scope, source });
    }

    /// Remove and return every listener in `scope`.
    pub fn drain(&mut self, scope: ListenerScope) -> Vec<ListenerId> {
        let mut out = Vec::new();
        self.installed.retain(|l| {
            if l.scope == scope {
                out.push(l.id);
                false
            } else {
                true
            }
        });
        out
    }

    /// Where `id` was installed, if it belongs to this set.
    pub fn source_of(&self, id: ListenerId) -> Option<Source> {
        self.installed.iter().find(|l| l.id == id).map(|l| l.source)
    }

    /// Number of listeners in `scope`.
    pub fn count(&self, scope: ListenerScope) -> usize {
        self.installed.iter().filter(|l| l.scope == scope).count()
    }

    /// Total number of listeners.
    pub fn len(&self) -> usize {
        self.installed.len()
    }

    /// Returns true if nothing is installed.
    pub fn is_empty(&self) -> bool {
        self.installed.is_empty()
    }
}

/// Lifecycle signal kinds.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum LifecycleKind {
    /// About to show; cancelable.
    BeforeShow,
    /// Enter animation finished; the panel is visible.
    Show,
    /// About to hide; cancelable.
    BeforeHide,
    /// Exit animation finished; the panel is hidden.
    Hide,
}

impl LifecycleKind {
    /// Whether a [`Veto::Prevent`] answer is honoured.
    pub const fn is_cancelable(self) -> bool {
        matches!(self, Self::BeforeShow | Self::BeforeHide)
    }

    /// The DOM-style event name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BeforeShow => "before-show",
            Self::Show => "show",
            Self::BeforeHide => "before-hide",
            Self::Hide => "hide",
        }
    }
}

/// A lifecycle signal, emitted on the trigger.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LifecycleEvent<T> {
    /// Which signal.
    pub kind: LifecycleKind,
    /// The instance it concerns.
    pub instance: InstanceId,
    /// The instance's trigger.
    pub trigger: T,
}

/// A handler's answer to a lifecycle signal.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Veto {
    /// Let the transition proceed.
    #[default]
    Allow,
    /// Abandon the transition (only for cancelable signals).
    Prevent,
}

/// What the host should do with the platform event it just delivered.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Outcome {
    /// Nothing further.
    #[default]
    Continue,
    /// Call the platform's `preventDefault` (e.g. suppress the native context menu).
    PreventDefault,
}

impl Outcome {
    /// Combine outcomes from several listeners; any prevention wins.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        if self == Self::PreventDefault || other == Self::PreventDefault {
            Self::PreventDefault
        } else {
            Self::Continue
        }
    }
}
