// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trigger kinds and the fixed event descriptors they map to.

use core::time::Duration;

use crate::events::EventKind;
use crate::tags::closed_tags;

closed_tags! {
    /// How an instance is activated from its trigger element.
    #[derive(Default)]
    pub enum TriggerKind: "trigger" {
        /// Show on pointer enter, hide on pointer leave, both delayed.
        #[default]
        Hover => "hover",
        /// A click toggles.
        Click => "click",
        /// Show on focus, hide on blur.
        Focus => "focus",
        /// Only programmatic show/hide.
        Manual => "manual",
        /// Show on context menu at the pointer; the native menu is suppressed.
        ContextMenu => "contextmenu",
        /// Hover shows; a click pins the panel open until the next click.
        HoverClick => "hover-click",
    }
}

/// Show and hide delays applied to trigger events.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Delay {
    /// Delay between a show event and the show.
    pub show: Duration,
    /// Delay between a hide event and the hide.
    pub hide: Duration,
}

/// The fixed wiring of a [`TriggerKind`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TriggerDescriptor {
    /// Trigger events that request a show.
    pub show_events: &'static [EventKind],
    /// Trigger events that request a hide.
    pub hide_events: &'static [EventKind],
    /// Delays for the above.
    pub delay: Delay,
    /// A click toggles instead of only showing.
    pub toggle: bool,
    /// A click pins the panel open against hide events.
    pub persist: bool,
    /// The show event's platform default must be prevented.
    pub prevent_default: bool,
}

const HOVER_DELAY: Delay = Delay {
    show: Duration::from_millis(100),
    hide: Duration::from_millis(100),
};

const NO_DELAY: Delay = Delay {
    show: Duration::ZERO,
    hide: Duration::ZERO,
};

impl TriggerKind {
    /// The wiring for this kind.
    pub const fn descriptor(self) -> TriggerDescriptor {
        match self {
            Self::Hover => TriggerDescriptor {
                show_events: &[EventKind::PointerEnter],
                hide_events: &[EventKind::PointerLeave],
                delay: HOVER_DELAY,
                toggle: false,
                persist: false,
                prevent_default: false,
            },
            Self::Click => TriggerDescriptor {
                show_events: &[EventKind::Click],
                hide_events: &[],
                delay: NO_DELAY,
                toggle: true,
                persist: false,
                prevent_default: false,
            },
            Self::Focus => TriggerDescriptor {
                show_events: &[EventKind::FocusIn],
                hide_events: &[EventKind::FocusOut],
                delay: NO_DELAY,
                toggle: false,
                persist: false,
                prevent_default: false,
            },
            Self::Manual => TriggerDescriptor {
                show_events: &[],
                hide_events: &[],
                delay: NO_DELAY,
                toggle: false,
                persist: false,
                prevent_default: false,
            },
            Self::ContextMenu => TriggerDescriptor {
                show_events: &[EventKind::ContextMenu],
                hide_events: &[],
                delay: NO_DELAY,
                toggle: false,
                persist: false,
                prevent_default: true,
            },
            Self::HoverClick => TriggerDescriptor {
                show_events: &[EventKind::PointerEnter, EventKind::Click],
                hide_events: &[EventKind::PointerLeave],
                delay: HOVER_DELAY,
                toggle: true,
                persist: true,
                prevent_default: false,
            },
        }
    }

    /// Whether pointer hover drives this kind (and panel hover can keep it open).
    pub const fn is_hover(self) -> bool {
        matches!(self, Self::Hover | Self::HoverClick)
    }
}

impl TriggerDescriptor {
    /// Every trigger event this descriptor reacts to, without duplicates.
    pub fn events(&self) -> impl Iterator<Item = EventKind> + '_ {
        self.show_events.iter().copied().chain(
            self.hide_events
                .iter()
                .copied()
                .filter(|k| !self.show_events.contains(k)),
        )
    }

    /// Whether `kind` requests a show.
    pub fn shows_on(&self, kind: EventKind) -> bool {
        self.show_events.contains(&kind)
    }

    /// Whether `kind` requests a hide.
    pub fn hides_on(&self, kind: EventKind) -> bool {
        self.hide_events.contains(&kind)
    }
}
