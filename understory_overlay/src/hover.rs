// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover intent over an instance's two regions: trigger and panel.
//!
//! An interactive hover instance should stay open while the pointer is over
//! either region. [`HoverIntent`] tracks the union and reports a transition
//! only when it changes: entering the panel from the trigger is not a leave,
//! and leaving the panel for the trigger is not one either.
//!
//! ```
//! use understory_overlay::hover::{HoverIntent, HoverTransition, Region};
//!
//! let mut h = HoverIntent::new();
//! assert_eq!(h.enter(Region::Trigger), Some(HoverTransition::Entered));
//! assert_eq!(h.enter(Region::Panel), None);
//! assert_eq!(h.leave(Region::Trigger), None);
//! assert_eq!(h.leave(Region::Panel), Some(HoverTransition::Left));
//! ```

bitflags::bitflags! {
    /// Regions the pointer is currently over.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Regions: u8 {
        /// The trigger element.
        const TRIGGER = 0b0000_0001;
        /// The panel node.
        const PANEL   = 0b0000_0010;
    }
}

/// One hoverable region of an instance.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Region {
    /// The trigger element.
    Trigger,
    /// The panel node.
    Panel,
}

impl Region {
    const fn flag(self) -> Regions {
        match self {
            Self::Trigger => Regions::TRIGGER,
            Self::Panel => Regions::PANEL,
        }
    }
}

/// A change in whether the pointer is over the instance at all.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum HoverTransition {
    /// The pointer moved onto the instance from outside.
    Entered,
    /// The pointer left both regions.
    Left,
}

/// Union-of-regions hover tracker.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverIntent {
    inside: Regions,
}

impl HoverIntent {
    /// Pointer outside everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Regions currently hovered.
    pub fn regions(&self) -> Regions {
        self.inside
    }

    /// Whether any region is hovered.
    pub fn is_hovering(&self) -> bool {
        !self.inside.is_empty()
    }

    /// Record the pointer entering `region`.
    pub fn enter(&mut self, region: Region) -> Option<HoverTransition> {
        let was = self.is_hovering();
        self.inside |= region.flag();
        (!was).then_some(HoverTransition::Entered)
    }

    /// Record the pointer leaving `region`.
    pub fn leave(&mut self, region: Region) -> Option<HoverTransition> {
        let was = self.is_hovering();
        self.inside -= region.flag();
        (was && !self.is_hovering()).then_some(HoverTransition::Left)
    }

    /// Forget everything, reporting a leave if anything was hovered.
    pub fn clear(&mut self) -> Option<HoverTransition> {
        let was = self.is_hovering();
        self.inside = Regions::empty();
        was.then_some(HoverTransition::Left)
    }

    /// Forget one region without reporting (e.g. the panel was unmounted).
    pub fn forget(&mut self, region: Region) {
        self.inside -= region.flag();
    }
}
