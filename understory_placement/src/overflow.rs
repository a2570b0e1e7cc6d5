// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overflow detection: does a positioned panel leave its boundary?

use kurbo::{Point, Size};

use crate::types::Boundary;

bitflags::bitflags! {
    /// Boundary edges a positioned panel crosses.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct OverflowSides: u8 {
        /// Panel top is above the boundary top.
        const TOP    = 0b0000_0001;
        /// Panel right edge is past the boundary right.
        const RIGHT  = 0b0000_0010;
        /// Panel bottom is below the boundary bottom.
        const BOTTOM = 0b0000_0100;
        /// Panel left is before the boundary left.
        const LEFT   = 0b0000_1000;
    }
}

/// Report which boundary edges the panel at `coords` crosses.
///
/// Touching an edge exactly is not an overflow.
pub fn overflow_sides(coords: Point, panel: Size, boundary: &Boundary) -> OverflowSides {
    let mut sides = OverflowSides::empty();
    if coords.y < boundary.top {
        sides |= OverflowSides::TOP;
    }
    if coords.x < boundary.left {
        sides |= OverflowSides::LEFT;
    }
    if coords.y + panel.height > boundary.bottom {
        sides |= OverflowSides::BOTTOM;
    }
    if coords.x + panel.width > boundary.right {
        sides |= OverflowSides::RIGHT;
    }
    sides
}

/// Returns true if the panel at `coords` does not fit inside `boundary`.
///
/// This is a binary fit test; there is no partial scoring.
pub fn overflows(coords: Point, panel: Size, boundary: &Boundary) -> bool {
    !overflow_sides(coords, panel, boundary).is_empty()
}
