// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Position resolution: where a panel's top-left corner goes for one placement.

use kurbo::{Point, Rect, Size};

use crate::types::{Alignment, Placement, Side};

/// Compute the top-left corner of `panel` placed against `anchor`.
///
/// The anchor edge named by the placement's side is pushed `offset` pixels
/// away from the anchor, and the cross axis is aligned:
///
/// - start: the anchor's leading edge,
/// - center: anchor center minus half the panel extent,
/// - end: the anchor's trailing edge minus the panel extent.
///
/// Automatic placements resolve as their first candidate (top, with the
/// variant's alignment); use [`resolve_placement`](crate::resolve_placement)
/// to actually search.
///
/// ```
/// use kurbo::{Point, Rect, Size};
/// use understory_placement::{Placement, resolve};
///
/// let anchor = Rect::new(500.0, 0.0, 600.0, 30.0);
/// let at = resolve(anchor, Size::new(200.0, 50.0), Placement::Bottom, 8.0);
/// assert_eq!(at, Point::new(450.0, 38.0));
/// ```
pub fn resolve(anchor: Rect, panel: Size, placement: Placement, offset: f64) -> Point {
    let side = placement.side().unwrap_or(Side::Top);
    let align = placement.alignment();
    match side {
        Side::Top => Point::new(
            cross(anchor.x0, anchor.x1, panel.width, align),
            anchor.y0 - offset - panel.height,
        ),
        Side::Bottom => Point::new(
            cross(anchor.x0, anchor.x1, panel.width, align),
            anchor.y1 + offset,
        ),
        Side::Left => Point::new(
            anchor.x0 - offset - panel.width,
            cross(anchor.y0, anchor.y1, panel.height, align),
        ),
        Side::Right => Point::new(
            anchor.x1 + offset,
            cross(anchor.y0, anchor.y1, panel.height, align),
        ),
    }
}

fn cross(lead: f64, trail: f64, extent: f64, align: Alignment) -> f64 {
    match align {
        Alignment::Start => lead,
        Alignment::Center => lead + (trail - lead) / 2.0 - extent / 2.0,
        Alignment::End => trail - extent,
    }
}
