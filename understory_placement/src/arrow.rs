// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arrow offset along the panel edge facing the anchor.

use kurbo::{Point, Rect, Size};

use crate::types::{Placement, Side};

/// Offset of the arrow's leading edge from the panel's leading edge.
///
/// The arrow sits on the panel edge facing the anchor and points at the
/// anchor's center. The offset is measured along the cross axis (x for
/// top/bottom placements, y for left/right) and clamped to
/// `[padding, extent - padding - arrow_size]`; a panel too small for that
/// range gets `padding`.
///
/// `placement` should be the resolved, directional placement. An automatic
/// placement is treated as `top`.
///
/// ```
/// use kurbo::{Point, Rect, Size};
/// use understory_placement::{Placement, arrow_offset};
///
/// let anchor = Rect::new(500.0, 0.0, 600.0, 30.0);
/// // Panel centered under the anchor: the 10px arrow sits in the middle.
/// let coords = Point::new(450.0, 38.0);
/// let panel = Size::new(200.0, 50.0);
/// let x = arrow_offset(anchor, coords, panel, Placement::Bottom, 10.0, 4.0);
/// assert_eq!(x, 95.0);
/// ```
pub fn arrow_offset(
    anchor: Rect,
    coords: Point,
    panel: Size,
    placement: Placement,
    arrow_size: f64,
    padding: f64,
) -> f64 {
    let side = placement.side().unwrap_or(Side::Top);
    let (target, lead, extent) = if side.is_vertical() {
        (anchor.center().x, coords.x, panel.width)
    } else {
        (anchor.center().y, coords.y, panel.height)
    };
    let raw = target - lead - arrow_size / 2.0;
    raw.min(extent - padding - arrow_size).max(padding)
}
