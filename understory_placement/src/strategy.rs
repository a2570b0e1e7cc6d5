// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement strategy: candidate search, flip, and clamp.
//!
//! ## Algorithm
//!
//! 1. Candidates are `[placement]` for a directional placement, or
//!    `top, right, bottom, left` (alignment taken from the automatic variant).
//! 2. Candidates are tried in that fixed order. Without overflow prevention the
//!    first one is taken as is. With it, the first candidate that fits wins; if
//!    none fits, the first candidate is kept. There is no scoring among
//!    candidates.
//! 3. With `flip`, a chosen candidate that still overflows is swapped for its
//!    opposite, but only if the opposite fits.
//! 4. With overflow prevention, `top` and `left` are clamped independently into
//!    the boundary. Clamping translates; it never resizes.

use alloc::vec;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

use crate::overflow::overflows;
use crate::resolve::resolve;
use crate::types::{Boundary, Placement, PlacementOptions, Resolved};

/// Ordered candidate placements for a requested placement.
///
/// Directional placements yield themselves; automatic ones yield the four
/// sides in [`Placement::AUTO_ORDER`] with their alignment.
pub fn candidates(placement: Placement) -> Vec<Placement> {
    if placement.is_auto() {
        Placement::AUTO_ORDER
            .into_iter()
            .map(|side| Placement::from_parts(side, placement.alignment()))
            .collect()
    } else {
        vec![placement]
    }
}

/// Resolve the final position of `panel` against `anchor` inside `boundary`.
///
/// ```
/// use kurbo::{Rect, Size};
/// use understory_placement::{Boundary, Placement, PlacementOptions, resolve_placement};
///
/// // The anchor hugs the top of the page, so `top` has no room and flips.
/// let anchor = Rect::new(500.0, 0.0, 600.0, 30.0);
/// let boundary = Boundary::new(0.0, 0.0, 1000.0, 600.0);
/// let options = PlacementOptions { placement: Placement::Top, ..Default::default() };
/// let resolved = resolve_placement(anchor, Size::new(200.0, 50.0), &options, &boundary);
/// assert_eq!(resolved.placement, Placement::Bottom);
/// ```
pub fn resolve_placement(
    anchor: Rect,
    panel: Size,
    options: &PlacementOptions,
    boundary: &Boundary,
) -> Resolved {
    let list = candidates(options.placement);
    let at = |p: Placement| resolve(anchor, panel, p, options.offset);

    let first = list[0];
    let mut chosen = Resolved {
        coords: at(first),
        placement: first,
    };
    if options.prevent_overflow
        && let Some(fit) = list
            .iter()
            .map(|&p| Resolved {
                coords: at(p),
                placement: p,
            })
            .find(|r| !overflows(r.coords, panel, boundary))
    {
        chosen = fit;
    }

    if options.flip && overflows(chosen.coords, panel, boundary) {
        let opposite = chosen.placement.opposite();
        let coords = at(opposite);
        if !overflows(coords, panel, boundary) {
            chosen = Resolved {
                coords,
                placement: opposite,
            };
        }
    }

    if options.prevent_overflow {
        chosen.coords = clamp(chosen.coords, panel, boundary);
    }
    chosen
}

/// Translate `coords` so the panel lies inside `boundary` where possible.
///
/// Each axis is clamped independently into `[lead, trail - extent]`. When the
/// panel is larger than the boundary on an axis the leading edge wins.
pub fn clamp(coords: Point, panel: Size, boundary: &Boundary) -> Point {
    Point::new(
        clamp_axis(coords.x, boundary.left, boundary.right - panel.width),
        clamp_axis(coords.y, boundary.top, boundary.bottom - panel.height),
    )
}

// `f64::clamp` panics on an inverted range, so apply `min` then `max`.
fn clamp_axis(v: f64, lo: f64, hi: f64) -> f64 {
    v.min(hi).max(lo)
}
