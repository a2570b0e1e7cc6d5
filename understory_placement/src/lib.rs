// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_placement --heading-base-level=0

//! Understory Placement: Kurbo-native geometry for anchored floating panels.
//!
//! Given an anchor rectangle and a panel size, this crate decides where the panel goes.
//! It is the pure part of a tooltip or popover engine: no DOM, no timers, no state.
//!
//! - [`resolve`]: the top-left corner for one named [`Placement`] and a pixel offset.
//! - [`overflows`] / [`overflow_sides`]: a binary fit test against a [`Boundary`].
//! - [`resolve_placement`]: candidate search, flip to the opposite side, and clamp.
//! - [`Boundary::derive`]: pick the viewport or the nearest clipping ancestor.
//! - [`arrow_offset`]: where an arrow goes so it points at the anchor.
//!
//! ## Coordinates
//!
//! Everything is in document space, i.e. including accumulated scroll, not
//! viewport-relative. Anchors are [`kurbo::Rect`] (`x0` = left, `y0` = top),
//! panel extents are [`kurbo::Size`], and results are [`kurbo::Point`]
//! (`x` = left, `y` = top).
//!
//! ## Determinism
//!
//! Candidates are always tried in a fixed order and the first acceptable one wins.
//! There is no distance scoring among fitting candidates, and identical inputs
//! always produce identical outputs.
//!
//! ## Minimal usage
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use understory_placement::{Boundary, Placement, PlacementOptions, resolve_placement};
//!
//! let boundary = Boundary::new(0.0, 0.0, 1000.0, 600.0);
//! let panel = Size::new(200.0, 50.0);
//!
//! // Near the bottom of the boundary: `bottom` would end at 668, so it flips.
//! let anchor = Rect::new(500.0, 580.0, 600.0, 610.0);
//! let options = PlacementOptions {
//!     placement: Placement::Bottom,
//!     offset: 8.0,
//!     flip: true,
//!     prevent_overflow: true,
//! };
//! let resolved = resolve_placement(anchor, panel, &options, &boundary);
//! assert_eq!(resolved.placement, Placement::Top);
//! assert_eq!(resolved.coords, Point::new(450.0, 522.0));
//! ```
//!
//! Placement names parse from their kebab-case form; unknown names are errors:
//!
//! ```
//! use understory_placement::Placement;
//!
//! assert_eq!("right-start".parse::<Placement>().unwrap(), Placement::RightStart);
//! assert!("diagonal".parse::<Placement>().is_err());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod arrow;
mod boundary;
mod overflow;
mod resolve;
mod strategy;
mod types;

pub use arrow::arrow_offset;
pub use boundary::{BoundaryKind, ClipAncestor, OverflowFlags, ParseBoundaryKindError};
pub use overflow::{OverflowSides, overflow_sides, overflows};
pub use resolve::resolve;
pub use strategy::{candidates, clamp, resolve_placement};
pub use types::{
    Alignment, Boundary, ParsePlacementError, Placement, PlacementOptions, Resolved, Side,
};
