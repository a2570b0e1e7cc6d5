// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for placement: sides, alignments, named placements, and boundaries.

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

use kurbo::{Point, Rect};

/// The side of the anchor a panel sits on.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Side {
    /// Above the anchor.
    Top,
    /// To the right of the anchor.
    Right,
    /// Below the anchor.
    Bottom,
    /// To the left of the anchor.
    Left,
}

impl Side {
    /// The geometrically opposite side.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Whether the panel is stacked above or below the anchor.
    ///
    /// For vertical sides the cross axis is horizontal, and vice versa.
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Cross-axis alignment of a panel against its anchor.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Alignment {
    /// Align to the anchor's leading edge.
    Start,
    /// Center on the anchor.
    #[default]
    Center,
    /// Align to the anchor's trailing edge.
    End,
}

/// A named placement of a floating panel relative to its anchor.
///
/// This is a closed set: twelve directional placements (four sides, each
/// with start/center/end alignment) and three automatic variants that let
/// [`resolve_placement`](crate::resolve_placement) try sides in order.
///
/// Parsing uses the kebab-case names (`"top"`, `"right-start"`, `"auto-end"`)
/// and rejects anything else.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Placement {
    /// Above, centered.
    #[default]
    Top,
    /// Above, aligned to the anchor's left edge.
    TopStart,
    /// Above, aligned to the anchor's right edge.
    TopEnd,
    /// Right, centered.
    Right,
    /// Right, aligned to the anchor's top edge.
    RightStart,
    /// Right, aligned to the anchor's bottom edge.
    RightEnd,
    /// Below, centered.
    Bottom,
    /// Below, aligned to the anchor's left edge.
    BottomStart,
    /// Below, aligned to the anchor's right edge.
    BottomEnd,
    /// Left, centered.
    Left,
    /// Left, aligned to the anchor's top edge.
    LeftStart,
    /// Left, aligned to the anchor's bottom edge.
    LeftEnd,
    /// First fitting side in `top, right, bottom, left` order, centered.
    Auto,
    /// First fitting side, start-aligned.
    AutoStart,
    /// First fitting side, end-aligned.
    AutoEnd,
}

impl Placement {
    /// Every placement, directional ones first.
    pub const ALL: [Self; 15] = [
        Self::Top,
        Self::TopStart,
        Self::TopEnd,
        Self::Right,
        Self::RightStart,
        Self::RightEnd,
        Self::Bottom,
        Self::BottomStart,
        Self::BottomEnd,
        Self::Left,
        Self::LeftStart,
        Self::LeftEnd,
        Self::Auto,
        Self::AutoStart,
        Self::AutoEnd,
    ];

    /// Side order tried by the automatic placements.
    pub const AUTO_ORDER: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    /// Build the directional placement for `side` and `align`.
    pub const fn from_parts(side: Side, align: Alignment) -> Self {
        match (side, align) {
            (Side::Top, Alignment::Center) => Self::Top,
            (Side::Top, Alignment::Start) => Self::TopStart,
            (Side::Top, Alignment::End) => Self::TopEnd,
            (Side::Right, Alignment::Center) => Self::Right,
            (Side::Right, Alignment::Start) => Self::RightStart,
            (Side::Right, Alignment::End) => Self::RightEnd,
            (Side::Bottom, Alignment::Center) => Self::Bottom,
            (Side::Bottom, Alignment::Start) => Self::BottomStart,
            (Side::Bottom, Alignment::End) => Self::BottomEnd,
            (Side::Left, Alignment::Center) => Self::Left,
            (Side::Left, Alignment::Start) => Self::LeftStart,
            (Side::Left, Alignment::End) => Self::LeftEnd,
        }
    }

    /// The side, or `None` for the automatic variants.
    pub const fn side(self) -> Option<Side> {
        match self {
            Self::Top | Self::TopStart | Self::TopEnd => Some(Side::Top),
            Self::Right | Self::RightStart | Self::RightEnd => Some(Side::Right),
            Self::Bottom | Self::BottomStart | Self::BottomEnd => Some(Side::Bottom),
            Self::Left | Self::LeftStart | Self::LeftEnd => Some(Side::Left),
            Self::Auto | Self::AutoStart | Self::AutoEnd => None,
        }
    }

    /// Cross-axis alignment. Automatic variants carry one too.
    pub const fn alignment(self) -> Alignment {
        match self {
            Self::TopStart | Self::RightStart | Self::BottomStart | Self::LeftStart => {
                Alignment::Start
            }
            Self::AutoStart => Alignment::Start,
            Self::TopEnd | Self::RightEnd | Self::BottomEnd | Self::LeftEnd | Self::AutoEnd => {
                Alignment::End
            }
            Self::Top | Self::Right | Self::Bottom | Self::Left | Self::Auto => Alignment::Center,
        }
    }

    /// Returns true for `auto`, `auto-start`, and `auto-end`.
    pub const fn is_auto(self) -> bool {
        self.side().is_none()
    }

    /// The geometrically opposite placement, alignment preserved.
    ///
    /// Automatic placements have no opposite and are returned unchanged.
    pub const fn opposite(self) -> Self {
        match self.side() {
            Some(side) => Self::from_parts(side.opposite(), self.alignment()),
            None => self,
        }
    }

    /// The kebab-case name of this placement.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::TopStart => "top-start",
            Self::TopEnd => "top-end",
            Self::Right => "right",
            Self::RightStart => "right-start",
            Self::RightEnd => "right-end",
            Self::Bottom => "bottom",
            Self::BottomStart => "bottom-start",
            Self::BottomEnd => "bottom-end",
            Self::Left => "left",
            Self::LeftStart => "left-start",
            Self::LeftEnd => "left-end",
            Self::Auto => "auto",
            Self::AutoStart => "auto-start",
            Self::AutoEnd => "auto-end",
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a placement name is not one of the fifteen known names.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown placement `{0}`")]
pub struct ParsePlacementError(pub String);

impl FromStr for Placement {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ParsePlacementError(s.to_string()))
    }
}

/// A rectangle in document coordinates that a panel must stay inside.
///
/// Field-for-field this is a [`Rect`] (`left = x0`, `top = y0`, `right = x1`,
/// `bottom = y1`); the named fields keep call sites readable.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Boundary {
    /// Top edge.
    pub top: f64,
    /// Left edge.
    pub left: f64,
    /// Right edge.
    pub right: f64,
    /// Bottom edge.
    pub bottom: f64,
}

impl Boundary {
    /// Create a boundary from its four edges.
    pub const fn new(top: f64, left: f64, right: f64, bottom: f64) -> Self {
        Self {
            top,
            left,
            right,
            bottom,
        }
    }

    /// Convert from a Kurbo rectangle.
    pub fn from_rect(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::new(rect.y0, rect.x0, rect.x1, rect.y1)
    }

    /// Convert to a Kurbo rectangle.
    pub fn to_rect(self) -> Rect {
        Rect::new(self.left, self.top, self.right, self.bottom)
    }

    /// Horizontal extent.
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Vertical extent.
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

impl From<Rect> for Boundary {
    fn from(rect: Rect) -> Self {
        Self::from_rect(rect)
    }
}

/// The geometric part of a floating panel's configuration.
///
/// Consumed by [`resolve_placement`](crate::resolve_placement).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlacementOptions {
    /// Requested placement.
    pub placement: Placement,
    /// Gap between anchor and panel along the main axis, in pixels.
    pub offset: f64,
    /// Try the opposite side when the chosen candidate overflows.
    pub flip: bool,
    /// Reject overflowing candidates and clamp the final position into the boundary.
    pub prevent_overflow: bool,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            placement: Placement::Top,
            offset: 8.0,
            flip: true,
            prevent_overflow: true,
        }
    }
}

/// The final position of a panel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Resolved {
    /// Top-left corner of the panel in document coordinates (`x = left`, `y = top`).
    pub coords: Point,
    /// The directional placement that was chosen. Never an automatic variant.
    pub placement: Placement,
}

impl Resolved {
    /// Top edge of the panel.
    pub fn top(&self) -> f64 {
        self.coords.y
    }

    /// Left edge of the panel.
    pub fn left(&self) -> f64 {
        self.coords.x
    }
}
