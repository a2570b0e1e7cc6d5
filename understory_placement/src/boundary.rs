// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boundary derivation from the viewport or the nearest clipping ancestor.

use core::fmt;
use core::str::FromStr;

use alloc::string::{String, ToString};
use kurbo::Rect;

use crate::types::Boundary;

/// Where a panel's boundary comes from.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum BoundaryKind {
    /// The visible viewport, in document coordinates.
    #[default]
    Viewport,
    /// The nearest ancestor of the anchor whose overflow clips on some axis.
    ScrollAncestor,
}

impl BoundaryKind {
    /// The kebab-case name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Viewport => "viewport",
            Self::ScrollAncestor => "scroll-ancestor",
        }
    }
}

impl fmt::Display for BoundaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unknown boundary kind name.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown boundary kind `{0}`")]
pub struct ParseBoundaryKindError(pub String);

impl FromStr for BoundaryKind {
    type Err = ParseBoundaryKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "viewport" => Ok(Self::Viewport),
            "scroll-ancestor" => Ok(Self::ScrollAncestor),
            other => Err(ParseBoundaryKindError(other.to_string())),
        }
    }
}

bitflags::bitflags! {
    /// Axes on which an ancestor constrains overflow (anything but `visible`).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct OverflowFlags: u8 {
        /// Horizontal overflow is hidden, clipped, or scrolls.
        const CLIP_X = 0b0000_0001;
        /// Vertical overflow is hidden, clipped, or scrolls.
        const CLIP_Y = 0b0000_0010;
    }
}

/// One ancestor of the anchor, as seen by boundary derivation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClipAncestor {
    /// The ancestor's padding box in document coordinates.
    pub rect: Rect,
    /// Axes on which the ancestor constrains overflow.
    pub overflow: OverflowFlags,
}

impl Boundary {
    /// Derive the boundary for `kind`.
    ///
    /// `ancestors` is the anchor's ancestor chain, nearest first. For
    /// [`BoundaryKind::ScrollAncestor`] the first ancestor with any
    /// [`OverflowFlags`] set wins; with none, the viewport is used.
    ///
    /// ```
    /// use kurbo::Rect;
    /// use understory_placement::{Boundary, BoundaryKind, ClipAncestor, OverflowFlags};
    ///
    /// let viewport = Rect::new(0.0, 0.0, 1280.0, 720.0);
    /// let chain = [
    ///     ClipAncestor {
    ///         rect: Rect::new(0.0, 0.0, 300.0, 300.0),
    ///         overflow: OverflowFlags::empty(),
    ///     },
    ///     ClipAncestor {
    ///         rect: Rect::new(20.0, 40.0, 620.0, 440.0),
    ///         overflow: OverflowFlags::CLIP_Y,
    ///     },
    /// ];
    /// let b = Boundary::derive(BoundaryKind::ScrollAncestor, viewport, chain);
    /// assert_eq!(b, Boundary::new(40.0, 20.0, 620.0, 440.0));
    /// ```
    pub fn derive(
        kind: BoundaryKind,
        viewport: Rect,
        ancestors: impl IntoIterator<Item = ClipAncestor>,
    ) -> Self {
        match kind {
            BoundaryKind::Viewport => Self::from_rect(viewport),
            BoundaryKind::ScrollAncestor => ancestors
                .into_iter()
                .find(|a| !a.overflow.is_empty())
                .map_or_else(|| Self::from_rect(viewport), |a| Self::from_rect(a.rect)),
        }
    }
}
