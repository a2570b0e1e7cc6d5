// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Caller-visible failures: configuration and instance creation.
//!
//! Show, hide, and toggle never fail; a vetoed or impossible transition is a
//! logged no-op.

use crate::registry::InstanceId;

/// A configuration value was rejected.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A string tag is not one of the closed set for its field.
    #[error("unknown {field} `{value}`")]
    Unknown {
        /// Field name, e.g. `"placement"`.
        field: &'static str,
        /// The rejected input.
        value: String,
    },
    /// Offsets are whole pixels and never negative.
    #[error("offset must be a finite, non-negative pixel count, got {0}")]
    InvalidOffset(f64),
}

impl From<understory_placement::ParsePlacementError> for ConfigError {
    fn from(err: understory_placement::ParsePlacementError) -> Self {
        Self::Unknown {
            field: "placement",
            value: err.0,
        }
    }
}

impl From<understory_placement::ParseBoundaryKindError> for ConfigError {
    fn from(err: understory_placement::ParseBoundaryKindError) -> Self {
        Self::Unknown {
            field: "boundary",
            value: err.0,
        }
    }
}

/// [`InstanceRegistry::create`](crate::InstanceRegistry::create) refused to register a trigger.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CreateError {
    /// The host has no layout box for the trigger (detached or never inserted).
    #[error("trigger is not attached to the document")]
    TriggerNotFound,
    /// The trigger already has a live instance; destroy it first.
    #[error("trigger is already registered as {0:?}")]
    AlreadyRegistered(InstanceId),
}

/// The host could not run an animation; the engine completes the transition immediately.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AnimationError {
    /// The host does not implement this named animation.
    #[error("animation `{0}` is not supported by this host")]
    Unsupported(&'static str),
    /// The platform rejected the effect.
    #[error("animation failed: {0}")]
    Failed(String),
}
