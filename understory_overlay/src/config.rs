// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-instance configuration.
//!
//! [`Config`] is immutable once built. Enum-valued fields are closed tagged
//! variants; string input goes through [`FromStr`](core::str::FromStr) and an
//! unknown tag is a [`ConfigError`], never a silent default.
//!
//! ```
//! use understory_overlay::{Animation, Config, TriggerKind};
//! use understory_placement::Placement;
//!
//! let config: Config = Config::builder()
//!     .placement_str("bottom-start")?
//!     .trigger(TriggerKind::Click)
//!     .animation(Animation::Scale)
//!     .offset(12.0)
//!     .build()?;
//! assert_eq!(config.placement(), Placement::BottomStart);
//!
//! assert!(Config::<()>::builder().placement_str("bottom-middle").is_err());
//! # Ok::<(), understory_overlay::ConfigError>(())
//! ```

use core::time::Duration;

use understory_placement::{BoundaryKind, Placement, PlacementOptions};

use crate::error::ConfigError;
use crate::tags::closed_tags;
use crate::trigger::TriggerKind;

closed_tags! {
    /// Visual variant. Opaque to the engine; forwarded to the host.
    #[derive(Default)]
    pub enum Style: "style" {
        /// Host default.
        #[default]
        Default => "default",
        /// Light surface.
        Light => "light",
        /// Dark surface.
        Dark => "dark",
        /// Brand color.
        Primary => "primary",
        /// Positive status.
        Success => "success",
        /// Cautionary status.
        Warning => "warning",
        /// Negative status.
        Danger => "danger",
        /// Neutral information.
        Info => "info",
    }
}

closed_tags! {
    /// Named enter/exit effect. The host owns keyframes, duration, and easing.
    #[derive(Default)]
    pub enum Animation: "animation" {
        /// No effect; transitions complete immediately.
        None => "none",
        /// Opacity.
        #[default]
        Fade => "fade",
        /// Scale from the anchor side.
        Scale => "scale",
        /// Slide away from the anchor.
        ShiftAway => "shift-away",
        /// Slide toward the anchor.
        ShiftToward => "shift-toward",
        /// Rotate in from the anchor side.
        Perspective => "perspective",
    }
}

closed_tags! {
    /// Width preset. Opaque to the engine; forwarded to the host.
    #[derive(Default)]
    pub enum SizeTag: "size" {
        /// Sized by content.
        #[default]
        Auto => "auto",
        /// Narrow.
        Small => "small",
        /// Medium.
        Medium => "medium",
        /// Wide.
        Large => "large",
    }
}

/// Container a panel is mounted under.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum MountTarget<M> {
    /// The document root.
    #[default]
    Root,
    /// A host-specific container.
    Container(M),
}

/// Mount target plus whether the panel stays attached while hidden.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Mount<M> {
    /// Where the panel goes.
    pub target: MountTarget<M>,
    /// Keep the panel attached (but invisible) after hide.
    pub persistent: bool,
}

/// Immutable settings for one floating instance.
///
/// `M` is the host's container reference type (see [`Host::Mount`](crate::Host::Mount)).
#[derive(Clone, Debug, PartialEq)]
pub struct Config<M = ()> {
    style: Style,
    placement: Placement,
    trigger: TriggerKind,
    animation: Animation,
    size: SizeTag,
    offset: f64,
    arrow: bool,
    interactive: bool,
    mount: Mount<M>,
    stack_order: i32,
    dismiss_on_outside_click: bool,
    dismiss_on_scroll: bool,
    auto_hide: bool,
    hide_delay: Duration,
    boundary: BoundaryKind,
    flip: bool,
    prevent_overflow: bool,
}

impl<M> Default for Config<M> {
    fn default() -> Self {
        Self {
            style: Style::Default,
            placement: Placement::Top,
            trigger: TriggerKind::Hover,
            animation: Animation::Fade,
            size: SizeTag::Auto,
            offset: 8.0,
            arrow: true,
            interactive: false,
            mount: Mount {
                target: MountTarget::Root,
                persistent: false,
            },
            stack_order: 9999,
            dismiss_on_outside_click: true,
            dismiss_on_scroll: false,
            auto_hide: false,
            hide_delay: Duration::from_millis(3000),
            boundary: BoundaryKind::Viewport,
            flip: true,
            prevent_overflow: true,
        }
    }
}

impl<M> Config<M> {
    /// Start from the defaults.
    pub fn builder() -> ConfigBuilder<M> {
        ConfigBuilder {
            config: Self::default(),
        }
    }

    /// Start a builder from this configuration, for [`update`](crate::InstanceHandle::update).
    pub fn to_builder(&self) -> ConfigBuilder<M>
    where
        M: Clone,
    {
        ConfigBuilder {
            config: self.clone(),
        }
    }

    /// Visual variant.
    pub fn style(&self) -> Style {
        self.style
    }

    /// Requested placement.
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Activation model.
    pub fn trigger(&self) -> TriggerKind {
        self.trigger
    }

    /// Enter/exit effect.
    pub fn animation(&self) -> Animation {
        self.animation
    }

    /// Width preset.
    pub fn size(&self) -> SizeTag {
        self.size
    }

    /// Gap to the anchor in pixels.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Whether an arrow is drawn and its offset computed.
    pub fn arrow(&self) -> bool {
        self.arrow
    }

    /// Whether hovering the panel keeps a hover-triggered instance open.
    pub fn interactive(&self) -> bool {
        self.interactive
    }

    /// Mount target.
    pub fn mount(&self) -> &Mount<M> {
        &self.mount
    }

    /// Stacking order applied to the panel.
    pub fn stack_order(&self) -> i32 {
        self.stack_order
    }

    /// Hide when the pointer goes down outside the panel and the trigger.
    pub fn dismiss_on_outside_click(&self) -> bool {
        self.dismiss_on_outside_click
    }

    /// Hide on scroll instead of following the anchor.
    pub fn dismiss_on_scroll(&self) -> bool {
        self.dismiss_on_scroll
    }

    /// The auto-hide delay, if auto-hide is on.
    pub fn auto_hide(&self) -> Option<Duration> {
        self.auto_hide.then_some(self.hide_delay)
    }

    /// Boundary source.
    pub fn boundary(&self) -> BoundaryKind {
        self.boundary
    }

    /// Whether the opposite side is tried on overflow.
    pub fn flip(&self) -> bool {
        self.flip
    }

    /// Whether overflowing candidates are rejected and the result clamped.
    pub fn prevent_overflow(&self) -> bool {
        self.prevent_overflow
    }

    /// The geometric subset consumed by the placement strategy.
    pub fn placement_options(&self) -> PlacementOptions {
        PlacementOptions {
            placement: self.placement,
            offset: self.offset,
            flip: self.flip,
            prevent_overflow: self.prevent_overflow,
        }
    }
}

/// Builder for [`Config`].
///
/// Typed setters cannot fail. The `*_str` setters parse tags and return
/// [`ConfigError::Unknown`] on anything outside the closed set.
#[derive(Clone, Debug)]
pub struct ConfigBuilder<M = ()> {
    config: Config<M>,
}

impl<M> Default for ConfigBuilder<M> {
    fn default() -> Self {
        Config::builder()
    }
}

impl<M> ConfigBuilder<M> {
    /// Set the visual variant.
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.config.style = style;
        self
    }

    /// Parse and set the visual variant.
    pub fn style_str(self, tag: &str) -> Result<Self, ConfigError> {
        Ok(self.style(tag.parse()?))
    }

    /// Set the placement.
    #[must_use]
    pub fn placement(mut self, placement: Placement) -> Self {
        self.config.placement = placement;
        self
    }

    /// Parse and set the placement.
    pub fn placement_str(self, tag: &str) -> Result<Self, ConfigError> {
        Ok(self.placement(tag.parse::<Placement>()?))
    }

    /// Set the trigger kind.
    #[must_use]
    pub fn trigger(mut self, trigger: TriggerKind) -> Self {
        self.config.trigger = trigger;
        self
    }

    /// Parse and set the trigger kind.
    pub fn trigger_str(self, tag: &str) -> Result<Self, ConfigError> {
        Ok(self.trigger(tag.parse()?))
    }

    /// Set the animation.
    #[must_use]
    pub fn animation(mut self, animation: Animation) -> Self {
        self.config.animation = animation;
        self
    }

    /// Parse and set the animation.
    pub fn animation_str(self, tag: &str) -> Result<Self, ConfigError> {
        Ok(self.animation(tag.parse()?))
    }

    /// Set the size preset.
    #[must_use]
    pub fn size(mut self, size: SizeTag) -> Self {
        self.config.size = size;
        self
    }

    /// Parse and set the size preset.
    pub fn size_str(self, tag: &str) -> Result<Self, ConfigError> {
        Ok(self.size(tag.parse()?))
    }

    /// Set the gap to the anchor. Validated by [`build`](Self::build).
    #[must_use]
    pub fn offset(mut self, px: f64) -> Self {
        self.config.offset = px;
        self
    }

    /// Enable or disable the arrow.
    #[must_use]
    pub fn arrow(mut self, arrow: bool) -> Self {
        self.config.arrow = arrow;
        self
    }

    /// Enable or disable panel hover keeping the instance open.
    #[must_use]
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.config.interactive = interactive;
        self
    }

    /// Set the mount target.
    #[must_use]
    pub fn mount(mut self, target: MountTarget<M>) -> Self {
        self.config.mount.target = target;
        self
    }

    /// Keep the panel attached while hidden.
    #[must_use]
    pub fn persistent_mount(mut self, persistent: bool) -> Self {
        self.config.mount.persistent = persistent;
        self
    }

    /// Set the stacking order.
    #[must_use]
    pub fn stack_order(mut self, z: i32) -> Self {
        self.config.stack_order = z;
        self
    }

    /// Hide on pointer-down outside the panel and trigger.
    #[must_use]
    pub fn dismiss_on_outside_click(mut self, dismiss: bool) -> Self {
        self.config.dismiss_on_outside_click = dismiss;
        self
    }

    /// Hide on scroll instead of following.
    #[must_use]
    pub fn dismiss_on_scroll(mut self, dismiss: bool) -> Self {
        self.config.dismiss_on_scroll = dismiss;
        self
    }

    /// Hide automatically `delay` after becoming visible.
    #[must_use]
    pub fn auto_hide(mut self, delay: Duration) -> Self {
        self.config.auto_hide = true;
        self.config.hide_delay = delay;
        self
    }

    /// Turn auto-hide off.
    #[must_use]
    pub fn no_auto_hide(mut self) -> Self {
        self.config.auto_hide = false;
        self
    }

    /// Set the boundary source.
    #[must_use]
    pub fn boundary(mut self, boundary: BoundaryKind) -> Self {
        self.config.boundary = boundary;
        self
    }

    /// Parse and set the boundary source.
    pub fn boundary_str(self, tag: &str) -> Result<Self, ConfigError> {
        Ok(self.boundary(tag.parse::<BoundaryKind>()?))
    }

    /// Enable or disable flipping.
    #[must_use]
    pub fn flip(mut self, flip: bool) -> Self {
        self.config.flip = flip;
        self
    }

    /// Enable or disable overflow prevention.
    #[must_use]
    pub fn prevent_overflow(mut self, prevent: bool) -> Self {
        self.config.prevent_overflow = prevent;
        self
    }

    /// Validate and freeze.
    pub fn build(self) -> Result<Config<M>, ConfigError> {
        let offset = self.config.offset;
        if !offset.is_finite() || offset < 0.0 || offset.fract() != 0.0 {
            return Err(ConfigError::InvalidOffset(offset));
        }
        Ok(self.config)
    }
}

#[cfg(feature = "serde")]
pub use raw::RawConfig;

#[cfg(feature = "serde")]
mod raw {
    use core::time::Duration;

    use serde::Deserialize;

    use super::{Config, ConfigBuilder};
    use crate::error::ConfigError;

    /// String-tagged configuration as it arrives from markup attributes or JSON.
    ///
    /// Missing fields take the [`Config`] defaults. Convert with
    /// [`TryFrom`]; every tag is validated exactly like the builder's `*_str` setters.
    #[derive(Clone, Debug, Deserialize)]
    #[serde(default, rename_all = "camelCase", deny_unknown_fields)]
    pub struct RawConfig {
        /// Visual variant tag.
        pub style: String,
        /// Placement tag.
        pub placement: String,
        /// Trigger tag.
        pub trigger: String,
        /// Animation tag.
        pub animation: String,
        /// Size tag.
        pub size: String,
        /// Offset in pixels.
        pub offset: f64,
        /// Draw an arrow.
        pub arrow: bool,
        /// Panel hover keeps the instance open.
        pub interactive: bool,
        /// Keep the panel attached while hidden.
        pub persistent_mount: bool,
        /// Stacking order.
        pub stack_order: i32,
        /// Hide on outside pointer-down.
        pub dismiss_on_outside_click: bool,
        /// Hide on scroll.
        pub dismiss_on_scroll: bool,
        /// Hide automatically after `hide_delay_ms`.
        pub auto_hide: bool,
        /// Auto-hide delay.
        pub hide_delay_ms: u64,
        /// Boundary tag.
        pub boundary: String,
        /// Flip on overflow.
        pub flip: bool,
        /// Prevent overflow.
        pub prevent_overflow: bool,
    }

    impl Default for RawConfig {
        fn default() -> Self {
            let d = Config::<()>::default();
            Self {
                style: d.style().as_str().to_owned(),
                placement: d.placement().as_str().to_owned(),
                trigger: d.trigger().as_str().to_owned(),
                animation: d.animation().as_str().to_owned(),
                size: d.size().as_str().to_owned(),
                offset: d.offset(),
                arrow: d.arrow(),
                interactive: d.interactive(),
                persistent_mount: d.mount().persistent,
                stack_order: d.stack_order(),
                dismiss_on_outside_click: d.dismiss_on_outside_click(),
                dismiss_on_scroll: d.dismiss_on_scroll(),
                auto_hide: false,
                hide_delay_ms: u64::try_from(d.hide_delay.as_millis()).unwrap_or(u64::MAX),
                boundary: d.boundary().as_str().to_owned(),
                flip: d.flip(),
                prevent_overflow: d.prevent_overflow(),
            }
        }
    }

    impl<M> TryFrom<RawConfig> for Config<M> {
        type Error = ConfigError;

        fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
            let mut b = ConfigBuilder::<M>::default()
                .style_str(&raw.style)?
                .placement_str(&raw.placement)?
                .trigger_str(&raw.trigger)?
                .animation_str(&raw.animation)?
                .size_str(&raw.size)?
                .boundary_str(&raw.boundary)?
                .offset(raw.offset)
                .arrow(raw.arrow)
                .interactive(raw.interactive)
                .persistent_mount(raw.persistent_mount)
                .stack_order(raw.stack_order)
                .dismiss_on_outside_click(raw.dismiss_on_outside_click)
                .dismiss_on_scroll(raw.dismiss_on_scroll)
                .flip(raw.flip)
                .prevent_overflow(raw.prevent_overflow);
            if raw.auto_hide {
                b = b.auto_hide(Duration::from_millis(raw.hide_delay_ms));
            }
            b.build()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let c: Config = Config::default();
        assert_eq!(c.placement(), Placement::Top);
        assert_eq!(c.trigger(), TriggerKind::Hover);
        assert_eq!(c.animation(), Animation::Fade);
        assert_eq!(c.offset(), 8.0);
        assert_eq!(c.stack_order(), 9999);
        assert_eq!(c.auto_hide(), None);
        assert_eq!(c.mount().target, MountTarget::Root);
        assert!(c.flip() && c.prevent_overflow());
        assert!(c.dismiss_on_outside_click());
        assert!(!c.dismiss_on_scroll() && !c.interactive());
    }

    #[test]
    fn unknown_tags_are_construction_errors() {
        let err = Config::<()>::builder().animation_str("wobble").unwrap_err();
        assert_eq!(
            err,
            ConfigError::Unknown {
                field: "animation",
                value: "wobble".into()
            }
        );
        assert_eq!(err.to_string(), "unknown animation `wobble`");

        assert!(matches!(
            Config::<()>::builder().placement_str("middle"),
            Err(ConfigError::Unknown {
                field: "placement",
                ..
            })
        ));
        assert!(matches!(
            Config::<()>::builder().boundary_str("window"),
            Err(ConfigError::Unknown {
                field: "boundary",
                ..
            })
        ));
        assert!(Config::<()>::builder().style_str("neon").is_err());
        assert!(Config::<()>::builder().size_str("xl").is_err());
        assert!(Config::<()>::builder().trigger_str("dblclick").is_err());
    }

    #[test]
    fn negative_or_nan_offset_is_rejected() {
        assert_eq!(
            Config::<()>::builder().offset(-1.0).build(),
            Err(ConfigError::InvalidOffset(-1.0))
        );
        assert!(Config::<()>::builder().offset(f64::NAN).build().is_err());
        assert_eq!(
            Config::<()>::builder().offset(8.5).build(),
            Err(ConfigError::InvalidOffset(8.5))
        );
        assert!(Config::<()>::builder().offset(0.0).build().is_ok());
    }

    #[test]
    fn auto_hide_carries_its_delay() {
        let c = Config::<()>::builder()
            .auto_hide(Duration::from_millis(1500))
            .build()
            .unwrap();
        assert_eq!(c.auto_hide(), Some(Duration::from_millis(1500)));
        let c = c.to_builder().no_auto_hide().build().unwrap();
        assert_eq!(c.auto_hide(), None);
    }

    #[test]
    fn placement_options_mirror_config() {
        let c = Config::<()>::builder()
            .placement(Placement::LeftEnd)
            .offset(4.0)
            .flip(false)
            .build()
            .unwrap();
        assert_eq!(
            c.placement_options(),
            PlacementOptions {
                placement: Placement::LeftEnd,
                offset: 4.0,
                flip: false,
                prevent_overflow: true,
            }
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn raw_config_validates_like_the_builder() {
        let raw: RawConfig = serde_json::from_str(
            r#"{ "placement": "auto-start", "trigger": "hover-click", "offset": 4,
                 "autoHide": true, "hideDelayMs": 250 }"#,
        )
        .unwrap();
        let c = Config::<()>::try_from(raw).unwrap();
        assert_eq!(c.placement(), Placement::AutoStart);
        assert_eq!(c.trigger(), TriggerKind::HoverClick);
        assert_eq!(c.auto_hide(), Some(Duration::from_millis(250)));

        let raw: RawConfig = serde_json::from_str(r#"{ "trigger": "hovering" }"#).unwrap();
        assert_eq!(
            Config::<()>::try_from(raw),
            Err(ConfigError::Unknown {
                field: "trigger",
                value: "hovering".into()
            })
        );
    }
}
