// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation policy constants.

use crate::animation::ZOrder;
use crate::time::Duration;

/// Policy applied when animations are installed and surfaces layered.
///
/// Owned by the [`AnimationDriver`](crate::driver::AnimationDriver) and
/// threaded into every controller call; nothing reads it from a global.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationConfig {
    /// Upper bound for any installed animation, before time scaling.
    pub max_duration: Duration,
    /// Transition animation time-scale factor (developer setting).
    ///
    /// `0.0` makes every transition finish on its first frame.
    pub transition_scale: f32,
    /// Layer offset applied to an entity whose animation asks for
    /// [`ZOrder::Top`](crate::animation::ZOrder::Top) (negated for
    /// [`ZOrder::Bottom`](crate::animation::ZOrder::Bottom)).
    pub type_layer_offset: i32,
    /// Layer spacing between adjacent windows.
    pub window_layer_multiplier: i32,
    /// How far below the next window slot a thumbnail is placed.
    pub thumbnail_layer_offset: i32,
    /// Frame interval used when a tick does not carry one.
    pub frame_interval: Duration,
}

impl AnimationConfig {
    /// Defaults for a 60 Hz display.
    #[must_use]
    pub const fn hz60() -> Self {
        Self {
            max_duration: Duration::from_millis(10_000),
            transition_scale: 1.0,
            type_layer_offset: 1000,
            window_layer_multiplier: 5,
            thumbnail_layer_offset: 4,
            // ~16.7ms.
            frame_interval: Duration(16_666_667),
        }
    }

    /// Defaults for a 120 Hz display.
    #[must_use]
    pub const fn hz120() -> Self {
        Self {
            frame_interval: Duration(8_333_333),
            ..Self::hz60()
        }
    }

    /// Layer adjustment for a z-order hint.
    #[must_use]
    pub const fn layer_adjustment(&self, z_order: ZOrder) -> i32 {
        match z_order {
            ZOrder::Normal => 0,
            ZOrder::Top => self.type_layer_offset,
            ZOrder::Bottom => -self.type_layer_offset,
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::hz60()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn z_order_adjustments() {
        let config = AnimationConfig::default();
        assert_eq!(config.layer_adjustment(ZOrder::Normal), 0);
        assert_eq!(config.layer_adjustment(ZOrder::Top), 1000);
        assert_eq!(config.layer_adjustment(ZOrder::Bottom), -1000);
    }

    #[test]
    fn presets_differ_only_in_frame_interval() {
        let a = AnimationConfig::hz60();
        let b = AnimationConfig::hz120();
        assert!(b.frame_interval < a.frame_interval);
        assert_eq!(a.max_duration, b.max_duration);
        assert_eq!(a.type_layer_offset, b.type_layer_offset);
    }
}
