// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame ticks delivered to the animation driver.
//!
//! One [`AnimationTick`] is produced per display frame by the host's frame
//! callback. Every controller stepped during that tick sees the same
//! timestamp, display, and frozen flag.

use crate::config::AnimationConfig;
use crate::display::DisplayId;
use crate::time::{Duration, HostTime};

/// A frame opportunity for animations on one display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnimationTick {
    /// Host time the frame is being built for.
    pub now: HostTime,
    /// Which display this tick is for.
    pub display: DisplayId,
    /// Monotonically increasing frame counter.
    pub frame_index: u64,
    /// Display refresh interval, if the host knows it.
    pub refresh_interval: Option<Duration>,
    /// The display is frozen (e.g. mid-rotation or mid-configuration
    /// change) and must not show animations.
    pub display_frozen: bool,
}

impl AnimationTick {
    /// Creates a tick for an unfrozen display with an unknown refresh
    /// interval.
    #[must_use]
    pub const fn new(now: HostTime, display: DisplayId, frame_index: u64) -> Self {
        Self {
            now,
            display,
            frame_index,
            refresh_interval: None,
            display_frozen: false,
        }
    }

    /// Marks the display as frozen for this tick.
    #[must_use]
    pub const fn frozen(mut self) -> Self {
        self.display_frozen = true;
        self
    }

    /// Sets the refresh interval reported by the display.
    #[must_use]
    pub const fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = Some(interval);
        self
    }

    /// The frame interval to use for start-time correction.
    #[must_use]
    pub fn frame_interval(&self, config: &AnimationConfig) -> Duration {
        self.refresh_interval.unwrap_or(config.frame_interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_interval_falls_back_to_config() {
        let config = AnimationConfig::hz60();
        let tick = AnimationTick::new(HostTime(0), DisplayId::DEFAULT, 0);
        assert_eq!(tick.frame_interval(&config), config.frame_interval);

        let tick = tick.with_refresh_interval(Duration::from_millis(8));
        assert_eq!(tick.frame_interval(&config), Duration::from_millis(8));
    }

    #[test]
    fn frozen_builder() {
        let tick = AnimationTick::new(HostTime(0), DisplayId(1), 3).frozen();
        assert!(tick.display_frozen);
        assert_eq!(tick.display, DisplayId(1));
    }
}
