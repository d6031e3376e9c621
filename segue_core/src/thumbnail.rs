// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thumbnail overlay animated alongside an entity's transition.
//!
//! During cross-activity transitions a still snapshot of the outgoing
//! content is placed on its own surface above the entity's windows and
//! animated with a second [`Animation`]. The surface is owned exclusively
//! by one controller and destroyed with that controller's animation.
//!
//! # Deferred destruction
//!
//! When the thumbnail's teardown must line up with another surface's final
//! frame, [`Thumbnail::with_deferred_destruction`] keeps the primary
//! animation alive for exactly one synthetic frame past its natural end.
//! Both animations must then have the same duration.

use crate::animation::Animation;
use crate::config::AnimationConfig;
use crate::display::DisplayId;
use crate::host::{Host, SurfaceCommand, SurfaceId, SurfaceSink};
use crate::time::HostTime;
use crate::transform::Transformation;

/// Layer used as the top window layer when the entity owns no windows.
const NO_WINDOW_LAYER: i32 = -1;

/// Surface commands emitted for one thumbnail frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThumbnailFrame {
    /// Surface origin x.
    pub x: f64,
    /// Surface origin y.
    pub y: f64,
    /// Surface alpha.
    pub alpha: f32,
    /// Surface layer.
    pub layer: i32,
}

/// A thumbnail surface and its animation.
#[derive(Debug)]
pub struct Thumbnail {
    surface: SurfaceId,
    animation: Animation,
    transformation: Transformation,
    x: f64,
    y: f64,
    force_above_layer: Option<i32>,
    defer_destruction: bool,
    final_frame_consumed: bool,
}

impl Thumbnail {
    /// Creates a thumbnail drawn at `(x, y)` on `surface`.
    #[must_use]
    pub fn new(surface: SurfaceId, animation: Animation, x: f64, y: f64) -> Self {
        Self {
            surface,
            animation,
            transformation: Transformation::CLEAR,
            x,
            y,
            force_above_layer: None,
            defer_destruction: false,
            final_frame_consumed: false,
        }
    }

    /// Stacks the thumbnail directly above `layer` instead of above the
    /// entity's windows.
    ///
    /// Any value is honored, including zero and negative layers; there is
    /// no sentinel meaning "unset".
    #[must_use]
    pub fn with_force_above_layer(mut self, layer: i32) -> Self {
        self.force_above_layer = Some(layer);
        self
    }

    /// Defers destruction until one extra frame after the primary animation
    /// completes.
    #[must_use]
    pub fn with_deferred_destruction(mut self) -> Self {
        self.defer_destruction = true;
        self
    }

    /// The surface this thumbnail draws into.
    #[must_use]
    pub const fn surface(&self) -> SurfaceId {
        self.surface
    }

    /// The thumbnail's animation.
    #[must_use]
    pub const fn animation(&self) -> &Animation {
        &self.animation
    }

    /// The transformation emitted on the last stepped frame.
    #[must_use]
    pub const fn transformation(&self) -> &Transformation {
        &self.transformation
    }

    /// The thumbnail's position offset.
    #[must_use]
    pub const fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// The layer this thumbnail is forced above, if any.
    #[must_use]
    pub const fn force_above_layer(&self) -> Option<i32> {
        self.force_above_layer
    }

    /// Whether destruction is deferred by one frame.
    #[must_use]
    pub const fn defer_destruction(&self) -> bool {
        self.defer_destruction
    }

    /// Whether the deferred extra frame has already been produced.
    #[must_use]
    pub const fn final_frame_consumed(&self) -> bool {
        self.final_frame_consumed
    }

    /// Claims the deferred extra frame.
    ///
    /// Returns `true` exactly once, and only if destruction is deferred.
    pub(crate) fn consume_final_frame(&mut self) -> bool {
        if self.defer_destruction && !self.final_frame_consumed {
            self.final_frame_consumed = true;
            true
        } else {
            false
        }
    }

    /// Layer the thumbnail surface is placed at.
    ///
    /// Sits just below the slot of the window above the entity's topmost
    /// window, unless forced above a specific layer.
    #[must_use]
    pub fn layer(&self, top_window_layer: Option<i32>, config: &AnimationConfig) -> i32 {
        match self.force_above_layer {
            Some(layer) => layer.saturating_add(1),
            None => top_window_layer
                .unwrap_or(NO_WINDOW_LAYER)
                .saturating_add(config.window_layer_multiplier)
                .saturating_sub(config.thumbnail_layer_offset),
        }
    }

    /// Reveals the surface and aligns the thumbnail's clock with the
    /// primary animation.
    pub(crate) fn start<S: SurfaceSink + ?Sized>(&mut self, start: HostTime, sink: &mut S) {
        sink.apply(self.surface, SurfaceCommand::Show);
        self.animation.set_start_time(start);
    }

    /// Evaluates the thumbnail animation at `now` and pushes the result to
    /// its surface.
    pub(crate) fn step<H: Host + ?Sized>(
        &mut self,
        now: HostTime,
        display: DisplayId,
        top_window_layer: Option<i32>,
        config: &AnimationConfig,
        host: &mut H,
    ) -> ThumbnailFrame {
        // The thumbnail keeps its last frame once its own curve ends; only
        // the primary animation decides when it goes away.
        let _ = self.animation.evaluate(now, &mut self.transformation);
        self.transformation.pre_translate(self.x, self.y);

        if let Some(enter) = host.rotation_enter_transformation(display) {
            self.transformation.post_compose(&enter);
        }

        let (x, y) = self.transformation.translation();
        let [dsdx, dtdx, dsdy, dtdy] = self.transformation.linear();
        let alpha = self.transformation.alpha();
        let layer = self.layer(top_window_layer, config);

        host.apply(self.surface, SurfaceCommand::Position { x, y });
        host.apply(self.surface, SurfaceCommand::Alpha(alpha));
        host.apply(self.surface, SurfaceCommand::Layer(layer));
        host.apply(
            self.surface,
            SurfaceCommand::Matrix {
                dsdx,
                dtdx,
                dsdy,
                dtdy,
            },
        );

        ThumbnailFrame { x, y, alpha, layer }
    }

    /// Releases the surface.
    pub(crate) fn destroy<S: SurfaceSink + ?Sized>(self, sink: &mut S) {
        sink.apply(self.surface, SurfaceCommand::Destroy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AlphaCurve;
    use crate::time::Duration;

    fn thumb() -> Thumbnail {
        Thumbnail::new(
            SurfaceId(7),
            Animation::new(AlphaCurve::new(1.0, 0.0), Duration::from_millis(100)),
            10.0,
            20.0,
        )
    }

    #[test]
    fn layer_sits_above_top_window() {
        let config = AnimationConfig::default();
        assert_eq!(thumb().layer(Some(21_000), &config), 21_001);
        assert_eq!(thumb().layer(None, &config), 0);
    }

    #[test]
    fn forced_layer_wins() {
        let config = AnimationConfig::default();
        let t = thumb().with_force_above_layer(30_000);
        assert_eq!(t.layer(Some(21_000), &config), 30_001);

        let t = thumb().with_force_above_layer(0);
        assert_eq!(t.layer(Some(21_000), &config), 1);
        let t = thumb().with_force_above_layer(-10);
        assert_eq!(t.layer(Some(21_000), &config), -9);
    }

    #[test]
    fn final_frame_is_claimed_once() {
        let mut t = thumb();
        assert!(!t.consume_final_frame(), "not deferred");

        let mut t = thumb().with_deferred_destruction();
        assert!(t.consume_final_frame());
        assert!(t.final_frame_consumed());
        assert!(!t.consume_final_frame());
    }
}
