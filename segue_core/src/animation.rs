// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-to-transformation animations.
//!
//! An [`Animation`] maps a host timestamp to a [`Transformation`] and reports
//! whether more frames remain. The mapping is split in two:
//!
//! - **Timing** — start time, duration, z-order hint and background color
//!   live on [`Animation`] itself. Progress is linear in `[0, 1]`.
//! - **Shape** — a [`Curve`] turns progress into a transformation. Easing is
//!   the caller's business: wrap a curve to remap progress if needed.
//!
//! Controllers hold an [`AnimationKind`], which distinguishes a real
//! animation from the placeholder that merely reserves a slot.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::time::{Duration, HostTime};
use crate::transform::Transformation;

/// Fully transparent ARGB color.
pub const TRANSPARENT: u32 = 0x0000_0000;

/// Where an animating entity should sit relative to its normal layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ZOrder {
    /// Keep the entity's normal layer.
    #[default]
    Normal,
    /// Raise the entity above other windows for the duration.
    Top,
    /// Lower the entity below other windows for the duration.
    Bottom,
}

/// Turns linear progress into a transformation.
pub trait Curve {
    /// Resolves size-relative parameters against the animated bounds.
    ///
    /// Called at most once, before the first frame, when the animation was
    /// not initialized by its creator.
    fn initialize(&mut self, width: u32, height: u32) {
        _ = (width, height);
    }

    /// Writes the transformation for `progress` (in `[0, 1]`) into `out`.
    ///
    /// `out` arrives cleared; implementations compose onto it.
    fn apply(&self, progress: f32, out: &mut Transformation);
}

/// A running or pending visual transition.
pub struct Animation {
    curve: Box<dyn Curve + Send>,
    start_time: Option<HostTime>,
    duration: Duration,
    z_order: ZOrder,
    background_color: Option<u32>,
    bounds: Option<(u32, u32)>,
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("start_time", &self.start_time)
            .field("duration", &self.duration)
            .field("z_order", &self.z_order)
            .field("background_color", &self.background_color)
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}

impl Animation {
    /// Creates an animation driving `curve` over `duration`.
    #[must_use]
    pub fn new(curve: impl Curve + Send + 'static, duration: Duration) -> Self {
        Self {
            curve: Box::new(curve),
            start_time: None,
            duration,
            z_order: ZOrder::Normal,
            background_color: None,
            bounds: None,
        }
    }

    /// Sets the z-order hint.
    #[must_use]
    pub fn with_z_order(mut self, z_order: ZOrder) -> Self {
        self.z_order = z_order;
        self
    }

    /// Sets the ARGB color drawn behind the entity while animating.
    #[must_use]
    pub fn with_background_color(mut self, color: u32) -> Self {
        self.background_color = Some(color);
        self
    }

    /// Initializes the animation for the given bounds up front.
    #[must_use]
    pub fn with_bounds(mut self, width: u32, height: u32) -> Self {
        self.initialize(width, height);
        self
    }

    /// Returns whether bounds have been resolved.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.bounds.is_some()
    }

    /// Resolves the curve against `width` × `height`.
    pub fn initialize(&mut self, width: u32, height: u32) {
        self.curve.initialize(width, height);
        self.bounds = Some((width, height));
    }

    /// Returns the resolved bounds, if any.
    #[must_use]
    pub const fn bounds(&self) -> Option<(u32, u32)> {
        self.bounds
    }

    /// Returns the start time, if the animation has been started.
    #[must_use]
    pub const fn start_time(&self) -> Option<HostTime> {
        self.start_time
    }

    /// Sets the time at which progress is zero.
    pub fn set_start_time(&mut self, start: HostTime) {
        self.start_time = Some(start);
    }

    /// Returns the duration.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Clamps the duration to at most `max`.
    pub fn restrict_duration(&mut self, max: Duration) {
        if self.duration > max {
            self.duration = max;
        }
    }

    /// Multiplies the duration by `scale`.
    pub fn scale_current_duration(&mut self, scale: f32) {
        self.duration = self.duration.mul_f32(scale);
    }

    /// Returns the z-order hint.
    #[must_use]
    pub const fn z_order(&self) -> ZOrder {
        self.z_order
    }

    /// Returns the background color, if any.
    #[must_use]
    pub const fn background_color(&self) -> Option<u32> {
        self.background_color
    }

    /// Overrides the background color.
    pub fn set_background_color(&mut self, color: u32) {
        self.background_color = Some(color);
    }

    /// Returns linear progress at `now`, starting the animation if needed.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "progress is clamped to [0, 1] before narrowing"
    )]
    fn progress(&mut self, now: HostTime) -> f32 {
        let start = *self.start_time.get_or_insert(now);
        if self.duration == Duration::ZERO {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(start);
        (elapsed.nanos() as f64 / self.duration.nanos() as f64).min(1.0) as f32
    }

    /// Evaluates the animation at `now` into `out`.
    ///
    /// Returns `true` while more frames remain. An animation that was never
    /// started starts at `now`. Timestamps must not decrease within a run.
    pub fn evaluate(&mut self, now: HostTime, out: &mut Transformation) -> bool {
        let progress = self.progress(now);
        out.clear();
        self.curve.apply(progress, out);
        progress < 1.0
    }
}

/// What a controller currently has installed.
#[derive(Debug)]
pub enum AnimationKind {
    /// A real transition, evaluated every tick once eligible.
    Real(Animation),
    /// A slot holder that never evaluates and never reports frames.
    ///
    /// Installed while other entities in the same transition are still
    /// getting ready; replaced by a real animation when it is time to run.
    Placeholder,
}

impl AnimationKind {
    /// Returns whether this is the placeholder.
    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }

    /// Returns the real animation, if any.
    #[must_use]
    pub const fn as_real(&self) -> Option<&Animation> {
        match self {
            Self::Real(animation) => Some(animation),
            Self::Placeholder => None,
        }
    }
}

fn lerp(from: f64, to: f64, t: f32) -> f64 {
    from + (to - from) * f64::from(t)
}

/// Linear alpha fade.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlphaCurve {
    /// Alpha at progress `0`.
    pub from: f32,
    /// Alpha at progress `1`.
    pub to: f32,
}

impl AlphaCurve {
    /// Creates a fade from `from` to `to`.
    #[must_use]
    pub const fn new(from: f32, to: f32) -> Self {
        Self { from, to }
    }
}

impl Curve for AlphaCurve {
    fn apply(&self, progress: f32, out: &mut Transformation) {
        let alpha = self.from + (self.to - self.from) * progress;
        out.set_alpha(out.alpha() * alpha);
    }
}

/// Linear translation, in pixels or as a fraction of the animated bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TranslateCurve {
    from: (f64, f64),
    to: (f64, f64),
    relative: bool,
}

impl TranslateCurve {
    /// Translates from `from` to `to` pixels.
    #[must_use]
    pub const fn new(from: (f64, f64), to: (f64, f64)) -> Self {
        Self {
            from,
            to,
            relative: false,
        }
    }

    /// Translates between fractions of the animated width and height.
    ///
    /// Resolved to pixels when the owning animation is initialized.
    #[must_use]
    pub const fn relative(from: (f64, f64), to: (f64, f64)) -> Self {
        Self {
            from,
            to,
            relative: true,
        }
    }
}

impl Curve for TranslateCurve {
    fn initialize(&mut self, width: u32, height: u32) {
        if self.relative {
            let (w, h) = (f64::from(width), f64::from(height));
            self.from = (self.from.0 * w, self.from.1 * h);
            self.to = (self.to.0 * w, self.to.1 * h);
            self.relative = false;
        }
    }

    fn apply(&self, progress: f32, out: &mut Transformation) {
        let x = lerp(self.from.0, self.to.0, progress);
        let y = lerp(self.from.1, self.to.1, progress);
        out.pre_translate(x, y);
    }
}

/// Linear uniform scale about a pivot point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleCurve {
    /// Scale at progress `0`.
    pub from: f64,
    /// Scale at progress `1`.
    pub to: f64,
    /// Fixed point of the scale, in pixels.
    pub pivot: (f64, f64),
}

impl Curve for ScaleCurve {
    fn apply(&self, progress: f32, out: &mut Transformation) {
        let s = lerp(self.from, self.to, progress);
        let (px, py) = self.pivot;
        let m = kurbo::Affine::translate((px, py))
            * kurbo::Affine::scale(s)
            * kurbo::Affine::translate((-px, -py));
        out.compose(&Transformation::new(1.0, m));
    }
}

/// Several curves applied in order onto the same transformation.
#[derive(Default)]
pub struct CurveSet {
    curves: Vec<Box<dyn Curve + Send>>,
}

impl fmt::Debug for CurveSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurveSet")
            .field("len", &self.curves.len())
            .finish_non_exhaustive()
    }
}

impl CurveSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a curve.
    #[must_use]
    pub fn with(mut self, curve: impl Curve + Send + 'static) -> Self {
        self.curves.push(Box::new(curve));
        self
    }
}

impl Curve for CurveSet {
    fn initialize(&mut self, width: u32, height: u32) {
        for curve in &mut self.curves {
            curve.initialize(width, height);
        }
    }

    fn apply(&self, progress: f32, out: &mut Transformation) {
        for curve in &self.curves {
            curve.apply(progress, out);
        }
    }
}
