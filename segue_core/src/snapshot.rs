// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point-in-time copies of controller state for diagnostics.
//!
//! A [`ControllerSnapshot`] owns plain data only, so it can outlive the
//! driver transaction that produced it. [`Display`](fmt::Display) renders
//! the multi-line dump; `segue_debug::dump` renders JSON.

use alloc::vec::Vec;
use core::fmt;

use crate::animation::ZOrder;
use crate::entity::{EntityId, WindowRef};
use crate::host::SurfaceId;
use crate::time::{Duration, HostTime};
use crate::transform::Transformation;

/// The installed animation, as seen by the dump.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationSnapshot {
    /// A placeholder is reserving the slot.
    Placeholder,
    /// A real animation.
    Real {
        /// Start time, once started.
        start_time: Option<HostTime>,
        /// Effective duration after clamping and scaling.
        duration: Duration,
        /// Z-order hint.
        z_order: ZOrder,
        /// Background color, if any.
        background_color: Option<u32>,
    },
}

/// The thumbnail, as seen by the dump.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThumbnailSnapshot {
    /// Thumbnail surface.
    pub surface: SurfaceId,
    /// Position offset x.
    pub x: f64,
    /// Position offset y.
    pub y: f64,
    /// Layer the surface is placed at.
    pub layer: i32,
    /// Last emitted transformation.
    pub transformation: Transformation,
    /// Start time of the thumbnail animation.
    pub start_time: Option<HostTime>,
    /// Duration of the thumbnail animation.
    pub duration: Duration,
    /// Destruction is deferred by one frame.
    pub defer_destruction: bool,
    /// The deferred frame has been produced.
    pub final_frame_consumed: bool,
}

/// Every field of an [`AnimationController`](crate::controller::AnimationController).
#[derive(Clone, Debug, PartialEq)]
pub struct ControllerSnapshot {
    /// The entity.
    pub entity: EntityId,
    /// Running (or awaiting cleanup).
    pub animating: bool,
    /// Installed animation.
    pub animation: Option<AnimationSnapshot>,
    /// Current transformation, if valid.
    pub transformation: Option<Transformation>,
    /// Layer adjustment.
    pub layer_adjustment: i32,
    /// Highest owned window layer.
    pub top_window_layer: Option<i32>,
    /// Last seen all-drawn flag.
    pub all_drawn: bool,
    /// Next start skips the first frame.
    pub skip_first_frame: bool,
    /// Animation came from another entity.
    pub using_transferred_animation: bool,
    /// Entity is freezing the screen.
    pub freezing_screen: bool,
    /// How long the last screen freeze lasted.
    pub last_freeze_duration: Option<Duration>,
    /// Attached thumbnail.
    pub thumbnail: Option<ThumbnailSnapshot>,
    /// Owned windows.
    pub windows: Vec<WindowRef>,
}

struct Nanos(Option<HostTime>);

impl fmt::Display for Nanos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(t) => write!(f, "{}ns", t.nanos()),
            None => f.write_str("unstarted"),
        }
    }
}

struct Matrix<'a>(&'a Transformation);

impl fmt::Display for Matrix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0.linear();
        let (x, y) = self.0.translation();
        write!(
            f,
            "alpha={:.3} [{a:.3} {b:.3} {c:.3} {d:.3}] +({x:.1}, {y:.1})",
            self.0.alpha()
        )
    }
}

impl fmt::Display for ControllerSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:?}:", self.entity)?;

        match &self.animation {
            None => writeln!(f, "  animation: none animating={}", self.animating)?,
            Some(AnimationSnapshot::Placeholder) => {
                writeln!(f, "  animation: placeholder animating={}", self.animating)?;
            }
            Some(AnimationSnapshot::Real {
                start_time,
                duration,
                z_order,
                background_color,
            }) => {
                write!(
                    f,
                    "  animation: start={} duration={:.1}ms z_order={z_order:?}",
                    Nanos(*start_time),
                    duration.as_millis_f64()
                )?;
                if let Some(color) = background_color {
                    write!(f, " background=#{color:08x}")?;
                }
                writeln!(f, " animating={}", self.animating)?;
            }
        }

        match &self.transformation {
            Some(t) => writeln!(f, "  transformation: {}", Matrix(t))?,
            None => writeln!(f, "  transformation: none")?,
        }

        write!(f, "  layer_adjustment={}", self.layer_adjustment)?;
        if let Some(top) = self.top_window_layer {
            write!(f, " top_window_layer={top}")?;
        }
        writeln!(f)?;

        writeln!(
            f,
            "  all_drawn={} skip_first_frame={} using_transferred_animation={}",
            self.all_drawn, self.skip_first_frame, self.using_transferred_animation
        )?;

        if self.freezing_screen || self.last_freeze_duration.is_some() {
            write!(f, "  freezing_screen={}", self.freezing_screen)?;
            if let Some(d) = self.last_freeze_duration {
                write!(f, " last_freeze={:.1}ms", d.as_millis_f64())?;
            }
            writeln!(f)?;
        }

        if let Some(t) = &self.thumbnail {
            writeln!(
                f,
                "  thumbnail: {:?} at ({:.1}, {:.1}) layer={} start={} duration={:.1}ms",
                t.surface,
                t.x,
                t.y,
                t.layer,
                Nanos(t.start_time),
                t.duration.as_millis_f64()
            )?;
            writeln!(
                f,
                "    {} defer_destruction={} final_frame_consumed={}",
                Matrix(&t.transformation),
                t.defer_destruction,
                t.final_frame_consumed
            )?;
        }

        if !self.windows.is_empty() {
            f.write_str("  windows:")?;
            for w in &self.windows {
                write!(f, " {:?}@{}", w.window, w.base_layer)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
