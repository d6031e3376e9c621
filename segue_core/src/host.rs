// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contracts for the collaborators an animation controller talks to.
//!
//! The controller never reaches for global state. Everything it consumes or
//! drives outside its own fields goes through one of these traits, passed
//! into each call:
//!
//! - [`SurfaceSink`] — one-way surface commands to the compositor.
//! - [`LayerHost`] — per-window animation layers plus the input-method and
//!   wallpaper layer adjustments.
//! - [`TransitionHost`] — scheduler callbacks and per-window hooks.
//! - [`RotationSource`] — the enter transformation of a running screen
//!   rotation animation.
//!
//! [`Host`] bundles all four and is blanket-implemented, so a window manager
//! implements the pieces and passes itself as `&mut dyn Host`.

use core::fmt;

use crate::display::DisplayId;
use crate::entity::{EntityId, WindowId};
use crate::transform::Transformation;

/// An opaque reference to a compositor surface owned by a controller (the
/// thumbnail overlay). The host allocates these.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u32);

impl fmt::Debug for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SurfaceId({})", self.0)
    }
}

/// A fire-and-forget mutation of a compositor surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SurfaceCommand {
    /// Make the surface visible.
    Show,
    /// Move the surface origin.
    Position {
        /// Horizontal position in pixels.
        x: f64,
        /// Vertical position in pixels.
        y: f64,
    },
    /// Set the surface alpha.
    Alpha(f32),
    /// Set the surface z-layer.
    Layer(i32),
    /// Set the 2×2 linear part of the surface transform.
    Matrix {
        /// X scale.
        dsdx: f64,
        /// Y skew.
        dtdx: f64,
        /// X skew.
        dsdy: f64,
        /// Y scale.
        dtdy: f64,
    },
    /// Release the surface. Must be idempotent on the host side.
    Destroy,
}

/// Receives surface commands. Nothing is returned to the controller.
pub trait SurfaceSink {
    /// Applies `command` to `surface`.
    fn apply(&mut self, surface: SurfaceId, command: SurfaceCommand);
}

/// Receives per-window animation layers.
pub trait LayerHost {
    /// Sets the animation layer of `window`.
    fn set_window_layer(&mut self, window: WindowId, layer: i32);

    /// The input-method target window, when its layer follows the target's
    /// animation (that is, the input method is not waiting on an animation
    /// of its own).
    fn input_method_target(&self) -> Option<WindowId> {
        None
    }

    /// Shifts the input-method windows by `adjustment` layers.
    fn set_input_method_adjustment(&mut self, adjustment: i32) {
        _ = adjustment;
    }

    /// The wallpaper target window, when there is no lower wallpaper target
    /// mid-transition.
    fn wallpaper_target(&self) -> Option<WindowId> {
        None
    }

    /// Shifts the wallpaper windows by `adjustment` layers.
    fn set_wallpaper_adjustment(&mut self, adjustment: i32) {
        _ = adjustment;
    }
}

/// Scheduler callbacks and per-window hooks.
pub trait TransitionHost {
    /// Geometry must be recomputed now that animation transforms are gone.
    fn request_layout_redo(&mut self, entity: EntityId, display: DisplayId);

    /// The entity's part of the app transition is finished.
    fn notify_transition_finished(&mut self, entity: EntityId);

    /// The entity owning the current input-method target window.
    fn input_method_owner(&self) -> Option<EntityId> {
        None
    }

    /// Re-evaluates where the input-method windows belong.
    fn move_input_method_windows(&mut self) {}

    /// Per-window cleanup once the owning entity's animation has ended.
    fn finish_exit(&mut self, window: WindowId) {
        _ = window;
    }

    /// Shows `window`, returning whether it is running its own animation.
    fn show_window(&mut self, window: WindowId) -> bool {
        _ = window;
        false
    }

    /// `window` now belongs to `owner` after an animation transfer.
    fn window_reassigned(&mut self, window: WindowId, owner: EntityId) {
        _ = (window, owner);
    }
}

/// Supplies the screen rotation animation, if one is running.
pub trait RotationSource {
    /// The enter transformation of the rotation animation active on
    /// `display`, or `None` when no rotation is animating.
    fn rotation_enter_transformation(&self, display: DisplayId) -> Option<Transformation> {
        _ = display;
        None
    }
}

/// Everything a controller needs from its surroundings.
pub trait Host: SurfaceSink + LayerHost + TransitionHost + RotationSource {}

impl<T: SurfaceSink + LayerHost + TransitionHost + RotationSource + ?Sized> Host for T {}
