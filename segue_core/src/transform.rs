// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame visual transform: an alpha plus a 2-D affine matrix.
//!
//! The matrix is a [`kurbo::Affine`], whose coefficients
//! `[a, b, c, d, e, f]` map onto a compositor surface as
//! `dsdx = a`, `dtdx = b`, `dsdy = c`, `dtdy = d` and translation `(e, f)`.

use kurbo::Affine;

/// Alpha and affine matrix produced by evaluating an animation for one frame.
///
/// The cleared state is the identity matrix with alpha `1.0`. Composition
/// multiplies alphas and concatenates matrices; it is associative but not
/// commutative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transformation {
    alpha: f32,
    matrix: Affine,
}

impl Transformation {
    /// Identity matrix, fully opaque.
    pub const CLEAR: Self = Self {
        alpha: 1.0,
        matrix: Affine::IDENTITY,
    };

    /// Creates a transformation, clamping `alpha` into `[0, 1]`.
    #[must_use]
    pub fn new(alpha: f32, matrix: Affine) -> Self {
        Self {
            alpha: clamp_alpha(alpha),
            matrix,
        }
    }

    /// Creates an identity transformation with the given alpha.
    #[must_use]
    pub fn with_alpha(alpha: f32) -> Self {
        Self::new(alpha, Affine::IDENTITY)
    }

    /// Resets to [`Transformation::CLEAR`].
    #[inline]
    pub fn clear(&mut self) {
        *self = Self::CLEAR;
    }

    /// Returns the alpha in `[0, 1]`.
    #[inline]
    #[must_use]
    pub const fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Sets the alpha, clamped into `[0, 1]`.
    #[inline]
    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = clamp_alpha(alpha);
    }

    /// Returns the affine matrix.
    #[inline]
    #[must_use]
    pub const fn matrix(&self) -> Affine {
        self.matrix
    }

    /// Replaces the affine matrix.
    #[inline]
    pub fn set_matrix(&mut self, matrix: Affine) {
        self.matrix = matrix;
    }

    /// Composes `local` onto this transformation: `self = self * local`.
    pub fn compose(&mut self, local: &Self) {
        self.alpha *= local.alpha;
        self.matrix = self.matrix * local.matrix;
    }

    /// Composes this transformation onto `global`: `self = global * self`.
    pub fn post_compose(&mut self, global: &Self) {
        self.alpha *= global.alpha;
        self.matrix = global.matrix * self.matrix;
    }

    /// Applies a translation before the current matrix.
    pub fn pre_translate(&mut self, x: f64, y: f64) {
        self.matrix = self.matrix * Affine::translate((x, y));
    }

    /// Returns the translation component `(e, f)`.
    #[must_use]
    pub fn translation(&self) -> (f64, f64) {
        let c = self.matrix.as_coeffs();
        (c[4], c[5])
    }

    /// Returns the 2×2 linear part as `[dsdx, dtdx, dsdy, dtdy]`.
    #[must_use]
    pub fn linear(&self) -> [f64; 4] {
        let c = self.matrix.as_coeffs();
        [c[0], c[1], c[2], c[3]]
    }

    /// Is the matrix finite and the alpha a number?
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.alpha.is_finite() && self.matrix.is_finite()
    }
}

impl Default for Transformation {
    #[inline]
    fn default() -> Self {
        Self::CLEAR
    }
}

fn clamp_alpha(alpha: f32) -> f32 {
    if alpha.is_nan() {
        0.0
    } else {
        alpha.clamp(0.0, 1.0)
    }
}
