// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display identification.
//!
//! [`DisplayId`] is a lightweight handle identifying a display. The host
//! assigns these; animation code passes them through without interpreting
//! the value.

use core::fmt;

/// Identifies a display.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DisplayId(pub u32);

impl DisplayId {
    /// The built-in display.
    pub const DEFAULT: Self = Self(0);
}

impl fmt::Debug for DisplayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DisplayId({})", self.0)
    }
}
