// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animated entity identity and the state the controller reads from it.

use core::fmt;

/// A handle to an entity registered with an
/// [`AnimationDriver`](crate::driver::AnimationDriver).
///
/// Contains both a slot index and a generation counter so that stale handles
/// can be detected after an entity is destroyed and the slot is reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId {
    /// Slot index into the driver's storage.
    pub(crate) idx: u32,
    /// Generation counter; must match the driver's generation for this slot.
    pub(crate) generation: u32,
}

impl EntityId {
    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({}@gen{})", self.idx, self.generation)
    }
}

/// An opaque reference to a window (a concrete drawable surface and its
/// per-surface animator). The host assigns these.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(pub u32);

impl fmt::Debug for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WindowId({})", self.0)
    }
}

/// A window currently owned by an entity, as of the last layout pass.
///
/// This is a cache entry, not an ownership edge: the layout pass rebuilds
/// the list through
/// [`AnimationDriver::set_windows`](crate::driver::AnimationDriver::set_windows).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WindowRef {
    /// The window.
    pub window: WindowId,
    /// The window's layer before any animation adjustment.
    pub base_layer: i32,
}

impl WindowRef {
    /// Creates a window reference.
    #[must_use]
    pub const fn new(window: WindowId, base_layer: i32) -> Self {
        Self { window, base_layer }
    }
}

/// Entity-level facts owned by the window bookkeeping layer.
///
/// The animation controller reads these and, in one case
/// ([`defer_clear_all_drawn`](Self::defer_clear_all_drawn)), writes back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct EntityState {
    /// The entity is currently visible.
    pub visible: bool,
    /// Every window of the entity has drawn at least once.
    pub all_drawn: bool,
    /// The entity's starting window has been displayed.
    pub starting_displayed: bool,
    /// The entity covers the whole display.
    pub fullscreen: bool,
    /// `all_drawn` should be reset once the current animation is cleared.
    pub defer_clear_all_drawn: bool,
    /// The entity is part of a transaction that has not been applied yet.
    pub in_pending_transaction: bool,
}

impl EntityState {
    /// A visible, fully drawn, fullscreen entity.
    #[must_use]
    pub const fn shown() -> Self {
        Self {
            visible: true,
            all_drawn: true,
            starting_displayed: false,
            fullscreen: true,
            defer_clear_all_drawn: false,
            in_pending_transaction: false,
        }
    }

    /// Returns whether a pending animation may start running.
    #[must_use]
    pub const fn ready_to_animate(&self) -> bool {
        self.all_drawn || self.starting_displayed
    }
}
