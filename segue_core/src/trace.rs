// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for animation ticks.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! the driver and controllers call as transitions start, step, and end. All
//! method bodies default to no-ops, so implementing only the events you care
//! about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).

use crate::display::DisplayId;
use crate::entity::EntityId;
use crate::thumbnail::ThumbnailFrame;
use crate::tick::AnimationTick;
use crate::time::HostTime;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Why an entity's animation ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EndReason {
    /// The animation ran to completion this tick.
    Completed,
    /// The display was frozen and the animation was abandoned.
    Frozen,
    /// The animation had already been cleared or transferred away, or its
    /// entity was not ready when it was due to start.
    Cleared,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when the driver begins a tick.
#[derive(Clone, Copy, Debug)]
pub struct TickEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Which display this tick targets.
    pub display: DisplayId,
    /// Tick timestamp.
    pub now: HostTime,
    /// Whether the display was frozen.
    pub display_frozen: bool,
}

impl From<&AnimationTick> for TickEvent {
    fn from(tick: &AnimationTick) -> Self {
        Self {
            frame_index: tick.frame_index,
            display: tick.display,
            now: tick.now,
            display_frozen: tick.display_frozen,
        }
    }
}

/// Emitted when an entity's animation takes its first step.
#[derive(Clone, Copy, Debug)]
pub struct AnimationStartEvent {
    /// The animating entity.
    pub entity: EntityId,
    /// Tick timestamp.
    pub now: HostTime,
    /// Effective start time after first-frame correction.
    pub start_time: HostTime,
    /// Whether the first frame was skipped.
    pub skipped_first_frame: bool,
}

/// Emitted when an animation is extended by one synthetic frame so a
/// thumbnail can be torn down in lockstep.
#[derive(Clone, Copy, Debug)]
pub struct DeferredFrameEvent {
    /// The animating entity.
    pub entity: EntityId,
    /// Tick timestamp.
    pub now: HostTime,
}

/// Emitted after a thumbnail surface is updated.
#[derive(Clone, Copy, Debug)]
pub struct ThumbnailFrameEvent {
    /// The entity owning the thumbnail.
    pub entity: EntityId,
    /// Values pushed to the thumbnail surface.
    pub frame: ThumbnailFrame,
}

/// Emitted when an entity's animation is cleaned up.
#[derive(Clone, Copy, Debug)]
pub struct AnimationEndEvent {
    /// The entity.
    pub entity: EntityId,
    /// Tick timestamp.
    pub now: HostTime,
    /// Why the animation ended.
    pub reason: EndReason,
}

/// Emitted when an entity's windows are relayered during a tick.
#[derive(Clone, Copy, Debug)]
pub struct LayerUpdateEvent {
    /// The entity.
    pub entity: EntityId,
    /// New layer adjustment.
    pub adjustment: i32,
    /// Highest window layer after the update, if the entity owns windows.
    pub top_layer: Option<i32>,
}

/// Per-tick summary emitted by the driver.
#[derive(Clone, Copy, Debug)]
pub struct TickSummary {
    /// Frame counter.
    pub frame_index: u64,
    /// Which display.
    pub display: DisplayId,
    /// Number of controllers stepped.
    pub stepped: u32,
    /// Whether another tick is needed.
    pub still_animating: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the animation driver.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a tick begins.
    fn on_tick(&mut self, e: &TickEvent) {
        _ = e;
    }

    /// Called when an animation starts running.
    fn on_animation_start(&mut self, e: &AnimationStartEvent) {
        _ = e;
    }

    /// Called when an animation is extended by a deferred frame.
    fn on_deferred_frame(&mut self, e: &DeferredFrameEvent) {
        _ = e;
    }

    /// Called after a thumbnail frame is pushed.
    fn on_thumbnail_frame(&mut self, e: &ThumbnailFrameEvent) {
        _ = e;
    }

    /// Called when an animation is cleaned up.
    fn on_animation_end(&mut self, e: &AnimationEndEvent) {
        _ = e;
    }

    /// Called when an entity is relayered.
    fn on_layer_update(&mut self, e: &LayerUpdateEvent) {
        _ = e;
    }

    /// Called with the per-tick summary.
    fn on_tick_summary(&mut self, s: &TickSummary) {
        _ = s;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

macro_rules! dispatch {
    ($self:ident, $method:ident, $e:ident) => {{
        #[cfg(feature = "trace")]
        if let Some(s) = &mut $self.sink {
            s.$method($e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = $e;
        }
    }};
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`TickEvent`].
    #[inline]
    pub fn tick(&mut self, e: &TickEvent) {
        dispatch!(self, on_tick, e);
    }

    /// Emits an [`AnimationStartEvent`].
    #[inline]
    pub fn animation_start(&mut self, e: &AnimationStartEvent) {
        dispatch!(self, on_animation_start, e);
    }

    /// Emits a [`DeferredFrameEvent`].
    #[inline]
    pub fn deferred_frame(&mut self, e: &DeferredFrameEvent) {
        dispatch!(self, on_deferred_frame, e);
    }

    /// Emits a [`ThumbnailFrameEvent`].
    #[inline]
    pub fn thumbnail_frame(&mut self, e: &ThumbnailFrameEvent) {
        dispatch!(self, on_thumbnail_frame, e);
    }

    /// Emits an [`AnimationEndEvent`].
    #[inline]
    pub fn animation_end(&mut self, e: &AnimationEndEvent) {
        dispatch!(self, on_animation_end, e);
    }

    /// Emits a [`LayerUpdateEvent`].
    #[inline]
    pub fn layer_update(&mut self, e: &LayerUpdateEvent) {
        dispatch!(self, on_layer_update, e);
    }

    /// Emits a [`TickSummary`].
    #[inline]
    pub fn tick_summary(&mut self, s: &TickSummary) {
        dispatch!(self, on_tick_summary, s);
    }
}
