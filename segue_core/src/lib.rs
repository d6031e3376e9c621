// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-entity transition animation for window compositors.
//!
//! `segue_core` drives the visual transition (position, scale, alpha) of an
//! application's windows across a sequence of frames. Each animated entity
//! owns an [`AnimationController`](controller::AnimationController), which
//! may also animate a thumbnail overlay in lockstep and follows a concurrently
//! running screen rotation. It is `no_std` compatible (with `alloc`).
//!
//! # Architecture
//!
//! The crate is organized around a tick loop that turns display frame
//! callbacks into surface commands and layer updates:
//!
//! ```text
//!   Host frame callback
//!       │
//!       ▼
//!   AnimationTick ──► AnimationDriver::step() ──► AnimationController::step()
//!                              │                     │          │
//!                              │                     ▼          ▼
//!                              │              layers::recompute  Thumbnail::step
//!                              │                     │          │
//!                              ▼                     ▼          ▼
//!                      "still animating"      LayerHost    SurfaceSink
//!                     (schedule next tick)
//! ```
//!
//! **[`driver`]** — Generational slot store of controllers. Aggregates the
//! per-controller results of a tick into one "still animating" signal.
//!
//! **[`controller`]** — The transition state machine: installation,
//! placeholder reservation, first-frame start correction, deferred thumbnail
//! teardown, display-freeze cancellation, transfer between entities, and the
//! cleanup run on the tick after an animation ends.
//!
//! **[`animation`]** — [`Animation`](animation::Animation) timing plus the
//! [`Curve`](animation::Curve) trait that maps linear progress to a
//! [`Transformation`](transform::Transformation).
//!
//! **[`layers`]** — Applies an entity's layer adjustment to its windows.
//!
//! **[`thumbnail`]** — The thumbnail overlay and its layer scheme.
//!
//! **[`host`]** — Collaborator contracts. The controller never reaches for
//! global state; everything goes through these traits.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! tick instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! **[`snapshot`]** — Plain-data copies of controller state for dumps.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies and
//!   the lock-wrapped `SharedDriver`.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod animation;
pub mod config;
pub mod controller;
pub mod display;
pub mod driver;
pub mod entity;
pub mod host;
pub mod layers;
pub mod snapshot;
pub mod thumbnail;
pub mod tick;
pub mod time;
pub mod trace;
pub mod transform;

#[cfg(test)]
mod testing;
