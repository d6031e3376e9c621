// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, dumps, and Chrome trace export for segue
//! diagnostics.
//!
//! This crate provides [`TraceSink`](segue_core::trace::TraceSink)
//! implementations and state dumps for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`] — human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`] — in-memory event log with replay.
//! - [`chrome::export`] — writes Chrome Trace Event Format JSON from
//!   recorded events.
//! - [`dump`] — textual and JSON dumps of controller snapshots.

pub mod chrome;
pub mod dump;
pub mod pretty;
pub mod recorder;

#[cfg(test)]
mod test_host;
