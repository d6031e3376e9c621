// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! are printed in milliseconds.

use std::io::Write;

use segue_core::time::HostTime;
use segue_core::trace::{
    AnimationEndEvent, AnimationStartEvent, DeferredFrameEvent, EndReason, LayerUpdateEvent,
    ThumbnailFrameEvent, TickEvent, TickSummary, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    verbose: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::with_writer(Box::new(std::io::stderr()))
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self::with_writer(writer)
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    ///
    /// Tick and thumbnail frame lines are suppressed unless
    /// [`verbose`](Self::verbose) is set.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            verbose: false,
        }
    }

    /// Also prints per-tick and per-thumbnail-frame lines.
    #[must_use]
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn ms(t: HostTime) -> f64 {
    t.nanos() as f64 / 1_000_000.0
}

fn reason_name(reason: EndReason) -> &'static str {
    match reason {
        EndReason::Completed => "completed",
        EndReason::Frozen => "frozen",
        EndReason::Cleared => "cleared",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_tick(&mut self, e: &TickEvent) {
        if !self.verbose {
            return;
        }
        let frozen = if e.display_frozen { " FROZEN" } else { "" };
        let _ = writeln!(
            self.writer,
            "[tick] frame={} display={} now={:.3}ms{frozen}",
            e.frame_index,
            e.display.0,
            ms(e.now),
        );
    }

    fn on_animation_start(&mut self, e: &AnimationStartEvent) {
        let skipped = if e.skipped_first_frame {
            " (first frame skipped)"
        } else {
            ""
        };
        let _ = writeln!(
            self.writer,
            "[start] {:?} at {:.3}ms start={:.3}ms{skipped}",
            e.entity,
            ms(e.now),
            ms(e.start_time),
        );
    }

    fn on_deferred_frame(&mut self, e: &DeferredFrameEvent) {
        let _ = writeln!(
            self.writer,
            "[deferred] {:?} extra frame at {:.3}ms",
            e.entity,
            ms(e.now),
        );
    }

    fn on_thumbnail_frame(&mut self, e: &ThumbnailFrameEvent) {
        if !self.verbose {
            return;
        }
        let _ = writeln!(
            self.writer,
            "[thumbnail] {:?} pos=({:.1}, {:.1}) alpha={:.3} layer={}",
            e.entity, e.frame.x, e.frame.y, e.frame.alpha, e.frame.layer,
        );
    }

    fn on_animation_end(&mut self, e: &AnimationEndEvent) {
        let _ = writeln!(
            self.writer,
            "[end] {:?} at {:.3}ms {}",
            e.entity,
            ms(e.now),
            reason_name(e.reason),
        );
    }

    fn on_layer_update(&mut self, e: &LayerUpdateEvent) {
        let _ = match e.top_layer {
            Some(top) => writeln!(
                self.writer,
                "[layers] {:?} adjustment={} top={top}",
                e.entity, e.adjustment,
            ),
            None => writeln!(
                self.writer,
                "[layers] {:?} adjustment={} (no windows)",
                e.entity, e.adjustment,
            ),
        };
    }

    fn on_tick_summary(&mut self, s: &TickSummary) {
        let state = if s.still_animating { "animating" } else { "idle" };
        let _ = writeln!(
            self.writer,
            "[summary] frame={} display={} stepped={} {state}",
            s.frame_index, s.display.0, s.stepped,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use segue_core::display::DisplayId;
    use segue_core::tick::AnimationTick;

    #[test]
    fn tick_lines_need_verbose() {
        let tick = AnimationTick::new(HostTime(2_000_000), DisplayId(1), 4).frozen();

        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_tick(&TickEvent::from(&tick));
        assert!(sink.writer.is_empty());

        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new()).verbose();
        sink.on_tick(&TickEvent::from(&tick));
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(output, "[tick] frame=4 display=1 now=2.000ms FROZEN\n");
    }

    #[test]
    fn summary_line() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_tick_summary(&TickSummary {
            frame_index: 9,
            display: DisplayId::DEFAULT,
            stepped: 3,
            still_animating: true,
        });
        let output = String::from_utf8(sink.writer).unwrap();
        assert!(output.contains("[summary]"), "got: {output}");
        assert!(output.contains("stepped=3 animating"), "got: {output}");
    }
}
