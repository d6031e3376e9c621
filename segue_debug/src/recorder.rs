// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and appends every event to a
//! log of [`RecordedEvent`]s, in arrival order. The log can be replayed into
//! another sink or handed to [`chrome::export`](crate::chrome::export).

use segue_core::trace::{
    AnimationEndEvent, AnimationStartEvent, DeferredFrameEvent, LayerUpdateEvent,
    ThumbnailFrameEvent, TickEvent, TickSummary, TraceSink,
};

/// One recorded trace event.
#[derive(Clone, Copy, Debug)]
pub enum RecordedEvent {
    /// A [`TickEvent`].
    Tick(TickEvent),
    /// An [`AnimationStartEvent`].
    AnimationStart(AnimationStartEvent),
    /// A [`DeferredFrameEvent`].
    DeferredFrame(DeferredFrameEvent),
    /// A [`ThumbnailFrameEvent`].
    ThumbnailFrame(ThumbnailFrameEvent),
    /// An [`AnimationEndEvent`].
    AnimationEnd(AnimationEndEvent),
    /// A [`LayerUpdateEvent`].
    LayerUpdate(LayerUpdateEvent),
    /// A [`TickSummary`].
    TickSummary(TickSummary),
}

/// A [`TraceSink`] that keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Consumes the recorder and returns the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }

    /// Discards everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Feeds the recorded events, in order, to `sink`.
    pub fn replay(&self, sink: &mut dyn TraceSink) {
        for event in &self.events {
            match event {
                RecordedEvent::Tick(e) => sink.on_tick(e),
                RecordedEvent::AnimationStart(e) => sink.on_animation_start(e),
                RecordedEvent::DeferredFrame(e) => sink.on_deferred_frame(e),
                RecordedEvent::ThumbnailFrame(e) => sink.on_thumbnail_frame(e),
                RecordedEvent::AnimationEnd(e) => sink.on_animation_end(e),
                RecordedEvent::LayerUpdate(e) => sink.on_layer_update(e),
                RecordedEvent::TickSummary(s) => sink.on_tick_summary(s),
            }
        }
    }
}

impl TraceSink for RecorderSink {
    fn on_tick(&mut self, e: &TickEvent) {
        self.events.push(RecordedEvent::Tick(*e));
    }

    fn on_animation_start(&mut self, e: &AnimationStartEvent) {
        self.events.push(RecordedEvent::AnimationStart(*e));
    }

    fn on_deferred_frame(&mut self, e: &DeferredFrameEvent) {
        self.events.push(RecordedEvent::DeferredFrame(*e));
    }

    fn on_thumbnail_frame(&mut self, e: &ThumbnailFrameEvent) {
        self.events.push(RecordedEvent::ThumbnailFrame(*e));
    }

    fn on_animation_end(&mut self, e: &AnimationEndEvent) {
        self.events.push(RecordedEvent::AnimationEnd(*e));
    }

    fn on_layer_update(&mut self, e: &LayerUpdateEvent) {
        self.events.push(RecordedEvent::LayerUpdate(*e));
    }

    fn on_tick_summary(&mut self, s: &TickSummary) {
        self.events.push(RecordedEvent::TickSummary(*s));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use segue_core::animation::{AlphaCurve, Animation};
    use segue_core::display::DisplayId;
    use segue_core::driver::AnimationDriver;
    use segue_core::entity::EntityState;
    use segue_core::tick::AnimationTick;
    use segue_core::time::{Duration, HostTime};
    use segue_core::trace::{EndReason, Tracer};

    use crate::test_host::NullHost;

    fn record_short_fade() -> RecorderSink {
        let mut driver = AnimationDriver::default();
        let mut host = NullHost;
        let id = driver.create_entity(EntityState::shown());
        driver.set_animation(
            id,
            Animation::new(AlphaCurve::new(0.0, 1.0), Duration::from_millis(16)),
            (1, 1),
            false,
            &mut host,
        );

        let mut rec = RecorderSink::new();
        for frame in 0..2 {
            let tick = AnimationTick::new(
                HostTime(frame * 16_000_000),
                DisplayId::DEFAULT,
                frame,
            );
            let _ = driver.step(&tick, &mut host, &mut Tracer::new(&mut rec));
        }
        rec
    }

    #[test]
    fn records_in_arrival_order() {
        let rec = record_short_fade();
        let kinds: Vec<&str> = rec
            .events()
            .iter()
            .map(|e| match e {
                RecordedEvent::Tick(_) => "tick",
                RecordedEvent::AnimationStart(_) => "start",
                RecordedEvent::DeferredFrame(_) => "deferred",
                RecordedEvent::ThumbnailFrame(_) => "thumbnail",
                RecordedEvent::AnimationEnd(_) => "end",
                RecordedEvent::LayerUpdate(_) => "layers",
                RecordedEvent::TickSummary(_) => "summary",
            })
            .collect();
        assert_eq!(
            kinds,
            ["tick", "start", "summary", "tick", "end", "summary"]
        );
        let Some(RecordedEvent::AnimationEnd(end)) = rec.events().get(4) else {
            panic!("expected an end event");
        };
        assert_eq!(end.reason, EndReason::Completed);
    }

    #[test]
    fn replay_reproduces_the_log() {
        let rec = record_short_fade();
        let mut copy = RecorderSink::new();
        rec.replay(&mut copy);
        assert_eq!(copy.events().len(), rec.events().len());

        copy.clear();
        assert!(copy.into_events().is_empty());
    }
}
