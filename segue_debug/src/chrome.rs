// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads events recorded by a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//! Each entity gets its own track (`tid`), and each animation becomes a
//! begin/end span on it.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use segue_core::entity::EntityId;
use segue_core::time::HostTime;
use segue_core::trace::EndReason;

use crate::recorder::RecordedEvent;

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
///
/// Events that carry no timestamp of their own (thumbnail frames, layer
/// updates, tick summaries) are placed at the time of the preceding tick.
pub fn export(events: &[RecordedEvent], writer: &mut dyn Write) -> io::Result<()> {
    let mut out: Vec<Value> = Vec::new();
    let mut now = 0.0;
    let mut display = 0;

    for recorded in events {
        match recorded {
            RecordedEvent::Tick(e) => {
                now = to_us(e.now);
                display = e.display.0;
                out.push(json!({
                    "ph": "i",
                    "name": "Tick",
                    "cat": "Driver",
                    "ts": now,
                    "pid": display,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "frame_index": e.frame_index,
                        "display_frozen": e.display_frozen,
                    }
                }));
            }
            RecordedEvent::AnimationStart(e) => {
                out.push(json!({
                    "ph": "B",
                    "name": "Animation",
                    "cat": "Controller",
                    "ts": to_us(e.now),
                    "pid": display,
                    "tid": track(e.entity),
                    "args": {
                        "entity": format!("{:?}", e.entity),
                        "start_time_us": to_us(e.start_time),
                        "skipped_first_frame": e.skipped_first_frame,
                    }
                }));
            }
            RecordedEvent::DeferredFrame(e) => {
                out.push(json!({
                    "ph": "i",
                    "name": "DeferredFrame",
                    "cat": "Controller",
                    "ts": to_us(e.now),
                    "pid": display,
                    "tid": track(e.entity),
                    "s": "t",
                }));
            }
            RecordedEvent::ThumbnailFrame(e) => {
                out.push(json!({
                    "ph": "C",
                    "name": "Thumbnail",
                    "cat": "Controller",
                    "ts": now,
                    "pid": display,
                    "tid": track(e.entity),
                    "args": {
                        "alpha": e.frame.alpha,
                        "layer": e.frame.layer,
                    }
                }));
            }
            RecordedEvent::AnimationEnd(e) => {
                out.push(json!({
                    "ph": "E",
                    "name": "Animation",
                    "cat": "Controller",
                    "ts": to_us(e.now),
                    "pid": display,
                    "tid": track(e.entity),
                    "args": {
                        "reason": reason_name(e.reason),
                    }
                }));
            }
            RecordedEvent::LayerUpdate(e) => {
                out.push(json!({
                    "ph": "i",
                    "name": "LayerUpdate",
                    "cat": "Layers",
                    "ts": now,
                    "pid": display,
                    "tid": track(e.entity),
                    "s": "t",
                    "args": {
                        "adjustment": e.adjustment,
                        "top_layer": e.top_layer,
                    }
                }));
            }
            RecordedEvent::TickSummary(s) => {
                out.push(json!({
                    "ph": "i",
                    "name": "TickSummary",
                    "cat": "Summary",
                    "ts": now,
                    "pid": s.display.0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "frame_index": s.frame_index,
                        "stepped": s.stepped,
                        "still_animating": s.still_animating,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &out)?;
    Ok(())
}

fn to_us(t: HostTime) -> f64 {
    t.nanos() as f64 / 1000.0
}

/// Track 0 is the driver; entities start at 1.
fn track(entity: EntityId) -> u64 {
    u64::from(entity.index()) + 1
}

fn reason_name(reason: EndReason) -> &'static str {
    match reason {
        EndReason::Completed => "completed",
        EndReason::Frozen => "frozen",
        EndReason::Cleared => "cleared",
    }
}
