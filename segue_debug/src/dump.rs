// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controller state dumps.
//!
//! [`write_text`] prints each [`ControllerSnapshot`] with its `Display`
//! impl; [`write_json`] emits a JSON array with one object per controller.

use std::io::{self, Write};

use serde_json::{Value, json};

use segue_core::snapshot::{AnimationSnapshot, ControllerSnapshot, ThumbnailSnapshot};
use segue_core::time::{Duration, HostTime};
use segue_core::transform::Transformation;

/// Writes the textual dump of every snapshot.
pub fn write_text(snapshots: &[ControllerSnapshot], writer: &mut dyn Write) -> io::Result<()> {
    for snap in snapshots {
        write!(writer, "{snap}")?;
    }
    Ok(())
}

/// Writes every snapshot as pretty-printed JSON.
pub fn write_json(snapshots: &[ControllerSnapshot], writer: &mut dyn Write) -> io::Result<()> {
    let values: Vec<Value> = snapshots.iter().map(to_value).collect();
    serde_json::to_writer_pretty(writer, &values)?;
    Ok(())
}

/// Converts one snapshot to a JSON object.
#[must_use]
pub fn to_value(snap: &ControllerSnapshot) -> Value {
    json!({
        "entity": {
            "index": snap.entity.index(),
            "generation": snap.entity.generation(),
        },
        "animating": snap.animating,
        "animation": snap.animation.as_ref().map(animation_value),
        "transformation": snap.transformation.as_ref().map(transformation_value),
        "layer_adjustment": snap.layer_adjustment,
        "top_window_layer": snap.top_window_layer,
        "all_drawn": snap.all_drawn,
        "skip_first_frame": snap.skip_first_frame,
        "using_transferred_animation": snap.using_transferred_animation,
        "freezing_screen": snap.freezing_screen,
        "last_freeze_ms": snap.last_freeze_duration.map(Duration::as_millis_f64),
        "thumbnail": snap.thumbnail.as_ref().map(thumbnail_value),
        "windows": snap
            .windows
            .iter()
            .map(|w| json!({ "window": w.window.0, "base_layer": w.base_layer }))
            .collect::<Vec<_>>(),
    })
}

fn animation_value(animation: &AnimationSnapshot) -> Value {
    match animation {
        AnimationSnapshot::Placeholder => json!({ "kind": "placeholder" }),
        AnimationSnapshot::Real {
            start_time,
            duration,
            z_order,
            background_color,
        } => json!({
            "kind": "real",
            "start_ns": start_time.map(HostTime::nanos),
            "duration_ms": duration.as_millis_f64(),
            "z_order": format!("{z_order:?}"),
            "background_color": background_color,
        }),
    }
}

fn transformation_value(t: &Transformation) -> Value {
    let (x, y) = t.translation();
    json!({
        "alpha": t.alpha(),
        "matrix": t.linear(),
        "translation": [x, y],
    })
}

fn thumbnail_value(t: &ThumbnailSnapshot) -> Value {
    json!({
        "surface": t.surface.0,
        "position": [t.x, t.y],
        "layer": t.layer,
        "transformation": transformation_value(&t.transformation),
        "start_ns": t.start_time.map(HostTime::nanos),
        "duration_ms": t.duration.as_millis_f64(),
        "defer_destruction": t.defer_destruction,
        "final_frame_consumed": t.final_frame_consumed,
    })
}
