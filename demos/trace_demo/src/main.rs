// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated app switch that exercises the tracing and diagnostics pipeline.
//!
//! Three entities take part: an outgoing app that fades away under a
//! thumbnail of itself, a splash screen whose enter animation is handed to
//! the incoming app once that app has drawn, and the incoming app itself.
//! Midway a screen rotation runs, and a second transition is cut short by a
//! display freeze.
//!
//! Events go to both a
//! [`PrettyPrintSink`](segue_debug::pretty::PrettyPrintSink) and a
//! [`RecorderSink`](segue_debug::recorder::RecorderSink); the recording is
//! exported as a Chrome trace JSON file.

use std::fs::File;
use std::io::BufWriter;

use kurbo::Affine;
use segue_core::animation::{AlphaCurve, Animation, CurveSet, ScaleCurve, TranslateCurve, ZOrder};
use segue_core::config::AnimationConfig;
use segue_core::display::DisplayId;
use segue_core::driver::AnimationDriver;
use segue_core::entity::{EntityId, EntityState, WindowId, WindowRef};
use segue_core::host::{
    LayerHost, RotationSource, SurfaceCommand, SurfaceId, SurfaceSink, TransitionHost,
};
use segue_core::thumbnail::Thumbnail;
use segue_core::tick::AnimationTick;
use segue_core::time::{Duration, HostTime};
use segue_core::trace::{
    AnimationEndEvent, AnimationStartEvent, DeferredFrameEvent, LayerUpdateEvent,
    ThumbnailFrameEvent, TickEvent, TickSummary, TraceSink, Tracer,
};
use segue_core::transform::Transformation;

use segue_debug::pretty::PrettyPrintSink;
use segue_debug::recorder::RecorderSink;

const FRAME_COUNT: u64 = 60;
const APP_DRAWN_FRAME: u64 = 6;
const DUMP_FRAME: u64 = 8;
const ROTATION_FRAMES: std::ops::RangeInclusive<u64> = 20..=30;
const SECOND_TRANSITION_FRAME: u64 = 40;
const FREEZE_FRAME: u64 = 45;

/// Window manager stand-in: logs the callbacks that matter, counts the rest.
#[derive(Debug, Default)]
struct DemoHost {
    surface_commands: usize,
    layer_assignments: usize,
    rotation: Option<Transformation>,
}

impl SurfaceSink for DemoHost {
    fn apply(&mut self, surface: SurfaceId, command: SurfaceCommand) {
        self.surface_commands += 1;
        match command {
            SurfaceCommand::Show => println!("[host] show {surface:?}"),
            SurfaceCommand::Destroy => println!("[host] destroy {surface:?}"),
            _ => {}
        }
    }
}

impl LayerHost for DemoHost {
    fn set_window_layer(&mut self, _window: WindowId, _layer: i32) {
        self.layer_assignments += 1;
    }
}

impl TransitionHost for DemoHost {
    fn request_layout_redo(&mut self, entity: EntityId, display: DisplayId) {
        println!("[host] layout redo for {entity:?} on {display:?}");
    }

    fn notify_transition_finished(&mut self, entity: EntityId) {
        println!("[host] transition finished for {entity:?}");
    }

    fn finish_exit(&mut self, window: WindowId) {
        println!("[host] finish exit {window:?}");
    }

    fn window_reassigned(&mut self, window: WindowId, owner: EntityId) {
        println!("[host] {window:?} now belongs to {owner:?}");
    }
}

impl RotationSource for DemoHost {
    fn rotation_enter_transformation(&self, _display: DisplayId) -> Option<Transformation> {
        self.rotation
    }
}

/// Forwards every event to two sinks.
struct Tee<'a> {
    first: &'a mut dyn TraceSink,
    second: &'a mut dyn TraceSink,
}

impl TraceSink for Tee<'_> {
    fn on_tick(&mut self, e: &TickEvent) {
        self.first.on_tick(e);
        self.second.on_tick(e);
    }

    fn on_animation_start(&mut self, e: &AnimationStartEvent) {
        self.first.on_animation_start(e);
        self.second.on_animation_start(e);
    }

    fn on_deferred_frame(&mut self, e: &DeferredFrameEvent) {
        self.first.on_deferred_frame(e);
        self.second.on_deferred_frame(e);
    }

    fn on_thumbnail_frame(&mut self, e: &ThumbnailFrameEvent) {
        self.first.on_thumbnail_frame(e);
        self.second.on_thumbnail_frame(e);
    }

    fn on_animation_end(&mut self, e: &AnimationEndEvent) {
        self.first.on_animation_end(e);
        self.second.on_animation_end(e);
    }

    fn on_layer_update(&mut self, e: &LayerUpdateEvent) {
        self.first.on_layer_update(e);
        self.second.on_layer_update(e);
    }

    fn on_tick_summary(&mut self, s: &TickSummary) {
        self.first.on_tick_summary(s);
        self.second.on_tick_summary(s);
    }
}

fn main() {
    let config = AnimationConfig::hz60();
    let refresh_interval = config.frame_interval;

    // -- sinks -------------------------------------------------------------
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let mut recorder = RecorderSink::new();

    // -- entities ----------------------------------------------------------
    let mut host = DemoHost::default();
    let mut driver = AnimationDriver::new(config);

    let closing = driver.create_entity(EntityState::shown());
    let splash = driver.create_entity(EntityState::shown());
    let opening = driver.create_entity(EntityState {
        all_drawn: false,
        ..EntityState::shown()
    });
    driver.set_windows(closing, vec![WindowRef::new(WindowId(10), 21_000)]);
    driver.set_windows(splash, vec![WindowRef::new(WindowId(30), 21_005)]);
    driver.set_windows(opening, vec![WindowRef::new(WindowId(20), 21_010)]);

    // The outgoing app slides left and fades out under a thumbnail of itself;
    // both surfaces go away on the same frame.
    let exit = CurveSet::new()
        .with(AlphaCurve::new(1.0, 0.0))
        .with(TranslateCurve::relative((0.0, 0.0), (-0.25, 0.0)));
    driver.set_animation(
        closing,
        Animation::new(exit, Duration::from_millis(250)).with_z_order(ZOrder::Bottom),
        (1080, 1920),
        false,
        &mut host,
    );
    let thumbnail = Thumbnail::new(
        SurfaceId(1),
        Animation::new(AlphaCurve::new(1.0, 0.0), Duration::from_millis(250)),
        0.0,
        0.0,
    )
    .with_deferred_destruction();
    driver.install_thumbnail(closing, thumbnail, &mut host);

    // The splash screen fades in until the real app has drawn.
    driver.set_animation(
        splash,
        Animation::new(AlphaCurve::new(0.0, 1.0), Duration::from_millis(300))
            .with_z_order(ZOrder::Top),
        (1080, 1920),
        true,
        &mut host,
    );
    driver.set_dummy_animation(opening);

    // -- simulated loop ----------------------------------------------------
    let mut now = HostTime(1_000_000_000); // start at 1s

    for frame_index in 0..FRAME_COUNT {
        if frame_index == APP_DRAWN_FRAME {
            driver.entity_mut(opening).all_drawn = true;
            driver.transfer_current_animation(splash, opening, Some(WindowId(30)), &mut host);
        }

        host.rotation = ROTATION_FRAMES
            .contains(&frame_index)
            .then(|| Transformation::new(1.0, Affine::rotate(0.05)));

        if frame_index == SECOND_TRANSITION_FRAME {
            let zoom = ScaleCurve {
                from: 0.9,
                to: 1.0,
                pivot: (540.0, 960.0),
            };
            driver.set_animation(
                opening,
                Animation::new(zoom, Duration::from_millis(500)),
                (1080, 1920),
                false,
                &mut host,
            );
        }

        let mut tick = AnimationTick::new(now, DisplayId::DEFAULT, frame_index)
            .with_refresh_interval(refresh_interval);
        if frame_index == FREEZE_FRAME {
            tick = tick.frozen();
            driver
                .controller_mut(opening)
                .set_last_freeze_duration(Duration::from_millis(120));
        }

        let still_animating = {
            let mut tee = Tee {
                first: &mut pretty,
                second: &mut recorder,
            };
            driver.step(&tick, &mut host, &mut Tracer::new(&mut tee))
        };

        if frame_index == DUMP_FRAME {
            println!("--- controller dump at frame {frame_index} ---");
            segue_debug::dump::write_text(&driver.snapshots(), &mut std::io::stdout())
                .expect("failed to write dump");
        }

        if !still_animating && frame_index > FREEZE_FRAME {
            println!("Idle after frame {frame_index}");
            break;
        }

        // Advance time.
        now = now.checked_add(refresh_interval).expect("time overflow");
    }

    println!(
        "{} surface commands, {} layer assignments",
        host.surface_commands, host.layer_assignments
    );

    // -- export Chrome trace -----------------------------------------------
    let path = "trace.json";
    let file = File::create(path).expect("failed to create trace.json");
    let mut writer = BufWriter::new(file);
    segue_debug::chrome::export(recorder.events(), &mut writer)
        .expect("failed to write Chrome trace");

    println!("Wrote {path} ({} events)", recorder.events().len());
}
