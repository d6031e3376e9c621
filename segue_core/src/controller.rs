// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-entity transition animation state machine.
//!
//! An [`AnimationController`] drives one entity's transition across frames:
//!
//! ```text
//!   Idle ──set_animation──► (pending) ──eligible tick──► Running
//!    ▲        │                                         │    │
//!    │   set_dummy_animation                 completes  │    │ thumbnail defers
//!    │        ▼                                         │    ▼
//!    │   Placeholder                                    │  DeferredCleanup
//!    │                                                  ▼    │ (one extra frame)
//!    └────────── cleanup tick ◄─────────────────────────┴────┘
//! ```
//!
//! A frozen display cancels whatever is installed on the next tick; the
//! animation is abandoned, never paused. A real animation whose entity is
//! neither drawn nor showing its starting window on its first tick is
//! dropped the same way. Cleanup always happens on a tick:
//! it requests a layout pass, resets the layer adjustment, runs per-window
//! exit hooks and reports the transition as finished.
//!
//! Controllers are stepped by the
//! [`AnimationDriver`](crate::driver::AnimationDriver), which owns them and
//! holds the entity state they read.

use alloc::vec::Vec;

use crate::animation::{Animation, AnimationKind, TRANSPARENT};
use crate::config::AnimationConfig;
use crate::entity::{EntityId, EntityState, WindowId, WindowRef};
use crate::host::{Host, LayerHost, SurfaceSink, TransitionHost};
use crate::layers;
use crate::snapshot::{AnimationSnapshot, ControllerSnapshot, ThumbnailSnapshot};
use crate::thumbnail::Thumbnail;
use crate::tick::AnimationTick;
use crate::time::{Duration, HostTime};
use crate::trace::{
    AnimationEndEvent, AnimationStartEvent, DeferredFrameEvent, EndReason, LayerUpdateEvent,
    ThumbnailFrameEvent, Tracer,
};
use crate::transform::Transformation;

/// Transition animation state for one entity.
#[derive(Debug)]
pub struct AnimationController {
    entity: EntityId,
    animation: Option<AnimationKind>,
    /// Set once the current animation has taken its first step. Stays set
    /// after a clear until the next cleanup tick has run.
    animating: bool,
    transformation: Transformation,
    has_transformation: bool,
    layer_adjustment: i32,
    top_window_layer: Option<i32>,
    all_drawn: bool,
    skip_first_frame: bool,
    using_transferred_animation: bool,
    windows: Vec<WindowRef>,
    thumbnail: Option<Thumbnail>,
    freezing_screen: bool,
    last_freeze_duration: Option<Duration>,
}

impl AnimationController {
    pub(crate) fn new(entity: EntityId) -> Self {
        Self {
            entity,
            animation: None,
            animating: false,
            transformation: Transformation::CLEAR,
            has_transformation: false,
            layer_adjustment: 0,
            top_window_layer: None,
            all_drawn: false,
            skip_first_frame: false,
            using_transferred_animation: false,
            windows: Vec::new(),
            thumbnail: None,
            freezing_screen: false,
            last_freeze_duration: None,
        }
    }

    // -- Accessors --

    /// The entity this controller animates.
    #[must_use]
    pub const fn entity(&self) -> EntityId {
        self.entity
    }

    /// What is currently installed.
    #[must_use]
    pub const fn animation(&self) -> Option<&AnimationKind> {
        self.animation.as_ref()
    }

    /// Whether the installed animation has started running (or a cleared
    /// animation still awaits its cleanup tick).
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.animating
    }

    /// Whether the entity counts as animating for scheduling purposes.
    #[must_use]
    pub const fn is_animating(&self, entity: &EntityState) -> bool {
        self.animation.is_some() || entity.in_pending_transaction
    }

    /// The transformation to apply to the entity's windows, if any.
    #[must_use]
    pub const fn transformation(&self) -> Option<&Transformation> {
        if self.has_transformation {
            Some(&self.transformation)
        } else {
            None
        }
    }

    /// The last transformation written, valid or not.
    #[must_use]
    pub const fn last_transformation(&self) -> &Transformation {
        &self.transformation
    }

    /// Whether [`last_transformation`](Self::last_transformation) reflects
    /// the most recent frame.
    #[must_use]
    pub const fn has_transformation(&self) -> bool {
        self.has_transformation
    }

    /// Layer offset currently applied to the entity's windows.
    #[must_use]
    pub const fn layer_adjustment(&self) -> i32 {
        self.layer_adjustment
    }

    /// Highest layer assigned to an owned window by the last layer pass.
    #[must_use]
    pub const fn top_window_layer(&self) -> Option<i32> {
        self.top_window_layer
    }

    /// Whether the current animation was taken over from another entity.
    #[must_use]
    pub const fn using_transferred_animation(&self) -> bool {
        self.using_transferred_animation
    }

    /// Whether the next start skips the curve's first frame.
    #[must_use]
    pub const fn skip_first_frame(&self) -> bool {
        self.skip_first_frame
    }

    /// Windows owned as of the last layout pass.
    #[must_use]
    pub fn windows(&self) -> &[WindowRef] {
        &self.windows
    }

    /// The thumbnail, if one is attached.
    #[must_use]
    pub const fn thumbnail(&self) -> Option<&Thumbnail> {
        self.thumbnail.as_ref()
    }

    /// Whether this entity is keeping the screen frozen.
    #[must_use]
    pub const fn freezing_screen(&self) -> bool {
        self.freezing_screen
    }

    // -- Bookkeeping from the window layer --

    /// Replaces the owned window list. Called by the layout pass.
    ///
    /// Layers are not reassigned here; the layout pass applies
    /// [`layer_adjustment`](Self::layer_adjustment) itself.
    pub fn set_windows(&mut self, windows: Vec<WindowRef>) {
        self.windows = windows;
    }

    /// Records whether the entity is keeping the screen frozen.
    pub fn set_freezing_screen(&mut self, freezing: bool) {
        self.freezing_screen = freezing;
    }

    /// Records how long the entity last kept the screen frozen.
    pub fn set_last_freeze_duration(&mut self, duration: Duration) {
        self.last_freeze_duration = Some(duration);
    }

    /// Picks up the entity's all-drawn flag.
    ///
    /// Returns `true` when the entity has just become fully drawn.
    pub fn sync_all_drawn(&mut self, entity: &EntityState) -> bool {
        if self.all_drawn == entity.all_drawn {
            return false;
        }
        self.all_drawn = entity.all_drawn;
        entity.all_drawn
    }

    // -- Installation --

    /// Installs `animation` as the entity's transition.
    ///
    /// The animation is initialized to `bounds` (width, height) if its
    /// creator did not, clamped to the maximum duration and scaled by the
    /// transition time scale. It starts on the next tick if the entity is drawn (or its
    /// starting window is displayed) by then; otherwise that tick clears it.
    /// When `skip_first_frame` is set the start time is shifted back by one
    /// frame interval.
    pub fn set_animation<H: LayerHost + ?Sized>(
        &mut self,
        mut animation: Animation,
        (width, height): (u32, u32),
        skip_first_frame: bool,
        entity: &EntityState,
        config: &AnimationConfig,
        host: &mut H,
    ) {
        if !animation.is_initialized() {
            animation.initialize(width, height);
        }
        animation.restrict_duration(config.max_duration);
        animation.scale_current_duration(config.transition_scale);
        if !entity.fullscreen {
            animation.set_background_color(TRANSPARENT);
        }

        let adjustment = config.layer_adjustment(animation.z_order());
        self.animation = Some(AnimationKind::Real(animation));
        self.animating = false;

        if self.layer_adjustment != adjustment {
            self.layer_adjustment = adjustment;
            self.update_layers(host);
        }

        // Start out gone if the entity is gone, visible if it is visible.
        self.transformation = Transformation::with_alpha(visibility_alpha(entity));
        self.has_transformation = true;
        self.skip_first_frame = skip_first_frame;
    }

    /// Installs the placeholder, reserving the slot without animating.
    pub fn set_dummy_animation(&mut self, entity: &EntityState) {
        self.animation = Some(AnimationKind::Placeholder);
        self.transformation = Transformation::with_alpha(visibility_alpha(entity));
        self.has_transformation = true;
    }

    /// Attaches a thumbnail, destroying any previous one.
    ///
    /// If the animation is already running the thumbnail is shown and
    /// started at once with the primary's start time.
    pub fn install_thumbnail<S: SurfaceSink + ?Sized>(
        &mut self,
        mut thumbnail: Thumbnail,
        sink: &mut S,
    ) {
        self.clear_thumbnail(sink);
        if self.animating
            && let Some(start) = self.primary_start_time()
        {
            thumbnail.start(start, sink);
        }
        self.thumbnail = Some(thumbnail);
    }

    /// Detaches the current animation and destroys the thumbnail.
    ///
    /// A detached animation leaves the controller marked running so the next
    /// tick performs cleanup. Calling this twice is the same as calling it
    /// once.
    pub fn clear_animation<S: SurfaceSink + ?Sized>(
        &mut self,
        entity: &mut EntityState,
        sink: &mut S,
    ) {
        if self.animation.take().is_some() {
            self.animating = true;
        }
        self.clear_thumbnail(sink);
        if entity.defer_clear_all_drawn {
            entity.all_drawn = false;
            entity.defer_clear_all_drawn = false;
        }
        self.using_transferred_animation = false;
    }

    /// Destroys the thumbnail surface, if any. Idempotent.
    pub fn clear_thumbnail<S: SurfaceSink + ?Sized>(&mut self, sink: &mut S) {
        if let Some(thumbnail) = self.thumbnail.take() {
            thumbnail.destroy(sink);
        }
    }

    /// Moves the current animation and its layer adjustment to `target`,
    /// along with `window` if this controller owns it.
    ///
    /// Both sides are relayered. With no animation installed only the window
    /// moves.
    pub fn transfer_current_animation<H: Host + ?Sized>(
        &mut self,
        target: &mut Self,
        window: Option<WindowId>,
        host: &mut H,
    ) {
        if let Some(window) = window
            && let Some(pos) = self.windows.iter().position(|w| w.window == window)
        {
            let moved = self.windows.remove(pos);
            target.windows.push(moved);
            host.window_reassigned(window, target.entity);
        }

        if let Some(animation) = self.animation.take() {
            target.animation = Some(animation);
            target.animating = self.animating;
            target.layer_adjustment = self.layer_adjustment;
            self.layer_adjustment = 0;
            target.update_layers(host);
            self.update_layers(host);
            target.using_transferred_animation = true;
        }
    }

    /// Reassigns every owned window's layer from the current adjustment.
    pub fn update_layers<H: LayerHost + ?Sized>(&mut self, host: &mut H) {
        self.top_window_layer = layers::recompute(self.layer_adjustment, &self.windows, host);
    }

    /// Shows every owned window, returning whether any of them is running
    /// its own animation.
    pub fn show_all_windows<H: TransitionHost + ?Sized>(&self, host: &mut H) -> bool {
        let mut animating = false;
        for w in &self.windows {
            animating |= host.show_window(w.window);
        }
        animating
    }

    // -- Stepping --

    /// Advances the animation for one tick.
    ///
    /// Returns `true` while the entity still needs frames. Must only be
    /// called by the driver inside a tick.
    pub fn step<H: Host + ?Sized>(
        &mut self,
        tick: &AnimationTick,
        entity: &mut EntityState,
        config: &AnimationConfig,
        host: &mut H,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        let mut reason = EndReason::Cleared;

        if tick.display_frozen {
            if self.animation.take().is_some() {
                self.animating = true;
                reason = EndReason::Frozen;
            }
        } else {
            match self.animation.as_ref().map(AnimationKind::is_placeholder) {
                // Reserved but not yet animating; doesn't count for scheduling.
                Some(true) => return false,
                // Not yet eligible: falls through to cleanup.
                Some(false) if !self.animating && !entity.ready_to_animate() => {}
                Some(false) => {
                    if !self.animating {
                        self.start(tick, config, host, tracer);
                    }
                    if self.step_animation(tick, host, tracer) {
                        if let Some(thumbnail) = &mut self.thumbnail {
                            let frame = thumbnail.step(
                                tick.now,
                                tick.display,
                                self.top_window_layer,
                                config,
                                host,
                            );
                            tracer.thumbnail_frame(&ThumbnailFrameEvent {
                                entity: self.entity,
                                frame,
                            });
                        }
                        return true;
                    }
                    reason = EndReason::Completed;
                }
                None => {}
            }
        }

        self.has_transformation = false;

        if !self.animating && self.animation.is_none() {
            return false;
        }

        self.finish(tick, entity, host, tracer, reason);
        false
    }

    fn primary_start_time(&self) -> Option<HostTime> {
        self.animation
            .as_ref()
            .and_then(AnimationKind::as_real)
            .and_then(Animation::start_time)
    }

    fn start<H: Host + ?Sized>(
        &mut self,
        tick: &AnimationTick,
        config: &AnimationConfig,
        host: &mut H,
        tracer: &mut Tracer<'_>,
    ) {
        // The first frame of some transitions changes nothing on screen;
        // starting one interval early lands the first tick on frame two.
        let correction = if self.skip_first_frame {
            tick.frame_interval(config)
        } else {
            Duration::ZERO
        };
        let start = tick.now.saturating_sub(correction);

        if let Some(AnimationKind::Real(animation)) = &mut self.animation {
            animation.set_start_time(start);
        }
        self.animating = true;
        if let Some(thumbnail) = &mut self.thumbnail {
            thumbnail.start(start, host);
        }

        tracer.animation_start(&AnimationStartEvent {
            entity: self.entity,
            now: tick.now,
            start_time: start,
            skipped_first_frame: self.skip_first_frame,
        });
        self.skip_first_frame = false;
    }

    fn step_animation<H: Host + ?Sized>(
        &mut self,
        tick: &AnimationTick,
        host: &mut H,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        let Some(AnimationKind::Real(animation)) = &mut self.animation else {
            return false;
        };

        let mut more = animation.evaluate(tick.now, &mut self.transformation);
        if !more {
            if self
                .thumbnail
                .as_mut()
                .is_some_and(Thumbnail::consume_final_frame)
            {
                more = true;
                tracer.deferred_frame(&DeferredFrameEvent {
                    entity: self.entity,
                    now: tick.now,
                });
            } else {
                self.animation = None;
                self.clear_thumbnail(host);
            }
        }
        self.has_transformation = more;
        more
    }

    fn finish<H: Host + ?Sized>(
        &mut self,
        tick: &AnimationTick,
        entity: &mut EntityState,
        host: &mut H,
        tracer: &mut Tracer<'_>,
        reason: EndReason,
    ) {
        host.request_layout_redo(self.entity, tick.display);

        self.clear_animation(entity, host);
        self.animating = false;

        if self.layer_adjustment != 0 {
            self.layer_adjustment = 0;
            self.update_layers(host);
            tracer.layer_update(&LayerUpdateEvent {
                entity: self.entity,
                adjustment: 0,
                top_layer: self.top_window_layer,
            });
        }

        if host.input_method_owner() == Some(self.entity) {
            host.move_input_method_windows();
        }

        self.transformation.clear();

        for w in &self.windows {
            host.finish_exit(w.window);
        }
        host.notify_transition_finished(self.entity);

        tracer.animation_end(&AnimationEndEvent {
            entity: self.entity,
            now: tick.now,
            reason,
        });
    }

    // -- Diagnostics --

    /// Captures every field for debug output.
    #[must_use]
    pub fn snapshot(&self, config: &AnimationConfig) -> ControllerSnapshot {
        let animation = self.animation.as_ref().map(|kind| match kind {
            AnimationKind::Placeholder => AnimationSnapshot::Placeholder,
            AnimationKind::Real(a) => AnimationSnapshot::Real {
                start_time: a.start_time(),
                duration: a.duration(),
                z_order: a.z_order(),
                background_color: a.background_color(),
            },
        });
        let thumbnail = self.thumbnail.as_ref().map(|t| {
            let (x, y) = t.position();
            ThumbnailSnapshot {
                surface: t.surface(),
                x,
                y,
                layer: t.layer(self.top_window_layer, config),
                transformation: *t.transformation(),
                start_time: t.animation().start_time(),
                duration: t.animation().duration(),
                defer_destruction: t.defer_destruction(),
                final_frame_consumed: t.final_frame_consumed(),
            }
        });

        ControllerSnapshot {
            entity: self.entity,
            animating: self.animating,
            animation,
            transformation: self.transformation().copied(),
            layer_adjustment: self.layer_adjustment,
            top_window_layer: self.top_window_layer,
            all_drawn: self.all_drawn,
            skip_first_frame: self.skip_first_frame,
            using_transferred_animation: self.using_transferred_animation,
            freezing_screen: self.freezing_screen,
            last_freeze_duration: self.last_freeze_duration,
            thumbnail,
            windows: self.windows.clone(),
        }
    }
}

fn visibility_alpha(entity: &EntityState) -> f32 {
    if entity.visible { 1.0 } else { 0.0 }
}
