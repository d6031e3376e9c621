// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controller storage and per-tick stepping.
//!
//! [`AnimationDriver`] owns every live [`AnimationController`] next to the
//! [`EntityState`] it reads. Entities are addressed by [`EntityId`] handles;
//! destroyed slots are recycled via a free list, and generation counters
//! reject stale handles.
//!
//! All mutation goes through `&mut AnimationDriver`, so a tick and any
//! installation call can never interleave. When the driver is shared between
//! threads, wrap it in `SharedDriver` (requires the `std` feature), whose
//! [`transaction`](SharedDriver::transaction) is the single ordering lock.

use alloc::vec::Vec;

use crate::animation::Animation;
use crate::config::AnimationConfig;
use crate::controller::AnimationController;
use crate::entity::{EntityId, EntityState, WindowId, WindowRef};
use crate::host::{Host, LayerHost, SurfaceSink};
use crate::snapshot::ControllerSnapshot;
use crate::thumbnail::Thumbnail;
use crate::tick::AnimationTick;
use crate::trace::{TickEvent, TickSummary, Tracer};

#[derive(Debug)]
struct Slot {
    state: EntityState,
    controller: AnimationController,
}

/// Owns all animation controllers and steps them once per tick.
#[derive(Debug)]
pub struct AnimationDriver {
    config: AnimationConfig,
    slots: Vec<Option<Slot>>,
    generation: Vec<u32>,
    free_list: Vec<u32>,
    len: u32,
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new(AnimationConfig::default())
    }
}

impl AnimationDriver {
    /// Creates an empty driver.
    #[must_use]
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            slots: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Changes the transition time scale applied to animations installed
    /// from now on.
    pub fn set_transition_scale(&mut self, scale: f32) {
        self.config.transition_scale = scale;
    }

    // -- Allocation API --

    /// Registers a new entity and returns its handle.
    pub fn create_entity(&mut self, state: EntityState) -> EntityId {
        let idx = if let Some(idx) = self.free_list.pop() {
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.slots.push(None);
            self.generation.push(0);
            idx
        };
        let id = EntityId {
            idx,
            generation: self.generation[idx as usize],
        };
        self.slots[idx as usize] = Some(Slot {
            state,
            controller: AnimationController::new(id),
        });
        id
    }

    /// Clears the entity's animation (destroying any thumbnail surface) and
    /// frees its slot.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn destroy_entity<S: SurfaceSink + ?Sized>(&mut self, id: EntityId, sink: &mut S) {
        self.validate(id);
        if let Some(mut slot) = self.slots[id.idx as usize].take() {
            slot.controller.clear_animation(&mut slot.state, sink);
        }
        // Bump generation so old handles immediately fail validation.
        self.generation[id.idx as usize] += 1;
        self.free_list.push(id.idx);
    }

    /// Returns whether the given handle refers to a live entity.
    #[must_use]
    pub fn is_alive(&self, id: EntityId) -> bool {
        id.idx < self.len
            && self.generation[id.idx as usize] == id.generation
            && self.slots[id.idx as usize].is_some()
    }

    /// Number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Whether no entity is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Handles of all live entities in slot order.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.slots
            .iter()
            .flatten()
            .map(|slot| slot.controller.entity())
    }

    // -- Access --

    /// The entity's window-level state.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> &EntityState {
        &self.slot(id).state
    }

    /// Mutable access to the entity's window-level state.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn entity_mut(&mut self, id: EntityId) -> &mut EntityState {
        &mut self.slot_mut(id).state
    }

    /// The entity's controller.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn controller(&self, id: EntityId) -> &AnimationController {
        &self.slot(id).controller
    }

    /// Mutable access to the entity's controller.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn controller_mut(&mut self, id: EntityId) -> &mut AnimationController {
        &mut self.slot_mut(id).controller
    }

    // -- Installation API --

    /// Replaces the entity's owned window list. See
    /// [`AnimationController::set_windows`].
    pub fn set_windows(&mut self, id: EntityId, windows: Vec<WindowRef>) {
        self.slot_mut(id).controller.set_windows(windows);
    }

    /// Installs an animation on the entity. See
    /// [`AnimationController::set_animation`].
    pub fn set_animation<H: LayerHost + ?Sized>(
        &mut self,
        id: EntityId,
        animation: Animation,
        bounds: (u32, u32),
        skip_first_frame: bool,
        host: &mut H,
    ) {
        let config = self.config;
        let slot = self.slot_mut(id);
        slot.controller
            .set_animation(animation, bounds, skip_first_frame, &slot.state, &config, host);
    }

    /// Installs the placeholder animation on the entity.
    pub fn set_dummy_animation(&mut self, id: EntityId) {
        let slot = self.slot_mut(id);
        slot.controller.set_dummy_animation(&slot.state);
    }

    /// Clears the entity's animation. Cleanup runs on the next tick.
    pub fn clear_animation<S: SurfaceSink + ?Sized>(&mut self, id: EntityId, sink: &mut S) {
        let slot = self.slot_mut(id);
        slot.controller.clear_animation(&mut slot.state, sink);
    }

    /// Attaches a thumbnail to the entity's transition.
    pub fn install_thumbnail<S: SurfaceSink + ?Sized>(
        &mut self,
        id: EntityId,
        thumbnail: Thumbnail,
        sink: &mut S,
    ) {
        self.slot_mut(id).controller.install_thumbnail(thumbnail, sink);
    }

    /// Moves `from`'s animation (and `window`, if `from` owns it) to `to`.
    ///
    /// Transferring an entity's animation to itself is a programming error:
    /// it asserts in debug builds and does nothing in release builds.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale.
    pub fn transfer_current_animation<H: Host + ?Sized>(
        &mut self,
        from: EntityId,
        to: EntityId,
        window: Option<WindowId>,
        host: &mut H,
    ) {
        self.validate(from);
        self.validate(to);
        debug_assert_ne!(from, to, "cannot transfer an animation to its own entity");
        if from == to {
            return;
        }
        if let Ok([Some(source), Some(target)]) = self
            .slots
            .get_disjoint_mut([from.idx as usize, to.idx as usize])
        {
            source
                .controller
                .transfer_current_animation(&mut target.controller, window, host);
        }
    }

    // -- Stepping --

    /// Steps every controller for `tick`.
    ///
    /// Returns whether any controller still needs frames; the host should
    /// schedule another tick when it does.
    pub fn step<H: Host + ?Sized>(
        &mut self,
        tick: &AnimationTick,
        host: &mut H,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        tracer.tick(&TickEvent::from(tick));

        let mut still_animating = false;
        let mut stepped = 0_u32;
        for slot in self.slots.iter_mut().flatten() {
            // Newly drawn entities need a layout pass before they can animate.
            if slot.controller.sync_all_drawn(&slot.state) {
                host.request_layout_redo(slot.controller.entity(), tick.display);
            }
            still_animating |= slot
                .controller
                .step(tick, &mut slot.state, &self.config, host, tracer);
            stepped += 1;
        }

        tracer.tick_summary(&TickSummary {
            frame_index: tick.frame_index,
            display: tick.display,
            stepped,
            still_animating,
        });
        still_animating
    }

    /// Whether any entity counts as animating for scheduling purposes.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.slots
            .iter()
            .flatten()
            .any(|slot| slot.controller.is_animating(&slot.state))
    }

    /// Snapshots every live controller in slot order.
    #[must_use]
    pub fn snapshots(&self) -> Vec<ControllerSnapshot> {
        self.slots
            .iter()
            .flatten()
            .map(|slot| slot.controller.snapshot(&self.config))
            .collect()
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    fn validate(&self, id: EntityId) {
        assert!(
            self.is_alive(id),
            "stale EntityId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    fn slot(&self, id: EntityId) -> &Slot {
        self.validate(id);
        match &self.slots[id.idx as usize] {
            Some(slot) => slot,
            None => unreachable!("validated slot is occupied"),
        }
    }

    fn slot_mut(&mut self, id: EntityId) -> &mut Slot {
        self.validate(id);
        match &mut self.slots[id.idx as usize] {
            Some(slot) => slot,
            None => unreachable!("validated slot is occupied"),
        }
    }
}

/// An [`AnimationDriver`] behind the global ordering lock.
#[cfg(feature = "std")]
#[derive(Debug, Default)]
pub struct SharedDriver {
    inner: std::sync::Mutex<AnimationDriver>,
}

#[cfg(feature = "std")]
impl SharedDriver {
    /// Wraps `driver`.
    #[must_use]
    pub fn new(driver: AnimationDriver) -> Self {
        Self {
            inner: std::sync::Mutex::new(driver),
        }
    }

    /// Runs `f` while holding the lock.
    ///
    /// Ticks and installation calls must both go through here. A lock
    /// poisoned by a panicking caller is recovered: controllers are left in
    /// a consistent state between calls.
    pub fn transaction<R>(&self, f: impl FnOnce(&mut AnimationDriver) -> R) -> R {
        let mut guard = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut guard)
    }

    /// Unwraps the driver.
    #[must_use]
    pub fn into_inner(self) -> AnimationDriver {
        self.inner
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::animation::{AlphaCurve, AnimationKind, ZOrder};
    use crate::display::DisplayId;
    use crate::host::{SurfaceCommand, SurfaceId};
    use crate::testing::{HostEvent, RecordingHost};
    use crate::time::{Duration, HostTime};

    const FRAME: u64 = 16_000_000;

    fn fade(frames: u64) -> Animation {
        Animation::new(AlphaCurve::new(0.0, 1.0), Duration(frames * FRAME))
    }

    fn tick(frame: u64) -> AnimationTick {
        AnimationTick::new(HostTime(frame * FRAME), DisplayId::DEFAULT, frame)
    }

    fn step(driver: &mut AnimationDriver, frame: u64, host: &mut RecordingHost) -> bool {
        driver.step(&tick(frame), host, &mut Tracer::none())
    }

    #[test]
    fn create_and_destroy() {
        let mut driver = AnimationDriver::default();
        let mut host = RecordingHost::default();
        let id = driver.create_entity(EntityState::shown());
        assert!(driver.is_alive(id));
        assert_eq!(driver.len(), 1);

        driver.destroy_entity(id, &mut host);
        assert!(!driver.is_alive(id));
        assert!(driver.is_empty());
    }

    #[test]
    fn generation_prevents_stale_access() {
        let mut driver = AnimationDriver::default();
        let mut host = RecordingHost::default();
        let id1 = driver.create_entity(EntityState::shown());
        driver.destroy_entity(id1, &mut host);

        let id2 = driver.create_entity(EntityState::default());
        assert_eq!(id1.index(), id2.index());
        assert_ne!(id1.generation(), id2.generation());
        assert!(!driver.is_alive(id1));
        assert!(driver.is_alive(id2));
        assert_eq!(driver.controller(id2).entity(), id2);
    }

    #[test]
    #[should_panic(expected = "stale EntityId")]
    fn stale_handle_panics() {
        let mut driver = AnimationDriver::default();
        let mut host = RecordingHost::default();
        let id = driver.create_entity(EntityState::shown());
        driver.destroy_entity(id, &mut host);
        driver.set_dummy_animation(id);
    }

    #[test]
    fn destroy_releases_thumbnail_surface() {
        let mut driver = AnimationDriver::default();
        let mut host = RecordingHost::default();
        let id = driver.create_entity(EntityState::shown());
        driver.set_animation(id, fade(10), (1, 1), false, &mut host);
        let thumb = Thumbnail::new(SurfaceId(4), fade(10), 0.0, 0.0);
        driver.install_thumbnail(id, thumb, &mut host);

        driver.destroy_entity(id, &mut host);
        assert_eq!(
            host.surface_commands(SurfaceId(4), |c| *c == SurfaceCommand::Destroy),
            1
        );
    }

    #[test]
    fn empty_tick_reports_idle() {
        let mut driver = AnimationDriver::default();
        let mut host = RecordingHost::default();
        assert!(!step(&mut driver, 0, &mut host));
        assert!(host.events.is_empty());
    }

    #[test]
    fn aggregates_across_controllers() {
        let mut driver = AnimationDriver::default();
        let mut host = RecordingHost::default();
        let short = driver.create_entity(EntityState::shown());
        let long = driver.create_entity(EntityState::shown());
        let _idle = driver.create_entity(EntityState::shown());
        driver.set_animation(short, fade(1), (1, 1), false, &mut host);
        driver.set_animation(long, fade(3), (1, 1), false, &mut host);

        assert!(step(&mut driver, 0, &mut host));
        assert!(step(&mut driver, 1, &mut host), "long still running");
        assert!(!driver.controller(short).is_running());
        assert!(step(&mut driver, 2, &mut host));
        assert!(!step(&mut driver, 3, &mut host));
        assert!(!driver.is_animating());
    }

    #[test]
    fn newly_drawn_entity_requests_layout() {
        let mut driver = AnimationDriver::default();
        let mut host = RecordingHost::default();
        let id = driver.create_entity(EntityState {
            all_drawn: false,
            ..EntityState::shown()
        });

        let _ = step(&mut driver, 0, &mut host);
        assert!(host.events.is_empty());

        driver.entity_mut(id).all_drawn = true;
        let _ = step(&mut driver, 1, &mut host);
        let _ = step(&mut driver, 2, &mut host);
        assert_eq!(
            host.events,
            vec![HostEvent::LayoutRedo(id, DisplayId::DEFAULT)]
        );
    }

    #[test]
    fn transition_scale_applies_to_new_animations() {
        let mut driver = AnimationDriver::default();
        let mut host = RecordingHost::default();
        let id = driver.create_entity(EntityState::shown());
        driver.set_transition_scale(2.0);
        driver.set_animation(id, fade(10), (1, 1), false, &mut host);

        let duration = driver
            .controller(id)
            .animation()
            .and_then(AnimationKind::as_real)
            .map(Animation::duration);
        assert_eq!(duration, Some(Duration(20 * FRAME)));
    }

    #[test]
    fn transfer_between_entities() {
        let mut driver = AnimationDriver::default();
        let mut host = RecordingHost::default();
        let a = driver.create_entity(EntityState::shown());
        let b = driver.create_entity(EntityState::shown());
        driver.set_windows(a, vec![WindowRef::new(WindowId(1), 100)]);
        driver.set_animation(a, fade(5).with_z_order(ZOrder::Bottom), (1, 1), false, &mut host);

        driver.transfer_current_animation(a, b, Some(WindowId(1)), &mut host);

        assert!(driver.controller(a).animation().is_none());
        assert_eq!(driver.controller(a).layer_adjustment(), 0);
        assert!(driver.controller(b).animation().is_some());
        assert_eq!(driver.controller(b).layer_adjustment(), -1000);
        assert!(driver.controller(b).using_transferred_animation());
        assert_eq!(driver.controller(b).windows().len(), 1);
        assert_eq!(driver.controller(b).top_window_layer(), Some(-900));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "cannot transfer an animation to its own entity")]
    fn self_transfer_asserts() {
        let mut driver = AnimationDriver::default();
        let mut host = RecordingHost::default();
        let a = driver.create_entity(EntityState::shown());
        driver.transfer_current_animation(a, a, None, &mut host);
    }

    #[test]
    fn snapshots_in_slot_order() {
        let mut driver = AnimationDriver::default();
        let mut host = RecordingHost::default();
        let a = driver.create_entity(EntityState::shown());
        let b = driver.create_entity(EntityState::shown());
        driver.set_dummy_animation(b);
        driver.controller_mut(a).set_freezing_screen(true);
        let _ = step(&mut driver, 0, &mut host);

        let snaps = driver.snapshots();
        assert_eq!(snaps.len(), 2);
        assert_eq!(snaps[0].entity, a);
        assert!(snaps[0].freezing_screen);
        assert!(snaps[0].all_drawn);
        assert_eq!(snaps[1].entity, b);
        assert_eq!(
            snaps[1].animation,
            Some(crate::snapshot::AnimationSnapshot::Placeholder)
        );
        assert_eq!(driver.entities().collect::<Vec<_>>(), vec![a, b]);
    }

    #[cfg(feature = "trace")]
    #[test]
    fn trace_reports_lifecycle() {
        use crate::trace::{AnimationEndEvent, AnimationStartEvent, EndReason, TraceSink};

        #[derive(Default)]
        struct Log {
            starts: u32,
            ends: Vec<EndReason>,
            summaries: Vec<(u32, bool)>,
        }

        impl TraceSink for Log {
            fn on_animation_start(&mut self, _e: &AnimationStartEvent) {
                self.starts += 1;
            }

            fn on_animation_end(&mut self, e: &AnimationEndEvent) {
                self.ends.push(e.reason);
            }

            fn on_tick_summary(&mut self, s: &TickSummary) {
                self.summaries.push((s.stepped, s.still_animating));
            }
        }

        let mut driver = AnimationDriver::default();
        let mut host = RecordingHost::default();
        let id = driver.create_entity(EntityState::shown());
        driver.set_animation(id, fade(1), (1, 1), false, &mut host);

        let mut log = Log::default();
        for frame in 0..3 {
            let _ = driver.step(&tick(frame), &mut host, &mut Tracer::new(&mut log));
        }
        assert_eq!(log.starts, 1);
        assert_eq!(log.ends, vec![EndReason::Completed]);
        assert_eq!(log.summaries, vec![(1, true), (1, false), (1, false)]);
    }

    #[cfg(feature = "std")]
    #[test]
    fn shared_driver_survives_poisoning() {
        let shared = SharedDriver::default();
        let id = shared.transaction(|d| d.create_entity(EntityState::shown()));

        let poisoned = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _: u32 = shared.transaction(|_| panic!("caller bug"));
        }));
        assert!(poisoned.is_err());

        assert!(shared.transaction(|d| d.is_alive(id)));
        assert_eq!(shared.into_inner().len(), 1);
    }
}
