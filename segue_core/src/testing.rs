// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording [`Host`](crate::host::Host) double for unit tests.

use alloc::vec::Vec;

use crate::display::DisplayId;
use crate::entity::{EntityId, WindowId};
use crate::host::{
    LayerHost, RotationSource, SurfaceCommand, SurfaceId, SurfaceSink, TransitionHost,
};
use crate::transform::Transformation;

/// One call made into the host, in order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum HostEvent {
    Surface(SurfaceId, SurfaceCommand),
    WindowLayer(WindowId, i32),
    InputMethodAdjustment(i32),
    WallpaperAdjustment(i32),
    LayoutRedo(EntityId, DisplayId),
    TransitionFinished(EntityId),
    MoveInputMethod,
    FinishExit(WindowId),
    Shown(WindowId),
    Reassigned(WindowId, EntityId),
}

/// Records every call; answers queries from its public fields.
#[derive(Debug, Default)]
pub(crate) struct RecordingHost {
    pub(crate) events: Vec<HostEvent>,
    pub(crate) ime_target: Option<WindowId>,
    pub(crate) wallpaper_target: Option<WindowId>,
    pub(crate) ime_owner: Option<EntityId>,
    pub(crate) animating_windows: Vec<WindowId>,
    pub(crate) rotation: Option<Transformation>,
}

impl RecordingHost {
    pub(crate) fn count(&self, pred: impl Fn(&HostEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(*e)).count()
    }

    pub(crate) fn commands_for(&self, surface: SurfaceId) -> Vec<SurfaceCommand> {
        self.events
            .iter()
            .filter_map(|e| match e {
                HostEvent::Surface(s, c) if *s == surface => Some(*c),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn surface_commands(
        &self,
        surface: SurfaceId,
        pred: impl Fn(&SurfaceCommand) -> bool,
    ) -> usize {
        self.commands_for(surface).iter().filter(|c| pred(*c)).count()
    }
}

impl SurfaceSink for RecordingHost {
    fn apply(&mut self, surface: SurfaceId, command: SurfaceCommand) {
        self.events.push(HostEvent::Surface(surface, command));
    }
}

impl LayerHost for RecordingHost {
    fn set_window_layer(&mut self, window: WindowId, layer: i32) {
        self.events.push(HostEvent::WindowLayer(window, layer));
    }

    fn input_method_target(&self) -> Option<WindowId> {
        self.ime_target
    }

    fn set_input_method_adjustment(&mut self, adjustment: i32) {
        self.events.push(HostEvent::InputMethodAdjustment(adjustment));
    }

    fn wallpaper_target(&self) -> Option<WindowId> {
        self.wallpaper_target
    }

    fn set_wallpaper_adjustment(&mut self, adjustment: i32) {
        self.events.push(HostEvent::WallpaperAdjustment(adjustment));
    }
}

impl TransitionHost for RecordingHost {
    fn request_layout_redo(&mut self, entity: EntityId, display: DisplayId) {
        self.events.push(HostEvent::LayoutRedo(entity, display));
    }

    fn notify_transition_finished(&mut self, entity: EntityId) {
        self.events.push(HostEvent::TransitionFinished(entity));
    }

    fn input_method_owner(&self) -> Option<EntityId> {
        self.ime_owner
    }

    fn move_input_method_windows(&mut self) {
        self.events.push(HostEvent::MoveInputMethod);
    }

    fn finish_exit(&mut self, window: WindowId) {
        self.events.push(HostEvent::FinishExit(window));
    }

    fn show_window(&mut self, window: WindowId) -> bool {
        self.events.push(HostEvent::Shown(window));
        self.animating_windows.contains(&window)
    }

    fn window_reassigned(&mut self, window: WindowId, owner: EntityId) {
        self.events.push(HostEvent::Reassigned(window, owner));
    }
}

impl RotationSource for RecordingHost {
    fn rotation_enter_transformation(&self, _display: DisplayId) -> Option<Transformation> {
        self.rotation
    }
}
