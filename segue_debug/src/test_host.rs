// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A host that ignores every call.

use segue_core::display::DisplayId;
use segue_core::entity::{EntityId, WindowId};
use segue_core::host::{
    LayerHost, RotationSource, SurfaceCommand, SurfaceId, SurfaceSink, TransitionHost,
};

#[derive(Debug, Default)]
pub(crate) struct NullHost;

impl SurfaceSink for NullHost {
    fn apply(&mut self, _surface: SurfaceId, _command: SurfaceCommand) {}
}

impl LayerHost for NullHost {
    fn set_window_layer(&mut self, _window: WindowId, _layer: i32) {}
}

impl TransitionHost for NullHost {
    fn request_layout_redo(&mut self, _entity: EntityId, _display: DisplayId) {}

    fn notify_transition_finished(&mut self, _entity: EntityId) {}
}

impl RotationSource for NullHost {}
