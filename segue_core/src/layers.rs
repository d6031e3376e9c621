// Copyright 2026 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer assignment for an animating entity's windows.
//!
//! While an entity animates with a [`ZOrder`](crate::animation::ZOrder)
//! other than `Normal`, every window it owns is shifted by the same layer
//! adjustment. The input-method and wallpaper windows that track one of
//! those windows are shifted with it so they stay in place relative to
//! their target.
//!
//! This is pure bookkeeping and must be rerun synchronously every time the
//! adjustment changes.

use crate::entity::WindowRef;
use crate::host::LayerHost;

/// Assigns `base_layer + adjustment` to each window in order.
///
/// `windows` is the entity's window list from the last layout pass; its
/// order is preserved. Returns the highest layer assigned, which is where a
/// thumbnail must stack above, or `None` if the entity owns no windows.
pub fn recompute<H: LayerHost + ?Sized>(
    adjustment: i32,
    windows: &[WindowRef],
    host: &mut H,
) -> Option<i32> {
    let ime_target = host.input_method_target();
    let wallpaper_target = host.wallpaper_target();

    let mut top: Option<i32> = None;
    for w in windows {
        let layer = w.base_layer.saturating_add(adjustment);
        host.set_window_layer(w.window, layer);
        top = Some(top.map_or(layer, |t| t.max(layer)));

        if ime_target == Some(w.window) {
            host.set_input_method_adjustment(adjustment);
        }
        if wallpaper_target == Some(w.window) {
            host.set_wallpaper_adjustment(adjustment);
        }
    }
    top
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;
    use crate::entity::WindowId;

    #[derive(Default)]
    struct Layers {
        assigned: Vec<(WindowId, i32)>,
        ime: Option<WindowId>,
        wallpaper: Option<WindowId>,
        ime_adjustments: Vec<i32>,
        wallpaper_adjustments: Vec<i32>,
    }

    impl LayerHost for Layers {
        fn set_window_layer(&mut self, window: WindowId, layer: i32) {
            self.assigned.push((window, layer));
        }

        fn input_method_target(&self) -> Option<WindowId> {
            self.ime
        }

        fn set_input_method_adjustment(&mut self, adjustment: i32) {
            self.ime_adjustments.push(adjustment);
        }

        fn wallpaper_target(&self) -> Option<WindowId> {
            self.wallpaper
        }

        fn set_wallpaper_adjustment(&mut self, adjustment: i32) {
            self.wallpaper_adjustments.push(adjustment);
        }
    }

    #[test]
    fn assigns_in_window_order_and_tracks_top() {
        let windows = [
            WindowRef::new(WindowId(1), 21_010),
            WindowRef::new(WindowId(2), 21_000),
            WindowRef::new(WindowId(3), 21_005),
        ];
        let mut host = Layers::default();

        let top = recompute(1000, &windows, &mut host);

        assert_eq!(top, Some(22_010));
        assert_eq!(
            host.assigned,
            vec![
                (WindowId(1), 22_010),
                (WindowId(2), 22_000),
                (WindowId(3), 22_005),
            ]
        );
    }

    #[test]
    fn no_windows_means_no_top_layer() {
        let mut host = Layers::default();
        assert_eq!(recompute(-1000, &[], &mut host), None);
        assert!(host.assigned.is_empty());
    }

    #[test]
    fn forwards_adjustment_to_owned_targets_only() {
        let windows = [WindowRef::new(WindowId(1), 10)];

        let mut host = Layers {
            ime: Some(WindowId(1)),
            wallpaper: Some(WindowId(9)),
            ..Layers::default()
        };
        let _ = recompute(-1000, &windows, &mut host);
        assert_eq!(host.ime_adjustments, vec![-1000]);
        assert!(host.wallpaper_adjustments.is_empty());

        let mut host = Layers {
            wallpaper: Some(WindowId(1)),
            ..Layers::default()
        };
        let _ = recompute(0, &windows, &mut host);
        assert!(host.ime_adjustments.is_empty());
        assert_eq!(host.wallpaper_adjustments, vec![0]);
    }
}
