use bevy::prelude::*;
use constants::camera::CLICK_DRAG_TOLERANCE;

use super::state::PointerLatch;
use crate::engine::core::lifecycle::ForestLifecycle;

/// Latches cursor movement and left-button presses on the mounted window.
/// Leaving the window drops the position, which clears hover next frame.
pub fn capture_pointer_input(
    lifecycle: Res<ForestLifecycle>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut cursor_moved: EventReader<CursorMoved>,
    mut cursor_left: EventReader<CursorLeft>,
    mut latch: ResMut<PointerLatch>,
) {
    let Some(window) = lifecycle.mounted_window() else {
        cursor_moved.clear();
        cursor_left.clear();
        return;
    };

    if let Some(moved) = cursor_moved.read().filter(|e| e.window == window).last() {
        latch.move_to(Some(moved.position));
    }
    if cursor_left.read().any(|e| e.window == window) {
        latch.move_to(None);
    }

    if buttons.just_pressed(MouseButton::Left) {
        latch.press();
    }
    if buttons.just_released(MouseButton::Left) {
        latch.release(CLICK_DRAG_TOLERANCE);
    }
}
