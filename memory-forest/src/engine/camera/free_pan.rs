use std::collections::HashSet;

use bevy::input::ButtonState;
use bevy::input::keyboard::KeyboardInput;
use bevy::prelude::*;
use bevy::window::WindowFocused;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanDirection {
    Forward,
    Back,
    Left,
    Right,
}

impl PanDirection {
    /// Arrow keys and WASD both steer.
    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::ArrowUp | KeyCode::KeyW => Some(Self::Forward),
            KeyCode::ArrowDown | KeyCode::KeyS => Some(Self::Back),
            KeyCode::ArrowLeft | KeyCode::KeyA => Some(Self::Left),
            KeyCode::ArrowRight | KeyCode::KeyD => Some(Self::Right),
            _ => None,
        }
    }

    fn axis(self, forward: Vec3, right: Vec3) -> Vec3 {
        match self {
            Self::Forward => forward,
            Self::Back => -forward,
            Self::Left => -right,
            Self::Right => right,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FreePanSettings {
    /// Velocity added per held direction each frame.
    pub impulse: f32,
    /// Per-frame damping, below 1.
    pub friction: f32,
    /// Speeds under this snap to rest.
    pub rest_speed: f32,
}

/// Keyboard panning with momentum.
///
/// Key events only touch the held set; the velocity is integrated once per
/// frame by [`FreePan::step`] from the camera controller.
#[derive(Resource, Debug, Clone)]
pub struct FreePan {
    held: HashSet<PanDirection>,
    velocity: Vec3,
    settings: FreePanSettings,
}

impl FreePan {
    pub fn new(settings: FreePanSettings) -> Self {
        Self {
            held: HashSet::new(),
            velocity: Vec3::ZERO,
            settings,
        }
    }

    pub fn press(&mut self, direction: PanDirection) {
        self.held.insert(direction);
    }

    pub fn release(&mut self, direction: PanDirection) {
        self.held.remove(&direction);
    }

    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Drop held keys and momentum.
    pub fn stop(&mut self) {
        self.held.clear();
        self.velocity = Vec3::ZERO;
    }

    pub fn is_held(&self, direction: PanDirection) -> bool {
        self.held.contains(&direction)
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Advance one frame and return the displacement to apply to the eye.
    pub fn step(&mut self, forward: Vec3, right: Vec3) -> Vec3 {
        for direction in &self.held {
            self.velocity += direction.axis(forward, right) * self.settings.impulse;
        }
        self.velocity *= self.settings.friction;
        if self.velocity.length() < self.settings.rest_speed {
            self.velocity = Vec3::ZERO;
        }
        self.velocity
    }
}

/// Mirror keyboard state into the held set. Losing window focus releases
/// everything so a key lifted elsewhere cannot stick.
pub fn track_pan_keys(
    mut keyboard_events: EventReader<KeyboardInput>,
    mut focus_events: EventReader<WindowFocused>,
    mut free_pan: ResMut<FreePan>,
) {
    for event in keyboard_events.read() {
        let Some(direction) = PanDirection::from_key(event.key_code) else {
            continue;
        };
        match event.state {
            ButtonState::Pressed => free_pan.press(direction),
            ButtonState::Released => free_pan.release(direction),
        }
    }

    if focus_events.read().any(|event| !event.focused) {
        free_pan.release_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::render_settings::FREE_PAN_SETTINGS;

    const FORWARD: Vec3 = Vec3::NEG_Z;
    const RIGHT: Vec3 = Vec3::X;

    #[test]
    fn accelerates_while_held_then_coasts_to_rest() {
        let mut pan = FreePan::new(FREE_PAN_SETTINGS);
        pan.press(PanDirection::Forward);

        let first = pan.step(FORWARD, RIGHT).length();
        let mut latest = first;
        for _ in 0..10 {
            latest = pan.step(FORWARD, RIGHT).length();
        }
        assert!(latest > first);
        assert!(pan.velocity().dot(FORWARD) > 0.0);

        pan.release(PanDirection::Forward);
        let coasting = pan.step(FORWARD, RIGHT).length();
        assert!(coasting > 0.0 && coasting < latest);

        for _ in 0..500 {
            pan.step(FORWARD, RIGHT);
        }
        assert_eq!(pan.velocity(), Vec3::ZERO);
    }

    #[test]
    fn speed_is_bounded_by_friction() {
        let settings = FREE_PAN_SETTINGS;
        let terminal = settings.impulse * settings.friction / (1.0 - settings.friction);
        let mut pan = FreePan::new(settings);
        pan.press(PanDirection::Right);

        for _ in 0..1000 {
            pan.step(FORWARD, RIGHT);
        }
        assert!(pan.velocity().length() <= terminal + 1.0e-4);
        assert!(pan.velocity().x > 0.0);
    }

    #[test]
    fn opposite_directions_cancel() {
        let mut pan = FreePan::new(FREE_PAN_SETTINGS);
        pan.press(PanDirection::Left);
        pan.press(PanDirection::Right);
        assert_eq!(pan.step(FORWARD, RIGHT), Vec3::ZERO);
    }

    #[test]
    fn arrows_and_letters_map_to_the_same_direction() {
        assert_eq!(PanDirection::from_key(KeyCode::ArrowUp), Some(PanDirection::Forward));
        assert_eq!(PanDirection::from_key(KeyCode::KeyW), Some(PanDirection::Forward));
        assert_eq!(PanDirection::from_key(KeyCode::KeyA), Some(PanDirection::Left));
        assert_eq!(PanDirection::from_key(KeyCode::Space), None);
    }

    #[test]
    fn stop_clears_keys_and_momentum() {
        let mut pan = FreePan::new(FREE_PAN_SETTINGS);
        pan.press(PanDirection::Back);
        pan.step(FORWARD, RIGHT);
        pan.stop();

        assert!(!pan.is_held(PanDirection::Back));
        assert_eq!(pan.velocity(), Vec3::ZERO);
    }
}
