use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use super::free_pan::FreePan;

/// Polar angle floor; keeps `looking_at` away from the degenerate straight-down case.
const POLAR_EPSILON: f32 = 1.0e-3;

#[derive(Debug, Clone, Copy)]
pub struct OrbitSettings {
    pub target: Vec3,
    pub start_eye: Vec3,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Largest angle between the view offset and +Y.
    pub max_polar_angle: f32,
    /// Radians per pixel of drag.
    pub rotate_speed: f32,
    /// Distance multiplier per scroll line.
    pub zoom_step: f32,
    pub pixels_per_line: f32,
}

/// Marks the camera the forest is rendered through.
#[derive(Component)]
pub struct ForestCamera;

/// Orbit rig around a fixed target, stored in spherical coordinates.
///
/// `yaw` rotates about +Y, `polar` is measured down from +Y. Every mutation
/// re-clamps distance and polar angle, so the eye never leaves
/// `[min_distance, max_distance]` or drops under the horizon limit.
#[derive(Resource, Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub polar: f32,
    settings: OrbitSettings,
}

impl OrbitCamera {
    pub fn new(settings: OrbitSettings) -> Self {
        let mut camera = Self {
            target: settings.target,
            distance: settings.max_distance,
            yaw: 0.0,
            polar: settings.max_polar_angle,
            settings,
        };
        camera.set_eye(settings.start_eye);
        camera
    }

    pub fn settings(&self) -> &OrbitSettings {
        &self.settings
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        self.target + self.distance * Vec3::new(sin_polar * sin_yaw, cos_polar, sin_polar * cos_yaw)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(self.target, Vec3::Y)
    }

    /// Move the eye somewhere else and fold it back into the orbit limits.
    pub fn set_eye(&mut self, eye: Vec3) {
        let offset = eye - self.target;
        let distance = offset.length();
        if distance > f32::EPSILON {
            self.yaw = offset.x.atan2(offset.z);
            self.polar = (offset.y / distance).clamp(-1.0, 1.0).acos();
        }
        self.distance = distance;
        self.clamp();
    }

    /// Drag right swings the eye left around the target, drag down raises it.
    pub fn rotate(&mut self, drag: Vec2) {
        self.yaw -= drag.x * self.settings.rotate_speed;
        self.polar -= drag.y * self.settings.rotate_speed;
        self.clamp();
    }

    /// Positive lines dolly in.
    pub fn zoom(&mut self, lines: f32) {
        self.distance *= self.settings.zoom_step.powf(lines);
        self.clamp();
    }

    /// Horizontal forward (eye towards target) and right vectors.
    pub fn ground_basis(&self) -> (Vec3, Vec3) {
        let to_target = self.target - self.eye();
        let forward = Vec3::new(to_target.x, 0.0, to_target.z)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Z);
        (forward, forward.cross(Vec3::Y))
    }

    fn clamp(&mut self) {
        if !self.distance.is_finite() {
            self.distance = self.settings.max_distance;
        }
        self.distance = self
            .distance
            .clamp(self.settings.min_distance, self.settings.max_distance);
        if !self.polar.is_finite() {
            self.polar = self.settings.max_polar_angle;
        }
        self.polar = self.polar.clamp(POLAR_EPSILON, self.settings.max_polar_angle);
    }
}

/// Per-frame camera update: drag orbit, wheel zoom, then free-pan integration.
pub fn orbit_camera_controller(
    mut cameras: Query<&mut Transform, With<ForestCamera>>,
    mut orbit: ResMut<OrbitCamera>,
    mut free_pan: ResMut<FreePan>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
) {
    let drag: Vec2 = mouse_motion.read().map(|motion| motion.delta).sum();
    if mouse_button.pressed(MouseButton::Left) && drag != Vec2::ZERO {
        orbit.rotate(drag);
    }

    let pixels_per_line = orbit.settings().pixels_per_line;
    let scroll_lines: f32 = scroll_events
        .read()
        .map(|scroll| match scroll.unit {
            MouseScrollUnit::Line => scroll.y,
            MouseScrollUnit::Pixel => scroll.y / pixels_per_line,
        })
        .sum();
    if scroll_lines.abs() > f32::EPSILON {
        orbit.zoom(scroll_lines);
    }

    let (forward, right) = orbit.ground_basis();
    let step = free_pan.step(forward, right);
    if step != Vec3::ZERO {
        let eye = orbit.eye() + step;
        orbit.set_eye(eye);
    }

    let Ok(mut camera_transform) = cameras.single_mut() else {
        return;
    };
    *camera_transform = orbit.transform();
}
