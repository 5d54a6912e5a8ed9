use bevy::prelude::*;
use constants::camera::{
    CAMERA_START, ORBIT_MAX_DISTANCE, ORBIT_MAX_POLAR_ANGLE, ORBIT_MIN_DISTANCE,
    ORBIT_PIXELS_PER_LINE, ORBIT_ROTATE_SPEED, ORBIT_TARGET, ORBIT_ZOOM_STEP, PAN_FRICTION,
    PAN_IMPULSE, PAN_REST_SPEED,
};

use crate::engine::camera::free_pan::FreePanSettings;
use crate::engine::camera::orbit_camera::OrbitSettings;

pub const ORBIT_SETTINGS: OrbitSettings = OrbitSettings {
    target: Vec3::new(ORBIT_TARGET[0], ORBIT_TARGET[1], ORBIT_TARGET[2]),
    start_eye: Vec3::new(CAMERA_START[0], CAMERA_START[1], CAMERA_START[2]),
    min_distance: ORBIT_MIN_DISTANCE,
    max_distance: ORBIT_MAX_DISTANCE,
    max_polar_angle: ORBIT_MAX_POLAR_ANGLE,
    rotate_speed: ORBIT_ROTATE_SPEED,
    zoom_step: ORBIT_ZOOM_STEP,
    pixels_per_line: ORBIT_PIXELS_PER_LINE,
};

pub const FREE_PAN_SETTINGS: FreePanSettings = FreePanSettings {
    impulse: PAN_IMPULSE,
    friction: PAN_FRICTION,
    rest_speed: PAN_REST_SPEED,
};

/// Ambient fill, brightness in cd/m².
pub const AMBIENT_BRIGHTNESS: f32 = 400.0;
pub const SUN_ILLUMINANCE: f32 = 4_000.0;
pub const SUN_POSITION: Vec3 = Vec3::new(10.0, 10.0, 10.0);
pub const SPOT_INTENSITY: f32 = 400_000.0;
pub const SPOT_POSITION: Vec3 = Vec3::new(-10.0, 10.0, 5.0);

/// Year label panel size in logical pixels.
pub const LABEL_SIZE: Vec2 = Vec2::new(96.0, 48.0);
pub const LABEL_FONT_SIZE: f32 = 24.0;
pub const LABEL_BORDER_WIDTH: f32 = 2.0;
pub const LABEL_CORNER_RADIUS: f32 = 10.0;
/// Camera distance at which a year label is drawn at its nominal size.
pub const LABEL_REFERENCE_DISTANCE: f32 = 12.0;
pub const LABEL_MIN_SCALE: f32 = 0.5;
pub const LABEL_MAX_SCALE: f32 = 1.6;
