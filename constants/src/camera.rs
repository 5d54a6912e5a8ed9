use std::f32::consts::FRAC_PI_2;

pub const CAMERA_FOV_DEGREES: f32 = 50.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

/// Initial eye position, looking at the world origin.
pub const CAMERA_START: [f32; 3] = [8.0, 5.0, 8.0];
pub const ORBIT_TARGET: [f32; 3] = [0.0, 0.0, 0.0];

pub const ORBIT_MIN_DISTANCE: f32 = 5.0;
pub const ORBIT_MAX_DISTANCE: f32 = 20.0;
/// Polar angle measured from straight up; keeps the eye above the horizon.
pub const ORBIT_MAX_POLAR_ANGLE: f32 = FRAC_PI_2 - 0.1;
/// Radians per pixel of drag.
pub const ORBIT_ROTATE_SPEED: f32 = 0.005;
/// Distance multiplier per scroll line.
pub const ORBIT_ZOOM_STEP: f32 = 0.95;
/// Pixel scroll is converted to lines with this factor.
pub const ORBIT_PIXELS_PER_LINE: f32 = 20.0;

/// Velocity added per held direction, per frame.
pub const PAN_IMPULSE: f32 = 0.01;
/// Per-frame velocity damping.
pub const PAN_FRICTION: f32 = 0.9;
/// Speeds below this snap to zero.
pub const PAN_REST_SPEED: f32 = 1.0e-4;

/// Pointer travel (pixels) allowed between press and release for a click.
pub const CLICK_DRAG_TOLERANCE: f32 = 4.0;
