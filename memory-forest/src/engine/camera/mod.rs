//! Forest camera navigation.
//!
//! Two regimes run together every frame: drag/scroll orbit around a fixed
//! target, and keyboard panning with momentum that nudges the eye. The orbit
//! limits are re-applied after every pan step.

/// Keyboard velocity panning with friction.
pub mod free_pan;

/// Orbit rig resource and the per-frame camera controller system.
pub mod orbit_camera;
