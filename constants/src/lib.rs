//! Shared configuration for the memory forest engine.
//!
//! Pure numbers and colours only: anything that needs engine types lives in
//! the engine's own `constants` module.

/// Camera limits and input tuning for orbit and free-pan navigation.
pub mod camera;

/// Procedural tree dimensions: trunk, branches, markers and labels.
pub mod forest_layout;

/// Scene colours for the tree, markers, ground and labels.
pub mod palette;
