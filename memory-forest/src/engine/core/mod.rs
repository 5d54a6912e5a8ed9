//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, state transitions,
//! and forest mount/teardown for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app and the `ForestPlugin` that schedules lifecycle,
/// input and per-frame forest systems.
pub mod app_setup;

/// Application state machine from seed loading to runtime execution.
pub mod app_state;

/// Forest mount, rebuild-on-change and idempotent teardown.
pub mod lifecycle;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
