//! Engine-side settings built from the shared `constants` crate.

/// Asset paths.
pub mod path;

/// Typed camera, lighting and pointer settings.
pub mod render_settings;
