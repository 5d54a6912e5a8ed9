use bevy::color::Color;

pub const BACKGROUND: Color = Color::srgb(15.0 / 255.0, 23.0 / 255.0, 42.0 / 255.0);
pub const FOG_DENSITY: f32 = 0.02;

pub const AMBIENT_LIGHT: Color = Color::srgb(64.0 / 255.0, 64.0 / 255.0, 64.0 / 255.0);
pub const SPOT_LIGHT: Color = Color::srgb(74.0 / 255.0, 222.0 / 255.0, 128.0 / 255.0);

pub const GROUND: Color = Color::srgba(15.0 / 255.0, 23.0 / 255.0, 42.0 / 255.0, 0.8);
pub const GRID_LINE: Color = Color::srgb(30.0 / 255.0, 41.0 / 255.0, 59.0 / 255.0);
pub const STAR: Color = Color::srgb(0.9, 0.92, 1.0);

pub const TRUNK: Color = Color::srgb(62.0 / 255.0, 39.0 / 255.0, 35.0 / 255.0);
pub const BRANCH: Color = Color::srgb(93.0 / 255.0, 64.0 / 255.0, 55.0 / 255.0);
pub const STEM: Color = Color::srgb(63.0 / 255.0, 46.0 / 255.0, 5.0 / 255.0);

pub const MARKER_HAPPY: Color = Color::srgb(74.0 / 255.0, 222.0 / 255.0, 128.0 / 255.0);
pub const MARKER_SAD: Color = Color::srgb(96.0 / 255.0, 165.0 / 255.0, 250.0 / 255.0);
/// Special memories, and the fallback for any feeling the engine does not know.
pub const MARKER_DEFAULT: Color = Color::srgb(163.0 / 255.0, 230.0 / 255.0, 53.0 / 255.0);
pub const MARKER_EMISSIVE_STRENGTH: f32 = 0.2;

pub const LABEL_BACKGROUND: Color = Color::srgba(0.0, 0.0, 0.0, 0.6);
pub const LABEL_BORDER: Color = Color::srgb(245.0 / 255.0, 158.0 / 255.0, 11.0 / 255.0);
pub const LABEL_TEXT: Color = Color::srgb(251.0 / 255.0, 191.0 / 255.0, 36.0 / 255.0);
