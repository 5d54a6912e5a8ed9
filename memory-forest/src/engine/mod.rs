pub mod camera;
pub mod core;
pub mod memories;
pub mod scene;
