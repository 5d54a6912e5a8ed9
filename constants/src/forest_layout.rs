/// Procedural tree layout, in world units.
use std::f32::consts::PI;

/// Vertical offset of the tree root, equal to the ground plane height.
pub const TREE_ROOT_Y: f32 = -3.0;

/// Trunk base, below the first year segment.
pub const TRUNK_BASE_RADIUS_TOP: f32 = 0.6;
pub const TRUNK_BASE_RADIUS_BOTTOM: f32 = 0.8;
pub const TRUNK_BASE_HEIGHT: f32 = 2.0;

/// Height of the first year segment above the root.
pub const SEGMENT_BASE_Y: f32 = 2.0;
/// Vertical distance between consecutive year segments.
pub const SEGMENT_STEP_Y: f32 = 2.0;
/// Segments overlap slightly so the trunk reads as one piece.
pub const SEGMENT_HEIGHT: f32 = 2.1;
pub const SEGMENT_RADIUS_TOP: f32 = 0.5;
pub const SEGMENT_RADIUS_BOTTOM: f32 = 0.6;
/// Radius lost per year segment.
pub const SEGMENT_TAPER: f32 = 0.05;
/// Tapering never goes below this radius.
pub const SEGMENT_MIN_RADIUS: f32 = 0.08;

/// Branch pivot sits this far below its segment centre.
pub const BRANCH_DROP: f32 = 0.5;
/// Yaw added per year so branches spiral around the trunk.
pub const BRANCH_ROTATION_STEP: f32 = PI / 1.5;
/// Fixed roll applied to every branch.
pub const BRANCH_TILT: f32 = 0.3;
pub const BRANCH_LENGTH: f32 = 3.0;
pub const BRANCH_RADIUS_TOP: f32 = 0.15;
pub const BRANCH_RADIUS_BOTTOM: f32 = 0.25;

/// Year label anchor height along the branch.
pub const LABEL_HEIGHT: f32 = 3.5;

pub const MARKER_RADIUS: f32 = 0.3;
/// First marker height along the branch.
pub const MARKER_BASE_Y: f32 = 0.5;
/// Height added per marker inside one year.
pub const MARKER_STAGGER_Y: f32 = 0.4;
/// Full width of the horizontal jitter box around the branch axis.
pub const MARKER_JITTER: f32 = 0.5;
/// Scale applied to the hovered marker.
pub const MARKER_HOVER_SCALE: f32 = 1.5;

pub const STEM_RADIUS_TOP: f32 = 0.02;
pub const STEM_RADIUS_BOTTOM: f32 = 0.05;
pub const STEM_HEIGHT: f32 = 0.4;

/// Ground plane and grid extent.
pub const GROUND_SIZE: f32 = 100.0;
pub const GRID_DIVISIONS: u32 = 100;
/// Grid floats just above the ground to avoid z-fighting.
pub const GRID_LIFT: f32 = 0.01;

pub const STAR_COUNT: u32 = 600;
pub const STAR_SHELL_INNER: f32 = 120.0;
pub const STAR_SHELL_OUTER: f32 = 200.0;
