//! Interactive tools layered over the forest scene.

/// Marker hover and click resolution with selection events.
pub mod marker_picking;
