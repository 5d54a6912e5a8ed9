//! Pointer picking against memory markers.
//!
//! Only markers registered in `PickableRegistry` can be hovered or clicked;
//! trunk, branches, stems, ground and stars are never candidates even when
//! they sit between the camera and a marker.
//!
//! ## Frame Flow
//!
//! ```text
//! CursorMoved / CursorLeft / left button
//!   └─> capture_pointer_input()      latches into PointerLatch
//!       ├─> resolve_marker_hover()   nearest marker enlarged, HoverState updated
//!       ├─> resolve_marker_click()   MemorySelected { record }
//!       └─> apply_pointer_affordance()  CursorIcon on the primary window
//! ```
//!
//! A click is a press and release within `CLICK_DRAG_TOLERANCE` pixels, so
//! orbit drags that start or end over a marker never select it.

pub mod pointer;
pub mod ray;
pub mod selection;
pub mod state;
