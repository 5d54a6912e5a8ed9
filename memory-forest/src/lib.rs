//! Memory Forest: a procedural 3D tree of personal memories.
//!
//! Records are grouped by year into trunk segments and branches, each record
//! hangs as a marker that can be hovered and clicked, and the camera orbits
//! the trunk with optional keyboard panning. [`ForestPlugin`] carries the
//! whole engine for embedding; [`create_app`] wraps it in a ready-to-run app.

pub mod constants;
pub mod engine;
pub mod rpc;
pub mod tools;

#[cfg(test)]
mod test_support;

pub use engine::core::app_setup::{ForestPlugin, ForestSet, create_app};
pub use engine::core::lifecycle::{ForestBuilt, ForestLifecycleRequest};
pub use engine::memories::record::{Feeling, MemoryDraft, MemoryRecord, MemoryRecords, RecordId};
pub use tools::marker_picking::state::MemorySelected;
