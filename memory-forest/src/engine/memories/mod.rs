//! Memory records and their year grouping.
//!
//! Records are owned by the host through the [`record::MemoryRecords`]
//! resource; the scene only ever reads a snapshot of it.

/// Year-key derivation and ordered year bins.
pub mod binning;

/// Record types and the snapshot resource.
pub mod record;

/// JSON seed collection loaded at startup.
pub mod seed;
