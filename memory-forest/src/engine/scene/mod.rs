//! Procedural forest scene.
//!
//! `layout` computes the tree shape from year bins, `builder` turns a layout
//! into entities, `environment` adds lights, ground, grid and stars around
//! it, and `labels` keeps the year panels glued to their branches.

/// Entity spawning for trunk segments, branch groups and memory markers.
pub mod builder;

/// Decorative surroundings: lights, ground plane, grid and star field.
pub mod environment;

/// Screen-space year labels projected from branch anchors every frame.
pub mod labels;

/// Deterministic tree layout computed from year bins.
pub mod layout;
