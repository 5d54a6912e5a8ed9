//! Pure procedural layout of the memory tree.
//!
//! Turns year bins into positions and sizes without touching the ECS, so the
//! shape of the tree can be checked without a renderer.
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use bevy::prelude::*;
use constants::forest_layout::{
    BRANCH_DROP, BRANCH_ROTATION_STEP, BRANCH_TILT, LABEL_HEIGHT, MARKER_BASE_Y, MARKER_JITTER,
    MARKER_STAGGER_Y, SEGMENT_BASE_Y, SEGMENT_HEIGHT, SEGMENT_MIN_RADIUS, SEGMENT_RADIUS_BOTTOM,
    SEGMENT_RADIUS_TOP, SEGMENT_STEP_Y, SEGMENT_TAPER, TREE_ROOT_Y,
};

use crate::engine::memories::binning::YearBin;
use crate::engine::memories::record::{Feeling, RecordId};

#[derive(Debug, Clone, PartialEq)]
pub struct ForestLayout {
    pub root: Transform,
    pub years: Vec<YearLayout>,
}

/// Trunk segment plus the branch it carries, for one year.
#[derive(Debug, Clone, PartialEq)]
pub struct YearLayout {
    pub year: String,
    pub segment: SegmentLayout,
    /// Branch pivot, relative to the tree root.
    pub branch: Transform,
    /// Label anchor, relative to the branch.
    pub label_anchor: Vec3,
    pub markers: Vec<MarkerLayout>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SegmentLayout {
    /// Centre of the segment, relative to the tree root.
    pub translation: Vec3,
    pub radius_top: f32,
    pub radius_bottom: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerLayout {
    pub record_id: RecordId,
    pub feeling: Feeling,
    /// Relative to the branch pivot.
    pub translation: Vec3,
}

impl ForestLayout {
    pub fn marker_count(&self) -> usize {
        self.years.iter().map(|year| year.markers.len()).sum()
    }

    /// World position of a marker centre, composing root, branch and marker.
    pub fn marker_world_position(&self, record_id: RecordId) -> Option<Vec3> {
        self.years.iter().find_map(|year| {
            year.markers
                .iter()
                .find(|marker| marker.record_id == record_id)
                .map(|marker| {
                    let world_from_branch = self.root.compute_matrix() * year.branch.compute_matrix();
                    world_from_branch.transform_point3(marker.translation)
                })
        })
    }
}

pub fn layout_forest(bins: &[YearBin]) -> ForestLayout {
    ForestLayout {
        root: Transform::from_xyz(0.0, TREE_ROOT_Y, 0.0),
        years: bins
            .iter()
            .enumerate()
            .map(|(index, bin)| layout_year(index, bin))
            .collect(),
    }
}

fn layout_year(index: usize, bin: &YearBin) -> YearLayout {
    let step = index as f32;
    let y = SEGMENT_BASE_Y + step * SEGMENT_STEP_Y;
    let taper = step * SEGMENT_TAPER;

    let branch = Transform::from_xyz(0.0, y - BRANCH_DROP, 0.0).with_rotation(Quat::from_euler(
        EulerRot::XYZ,
        0.0,
        step * BRANCH_ROTATION_STEP,
        BRANCH_TILT,
    ));

    YearLayout {
        year: bin.year.clone(),
        segment: SegmentLayout {
            translation: Vec3::new(0.0, y, 0.0),
            radius_top: (SEGMENT_RADIUS_TOP - taper).max(SEGMENT_MIN_RADIUS),
            radius_bottom: (SEGMENT_RADIUS_BOTTOM - taper).max(SEGMENT_MIN_RADIUS),
            height: SEGMENT_HEIGHT,
        },
        branch,
        label_anchor: Vec3::new(0.0, LABEL_HEIGHT, 0.0),
        markers: bin
            .records
            .iter()
            .enumerate()
            .map(|(slot, record)| MarkerLayout {
                record_id: record.id,
                feeling: record.feeling.clone(),
                translation: marker_offset(record.id, slot),
            })
            .collect(),
    }
}

/// Horizontal jitter seeded by the record id, height staggered by slot.
/// Slots never share a height, so no two markers on a branch coincide.
fn marker_offset(record_id: RecordId, slot: usize) -> Vec3 {
    Vec3::new(
        jitter(record_id, 0),
        MARKER_BASE_Y + slot as f32 * MARKER_STAGGER_Y,
        jitter(record_id, 1),
    )
}

fn jitter(record_id: RecordId, axis: u8) -> f32 {
    let mut hasher = DefaultHasher::new();
    (record_id, axis).hash(&mut hasher);
    let unit = (hasher.finish() & 0xFFFF) as f32 / 0xFFFF as f32;
    (unit - 0.5) * MARKER_JITTER
}
