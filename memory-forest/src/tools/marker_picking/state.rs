use bevy::prelude::*;

use super::ray::ray_hits_sphere;
use crate::engine::memories::record::{MemoryRecord, RecordId};

/// Fired once per click that lands on a marker.
#[derive(Event, Debug, Clone)]
pub struct MemorySelected {
    pub record: MemoryRecord,
}

/// A marker eligible for picking. `record_id` is a lookup key into
/// `MemoryRecords`; the scene never owns the record.
#[derive(Debug, Clone, PartialEq)]
pub struct PickableMarker {
    pub entity: Entity,
    pub record_id: RecordId,
    pub base_scale: Vec3,
    /// Unscaled pick sphere radius.
    pub radius: f32,
}

/// Every marker in the current forest, and nothing else.
#[derive(Resource, Debug, Default)]
pub struct PickableRegistry {
    markers: Vec<PickableMarker>,
}

impl PickableRegistry {
    pub fn register(&mut self, marker: PickableMarker) {
        self.markers.push(marker);
    }

    pub fn clear(&mut self) {
        self.markers.clear();
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PickableMarker> {
        self.markers.iter()
    }

    pub fn get(&self, entity: Entity) -> Option<&PickableMarker> {
        self.markers.iter().find(|marker| marker.entity == entity)
    }

    /// Nearest registered marker along `ray`. `world_of` supplies each
    /// marker's world transform; markers it cannot place are skipped.
    pub fn resolve(
        &self,
        ray: Ray3d,
        world_of: impl Fn(Entity) -> Option<GlobalTransform>,
    ) -> Option<&PickableMarker> {
        let origin = ray.origin;
        let direction = ray.direction.as_vec3();

        let mut best: Option<(&PickableMarker, f32)> = None;
        for marker in &self.markers {
            let Some(transform) = world_of(marker.entity) else {
                continue;
            };
            let (scale, _, center) = transform.to_scale_rotation_translation();
            let radius = marker.radius * scale.abs().max_element();
            if let Some(t) = ray_hits_sphere(origin, direction, center, radius) {
                if best.is_none_or(|(_, best_t)| t < best_t) {
                    best = Some((marker, t));
                }
            }
        }
        best.map(|(marker, _)| marker)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerAffordance {
    #[default]
    Default,
    Interactive,
}

/// Which marker is enlarged, and what the cursor should look like.
#[derive(Resource, Debug, Default)]
pub struct HoverState {
    pub hovered: Option<Entity>,
    pub affordance: PointerAffordance,
}

/// Pointer input latched between frames. Input systems only write here;
/// picking happens in the frame systems that drain it.
#[derive(Resource, Debug, Default)]
pub struct PointerLatch {
    position: Option<Vec2>,
    moved: bool,
    press_origin: Option<Vec2>,
    pending_click: Option<Vec2>,
}

impl PointerLatch {
    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    /// `None` when the pointer leaves the surface.
    pub fn move_to(&mut self, position: Option<Vec2>) {
        self.position = position;
        self.moved = true;
    }

    pub fn press(&mut self) {
        self.press_origin = self.position;
    }

    /// Completes a click when the pointer stayed within `tolerance` pixels
    /// of where it was pressed; longer travel was an orbit drag.
    pub fn release(&mut self, tolerance: f32) {
        let (Some(origin), Some(position)) = (self.press_origin.take(), self.position) else {
            return;
        };
        if origin.distance(position) <= tolerance {
            self.pending_click = Some(position);
        }
    }

    pub fn take_move(&mut self) -> bool {
        std::mem::take(&mut self.moved)
    }

    pub fn take_click(&mut self) -> Option<Vec2> {
        self.pending_click.take()
    }

    /// Drops any half-finished press or pending click. The cursor position
    /// survives, so a click right after a rebuild still registers.
    pub fn cancel_gesture(&mut self) {
        self.moved = false;
        self.press_origin = None;
        self.pending_click = None;
    }
}
