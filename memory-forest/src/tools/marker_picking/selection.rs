use bevy::prelude::*;
use bevy::window::{PrimaryWindow, SystemCursorIcon};
use bevy::winit::cursor::CursorIcon;
use constants::forest_layout::MARKER_HOVER_SCALE;

use super::ray::{ndc_to_ray, viewport_to_ndc};
use super::state::*;
use crate::engine::camera::orbit_camera::ForestCamera;
use crate::engine::core::lifecycle::ForestLifecycle;
use crate::engine::memories::record::MemoryRecords;
use crate::engine::scene::builder::Marker;

/// Casts a ray from a logical cursor position through the forest camera.
/// The camera is a root entity, so its local transform is already current
/// this frame while `GlobalTransform` still lags until propagation.
fn pointer_ray(
    position: Vec2,
    window: &Window,
    (projection, transform): (&Projection, &Transform),
) -> Option<Ray3d> {
    let ndc = viewport_to_ndc(position, window.size())?;
    ndc_to_ray(projection, &GlobalTransform::from(*transform), ndc)
}

// Enlarges the marker under the pointer and restores every other marker
pub fn resolve_marker_hover(
    mut latch: ResMut<PointerLatch>,
    registry: Res<PickableRegistry>,
    lifecycle: Res<ForestLifecycle>,
    windows: Query<&Window>,
    cameras: Query<(&Projection, &Transform), With<ForestCamera>>,
    mut markers: Query<(&GlobalTransform, &mut Transform), (With<Marker>, Without<ForestCamera>)>,
    mut hover: ResMut<HoverState>,
) {
    if !latch.take_move() {
        return;
    }

    let hit = latch.position().and_then(|position| {
        let window = windows.get(lifecycle.mounted_window()?).ok()?;
        let camera = cameras.single().ok()?;
        let ray = pointer_ray(position, window, camera)?;
        registry
            .resolve(ray, |entity| markers.get(entity).ok().map(|(xf, _)| *xf))
            .map(|marker| marker.entity)
    });

    for marker in registry.iter() {
        let Ok((_, mut transform)) = markers.get_mut(marker.entity) else {
            continue;
        };
        let scale = if Some(marker.entity) == hit {
            marker.base_scale * MARKER_HOVER_SCALE
        } else {
            marker.base_scale
        };
        if transform.scale != scale {
            transform.scale = scale;
        }
    }

    if hover.hovered != hit {
        hover.hovered = hit;
        hover.affordance = if hit.is_some() {
            PointerAffordance::Interactive
        } else {
            PointerAffordance::Default
        };
    }
}

/// Reports a completed click on a marker as `MemorySelected`, exactly once.
pub fn resolve_marker_click(
    mut latch: ResMut<PointerLatch>,
    registry: Res<PickableRegistry>,
    records: Res<MemoryRecords>,
    lifecycle: Res<ForestLifecycle>,
    windows: Query<&Window>,
    cameras: Query<(&Projection, &Transform), With<ForestCamera>>,
    markers: Query<&GlobalTransform, With<Marker>>,
    mut selected: EventWriter<MemorySelected>,
) {
    let Some(position) = latch.take_click() else {
        return;
    };
    let Some(window) = lifecycle
        .mounted_window()
        .and_then(|entity| windows.get(entity).ok())
    else {
        return;
    };
    let Ok(camera) = cameras.single() else {
        return;
    };
    let Some(ray) = pointer_ray(position, window, camera) else {
        return;
    };

    let Some(marker) = registry.resolve(ray, |entity| markers.get(entity).ok().copied()) else {
        return;
    };
    let Some(record) = records.get(marker.record_id) else {
        warn!("Marker {:?} refers to missing memory {:?}", marker.entity, marker.record_id);
        return;
    };

    debug!("Selected memory {} '{}'", record.id.0, record.title);
    selected.write(MemorySelected {
        record: record.clone(),
    });
}

/// Mirrors the hover affordance onto the primary window's cursor.
pub fn apply_pointer_affordance(
    hover: Res<HoverState>,
    windows: Query<Entity, With<PrimaryWindow>>,
    mut commands: Commands,
) {
    if !hover.is_changed() {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };

    let icon = match hover.affordance {
        PointerAffordance::Interactive => SystemCursorIcon::Pointer,
        PointerAffordance::Default => SystemCursorIcon::Default,
    };
    commands.entity(window).insert(CursorIcon::from(icon));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::memories::record::{Feeling, RecordId};
    use crate::test_support::*;
    use crate::tools::marker_picking::ray::{ndc_to_viewport, world_to_ndc};

    fn marker_entity(app: &mut App, record: u64) -> Entity {
        let mut query = app.world_mut().query::<(Entity, &Marker)>();
        query
            .iter(app.world())
            .find(|(_, marker)| marker.record_id == RecordId(record))
            .map(|(entity, _)| entity)
            .unwrap()
    }

    fn screen_position_of(app: &mut App, entity: Entity) -> Vec2 {
        let point = app
            .world()
            .get::<GlobalTransform>(entity)
            .unwrap()
            .translation();
        let mut cameras = app
            .world_mut()
            .query_filtered::<(&Projection, &GlobalTransform), With<ForestCamera>>();
        let (projection, camera) = cameras.single(app.world()).unwrap();
        let ndc = world_to_ndc(projection, camera, point).unwrap();
        ndc_to_viewport(ndc.truncate(), WINDOW_SIZE)
    }

    fn mounted_app() -> (App, Entity) {
        let mut app = headless_app();
        let window = spawn_primary_window(&mut app);
        load_records(&mut app, sample_records());
        mount(&mut app);
        (app, window)
    }

    #[test]
    fn hover_enlarges_exactly_one_marker() {
        let (mut app, window) = mounted_app();
        let target = marker_entity(&mut app, 3);
        let position = screen_position_of(&mut app, target);

        move_cursor(&mut app, window, position);

        let hover = app.world().resource::<HoverState>();
        assert_eq!(hover.hovered, Some(target));
        assert_eq!(hover.affordance, PointerAffordance::Interactive);

        let registry = app.world().resource::<PickableRegistry>();
        let enlarged: Vec<Entity> = registry
            .iter()
            .filter(|marker| {
                app.world().get::<Transform>(marker.entity).unwrap().scale != marker.base_scale
            })
            .map(|marker| marker.entity)
            .collect();
        assert_eq!(enlarged, vec![target]);
        assert_eq!(
            app.world().get::<Transform>(target).unwrap().scale,
            Vec3::ONE * MARKER_HOVER_SCALE
        );
    }

    #[test]
    fn moving_to_empty_space_restores_everything() {
        let (mut app, window) = mounted_app();
        let target = marker_entity(&mut app, 3);
        let position = screen_position_of(&mut app, target);
        move_cursor(&mut app, window, position);

        move_cursor(&mut app, window, Vec2::new(5.0, 5.0));

        let hover = app.world().resource::<HoverState>();
        assert_eq!(hover.hovered, None);
        assert_eq!(hover.affordance, PointerAffordance::Default);
        assert_eq!(app.world().get::<Transform>(target).unwrap().scale, Vec3::ONE);
        assert_eq!(
            app.world().get::<CursorIcon>(window),
            Some(&CursorIcon::from(SystemCursorIcon::Default))
        );
    }

    #[test]
    fn clicking_a_marker_selects_its_record_once() {
        let (mut app, window) = mounted_app();
        let target = marker_entity(&mut app, 3);
        let position = screen_position_of(&mut app, target);

        click(&mut app, window, position);
        app.update();

        let selected = selections(&app);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, RecordId(3));
        assert_eq!(selected[0].title, "Graduation");
    }

    #[test]
    fn clicking_empty_space_selects_nothing() {
        let (mut app, window) = mounted_app();

        click(&mut app, window, Vec2::new(5.0, 5.0));

        assert!(selections(&app).is_empty());
    }

    #[test]
    fn unregistered_geometry_does_not_intercept_clicks() {
        let (mut app, window) = mounted_app();
        let target = marker_entity(&mut app, 3);
        let position = screen_position_of(&mut app, target);

        // A marker-shaped decoy between the camera and the real marker.
        let eye = app.world().resource::<crate::engine::camera::orbit_camera::OrbitCamera>().eye();
        let behind = app.world().get::<GlobalTransform>(target).unwrap().translation();
        app.world_mut().spawn((
            Marker {
                record_id: RecordId(999),
            },
            Transform::from_translation(eye.lerp(behind, 0.5)),
        ));
        app.update();

        click(&mut app, window, position);

        let selected = selections(&app);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, RecordId(3));
    }

    #[test]
    fn dragging_is_not_a_click() {
        let (mut app, window) = mounted_app();
        let target = marker_entity(&mut app, 3);
        let position = screen_position_of(&mut app, target);

        move_cursor(&mut app, window, position + Vec2::new(60.0, 0.0));
        press_left(&mut app, window);
        app.update();
        move_cursor(&mut app, window, position);
        release_left(&mut app, window);
        app.update();

        assert!(selections(&app).is_empty());
    }

    #[test]
    fn two_year_collection_resolves_the_later_marker() {
        let mut app = headless_app();
        let window = spawn_primary_window(&mut app);
        load_records(
            &mut app,
            vec![
                record(1, "Ferry", Some("2023-02-15"), Feeling::Happy),
                record(2, "Storm", Some("2023-08-10"), Feeling::Sad),
                record(3, "Harbour", Some("2024-01-20"), Feeling::Happy),
            ],
        );
        mount(&mut app);
        assert_eq!(app.world().resource::<PickableRegistry>().len(), 3);

        let target = marker_entity(&mut app, 3);
        let position = screen_position_of(&mut app, target);
        click(&mut app, window, position);

        let selected = selections(&app);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, RecordId(3));
    }

    #[test]
    fn click_without_moving_after_a_rebuild_still_selects() {
        let (mut app, window) = mounted_app();
        let target = marker_entity(&mut app, 3);
        let position = screen_position_of(&mut app, target);
        move_cursor(&mut app, window, position);

        // A later year leaves the 2024 branch where it was.
        app.world_mut()
            .resource_mut::<MemoryRecords>()
            .add(crate::engine::memories::record::MemoryDraft {
                title: "New Flat".into(),
                date: Some("2025-03-01".into()),
                feeling: Feeling::Happy,
                image: None,
            });
        app.update();
        assert_eq!(app.world().resource::<PickableRegistry>().len(), 5);

        press_left(&mut app, window);
        app.update();
        release_left(&mut app, window);
        app.update();

        let selected = selections(&app);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, RecordId(3));
    }

    #[test]
    fn snapshot_with_a_repeated_id_leaves_markers_mapped_one_to_one() {
        let (mut app, window) = mounted_app();

        let refused = app.world_mut().resource_mut::<MemoryRecords>().replace(vec![
            record(7, "Alpha", Some("2023-04-04"), Feeling::Happy),
            record(7, "Beta", Some("2024-04-04"), Feeling::Sad),
        ]);
        app.update();

        assert!(refused.is_err());
        assert_eq!(built_events(&app).len(), 1);
        let mut ids: Vec<RecordId> = app
            .world()
            .resource::<PickableRegistry>()
            .iter()
            .map(|marker| marker.record_id)
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);

        let target = marker_entity(&mut app, 3);
        let position = screen_position_of(&mut app, target);
        click(&mut app, window, position);
        let selected = selections(&app);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].title, "Graduation");
    }
}
