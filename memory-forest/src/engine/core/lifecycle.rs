//! Mount, rebuild and teardown of the forest scene.
//!
//! The forest is either fully mounted (camera, environment, tree, labels and
//! the meshes/materials they use) or fully absent. `ForestLifecycle` latches
//! which, so a second mount is a no-op and teardown can run any number of
//! times, including before anything was mounted.
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::render::camera::RenderTarget;
use bevy::text::Font;
use bevy::window::{PrimaryWindow, WindowClosing, WindowRef};
use constants::camera::{CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR};
use constants::palette::{BACKGROUND, FOG_DENSITY};

use crate::engine::camera::free_pan::FreePan;
use crate::engine::camera::orbit_camera::{ForestCamera, OrbitCamera};
use crate::engine::memories::binning::bin_records;
use crate::engine::memories::record::MemoryRecords;
use crate::engine::scene::builder::{SceneAssets, build_forest};
use crate::engine::scene::environment::spawn_environment;
use crate::engine::scene::layout::layout_forest;
use crate::tools::marker_picking::state::{HoverState, PickableRegistry, PointerLatch};

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForestLifecycleRequest {
    Mount,
    Unmount,
}

/// Emitted after every successful mount or rebuild.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ForestBuilt {
    pub years: Vec<String>,
    pub markers: usize,
}

/// Everything one mount created.
#[derive(Debug)]
pub struct MountedScene {
    pub window: Entity,
    pub camera: Entity,
    pub root: Entity,
    /// Top-level entities outside the tree: camera, environment, labels.
    entities: Vec<Entity>,
    assets: SceneAssets,
}

#[derive(Resource, Debug, Default)]
pub struct ForestLifecycle {
    scene: Option<MountedScene>,
    built_revision: Option<u64>,
}

impl ForestLifecycle {
    pub fn is_live(&self) -> bool {
        self.scene.is_some()
    }

    pub fn mounted_window(&self) -> Option<Entity> {
        self.scene.as_ref().map(|scene| scene.window)
    }

    pub fn scene(&self) -> Option<&MountedScene> {
        self.scene.as_ref()
    }

    /// Revision of `MemoryRecords` the current tree was built from.
    pub fn built_revision(&self) -> Option<u64> {
        self.built_revision
    }
}

/// Run condition for per-frame forest systems.
pub fn forest_is_live(lifecycle: Res<ForestLifecycle>) -> bool {
    lifecycle.is_live()
}

/// Resources touched when mounting or tearing down the forest.
#[derive(SystemParam)]
pub struct ForestRig<'w, 's> {
    commands: Commands<'w, 's>,
    meshes: ResMut<'w, Assets<Mesh>>,
    materials: ResMut<'w, Assets<StandardMaterial>>,
    lifecycle: ResMut<'w, ForestLifecycle>,
    registry: ResMut<'w, PickableRegistry>,
    hover: ResMut<'w, HoverState>,
    pointer: ResMut<'w, PointerLatch>,
    free_pan: ResMut<'w, FreePan>,
    orbit: ResMut<'w, OrbitCamera>,
    fonts: Option<Res<'w, Assets<Font>>>,
}

impl ForestRig<'_, '_> {
    /// Builds the whole scene onto `window`. Returns `None` when a scene is
    /// already mounted.
    pub fn mount(&mut self, window: Entity, records: &MemoryRecords) -> Option<ForestBuilt> {
        if self.lifecycle.is_live() {
            debug!("Forest already mounted, ignoring mount request");
            return None;
        }

        let orbit_settings = *self.orbit.settings();
        *self.orbit = OrbitCamera::new(orbit_settings);
        self.reset_interaction();

        let camera = self
            .commands
            .spawn((
                ForestCamera,
                Name::new("Forest camera"),
                Camera3d::default(),
                Camera {
                    target: RenderTarget::Window(WindowRef::Entity(window)),
                    ..default()
                },
                Projection::from(PerspectiveProjection {
                    fov: CAMERA_FOV_DEGREES.to_radians(),
                    near: CAMERA_NEAR,
                    far: CAMERA_FAR,
                    ..default()
                }),
                self.orbit.transform(),
                DistanceFog {
                    color: BACKGROUND,
                    falloff: FogFalloff::Exponential {
                        density: FOG_DENSITY,
                    },
                    ..default()
                },
            ))
            .id();

        let mut assets = SceneAssets::default();
        let mut entities = vec![camera];
        entities.extend(spawn_environment(
            &mut self.commands,
            &mut self.meshes,
            &mut self.materials,
            &mut assets,
        ));

        let bins = bin_records(records.records());
        let layout = layout_forest(&bins);

        // Without a text pipeline the year labels are left out.
        let label_camera = self.fonts.is_some().then_some(camera);
        if label_camera.is_none() {
            debug!("Text rendering unavailable, building forest without year labels");
        }

        let built = build_forest(
            &mut self.commands,
            &mut self.meshes,
            &mut self.materials,
            &mut assets,
            &layout,
            label_camera,
        );

        self.registry.clear();
        for marker in built.markers {
            self.registry.register(marker);
        }
        entities.extend(built.labels);

        let event = ForestBuilt {
            years: layout.years.iter().map(|year| year.year.clone()).collect(),
            markers: layout.marker_count(),
        };
        info!(
            "Forest mounted: {} years, {} markers",
            event.years.len(),
            event.markers
        );

        self.lifecycle.scene = Some(MountedScene {
            window,
            camera,
            root: built.root,
            entities,
            assets,
        });
        self.lifecycle.built_revision = Some(records.revision());

        Some(event)
    }

    /// Despawns the scene and releases its GPU assets. Returns whether there
    /// was anything to tear down.
    pub fn teardown(&mut self) -> bool {
        self.reset_interaction();
        self.registry.clear();
        self.lifecycle.built_revision = None;

        let Some(mut scene) = self.lifecycle.scene.take() else {
            return false;
        };

        for entity in std::iter::once(scene.root).chain(scene.entities.drain(..)) {
            if let Ok(mut entity_commands) = self.commands.get_entity(entity) {
                entity_commands.try_despawn();
            }
        }
        scene.assets.release(&mut self.meshes, &mut self.materials);

        info!("Forest torn down");
        true
    }

    fn reset_interaction(&mut self) {
        self.free_pan.stop();
        self.pointer.cancel_gesture();
        if self.hover.hovered.is_some() {
            *self.hover = HoverState::default();
        }
    }
}

pub fn handle_lifecycle_requests(
    mut requests: EventReader<ForestLifecycleRequest>,
    windows: Query<Entity, With<PrimaryWindow>>,
    records: Res<MemoryRecords>,
    mut rig: ForestRig,
    mut built: EventWriter<ForestBuilt>,
) {
    for request in requests.read() {
        match request {
            ForestLifecycleRequest::Mount => {
                let Ok(window) = windows.single() else {
                    warn!("No primary window to mount the forest on");
                    continue;
                };
                if let Some(event) = rig.mount(window, &records) {
                    built.write(event);
                }
            }
            ForestLifecycleRequest::Unmount => {
                rig.teardown();
            }
        }
    }
}

/// Rebuilds the whole forest when the record collection changes identity.
pub fn rebuild_on_data_change(
    records: Res<MemoryRecords>,
    mut rig: ForestRig,
    mut built: EventWriter<ForestBuilt>,
) {
    let Some(window) = rig.lifecycle.mounted_window() else {
        return;
    };
    if rig.lifecycle.built_revision() == Some(records.revision()) {
        return;
    }

    debug!("Memory records changed (revision {}), rebuilding", records.revision());
    rig.teardown();
    if let Some(event) = rig.mount(window, &records) {
        built.write(event);
    }
}

/// Tears the forest down when its window closes or disappears.
pub fn teardown_on_window_close(
    mut closing: EventReader<WindowClosing>,
    windows: Query<(), With<Window>>,
    mut rig: ForestRig,
) {
    let Some(window) = rig.lifecycle.mounted_window() else {
        closing.clear();
        return;
    };

    let closed = closing.read().any(|event| event.window == window);
    if closed || windows.get(window).is_err() {
        rig.teardown();
    }
}
