use bevy::prelude::*;
use constants::forest_layout::*;
use constants::palette;

use super::labels::spawn_year_label;
use super::layout::{ForestLayout, YearLayout};
use crate::engine::memories::record::{Feeling, RecordId};
use crate::tools::marker_picking::state::PickableMarker;

/// Root of the procedural tree.
#[derive(Component)]
pub struct ForestTree;

#[derive(Component, Debug)]
pub struct TrunkSegment {
    pub index: usize,
    pub year: String,
}

#[derive(Component, Debug)]
pub struct BranchGroup {
    pub index: usize,
    pub year: String,
}

/// A pickable memory. `record_id` is a lookup key, never an owner.
#[derive(Component, Debug, Clone, Copy)]
pub struct Marker {
    pub record_id: RecordId,
}

/// Point on a branch the year label tracks.
#[derive(Component, Debug)]
pub struct YearLabelAnchor {
    pub year: String,
}

/// Static geometry that must never take part in picking.
#[derive(Component)]
pub struct Decoration;

/// Meshes and materials created for one mounted scene, released on teardown.
#[derive(Debug, Default)]
pub struct SceneAssets {
    meshes: Vec<Handle<Mesh>>,
    materials: Vec<Handle<StandardMaterial>>,
}

impl SceneAssets {
    pub fn mesh(&mut self, meshes: &mut Assets<Mesh>, mesh: impl Into<Mesh>) -> Handle<Mesh> {
        let handle = meshes.add(mesh);
        self.meshes.push(handle.clone());
        handle
    }

    pub fn material(
        &mut self,
        materials: &mut Assets<StandardMaterial>,
        material: StandardMaterial,
    ) -> Handle<StandardMaterial> {
        let handle = materials.add(material);
        self.materials.push(handle.clone());
        handle
    }

    pub fn len(&self) -> usize {
        self.meshes.len() + self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn release(&mut self, meshes: &mut Assets<Mesh>, materials: &mut Assets<StandardMaterial>) {
        for handle in self.meshes.drain(..) {
            meshes.remove(&handle);
        }
        for handle in self.materials.drain(..) {
            materials.remove(&handle);
        }
    }
}

/// Handles shared by every year of one build.
struct TreePalette {
    trunk: Handle<StandardMaterial>,
    branch: Handle<StandardMaterial>,
    stem: Handle<StandardMaterial>,
    happy: Handle<StandardMaterial>,
    sad: Handle<StandardMaterial>,
    fallback: Handle<StandardMaterial>,
    branch_mesh: Handle<Mesh>,
    marker_mesh: Handle<Mesh>,
    stem_mesh: Handle<Mesh>,
}

impl TreePalette {
    fn new(
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<StandardMaterial>,
        assets: &mut SceneAssets,
    ) -> Self {
        let mut glowing = |color: Color| {
            assets.material(
                materials,
                StandardMaterial {
                    base_color: color,
                    emissive: color.to_linear() * palette::MARKER_EMISSIVE_STRENGTH,
                    ..default()
                },
            )
        };
        let happy = glowing(palette::MARKER_HAPPY);
        let sad = glowing(palette::MARKER_SAD);
        let fallback = glowing(palette::MARKER_DEFAULT);

        Self {
            trunk: assets.material(materials, StandardMaterial::from(palette::TRUNK)),
            branch: assets.material(materials, StandardMaterial::from(palette::BRANCH)),
            stem: assets.material(materials, StandardMaterial::from(palette::STEM)),
            happy,
            sad,
            fallback,
            branch_mesh: assets.mesh(
                meshes,
                ConicalFrustum {
                    radius_top: BRANCH_RADIUS_TOP,
                    radius_bottom: BRANCH_RADIUS_BOTTOM,
                    height: BRANCH_LENGTH,
                },
            ),
            marker_mesh: assets.mesh(meshes, Sphere::new(MARKER_RADIUS)),
            stem_mesh: assets.mesh(
                meshes,
                ConicalFrustum {
                    radius_top: STEM_RADIUS_TOP,
                    radius_bottom: STEM_RADIUS_BOTTOM,
                    height: STEM_HEIGHT,
                },
            ),
        }
    }

    /// Special, unrecognised and untagged feelings share the default tint.
    fn marker_material(&self, feeling: &Feeling) -> Handle<StandardMaterial> {
        match feeling {
            Feeling::Happy => self.happy.clone(),
            Feeling::Sad => self.sad.clone(),
            Feeling::Special | Feeling::Unrecognized(_) | Feeling::Unset => self.fallback.clone(),
        }
    }
}

/// Entities produced by one build.
#[derive(Debug)]
pub struct BuiltForest {
    pub root: Entity,
    /// One entry per marker, in layout order.
    pub markers: Vec<PickableMarker>,
    /// UI overlays live outside the tree and are despawned separately.
    pub labels: Vec<Entity>,
}

/// Spawns the tree described by `layout`. Year labels are drawn onto
/// `label_camera` and skipped entirely when it is `None`.
pub fn build_forest(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    assets: &mut SceneAssets,
    layout: &ForestLayout,
    label_camera: Option<Entity>,
) -> BuiltForest {
    let palette = TreePalette::new(meshes, materials, assets);

    let root = commands
        .spawn((
            ForestTree,
            Name::new("Forest"),
            layout.root,
            Visibility::default(),
        ))
        .id();

    let trunk_base = assets.mesh(
        meshes,
        ConicalFrustum {
            radius_top: TRUNK_BASE_RADIUS_TOP,
            radius_bottom: TRUNK_BASE_RADIUS_BOTTOM,
            height: TRUNK_BASE_HEIGHT,
        },
    );
    commands.spawn((
        Decoration,
        Name::new("Trunk base"),
        Mesh3d(trunk_base),
        MeshMaterial3d(palette.trunk.clone()),
        Transform::IDENTITY,
        ChildOf(root),
    ));

    let mut built = BuiltForest {
        root,
        markers: Vec::new(),
        labels: Vec::new(),
    };

    for (index, year) in layout.years.iter().enumerate() {
        build_year(
            commands,
            meshes,
            assets,
            &palette,
            root,
            index,
            year,
            label_camera,
            &mut built,
        );
    }

    built
}

#[allow(clippy::too_many_arguments)]
fn build_year(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    assets: &mut SceneAssets,
    palette: &TreePalette,
    root: Entity,
    index: usize,
    year: &YearLayout,
    label_camera: Option<Entity>,
    built: &mut BuiltForest,
) {
    let segment_mesh = assets.mesh(
        meshes,
        ConicalFrustum {
            radius_top: year.segment.radius_top,
            radius_bottom: year.segment.radius_bottom,
            height: year.segment.height,
        },
    );
    let segment = commands
        .spawn((
            TrunkSegment {
                index,
                year: year.year.clone(),
            },
            Name::new(format!("Trunk {}", year.year)),
            Mesh3d(segment_mesh),
            MeshMaterial3d(palette.trunk.clone()),
            Transform::from_translation(year.segment.translation),
            ChildOf(root),
        ))
        .id();

    // Layout places branches relative to the root; re-express under the segment.
    let branch_local = Transform::from_translation(year.branch.translation - year.segment.translation)
        .with_rotation(year.branch.rotation);
    let branch = commands
        .spawn((
            BranchGroup {
                index,
                year: year.year.clone(),
            },
            Name::new(format!("Branch {}", year.year)),
            branch_local,
            Visibility::default(),
            ChildOf(segment),
        ))
        .id();

    commands.spawn((
        Decoration,
        Mesh3d(palette.branch_mesh.clone()),
        MeshMaterial3d(palette.branch.clone()),
        Transform::from_xyz(0.0, BRANCH_LENGTH * 0.5, 0.0),
        ChildOf(branch),
    ));

    let anchor = commands
        .spawn((
            YearLabelAnchor {
                year: year.year.clone(),
            },
            Transform::from_translation(year.label_anchor),
            ChildOf(branch),
        ))
        .id();
    if let Some(camera) = label_camera {
        built
            .labels
            .push(spawn_year_label(commands, anchor, camera, &year.year));
    }

    for marker in &year.markers {
        let entity = commands
            .spawn((
                Marker {
                    record_id: marker.record_id,
                },
                Name::new(format!("Memory {}", marker.record_id.0)),
                Mesh3d(palette.marker_mesh.clone()),
                MeshMaterial3d(palette.marker_material(&marker.feeling)),
                Transform::from_translation(marker.translation),
                ChildOf(branch),
            ))
            .id();

        commands.spawn((
            Decoration,
            Mesh3d(palette.stem_mesh.clone()),
            MeshMaterial3d(palette.stem.clone()),
            Transform::from_xyz(0.0, -STEM_HEIGHT * 0.5, 0.0),
            ChildOf(entity),
        ));

        built.markers.push(PickableMarker {
            entity,
            record_id: marker.record_id,
            base_scale: Vec3::ONE,
            radius: MARKER_RADIUS,
        });
    }
}
