//! Lights, ground, grid and star field around the tree
use std::collections::hash_map::DefaultHasher;
use std::f32::consts::PI;
use std::hash::{Hash, Hasher};

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::view::NoFrustumCulling;
use constants::forest_layout::{
    GRID_DIVISIONS, GRID_LIFT, GROUND_SIZE, STAR_COUNT, STAR_SHELL_INNER, STAR_SHELL_OUTER,
    TREE_ROOT_Y,
};
use constants::palette;

use super::builder::{Decoration, SceneAssets};
use crate::constants::render_settings::{
    SPOT_INTENSITY, SPOT_POSITION, SUN_ILLUMINANCE, SUN_POSITION,
};

/// Spawns everything except the tree and returns the spawned entities.
pub fn spawn_environment(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    assets: &mut SceneAssets,
) -> Vec<Entity> {
    let mut entities = Vec::with_capacity(5);

    entities.push(
        commands
            .spawn((
                Decoration,
                Name::new("Sun"),
                DirectionalLight {
                    illuminance: SUN_ILLUMINANCE,
                    shadows_enabled: true,
                    ..default()
                },
                Transform::from_translation(SUN_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
            ))
            .id(),
    );

    entities.push(
        commands
            .spawn((
                Decoration,
                Name::new("Canopy glow"),
                SpotLight {
                    color: palette::SPOT_LIGHT,
                    intensity: SPOT_INTENSITY,
                    range: 40.0,
                    outer_angle: PI / 3.0,
                    ..default()
                },
                Transform::from_translation(SPOT_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
            ))
            .id(),
    );

    let ground_mesh = assets.mesh(meshes, Plane3d::default().mesh().size(GROUND_SIZE, GROUND_SIZE));
    let ground_material = assets.material(
        materials,
        StandardMaterial {
            base_color: palette::GROUND,
            alpha_mode: AlphaMode::Blend,
            perceptual_roughness: 1.0,
            ..default()
        },
    );
    entities.push(
        commands
            .spawn((
                Decoration,
                Name::new("Ground"),
                Mesh3d(ground_mesh),
                MeshMaterial3d(ground_material),
                Transform::from_xyz(0.0, TREE_ROOT_Y, 0.0),
            ))
            .id(),
    );

    let grid_mesh = assets.mesh(meshes, create_grid_mesh(GROUND_SIZE, GRID_DIVISIONS));
    let grid_material = assets.material(
        materials,
        StandardMaterial {
            base_color: palette::GRID_LINE,
            unlit: true,
            ..default()
        },
    );
    entities.push(
        commands
            .spawn((
                Decoration,
                Name::new("Grid"),
                Mesh3d(grid_mesh),
                MeshMaterial3d(grid_material),
                NoFrustumCulling,
                Transform::from_xyz(0.0, TREE_ROOT_Y + GRID_LIFT, 0.0),
            ))
            .id(),
    );

    let star_mesh = assets.mesh(meshes, create_star_mesh(STAR_COUNT));
    let star_material = assets.material(
        materials,
        StandardMaterial {
            base_color: palette::STAR,
            unlit: true,
            fog_enabled: false,
            ..default()
        },
    );
    entities.push(
        commands
            .spawn((
                Decoration,
                Name::new("Stars"),
                Mesh3d(star_mesh),
                MeshMaterial3d(star_material),
                NoFrustumCulling,
                Transform::IDENTITY,
            ))
            .id(),
    );

    entities
}

/// Square grid of `divisions` cells per side centred on the origin, in the XZ plane
fn create_grid_mesh(size: f32, divisions: u32) -> Mesh {
    let half = size * 0.5;
    let step = size / divisions as f32;

    let mut vertices = Vec::with_capacity((divisions as usize + 1) * 4);
    for i in 0..=divisions {
        let offset = -half + i as f32 * step;
        // Line running along Z at fixed X
        vertices.push([offset, 0.0, -half]);
        vertices.push([offset, 0.0, half]);
        // Line running along X at fixed Z
        vertices.push([-half, 0.0, offset]);
        vertices.push([half, 0.0, offset]);
    }
    let indices: Vec<u32> = (0..vertices.len() as u32).collect();

    let mut mesh = Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::RENDER_WORLD);
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, vertices);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

/// Points spread over a spherical shell using a Fibonacci spiral, with a
/// per-star radius between the inner and outer shell
fn create_star_mesh(count: u32) -> Mesh {
    let golden_angle = PI * (3.0 - 5.0_f32.sqrt());

    let vertices: Vec<[f32; 3]> = (0..count)
        .map(|i| {
            let y = 1.0 - 2.0 * (i as f32 + 0.5) / count as f32;
            let ring = (1.0 - y * y).sqrt();
            let theta = golden_angle * i as f32;
            let radius = STAR_SHELL_INNER + (STAR_SHELL_OUTER - STAR_SHELL_INNER) * unit_hash(i);
            [ring * theta.cos() * radius, y * radius, ring * theta.sin() * radius]
        })
        .collect();

    let mut mesh = Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::RENDER_WORLD);
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, vertices);
    mesh
}

fn unit_hash(value: u32) -> f32 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    (hasher.finish() & 0xFFFF) as f32 / 0xFFFF as f32
}
