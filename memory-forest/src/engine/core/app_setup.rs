use bevy::asset::AssetMetaCheck;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::palette::{AMBIENT_LIGHT, BACKGROUND};

// Crate engine modules
use crate::constants::render_settings::{AMBIENT_BRIGHTNESS, FREE_PAN_SETTINGS, ORBIT_SETTINGS};
use crate::engine::camera::free_pan::{FreePan, track_pan_keys};
use crate::engine::camera::orbit_camera::{OrbitCamera, orbit_camera_controller};
use crate::engine::core::app_state::{AppState, request_forest_mount};
use crate::engine::core::lifecycle::{
    ForestBuilt, ForestLifecycle, ForestLifecycleRequest, forest_is_live,
    handle_lifecycle_requests, rebuild_on_data_change, teardown_on_window_close,
};
use crate::engine::core::window_config::create_window_config;
use crate::engine::memories::record::MemoryRecords;
use crate::engine::memories::seed::{MemorySeed, SeedLoader, load_seed_memories, start_seed_loading};
use crate::engine::scene::labels::position_year_labels;
// Crate tools modules
use crate::tools::marker_picking::{
    pointer::capture_pointer_input,
    selection::{apply_pointer_affordance, resolve_marker_click, resolve_marker_hover},
    state::{HoverState, MemorySelected, PickableRegistry, PointerLatch},
};
// Web RPC
use crate::rpc::web_rpc::WebRpcPlugin;

/// Per-frame ordering of forest systems.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ForestSet {
    /// Mount, rebuild and teardown.
    Lifecycle,
    /// Raw pointer and keyboard input latched into resources.
    Input,
    /// Camera update, picking and label placement.
    Frame,
    /// Cursor icon, applied after hover settles.
    Affordance,
}

/// Everything the forest needs except windowing, rendering and asset IO.
pub struct ForestPlugin;

impl Plugin for ForestPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MemoryRecords>()
            .init_resource::<PickableRegistry>()
            .init_resource::<HoverState>()
            .init_resource::<PointerLatch>()
            .init_resource::<ForestLifecycle>()
            .insert_resource(OrbitCamera::new(ORBIT_SETTINGS))
            .insert_resource(FreePan::new(FREE_PAN_SETTINGS))
            .insert_resource(ClearColor(BACKGROUND))
            .insert_resource(AmbientLight {
                color: AMBIENT_LIGHT,
                brightness: AMBIENT_BRIGHTNESS,
                ..default()
            })
            .add_event::<ForestLifecycleRequest>()
            .add_event::<ForestBuilt>()
            .add_event::<MemorySelected>();

        app.configure_sets(
            Update,
            (
                ForestSet::Lifecycle,
                ForestSet::Input.run_if(forest_is_live),
                ForestSet::Frame.run_if(forest_is_live),
                ForestSet::Affordance,
            )
                .chain(),
        );

        app.add_systems(
            Update,
            (
                (
                    handle_lifecycle_requests,
                    rebuild_on_data_change,
                    teardown_on_window_close,
                )
                    .chain()
                    .in_set(ForestSet::Lifecycle),
                (capture_pointer_input, track_pan_keys).in_set(ForestSet::Input),
                (
                    orbit_camera_controller,
                    resolve_marker_hover,
                    resolve_marker_click,
                    position_year_labels,
                )
                    .chain()
                    .in_set(ForestSet::Frame),
                apply_pointer_affordance.in_set(ForestSet::Affordance),
            ),
        );
    }
}

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        // Registers MemorySeed as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<MemorySeed>::new(&["json"]))
        .add_plugins(ForestPlugin)
        .add_plugins(WebRpcPlugin)
        .init_resource::<SeedLoader>();

    // State-based system scheduling
    app.add_systems(Startup, start_seed_loading)
        .add_systems(
            Update,
            load_seed_memories.run_if(in_state(AppState::Loading)),
        )
        .add_systems(OnEnter(AppState::Running), request_forest_mount);

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        filter: "wgpu=error,naga=warn,memory_forest=debug".to_string(),
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
