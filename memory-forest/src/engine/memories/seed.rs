use bevy::asset::LoadState;
use bevy::prelude::*;
use serde::Deserialize;

use super::record::{MemoryRecord, MemoryRecords};
use crate::constants::path::SEED_MEMORIES_PATH;
use crate::engine::core::app_state::AppState;

/// Initial record collection shipped with the app.
#[derive(Asset, TypePath, Debug, Clone, Deserialize)]
pub struct MemorySeed {
    pub memories: Vec<MemoryRecord>,
}

#[derive(Resource, Default)]
pub struct SeedLoader {
    handle: Option<Handle<MemorySeed>>,
}

pub fn start_seed_loading(mut loader: ResMut<SeedLoader>, asset_server: Res<AssetServer>) {
    info!("Loading seed memories from {}", SEED_MEMORIES_PATH);
    loader.handle = Some(asset_server.load(SEED_MEMORIES_PATH));
}

/// Move the seed into [`MemoryRecords`] once it resolves. A missing or broken
/// seed file leaves the forest empty rather than stalling in `Loading`.
pub fn load_seed_memories(
    loader: Res<SeedLoader>,
    seeds: Res<Assets<MemorySeed>>,
    asset_server: Res<AssetServer>,
    mut memories: ResMut<MemoryRecords>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Some(handle) = loader.handle.as_ref() else {
        next_state.set(AppState::Running);
        return;
    };

    if let Some(seed) = seeds.get(handle) {
        match memories.replace(seed.memories.clone()) {
            Ok(()) => info!("Seed loaded with {} memories", seed.memories.len()),
            Err(duplicate) => warn!("Seed memories rejected, starting empty: {}", duplicate),
        }
        next_state.set(AppState::Running);
        return;
    }

    if let LoadState::Failed(err) = asset_server.load_state(handle) {
        warn!("Seed memories unavailable, starting empty: {}", err);
        next_state.set(AppState::Running);
    }
}
