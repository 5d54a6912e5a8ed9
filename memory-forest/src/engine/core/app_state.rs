use bevy::prelude::*;

use super::lifecycle::ForestLifecycleRequest;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    /// Waiting for the seed memories asset.
    #[default]
    Loading,
    Running,
}

// Mount the forest once seed data is in place
pub fn request_forest_mount(mut requests: EventWriter<ForestLifecycleRequest>) {
    info!("→ Seed memories ready, mounting forest");
    requests.write(ForestLifecycleRequest::Mount);
}
