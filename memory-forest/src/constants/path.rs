/// Seed record collection, relative to the asset root.
pub const SEED_MEMORIES_PATH: &str = "memories.json";

/// Canvas the wasm build renders into.
pub const CANVAS_SELECTOR: &str = "#memory-forest";
