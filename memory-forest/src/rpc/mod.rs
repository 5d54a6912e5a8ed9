//! JSON-RPC 2.0 bridge between the forest and its host page.
//!
//! On wasm32 the engine listens for `postMessage` events on the page window
//! and answers through the parent window; on native targets the transport is
//! a no-op and only the request handlers run.
//!
//! ## Message Flow
//!
//! ```text
//! Host page                          Bevy
//!    │                                 │
//!    ├─ Request (with ID) ───────────> │ handle_rpc_request()
//!    │                                 ├─ MemoryRecords / ForestLifecycleRequest
//!    │ <──────────── Response (same ID)┤
//!    │                                 │
//!    │ <──── Notification (no ID) ─────┤ forward_forest_events()
//! ```
//!
//! Requests without an `id` are applied but never answered.
//!
//! ## Adding Methods
//!
//! Handlers take the decoded params plus whatever state they touch, and
//! return `Result<Value, RpcError>`:
//!
//! ```rust,ignore
//! fn handle_rename_memory(
//!     params: &Value,
//!     records: &mut MemoryRecords,
//! ) -> Result<Value, RpcError> {
//!     #[derive(Deserialize)]
//!     struct RenameParams {
//!         id: RecordId,
//!         title: String,
//!     }
//!
//!     let parsed = serde_json::from_value::<RenameParams>(params.clone())
//!         .map_err(|_| RpcError::invalid_params("Expected 'id' and 'title'"))?;
//!     // ...
//!     Ok(json!({ "success": true }))
//! }
//! ```
//!
//! then add a match arm in `handle_rpc_request()`.
//!
//! ## Error Handling
//!
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//!
//! ## Existing Methods
//!
//! ### Memory Data
//! - `set_memories`: Replace the record snapshot (`{ memories: [...] }`), forest rebuilds
//! - `add_memory`: Plant one memory (`{ title, date, feeling | type, image }`), returns `{ id }`
//! - `get_year_bins`: Current `[{ year, count }]` in trunk order
//!
//! ### Forest Lifecycle
//! - `mount_forest`: Build the scene onto the primary window (no-op when mounted)
//! - `unmount_forest`: Tear the scene down and release its GPU assets
//!
//! ## Notifications
//!
//! - `memory_selected`: `{ record }` once per click on a marker
//! - `forest_built`: `{ years, markers }` after every mount or rebuild

/// JSON-RPC 2.0 bidirectional communication system for React integration.
///
/// Handles request-response patterns, notifications, and WASM message listeners.
pub mod web_rpc;
