use crate::engine::core::lifecycle::{ForestBuilt, ForestLifecycleRequest};
use crate::engine::memories::binning::bin_records;
use crate::engine::memories::record::{MemoryDraft, MemoryRecord, MemoryRecords};
use crate::tools::marker_picking::state::MemorySelected;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Outgoing traffic to the host page, flushed once per frame.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Queue a one-way notification for the host page.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Message listener, request dispatch and notification forwarding.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    forward_forest_events,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            // Cheap pre-filter; full parsing happens in handle_rpc_messages.
            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        if let Err(e) =
            window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
        {
            error!("Failed to register message listener: {:?}", e);
        }
    }

    // The listener lives as long as the page.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Raw JSON strings captured by the page listener.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// One raw message drained from the page queue.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut records: ResMut<MemoryRecords>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut lifecycle_events: EventWriter<ForestLifecycleRequest>,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                debug!("Processing RPC method: {}", request.method);

                let mut lifecycle_requests = Vec::new();
                if let Some(response) =
                    handle_rpc_request(&request, &mut records, &mut lifecycle_requests)
                {
                    rpc_interface.queue_response(response);
                }
                lifecycle_events.write_batch(lifecycle_requests);
            }
            Err(parse_error) => {
                warn!("Discarding malformed RPC message: {}", parse_error);
            }
        }
    }
}

/// Handle individual RPC request and generate response based on method.
///
/// Notifications (no `id`) are still applied but produce no response.
fn handle_rpc_request(
    request: &RpcRequest,
    records: &mut MemoryRecords,
    lifecycle_requests: &mut Vec<ForestLifecycleRequest>,
) -> Option<RpcResponse> {
    let result = match request.method.as_str() {
        "set_memories" => handle_set_memories(&request.params, records),
        "add_memory" => handle_add_memory(&request.params, records),
        "get_year_bins" => handle_get_year_bins(records),
        "mount_forest" => {
            lifecycle_requests.push(ForestLifecycleRequest::Mount);
            Ok(serde_json::json!({ "success": true }))
        }
        "unmount_forest" => {
            lifecycle_requests.push(ForestLifecycleRequest::Unmount);
            Ok(serde_json::json!({ "success": true }))
        }
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return request.id.clone().map(|id| {
                create_error_response(
                    id,
                    -32601,
                    "Method not found",
                    Some(serde_json::json!({"method": request.method})),
                )
            });
        }
    };

    // Only generate responses for requests with IDs (notifications have no ID).
    let id = request.id.clone()?;

    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

/// Replace the whole record snapshot; the forest rebuilds on the next frame.
fn handle_set_memories(
    params: &serde_json::Value,
    records: &mut MemoryRecords,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct SetMemoriesParams {
        memories: Vec<MemoryRecord>,
    }

    let parsed = serde_json::from_value::<SetMemoriesParams>(params.clone())
        .map_err(|e| RpcError::invalid_params(&format!("Expected 'memories' array: {}", e)))?;

    let count = parsed.memories.len();
    records
        .replace(parsed.memories)
        .map_err(|duplicate| RpcError::invalid_params(&format!("Rejected snapshot: {}", duplicate)))?;
    info!("Memory snapshot replaced with {} records", count);

    Ok(serde_json::json!({
        "success": true,
        "count": count
    }))
}

/// Plant a new memory with the next free id.
fn handle_add_memory(
    params: &serde_json::Value,
    records: &mut MemoryRecords,
) -> Result<serde_json::Value, RpcError> {
    let draft = serde_json::from_value::<MemoryDraft>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'title' parameter"))?;

    if draft.title.trim().is_empty() {
        return Err(RpcError::invalid_params("Memory title must not be empty"));
    }

    let id = records
        .add(draft)
        .ok_or_else(|| RpcError::invalid_params("No memory id left above the current maximum"))?;
    info!("Memory {} added", id.0);

    Ok(serde_json::json!({ "id": id }))
}

fn handle_get_year_bins(records: &MemoryRecords) -> Result<serde_json::Value, RpcError> {
    let bins: Vec<serde_json::Value> = bin_records(records.records())
        .iter()
        .map(|bin| {
            serde_json::json!({
                "year": bin.year,
                "count": bin.records.len()
            })
        })
        .collect();

    Ok(serde_json::Value::Array(bins))
}

/// Push forest events to the frontend as notifications.
fn forward_forest_events(
    mut selected: EventReader<MemorySelected>,
    mut built: EventReader<ForestBuilt>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in built.read() {
        rpc_interface.send_notification(
            "forest_built",
            serde_json::json!({
                "years": event.years,
                "markers": event.markers
            }),
        );
    }

    for event in selected.read() {
        match serde_json::to_value(&event.record) {
            Ok(record) => {
                rpc_interface.send_notification("memory_selected", serde_json::json!({ "record": record }))
            }
            Err(e) => error!("Failed to serialise selected memory: {}", e),
        }
    }
}

/// Error response carrying the request id.
fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Flush queued notifications, then responses.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Post a serialised message to the parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        // No-op for non-WASM targets.
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::memories::record::RecordId;
    use serde_json::json;

    fn request(method: &str, params: serde_json::Value) -> RpcRequest {
        RpcRequest {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id: Some(json!(7)),
        }
    }

    fn call(
        records: &mut MemoryRecords,
        method: &str,
        params: serde_json::Value,
    ) -> (RpcResponse, Vec<ForestLifecycleRequest>) {
        let mut lifecycle = Vec::new();
        let response = handle_rpc_request(&request(method, params), records, &mut lifecycle).unwrap();
        (response, lifecycle)
    }

    #[test]
    fn set_memories_replaces_snapshot_and_bumps_revision() {
        let mut records = MemoryRecords::default();
        let before = records.revision();

        let (response, _) = call(
            &mut records,
            "set_memories",
            json!({ "memories": [
                { "id": 1, "title": "First Day", "date": "2023-02-15", "type": "happy" },
                { "id": 2, "title": "Rainy Goodbye", "feeling": "sad" }
            ]}),
        );

        assert_eq!(response.result, Some(json!({ "success": true, "count": 2 })));
        assert_eq!(records.len(), 2);
        assert_ne!(records.revision(), before);
    }

    #[test]
    fn add_memory_returns_next_id() {
        let mut records = MemoryRecords::default();
        call(
            &mut records,
            "set_memories",
            json!({ "memories": [{ "id": 4, "title": "Old" }] }),
        );

        let (response, _) = call(
            &mut records,
            "add_memory",
            json!({ "title": "Beach Trip", "date": "2023-07-04", "type": "happy" }),
        );

        assert_eq!(response.result, Some(json!({ "id": 5 })));
        assert_eq!(records.get(RecordId(5)).unwrap().title, "Beach Trip");
    }

    #[test]
    fn set_memories_rejects_repeated_ids() {
        let mut records = MemoryRecords::default();
        call(
            &mut records,
            "set_memories",
            json!({ "memories": [{ "id": 1, "title": "Kept" }] }),
        );

        let (response, _) = call(
            &mut records,
            "set_memories",
            json!({ "memories": [
                { "id": 7, "title": "Alpha", "date": "2023-01-01" },
                { "id": 7, "title": "Beta", "date": "2024-01-01" }
            ]}),
        );

        assert_eq!(response.error.unwrap().code, -32602);
        assert_eq!(records.len(), 1);
        assert_eq!(records.get(RecordId(1)).unwrap().title, "Kept");
    }

    #[test]
    fn add_memory_after_the_largest_id_is_invalid() {
        let mut records = MemoryRecords::default();
        call(
            &mut records,
            "set_memories",
            json!({ "memories": [{ "id": u64::MAX, "title": "Last" }] }),
        );

        let (response, _) = call(&mut records, "add_memory", json!({ "title": "Overflow" }));

        assert_eq!(response.error.unwrap().code, -32602);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn add_memory_rejects_empty_title() {
        let mut records = MemoryRecords::default();
        let (response, _) = call(&mut records, "add_memory", json!({ "title": "  " }));

        assert_eq!(response.error.unwrap().code, -32602);
        assert!(records.is_empty());
    }

    #[test]
    fn year_bins_are_reported_in_order() {
        let mut records = MemoryRecords::default();
        call(
            &mut records,
            "set_memories",
            json!({ "memories": [
                { "id": 1, "title": "a", "date": "2024-01-01" },
                { "id": 2, "title": "b" },
                { "id": 3, "title": "c", "date": "2023-05-05" },
                { "id": 4, "title": "d", "date": "2024-09-09" }
            ]}),
        );

        let (response, _) = call(&mut records, "get_year_bins", json!(null));

        assert_eq!(
            response.result,
            Some(json!([
                { "year": "2023", "count": 1 },
                { "year": "2024", "count": 2 },
                { "year": "Unknown", "count": 1 }
            ]))
        );
    }

    #[test]
    fn mount_and_unmount_become_lifecycle_requests() {
        let mut records = MemoryRecords::default();
        let (_, mount) = call(&mut records, "mount_forest", json!({}));
        let (_, unmount) = call(&mut records, "unmount_forest", json!({}));

        assert_eq!(mount, vec![ForestLifecycleRequest::Mount]);
        assert_eq!(unmount, vec![ForestLifecycleRequest::Unmount]);
    }

    #[test]
    fn unknown_methods_and_bad_params_are_errors() {
        let mut records = MemoryRecords::default();

        let (unknown, _) = call(&mut records, "grow_faster", json!({}));
        assert_eq!(unknown.error.unwrap().code, -32601);

        let (bad, _) = call(&mut records, "set_memories", json!({ "memories": 3 }));
        assert_eq!(bad.error.unwrap().code, -32602);
    }

    #[test]
    fn selected_memory_goes_back_with_its_original_feeling_tag() {
        let mut app = App::new();
        app.add_event::<MemorySelected>()
            .add_event::<ForestBuilt>()
            .init_resource::<WebRpcInterface>()
            .add_systems(Update, forward_forest_events);

        let record: MemoryRecord = serde_json::from_value(json!({
            "id": 3, "title": "Attic Box", "date": "2022-11-02", "feeling": "nostalgic"
        }))
        .unwrap();
        app.world_mut().send_event(MemorySelected { record });
        app.update();

        let interface = app.world().resource::<WebRpcInterface>();
        assert_eq!(interface.outgoing_notifications.len(), 1);
        let notification = &interface.outgoing_notifications[0];
        assert_eq!(notification.method, "memory_selected");
        assert_eq!(notification.params["record"]["feeling"], "nostalgic");
        assert_eq!(notification.params["record"]["id"], 3);
    }

    #[test]
    fn notifications_apply_without_a_response() {
        let mut records = MemoryRecords::default();
        let mut lifecycle = Vec::new();
        let notification = RpcRequest {
            id: None,
            ..request("add_memory", json!({ "title": "Quiet" }))
        };

        assert!(handle_rpc_request(&notification, &mut records, &mut lifecycle).is_none());
        assert_eq!(records.len(), 1);
    }
}
