use bevy::diagnostic::DiagnosticsStore;
use bevy::prelude::*;
use gallery_catalog::{ArtworkRecord, Catalog};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::engine::assets::catalog_asset::GalleryCatalog;
use crate::engine::camera::ViewpointController;
use crate::engine::core::app_state::{AppState, GallerySet};
use crate::engine::layout::{CorridorLayout, GalleryPlacements, LayoutChanged, Placement};
use crate::engine::scene::artwork::ArtworkLoadFailed;
use crate::engine::systems::fps_tracking::smoothed_fps;

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
    pub params: Value,
    pub id: Option<Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<Value>,
    pub error: Option<RpcError>,
    pub id: Option<Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<Value>,
}

/// Resource managing bidirectional RPC communication between the host and Bevy.
/// Handles both request-response patterns and notification broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host without expecting response.
    pub fn send_notification(&mut self, method: &str, params: Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Queue response for transmission to the host.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing WebRPC communication layer for iframe-based deployment.
///
/// Requests are only read once the gallery is running; until then they wait in
/// the message queue. Outgoing messages are flushed every frame.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(OnEnter(AppState::Running), notify_engine_ready)
            .add_systems(
                Update,
                (process_incoming_messages, handle_rpc_messages)
                    .chain()
                    .before(GallerySet::Layout)
                    .run_if(in_state(AppState::Running)),
            )
            .add_systems(
                Update,
                (
                    forward_gallery_notifications.run_if(in_state(AppState::Running)),
                    send_outgoing_messages,
                )
                    .chain()
                    .after(GallerySet::Scene),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

/// Keeps the window `message` listener registered for as long as the resource
/// lives, and unregisters it on drop.
#[cfg(target_arch = "wasm32")]
struct MessageListener {
    closure: Closure<dyn FnMut(MessageEvent)>,
}

#[cfg(target_arch = "wasm32")]
impl Drop for MessageListener {
    fn drop(&mut self) {
        if let Some(window) = window() {
            if let Err(e) = window
                .remove_event_listener_with_callback("message", self.closure.as_ref().unchecked_ref())
            {
                warn!("Failed to remove message listener: {:?}", e);
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(world: &mut World) {
    use std::sync::{Arc, Mutex};

    // Thread-safe message queue for cross-thread communication.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        // Filter messages to ensure they contain string data.
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    let Some(window) = window() else {
        error!("Window object not available, RPC disabled");
        return;
    };
    if let Err(e) =
        window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
    {
        error!("Failed to register message listener: {:?}", e);
        return;
    }

    world.insert_non_send_resource(MessageListener { closure });
    world.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing incoming RPC message from the host.
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

/// Read-only gallery state the query methods report on.
struct GalleryView<'a> {
    layout: &'a CorridorLayout,
    placements: &'a [Placement],
    controller: &'a ViewpointController,
    diagnostics: &'a DiagnosticsStore,
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut catalog: ResMut<GalleryCatalog>,
    layout: Res<CorridorLayout>,
    placements: Res<GalleryPlacements>,
    controller: Res<ViewpointController>,
    diagnostics: Res<DiagnosticsStore>,
) {
    let view = GalleryView {
        layout: &layout,
        placements: &placements,
        controller: &controller,
        diagnostics: &diagnostics,
    };

    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                if let Some(response) = handle_rpc_request(&request, &view, &mut catalog) {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("Unparsable RPC message: {parse_error}");
                rpc_interface.queue_response(create_error_response(
                    Value::Null,
                    -32700,
                    "Parse error",
                    Some(json!({"detail": parse_error.to_string()})),
                ));
            }
        }
    }
}

/// Handle individual RPC request and generate response based on method.
///
/// Notifications (no id) are executed but never answered. The catalog is only
/// borrowed mutably once a mutating call has valid params, so queries and
/// rejected calls leave it unchanged for the layout systems.
fn handle_rpc_request(
    request: &RpcRequest,
    view: &GalleryView,
    catalog: &mut ResMut<GalleryCatalog>,
) -> Option<RpcResponse> {
    let result = match request.method.as_str() {
        "get_gallery" => handle_get_gallery(&catalog.0),
        "set_gallery" => parse_set_gallery(&request.params).map(|replacement| {
            let count = replacement.len();
            catalog.0 = replacement;
            info!("Gallery replaced over RPC: {count} artworks");
            json!({ "success": true, "artwork_count": count })
        }),
        "append_artwork" => parse_append_artwork(&request.params).and_then(|record| {
            // Checked through a shared borrow so a full catalog is not marked changed.
            catalog.next_id().map_err(|e| RpcError::internal_error(&e.to_string()))?;
            let record = catalog
                .append_record(record)
                .map_err(|e| RpcError::internal_error(&e.to_string()))?;
            info!("Artwork #{} appended over RPC", record.id);
            Ok(json!({ "success": true, "record": record }))
        }),
        "clear_gallery" => {
            let cleared = catalog.len();
            if cleared > 0 {
                catalog.clear();
                info!("Gallery cleared over RPC: {cleared} artworks removed");
            }
            Ok(json!({ "success": true, "cleared": cleared }))
        }
        "get_layout" => Ok(handle_get_layout(view.layout, view.placements)),
        "get_viewpoint" => Ok(handle_get_viewpoint(view.controller)),
        "get_fps" => Ok(handle_get_fps(view.diagnostics)),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return request.id.clone().map(|id| {
                create_error_response(
                    id,
                    -32601,
                    "Method not found",
                    Some(json!({"method": request.method})),
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

fn handle_get_gallery(catalog: &Catalog) -> Result<Value, RpcError> {
    serde_json::to_value(catalog)
        .map_err(|e| RpcError::internal_error(&format!("Failed to serialise catalog: {e}")))
}

/// Validate a replacement catalog. Ids must be unique because artwork entities
/// are keyed by them.
fn parse_set_gallery(params: &Value) -> Result<Catalog, RpcError> {
    #[derive(Deserialize)]
    struct SetGalleryParams {
        images: Vec<ArtworkRecord>,
    }

    let parsed = serde_json::from_value::<SetGalleryParams>(params.clone())
        .map_err(|e| RpcError::invalid_params(&format!("Expected 'images' array: {e}")))?;

    let replacement = Catalog::from_records(parsed.images);
    replacement
        .validate()
        .map_err(|e| RpcError::invalid_params(&e.to_string()))?;
    Ok(replacement)
}

fn parse_append_artwork(params: &Value) -> Result<ArtworkRecord, RpcError> {
    #[derive(Deserialize)]
    struct AppendArtworkParams {
        image: String,
        width: Option<u32>,
        height: Option<u32>,
    }

    let parsed = serde_json::from_value::<AppendArtworkParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'image' parameter"))?;
    if parsed.image.trim().is_empty() {
        return Err(RpcError::invalid_params("'image' must not be empty"));
    }

    let mut record = ArtworkRecord::new(0, parsed.image);
    record.width = parsed.width;
    record.height = parsed.height;
    Ok(record)
}

fn handle_get_layout(layout: &CorridorLayout, placements: &[Placement]) -> Value {
    let slots: Vec<Value> = layout
        .slots
        .iter()
        .map(|slot| {
            let placement = placements.get(slot.sequence_index);
            json!({
                "index": slot.sequence_index,
                "position": slot.position.to_array(),
                "facing": slot.facing,
                "wall": slot.wall_side.as_str(),
                "record_id": placement.map(|p| p.record.id),
                "hung_at": placement.map(|p| p.position.to_array()),
                "legacy": placement.is_some_and(Placement::is_legacy),
            })
        })
        .collect();

    json!({
        "back_wall_depth": layout.back_wall_depth,
        "length": layout.length(),
        "depth_steps": layout.depth_steps(),
        "deepest_slot_depth": layout.deepest_slot_depth(),
        "slot_count": layout.slot_count(),
        "artwork_count": placements.len(),
        "slots": slots,
    })
}

fn handle_get_viewpoint(controller: &ViewpointController) -> Value {
    let pose = controller.pose();
    let state = controller.state();
    let bounds = controller.bounds();

    json!({
        "position": pose.position.to_array(),
        "look_target": pose.look_target.to_array(),
        "target_depth": state.target_depth,
        "yaw": state.smoothed_yaw,
        "pitch": state.smoothed_pitch,
        "yaw_target": state.yaw_target,
        "pitch_target": state.pitch_target,
        "bounds": {
            "min_depth": bounds.min_depth,
            "max_depth": bounds.max_depth,
        },
        "in_bounds": bounds.contains(pose.position.z),
        "touching": controller.gesture().is_touching(),
    })
}

/// Handle FPS retrieval with diagnostic system integration.
fn handle_get_fps(diagnostics: &DiagnosticsStore) -> Value {
    json!({
        "fps": smoothed_fps(diagnostics).unwrap_or(0.0)
    })
}

fn notify_engine_ready(
    catalog: Res<GalleryCatalog>,
    layout: Res<CorridorLayout>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    rpc_interface.send_notification(
        "engine_ready",
        json!({
            "artwork_count": catalog.len(),
            "back_wall_depth": layout.back_wall_depth,
        }),
    );
}

fn forward_gallery_notifications(
    mut layout_changes: EventReader<LayoutChanged>,
    mut load_failures: EventReader<ArtworkLoadFailed>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for change in layout_changes.read() {
        rpc_interface.send_notification(
            "layout_changed",
            json!({
                "back_wall_depth": change.back_wall_depth,
                "slot_count": change.slot_count,
                "artwork_count": change.artwork_count,
            }),
        );
    }

    for failure in load_failures.read() {
        rpc_interface.send_notification(
            "artwork_load_failed",
            json!({
                "id": failure.record_id,
                "image": failure.image,
                "reason": failure.reason,
            }),
        );
    }
}

/// Create standardized error response with optional data payload.
fn create_error_response(
    id: Value,
    code: i32,
    message: &str,
    data: Option<Value>,
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

/// Send queued notifications and responses to the host.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    if rpc_interface.outgoing_notifications.is_empty() && rpc_interface.outgoing_responses.is_empty()
    {
        return;
    }

    // Send notifications first.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    // Send responses second to maintain order.
    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to parent window (host page).
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

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}
