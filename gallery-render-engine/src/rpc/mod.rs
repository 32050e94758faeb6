//! JSON-RPC 2.0 communication layer for the host page.
//!
//! Implements bidirectional messaging between the Bevy engine and the page that
//! embeds it (iframe `postMessage`), supporting both request-response and
//! notification patterns.
//!
//! ## Architecture
//!
//! The RPC system uses standard JSON-RPC 2.0 protocol with:
//! - **Requests**: Expect responses with matching IDs
//! - **Notifications**: One-way messages without responses
//! - **Responses**: Reply to requests with results or errors
//!
//! ## Message Flow
//!
//! ```text
//! Host (Parent Window)   <──postMessage──>  Bevy (iframe)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │                                        ├─ Process request
//!        │ <───────────────── Response (with ID) ─┤
//!        │                                        │
//!        │ <────────── Notification (no ID) ─────┤
//! ```
//!
//! Messages that arrive before the config and catalog are resolved stay queued
//! and are handled on the first running frame. `engine_ready` marks that point.
//!
//! ## Sending Notifications from Bevy
//!
//! Use `WebRpcInterface::send_notification()` to push updates to the host:
//!
//! ```rust,ignore
//! fn your_system(mut rpc: ResMut<WebRpcInterface>) {
//!     rpc.send_notification("event_name", json!({
//!         "data": "value"
//!     }));
//! }
//! ```
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32700`: Parse error
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//! - `-32603`: Internal error
//!
//! ## Existing Methods
//!
//! ### Catalog
//! - `get_gallery`: Current records in catalog order
//! - `set_gallery`: Replace the catalog with `{ images: [...] }` (ids must be unique)
//! - `append_artwork`: Append `{ image, width?, height? }`, returns the new record
//! - `clear_gallery`: Remove every record
//!
//! ### Layout and Viewpoint
//! - `get_layout`: Back wall depth, slot count and every slot with its artwork
//! - `get_viewpoint`: Pose, targets and travel bounds
//!
//! ### Diagnostics
//! - `get_fps`: Retrieve current frame rate
//!
//! ## Notifications
//!
//! - `engine_ready`: Loading finished, requests are now served
//! - `layout_changed`: The corridor or what hangs in it changed
//! - `artwork_load_failed`: An artwork is shown as a placeholder
//! - `fps_update`: Smoothed frame rate, every half second

/// JSON-RPC 2.0 bidirectional communication system for host integration.
///
/// Handles request-response patterns, notifications, and WASM message listeners.
pub mod web_rpc;
