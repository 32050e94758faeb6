//! First-person viewpoint for the gallery corridor.
//!
//! Input devices are sampled into per-device channels, fused once per frame by the
//! viewpoint controller, and the resulting pose is written to the camera.

/// Viewpoint controller: depth travel, look direction and their smoothing.
pub mod controller;

/// Touch drag and pinch arbitration.
pub mod gesture;

/// Input samples, channels and the systems that fill them.
pub mod input;

/// Camera entity, per-frame viewpoint systems and the plugin wiring them up.
pub mod viewport_camera;

pub use controller::{TravelBounds, ViewpointConfig, ViewpointController, ViewpointPose};
pub use viewport_camera::{GalleryCamera, ViewpointPlugin};
