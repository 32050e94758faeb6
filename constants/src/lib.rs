//! Deployment constants shared by the gallery crates.
//!
//! Values here are the compiled-in defaults. The render engine can override the
//! corridor and viewpoint groups at startup from `gallery.config.json`.

/// Corridor geometry and slot placement.
pub mod corridor;

/// Colours, sizes and lighting for the rendered corridor.
pub mod render_settings;

/// First-person viewpoint tuning: travel, look limits and smoothing rates.
pub mod viewpoint;
