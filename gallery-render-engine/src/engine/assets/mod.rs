//! JSON asset types loaded at startup.
//!
//! Both documents are registered with `bevy_common_assets` under their own
//! extension so the two loaders never compete for the same file.

/// Artwork catalog document (`*.gallery.json`) and the live catalog resource.
pub mod catalog_asset;

/// Deployment configuration (`*.config.json`).
pub mod gallery_config;
