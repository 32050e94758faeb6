//! Scene composition.
//!
//! Corridor geometry and hung artwork follow the current layout by updating the
//! entities already in the world. Nothing is torn down and rebuilt wholesale when
//! the corridor grows.

/// Floor, walls and ceiling stretched to the corridor's extent.
pub mod corridor_geometry;

/// Artwork entities keyed by record id, load failure handling and the proximity
/// highlight.
pub mod artwork;
