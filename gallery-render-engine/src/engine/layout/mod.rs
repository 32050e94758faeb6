//! Procedural corridor layout.
//!
//! Turns the catalog length into a corridor with strictly more wall slots than
//! artworks, then pairs catalog records with slots in order. Both steps are pure;
//! the Bevy systems in [`systems`] rerun them whenever the catalog or the corridor
//! configuration changes.

/// Corridor tuning values and their validation.
pub mod config;

/// Slot generation and the growth loop that keeps capacity ahead of the catalog.
pub mod corridor;

/// Pairing of catalog records with generated slots.
pub mod assignment;

/// Layout and capacity errors.
pub mod error;

/// Catalog-driven layout regeneration.
pub mod systems;

pub use assignment::{Placement, assign, assign_or_truncate};
pub use config::CorridorConfig;
pub use corridor::{CorridorLayout, LayoutGenerator, Slot};
pub use error::{CapacityError, LayoutError};
pub use systems::{GalleryPlacements, LayoutChanged, regenerate_layout};
