//! Artwork catalog for the corridor gallery.
//!
//! The catalog is an ordered list of uploaded artwork records. Order is insertion
//! order and is the only ordering the layout cares about: the n-th record hangs in
//! the n-th slot of the corridor.
//!
//! With the `store` feature the catalog is persisted as a JSON document next to an
//! `uploads/` directory, which is also the asset root the render engine loads from.

pub mod catalog;
pub mod error;
pub mod legacy;
pub mod record;

#[cfg(feature = "store")]
pub mod store;

pub use catalog::{CATALOG_PATH, Catalog, UPLOADS_DIR};
pub use error::RecordError;
pub use legacy::LegacyPlacementRule;
pub use record::{ArtworkRecord, WallSide};

#[cfg(feature = "store")]
pub use error::CatalogError;
#[cfg(feature = "store")]
pub use store::CatalogStore;
