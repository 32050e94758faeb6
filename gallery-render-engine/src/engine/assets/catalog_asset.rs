use bevy::prelude::*;
use gallery_catalog::Catalog;
use serde::{Deserialize, Serialize};

/// The artwork catalog, both as the loaded JSON asset and as the live resource the
/// layout follows. Host edits over RPC mutate the resource; the asset is only read
/// once at startup.
#[derive(
    Asset, TypePath, Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, Deref, DerefMut,
)]
#[serde(transparent)]
pub struct GalleryCatalog(pub Catalog);
