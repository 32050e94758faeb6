use bevy::prelude::*;

#[derive(Resource, Debug, Default)]
pub struct LoadingProgress {
    pub config_resolved: bool,
    pub catalog_resolved: bool,
}

impl LoadingProgress {
    pub fn is_complete(&self) -> bool {
        self.config_resolved && self.catalog_resolved
    }
}
