use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::camera::controller::{ViewpointConfig, ViewpointConfigError};
use crate::engine::layout::{CorridorConfig, LayoutError};

/// Startup configuration read from `gallery.config.json`. Both groups and every
/// field inside them are optional.
#[derive(Asset, TypePath, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub corridor: CorridorConfig,
    pub viewpoint: ViewpointConfig,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GalleryConfigError {
    #[error("corridor: {0}")]
    Corridor(#[from] LayoutError),

    #[error("viewpoint: {0}")]
    Viewpoint(#[from] ViewpointConfigError),
}

impl GalleryConfig {
    pub fn validate(&self) -> Result<(), GalleryConfigError> {
        self.corridor.validate()?;
        self.viewpoint.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config: GalleryConfig = serde_json::from_str("{}").unwrap();

        assert_eq!(config, GalleryConfig::default());
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_reports_failing_group() {
        let config: GalleryConfig =
            serde_json::from_str(r#"{"viewpoint": {"look_radius": -1.0}}"#).unwrap();

        assert!(matches!(
            config.validate(),
            Err(GalleryConfigError::Viewpoint(_))
        ));
    }
}
