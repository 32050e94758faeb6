use constants::corridor::{
    ARTWORK_HEIGHT, ARTWORK_WALL_OFFSET, MINIMUM_BACK_WALL_DEPTH, SLOT_SPACING, START_DEPTH,
    WALL_CLEARANCE, WALL_HALF_WIDTH,
};
use gallery_catalog::WallSide;
use serde::{Deserialize, Serialize};

use super::error::LayoutError;

/// Corridor tuning, fixed for a deployment. Every field falls back to the compiled-in
/// default when missing from `gallery.config.json`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorridorConfig {
    pub slot_spacing: f32,
    pub start_depth: f32,
    pub minimum_back_wall_depth: f32,
    pub wall_clearance: f32,
    pub wall_half_width: f32,
    pub artwork_wall_offset: f32,
    pub artwork_height: f32,
}

impl Default for CorridorConfig {
    fn default() -> Self {
        Self {
            slot_spacing: SLOT_SPACING,
            start_depth: START_DEPTH,
            minimum_back_wall_depth: MINIMUM_BACK_WALL_DEPTH,
            wall_clearance: WALL_CLEARANCE,
            wall_half_width: WALL_HALF_WIDTH,
            artwork_wall_offset: ARTWORK_WALL_OFFSET,
            artwork_height: ARTWORK_HEIGHT,
        }
    }
}

impl CorridorConfig {
    /// A zero-artwork corridor must still hold at least one slot row.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !self.slot_spacing.is_finite() || self.slot_spacing <= 0.0 {
            return Err(LayoutError::InvalidSpacing(self.slot_spacing));
        }
        if !self.wall_clearance.is_finite() || self.wall_clearance < 0.0 {
            return Err(LayoutError::InvalidClearance(self.wall_clearance));
        }

        let limit = self.minimum_back_wall_depth + self.wall_clearance;
        if !self.start_depth.is_finite() || !limit.is_finite() || self.start_depth <= limit {
            return Err(LayoutError::DegenerateCorridor {
                start_depth: self.start_depth,
                limit,
            });
        }
        Ok(())
    }

    /// Lateral coordinate of an artwork hung on `side`.
    pub fn artwork_x(&self, side: WallSide) -> f32 {
        side.lateral_sign() * (self.wall_half_width - self.artwork_wall_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(CorridorConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_bad_spacing() {
        for spacing in [0.0, -3.0, f32::NAN, f32::INFINITY] {
            let config = CorridorConfig {
                slot_spacing: spacing,
                ..default_config()
            };
            assert!(matches!(
                config.validate(),
                Err(LayoutError::InvalidSpacing(_))
            ));
        }
    }

    #[test]
    fn test_rejects_start_behind_back_wall() {
        let config = CorridorConfig {
            start_depth: -19.0,
            ..default_config()
        };

        assert_eq!(
            config.validate(),
            Err(LayoutError::DegenerateCorridor {
                start_depth: -19.0,
                limit: -18.0,
            })
        );
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: CorridorConfig = serde_json::from_str(r#"{"slot_spacing": 4.0}"#).unwrap();

        assert_eq!(config.slot_spacing, 4.0);
        assert_eq!(config.start_depth, START_DEPTH);
    }

    #[test]
    fn test_artwork_sits_in_front_of_wall() {
        let config = default_config();

        assert!((config.artwork_x(WallSide::Left) + 3.94).abs() < 1e-6);
        assert!((config.artwork_x(WallSide::Right) - 3.94).abs() < 1e-6);
    }

    fn default_config() -> CorridorConfig {
        CorridorConfig::default()
    }
}
