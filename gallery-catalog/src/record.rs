use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

/// Which corridor wall an artwork hangs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallSide {
    Left,
    Right,
}

impl WallSide {
    /// Rotation about the vertical axis that turns a +Z facing canvas into the corridor.
    pub fn facing_yaw(self) -> f32 {
        match self {
            Self::Left => FRAC_PI_2,
            Self::Right => -FRAC_PI_2,
        }
    }

    /// Sign of the wall's lateral (x) coordinate.
    pub fn lateral_sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// One uploaded artwork.
///
/// `depth` and `wall` are only present on records written by the legacy upload
/// path, which fixed a placement at upload time. Records without them are placed by
/// the corridor layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkRecord {
    pub id: u32,
    /// Opaque image reference, relative to the asset root (e.g. `uploads/1700-a.png`).
    pub image: String,
    #[serde(default, rename = "z", skip_serializing_if = "Option::is_none")]
    pub depth: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall: Option<WallSide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl ArtworkRecord {
    pub fn new(id: u32, image: impl Into<String>) -> Self {
        Self {
            id,
            image: image.into(),
            depth: None,
            wall: None,
            uploaded_at: None,
            width: None,
            height: None,
        }
    }

    /// Pre-assigned placement, only when both wall and a finite depth are present.
    pub fn legacy_placement(&self) -> Option<(WallSide, f32)> {
        let wall = self.wall?;
        let depth = self.depth.filter(|d| d.is_finite())?;
        Some((wall, depth))
    }

    pub fn has_image_ref(&self) -> bool {
        !self.image.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_legacy_upload_record() {
        let json = r#"{
            "id": 2,
            "image": "/uploads/1712-sunset.png",
            "z": -3.5,
            "wall": "right",
            "uploadedAt": "2024-04-01T10:00:00.000Z"
        }"#;

        let record: ArtworkRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.id, 2);
        assert_eq!(record.legacy_placement(), Some((WallSide::Right, -3.5)));
        assert_eq!(record.uploaded_at.as_deref(), Some("2024-04-01T10:00:00.000Z"));
    }

    #[test]
    fn test_record_without_placement_is_recomputed() {
        let record: ArtworkRecord =
            serde_json::from_str(r#"{"id": 7, "image": "uploads/a.png"}"#).unwrap();
        assert_eq!(record.legacy_placement(), None);

        // Half a placement is not a placement.
        let mut partial = record.clone();
        partial.wall = Some(WallSide::Left);
        assert_eq!(partial.legacy_placement(), None);
    }

    #[test]
    fn test_serialises_without_absent_fields() {
        let json = serde_json::to_value(ArtworkRecord::new(1, "uploads/a.png")).unwrap();
        assert_eq!(json, serde_json::json!({"id": 1, "image": "uploads/a.png"}));
    }

    #[test]
    fn test_blank_image_reference() {
        assert!(!ArtworkRecord::new(1, "  ").has_image_ref());
        assert!(ArtworkRecord::new(1, "uploads/a.png").has_image_ref());
    }

    #[test]
    fn test_facing_turns_into_corridor() {
        assert_eq!(WallSide::Left.facing_yaw(), FRAC_PI_2);
        assert_eq!(WallSide::Right.facing_yaw(), -FRAC_PI_2);
    }
}
