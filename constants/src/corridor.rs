/// Depth distance between successive slot rows along one wall.
pub const SLOT_SPACING: f32 = 3.0;

/// Depth of the first slot row.
pub const START_DEPTH: f32 = -2.5;

/// Back wall depth of an empty gallery. The corridor never gets shorter than this.
pub const MINIMUM_BACK_WALL_DEPTH: f32 = -20.0;

/// Minimum gap between the last slot row and the back wall.
pub const WALL_CLEARANCE: f32 = 2.0;

/// Lateral distance from the corridor centre line to each wall face.
pub const WALL_HALF_WIDTH: f32 = 4.0;

/// Artwork hangs this far in front of the wall face.
pub const ARTWORK_WALL_OFFSET: f32 = 0.06;

/// Centre height of a hung artwork.
pub const ARTWORK_HEIGHT: f32 = 2.8;

pub const WALL_HEIGHT: f32 = 8.0;

/// Depth of the open entrance end of the corridor, behind the starting viewpoint.
pub const ENTRANCE_DEPTH: f32 = 8.0;

/// Legacy uploads placed right-wall pieces one unit deeper than their left-wall partner.
pub const LEGACY_RIGHT_WALL_STAGGER: f32 = 1.0;
