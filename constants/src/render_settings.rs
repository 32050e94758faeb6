use bevy::color::Color;

pub const CLEAR_COLOUR: Color = Color::srgb(0.08, 0.08, 0.09);
pub const FLOOR_COLOUR: Color = Color::srgb(0.906, 0.851, 0.851);
pub const WALL_COLOUR: Color = Color::srgb(0.961, 0.961, 0.961);
pub const BACK_WALL_COLOUR: Color = Color::WHITE;
pub const FRAME_COLOUR: Color = Color::BLACK;

/// Shown in place of an artwork whose image could not be loaded.
pub const PLACEHOLDER_COLOUR: Color = Color::srgb(0.55, 0.55, 0.58);

pub const WALL_THICKNESS: f32 = 0.1;
pub const FLOOR_THICKNESS: f32 = 0.02;

/// Canvas and frame sizes (width, height) in world units.
pub const CANVAS_SIZE: (f32, f32) = (2.0, 1.5);
pub const FRAME_SIZE: (f32, f32) = (2.1, 1.6);

/// Artwork within this distance of the eye is highlighted.
pub const HIGHLIGHT_RADIUS: f32 = 5.0;
pub const HIGHLIGHT_SCALE: f32 = 1.1;
pub const HIGHLIGHT_SMOOTHING_RATE: f32 = 3.08;

pub const AMBIENT_BRIGHTNESS: f32 = 600.0;
pub const DIRECTIONAL_ILLUMINANCE: f32 = 4_000.0;
