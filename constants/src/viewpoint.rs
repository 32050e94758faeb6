use std::f32::consts::PI;

pub const EYE_HEIGHT: f32 = 1.8;

/// Starting depth of the viewpoint, and the shallowest depth it can travel back to.
pub const MAX_DEPTH: f32 = 6.0;

/// Keeps the viewpoint this far in front of the back wall.
pub const BACK_WALL_SAFETY_MARGIN: f32 = 1.5;

/// Keyboard walking speed in units per second.
pub const WALK_SPEED: f32 = 10.0;

/// Keyboard turn rate in radians per second.
pub const TURN_RATE: f32 = 1.8;

/// Single-finger vertical drag, pixels to walking speed.
pub const DRAG_WALK_GAIN: f32 = 0.05;

/// Two-finger pinch, change in finger distance (pixels) to depth travelled.
pub const PINCH_WALK_GAIN: f32 = 0.02;

/// Depth travelled per scroll wheel line.
pub const SCROLL_STEP: f32 = 1.0;

/// Converts pixel scroll deltas into line units.
pub const PIXEL_SCROLL_SCALE: f32 = 0.05;

pub const MAX_YAW: f32 = PI / 2.5;
pub const MAX_PITCH: f32 = 0.35;

/// Distance ahead of the eye of the point the viewpoint looks at.
pub const LOOK_RADIUS: f32 = 5.0;

/// Horizontal drag across the full viewport width, as a fraction of `MAX_YAW`.
pub const DRAG_YAW_GAIN: f32 = 2.0;

/// Vertical drag across the full viewport height, as a fraction of `MAX_PITCH`.
pub const DRAG_PITCH_GAIN: f32 = 0.5;

// Exponential smoothing rates (1/s). Equivalent to per-frame factors of
// 0.12 / 0.04 / 0.12 at 60 Hz.
pub const DEPTH_SMOOTHING_RATE: f32 = 7.67;
pub const LATERAL_SMOOTHING_RATE: f32 = 2.45;
pub const VERTICAL_SMOOTHING_RATE: f32 = 7.67;
pub const ANGULAR_SMOOTHING_RATE: f32 = 8.0;
