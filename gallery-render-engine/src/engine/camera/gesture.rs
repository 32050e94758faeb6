//! Touch gesture arbitration.
//!
//! One finger drags to look and walk; two or more fingers pinch to walk and
//! suppress the drag until every finger has lifted.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum TouchGesture {
    #[default]
    Idle,
    Drag {
        start: Vec2,
        current: Vec2,
    },
    Pinch {
        last_distance: f32,
    },
    /// A pinch dropped to one finger. Nothing is read until all fingers lift, so
    /// the leftover finger cannot start a drag with a stale origin.
    Suppressed,
}

/// What a gesture contributes to one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutput {
    None,
    /// Offset of the finger from where it first touched, in pixels.
    Drag { offset: Vec2 },
    /// Change in finger spread since the previous tick, in pixels.
    Pinch { spread_delta: f32 },
}

impl TouchGesture {
    /// Advance the gesture with this tick's touch points, sorted by touch id.
    ///
    /// A sample with a non-finite coordinate contributes nothing and leaves the
    /// gesture where it was.
    pub fn update(&mut self, points: &[Vec2]) -> GestureOutput {
        if points.iter().any(|point| !point.is_finite()) {
            return GestureOutput::None;
        }

        match (points, *self) {
            ([], _) => {
                *self = Self::Idle;
                GestureOutput::None
            }
            ([point], Self::Idle) => {
                *self = Self::Drag {
                    start: *point,
                    current: *point,
                };
                GestureOutput::Drag { offset: Vec2::ZERO }
            }
            ([point], Self::Drag { start, .. }) => {
                *self = Self::Drag {
                    start,
                    current: *point,
                };
                GestureOutput::Drag {
                    offset: *point - start,
                }
            }
            ([_], Self::Pinch { .. } | Self::Suppressed) => {
                *self = Self::Suppressed;
                GestureOutput::None
            }
            ([first, second, ..], Self::Pinch { last_distance }) => {
                let distance = first.distance(*second);
                *self = Self::Pinch {
                    last_distance: distance,
                };
                GestureOutput::Pinch {
                    spread_delta: distance - last_distance,
                }
            }
            ([first, second, ..], _) => {
                *self = Self::Pinch {
                    last_distance: first.distance(*second),
                };
                GestureOutput::Pinch { spread_delta: 0.0 }
            }
        }
    }

    /// Any finger is down.
    pub fn is_touching(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}
