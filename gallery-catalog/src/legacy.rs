//! Fixed upload-time placement used by galleries created before the corridor
//! layout existed. New records are placed by the layout instead; this rule is only
//! applied when a store is explicitly asked to stamp positions.

use constants::corridor::{LEGACY_RIGHT_WALL_STAGGER, SLOT_SPACING, START_DEPTH};

use crate::record::WallSide;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegacyPlacementRule {
    pub start_depth: f32,
    pub slot_spacing: f32,
    pub right_wall_stagger: f32,
}

impl Default for LegacyPlacementRule {
    fn default() -> Self {
        Self {
            start_depth: START_DEPTH,
            slot_spacing: SLOT_SPACING,
            right_wall_stagger: LEGACY_RIGHT_WALL_STAGGER,
        }
    }
}

impl LegacyPlacementRule {
    /// Wall and depth for the record at catalog position `index`.
    ///
    /// Even positions go left, odd positions go right, and the right wall is
    /// staggered deeper than its left partner.
    pub fn placement(&self, index: usize) -> (WallSide, f32) {
        if index % 2 == 0 {
            let row = (index / 2) as f32;
            (WallSide::Left, self.start_depth - row * self.slot_spacing)
        } else {
            let row = ((index - 1) / 2) as f32;
            (
                WallSide::Right,
                self.start_depth - self.right_wall_stagger - row * self.slot_spacing,
            )
        }
    }
}
