use bevy::prelude::*;
use gallery_catalog::WallSide;

use super::config::CorridorConfig;
use super::error::LayoutError;

/// Fixed hanging position for one artwork, independent of which artwork fills it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    pub sequence_index: usize,
    pub position: Vec3,
    /// Rotation about the vertical axis.
    pub facing: f32,
    pub wall_side: WallSide,
}

impl Slot {
    pub fn depth(&self) -> f32 {
        self.position.z
    }
}

/// Complete description of one generated corridor. Replaced wholesale on every
/// regeneration, never patched.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct CorridorLayout {
    pub config: CorridorConfig,
    pub start_depth: f32,
    pub back_wall_depth: f32,
    pub slots: Vec<Slot>,
}

impl CorridorLayout {
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Slot rows; each row holds a left and a right slot.
    pub fn depth_steps(&self) -> usize {
        self.slots.len() / 2
    }

    /// Distance from the first slot row to the back wall.
    pub fn length(&self) -> f32 {
        self.start_depth - self.back_wall_depth
    }

    pub fn deepest_slot_depth(&self) -> Option<f32> {
        self.slots.last().map(Slot::depth)
    }
}

/// Builds corridors from a validated [`CorridorConfig`].
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct LayoutGenerator {
    config: CorridorConfig,
}

impl Default for LayoutGenerator {
    fn default() -> Self {
        Self {
            config: CorridorConfig::default(),
        }
    }
}

impl LayoutGenerator {
    pub fn new(config: CorridorConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CorridorConfig {
        &self.config
    }

    /// Shortest corridor with strictly more slots than `artwork_count`.
    pub fn generate(&self, artwork_count: usize) -> CorridorLayout {
        self.generate_with_reach(artwork_count, None)
    }

    /// Deepest pre-assigned depth a catalog of `artwork_count` records may extend
    /// the corridor to: one slot spacing past a minimum corridor that holds every
    /// record in its own row.
    pub fn reach_limit(&self, artwork_count: usize) -> f32 {
        self.config.minimum_back_wall_depth
            - (artwork_count as f32 + 1.0) * self.config.slot_spacing
    }

    /// Whether a pre-assigned depth is finite and within [`reach_limit`](Self::reach_limit).
    pub fn accepts_reach(&self, artwork_count: usize, depth: f32) -> bool {
        depth.is_finite() && depth >= self.reach_limit(artwork_count)
    }

    /// As [`generate`](Self::generate), but also keeps growing until `reach` (the
    /// deepest pre-assigned artwork depth, if any) sits in front of the clearance
    /// zone. A reach beyond [`reach_limit`](Self::reach_limit) is ignored.
    pub fn generate_with_reach(&self, artwork_count: usize, reach: Option<f32>) -> CorridorLayout {
        let config = &self.config;
        let reach = reach.filter(|depth| self.accepts_reach(artwork_count, *depth));

        // Candidate back walls are derived from an integer count so repeated
        // subtraction cannot stall on float precision.
        let mut extensions = 0u32;
        let mut steps = 0usize;
        let back_wall_depth = loop {
            let candidate =
                config.minimum_back_wall_depth - extensions as f32 * config.slot_spacing;
            let threshold = candidate + config.wall_clearance;

            // Deeper candidates only ever add rows, so the count carries over.
            while self.step_depth(steps) > threshold {
                steps += 1;
            }

            let has_capacity = 2 * steps > artwork_count;
            let covers_reach = reach.is_none_or(|depth| depth > threshold);
            if has_capacity && covers_reach {
                break candidate;
            }
            extensions += 1;
        };

        let slots: Vec<Slot> = self
            .depth_steps(back_wall_depth)
            .enumerate()
            .flat_map(|(row, depth)| {
                [WallSide::Left, WallSide::Right]
                    .into_iter()
                    .enumerate()
                    .map(move |(column, side)| Slot {
                        sequence_index: row * 2 + column,
                        position: Vec3::new(config.artwork_x(side), config.artwork_height, depth),
                        facing: side.facing_yaw(),
                        wall_side: side,
                    })
            })
            .collect();

        debug!(
            artwork_count,
            back_wall_depth,
            slots = slots.len(),
            "corridor generated"
        );

        CorridorLayout {
            config: *config,
            start_depth: config.start_depth,
            back_wall_depth,
            slots,
        }
    }

    fn step_depth(&self, index: usize) -> f32 {
        self.config.start_depth - index as f32 * self.config.slot_spacing
    }

    /// Row depths from the start, stopping before the clearance zone of `back_wall`.
    fn depth_steps(&self, back_wall: f32) -> impl Iterator<Item = f32> + '_ {
        let threshold = back_wall + self.config.wall_clearance;
        (0..)
            .map(move |index| self.step_depth(index))
            .take_while(move |depth| *depth > threshold)
    }
}
