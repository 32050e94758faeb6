use bevy::prelude::*;
use gallery_catalog::{ArtworkRecord, WallSide};

use super::corridor::{CorridorLayout, Slot};
use super::error::CapacityError;

/// A catalog record paired with its slot.
///
/// `position`, `facing` and `wall_side` are where the artwork is actually hung: the
/// slot's values, unless the record carries a legacy placement of its own that lies
/// in front of the back wall's clearance zone.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub record: ArtworkRecord,
    pub slot: Slot,
    pub position: Vec3,
    pub facing: f32,
    pub wall_side: WallSide,
}

impl Placement {
    fn new(record: &ArtworkRecord, slot: &Slot, layout: &CorridorLayout) -> Self {
        let threshold = layout.back_wall_depth + layout.config.wall_clearance;
        let legacy = record
            .legacy_placement()
            .filter(|(_, depth)| *depth > threshold);
        let (position, facing, wall_side) = match legacy {
            Some((side, depth)) => (
                Vec3::new(
                    layout.config.artwork_x(side),
                    layout.config.artwork_height,
                    depth,
                ),
                side.facing_yaw(),
                side,
            ),
            None => (slot.position, slot.facing, slot.wall_side),
        };

        Self {
            record: record.clone(),
            slot: *slot,
            position,
            facing,
            wall_side,
        }
    }

    /// Whether the record's own placement was honoured rather than the slot's.
    pub fn is_legacy(&self) -> bool {
        self.record
            .legacy_placement()
            .is_some_and(|(side, depth)| side == self.wall_side && depth == self.position.z)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position).with_rotation(Quat::from_rotation_y(self.facing))
    }
}

/// Pair the i-th record with the i-th slot.
pub fn assign(
    records: &[ArtworkRecord],
    layout: &CorridorLayout,
) -> Result<Vec<Placement>, CapacityError> {
    if records.len() >= layout.slot_count() {
        return Err(CapacityError {
            artworks: records.len(),
            slots: layout.slot_count(),
        });
    }

    Ok(records
        .iter()
        .zip(&layout.slots)
        .map(|(record, slot)| Placement::new(record, slot, layout))
        .collect())
}

/// [`assign`] for the render path. A capacity error is a generator bug: it panics in
/// debug builds and otherwise hangs what fits and drops the rest.
pub fn assign_or_truncate(records: &[ArtworkRecord], layout: &CorridorLayout) -> Vec<Placement> {
    match assign(records, layout) {
        Ok(placements) => placements,
        Err(err) => {
            if cfg!(debug_assertions) {
                panic!("{err}");
            }

            warn!(
                "{err}; dropping {} artworks",
                records.len().saturating_sub(layout.slot_count())
            );
            records
                .iter()
                .zip(&layout.slots)
                .map(|(record, slot)| Placement::new(record, slot, layout))
                .collect()
        }
    }
}
