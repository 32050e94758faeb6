use bevy::prelude::*;

use super::assignment::{Placement, assign_or_truncate};
use super::corridor::{CorridorLayout, LayoutGenerator};
use crate::engine::assets::catalog_asset::GalleryCatalog;

/// Current record-to-slot pairing, in catalog order.
#[derive(Resource, Debug, Clone, Default, PartialEq, Deref)]
pub struct GalleryPlacements(pub Vec<Placement>);

/// Sent whenever a regeneration changed the corridor or what hangs in it.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct LayoutChanged {
    pub back_wall_depth: f32,
    pub slot_count: usize,
    pub artwork_count: usize,
}

/// Regenerate the corridor and the placements after a catalog or config change.
pub fn regenerate_layout(
    catalog: Res<GalleryCatalog>,
    generator: Res<LayoutGenerator>,
    mut layout: ResMut<CorridorLayout>,
    mut placements: ResMut<GalleryPlacements>,
    mut changes: EventWriter<LayoutChanged>,
) {
    if !catalog.is_changed() && !generator.is_changed() {
        return;
    }

    let records = catalog.list();
    let mut reach: Option<f32> = None;
    for record in records {
        let Some((_, depth)) = record.legacy_placement() else {
            continue;
        };
        if generator.accepts_reach(records.len(), depth) {
            reach = Some(reach.map_or(depth, |deepest| deepest.min(depth)));
        } else {
            warn!(
                "Artwork #{} legacy depth {depth} is past {:.1}, hanging it at its slot",
                record.id,
                generator.reach_limit(records.len())
            );
        }
    }

    let next_layout = generator.generate_with_reach(records.len(), reach);
    let next_placements = GalleryPlacements(assign_or_truncate(records, &next_layout));

    let layout_changed = layout.set_if_neq(next_layout);
    let placements_changed = placements.set_if_neq(next_placements);
    if !layout_changed && !placements_changed {
        return;
    }

    info!(
        "Corridor regenerated: {} artworks, {} slots, back wall at {:.1}",
        records.len(),
        layout.slot_count(),
        layout.back_wall_depth
    );
    changes.write(LayoutChanged {
        back_wall_depth: layout.back_wall_depth,
        slot_count: layout.slot_count(),
        artwork_count: placements.len(),
    });
}
