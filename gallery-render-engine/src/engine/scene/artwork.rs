use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::render_settings::{
    CANVAS_SIZE, FRAME_COLOUR, FRAME_SIZE, HIGHLIGHT_RADIUS, HIGHLIGHT_SCALE,
    HIGHLIGHT_SMOOTHING_RATE, PLACEHOLDER_COLOUR,
};
use std::collections::HashMap;

use crate::engine::camera::ViewpointController;
use crate::engine::layout::{GalleryPlacements, Placement};
use crate::engine::smoothing::smooth_toward;

const FRAME_DEPTH: f32 = 0.04;

/// Root entity of one hung artwork. Its children are the frame and the canvas.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct ArtworkPiece {
    pub record_id: u32,
    pub image: String,
}

/// The textured quad of an artwork. `texture` is cleared once the image has been
/// replaced by the placeholder.
#[derive(Component, Debug)]
pub struct ArtworkCanvas {
    pub record_id: u32,
    pub image: String,
    pub texture: Option<Handle<Image>>,
}

/// An artwork that could not be shown. Sent once per record.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ArtworkLoadFailed {
    pub record_id: u32,
    pub image: String,
    pub reason: String,
}

/// Meshes and materials shared by every artwork.
#[derive(Resource)]
pub struct ArtworkMaterials {
    pub canvas_mesh: Handle<Mesh>,
    pub frame_mesh: Handle<Mesh>,
    pub frame: Handle<StandardMaterial>,
    pub placeholder: Handle<StandardMaterial>,
}

pub fn setup_artwork_materials(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(ArtworkMaterials {
        canvas_mesh: meshes.add(Rectangle::new(1.0, 1.0)),
        frame_mesh: meshes.add(Cuboid::new(1.0, 1.0, 1.0)),
        frame: materials.add(StandardMaterial {
            base_color: FRAME_COLOUR,
            perceptual_roughness: 0.6,
            ..default()
        }),
        placeholder: materials.add(StandardMaterial {
            base_color: PLACEHOLDER_COLOUR,
            perceptual_roughness: 1.0,
            ..default()
        }),
    });
}

/// Entity changes needed to bring the hung artwork in line with the placements.
#[derive(Debug, Default, PartialEq)]
pub struct ArtworkDiff {
    /// Indices into the placements.
    pub spawn: Vec<usize>,
    /// Existing entities and the placement index they move to.
    pub relocate: Vec<(Entity, usize)>,
    pub despawn: Vec<Entity>,
}

impl ArtworkDiff {
    pub fn is_empty(&self) -> bool {
        self.spawn.is_empty() && self.relocate.is_empty() && self.despawn.is_empty()
    }
}

/// Match existing artwork entities to placements by record id. An entity whose
/// record now points at a different image is replaced rather than retextured.
pub fn plan_artwork_diff<'a>(
    existing: impl IntoIterator<Item = (Entity, &'a ArtworkPiece, &'a Transform)>,
    placements: &[Placement],
) -> ArtworkDiff {
    let mut wanted: HashMap<u32, usize> = placements
        .iter()
        .enumerate()
        .map(|(index, placement)| (placement.record.id, index))
        .collect();
    let mut diff = ArtworkDiff::default();

    for (entity, piece, transform) in existing {
        match wanted.remove(&piece.record_id) {
            Some(index) if placements[index].record.image == piece.image => {
                let target = placements[index].transform();
                if transform.translation != target.translation
                    || transform.rotation != target.rotation
                {
                    diff.relocate.push((entity, index));
                }
            }
            Some(index) => {
                diff.despawn.push(entity);
                diff.spawn.push(index);
            }
            None => diff.despawn.push(entity),
        }
    }

    diff.spawn.extend(wanted.into_values());
    diff.spawn.sort_unstable();
    diff
}

/// Apply placement changes to the artwork entities.
pub fn sync_artwork(
    mut commands: Commands,
    placements: Res<GalleryPlacements>,
    shared: Res<ArtworkMaterials>,
    asset_server: Res<AssetServer>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut pieces: Query<(Entity, &ArtworkPiece, &mut Transform)>,
    mut failures: EventWriter<ArtworkLoadFailed>,
) {
    if !placements.is_changed() {
        return;
    }

    let diff = plan_artwork_diff(pieces.iter(), &placements);
    if diff.is_empty() {
        return;
    }

    for entity in &diff.despawn {
        commands.entity(*entity).despawn();
    }

    for (entity, index) in &diff.relocate {
        if let Ok((_, _, mut transform)) = pieces.get_mut(*entity) {
            let target = placements[*index].transform();
            transform.translation = target.translation;
            transform.rotation = target.rotation;
        }
    }

    for index in &diff.spawn {
        spawn_artwork(
            &mut commands,
            &placements[*index],
            &shared,
            &asset_server,
            &mut materials,
            &mut failures,
        );
    }

    debug!(
        "Artwork synced: {} spawned, {} moved, {} removed",
        diff.spawn.len(),
        diff.relocate.len(),
        diff.despawn.len()
    );
}

fn spawn_artwork(
    commands: &mut Commands,
    placement: &Placement,
    shared: &ArtworkMaterials,
    asset_server: &AssetServer,
    materials: &mut Assets<StandardMaterial>,
    failures: &mut EventWriter<ArtworkLoadFailed>,
) {
    let record = &placement.record;

    let (material, texture) = if record.has_image_ref() {
        let texture: Handle<Image> = asset_server.load(asset_path(&record.image).to_owned());
        let material = materials.add(StandardMaterial {
            base_color_texture: Some(texture.clone()),
            perceptual_roughness: 0.8,
            ..default()
        });
        (material, Some(texture))
    } else {
        warn!("Artwork #{} has no image reference", record.id);
        failures.write(ArtworkLoadFailed {
            record_id: record.id,
            image: record.image.clone(),
            reason: "empty image reference".to_string(),
        });
        (shared.placeholder.clone(), None)
    };

    let canvas = canvas_size(record.width, record.height);
    let border = Vec2::new(FRAME_SIZE.0 - CANVAS_SIZE.0, FRAME_SIZE.1 - CANVAS_SIZE.1);
    let frame = canvas + border;

    commands
        .spawn((
            ArtworkPiece {
                record_id: record.id,
                image: record.image.clone(),
            },
            placement.transform(),
            Visibility::default(),
            Name::new(format!("Artwork #{}", record.id)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(shared.frame_mesh.clone()),
                MeshMaterial3d(shared.frame.clone()),
                Transform::from_xyz(0.0, 0.0, -FRAME_DEPTH / 2.0 - 0.01)
                    .with_scale(frame.extend(FRAME_DEPTH)),
            ));
            parent.spawn((
                ArtworkCanvas {
                    record_id: record.id,
                    image: record.image.clone(),
                    texture,
                },
                Mesh3d(shared.canvas_mesh.clone()),
                MeshMaterial3d(material),
                Transform::from_scale(canvas.extend(1.0)),
            ));
        });
}

/// Swap canvases whose image failed to load over to the placeholder.
pub fn detect_failed_artwork(
    asset_server: Res<AssetServer>,
    shared: Res<ArtworkMaterials>,
    mut canvases: Query<(&mut ArtworkCanvas, &mut MeshMaterial3d<StandardMaterial>)>,
    mut failures: EventWriter<ArtworkLoadFailed>,
) {
    for (mut canvas, mut material) in &mut canvases {
        let Some(texture) = &canvas.texture else {
            continue;
        };
        let Some(LoadState::Failed(err)) = asset_server.get_load_state(texture) else {
            continue;
        };

        warn!("Artwork #{} ({}) failed to load: {err}", canvas.record_id, canvas.image);
        failures.write(ArtworkLoadFailed {
            record_id: canvas.record_id,
            image: canvas.image.clone(),
            reason: err.to_string(),
        });
        material.0 = shared.placeholder.clone();
        canvas.texture = None;
    }
}

/// Ease artwork near the eye up to the highlight scale and the rest back to 1.
pub fn highlight_nearby_artwork(
    time: Res<Time>,
    controller: Res<ViewpointController>,
    mut pieces: Query<&mut Transform, With<ArtworkPiece>>,
) {
    let eye = controller.position();
    let dt = time.delta_secs();

    for mut transform in &mut pieces {
        let target = highlight_scale(transform.translation.distance(eye));
        let scale = smooth_toward(transform.scale.x, target, HIGHLIGHT_SMOOTHING_RATE, dt);
        if scale != transform.scale.x {
            transform.scale = Vec3::splat(scale);
        }
    }
}

pub fn highlight_scale(distance: f32) -> f32 {
    if distance < HIGHLIGHT_RADIUS {
        HIGHLIGHT_SCALE
    } else {
        1.0
    }
}

/// Largest canvas with the image's aspect ratio that fits the standard canvas.
/// Unknown dimensions get the standard canvas.
pub fn canvas_size(width: Option<u32>, height: Option<u32>) -> Vec2 {
    let bounds = Vec2::new(CANVAS_SIZE.0, CANVAS_SIZE.1);
    match (width, height) {
        (Some(width), Some(height)) if width > 0 && height > 0 => {
            let aspect = width as f32 / height as f32;
            if aspect >= bounds.x / bounds.y {
                Vec2::new(bounds.x, bounds.x / aspect)
            } else {
                Vec2::new(bounds.y * aspect, bounds.y)
            }
        }
        _ => bounds,
    }
}

/// Catalog references may be site-absolute (`/uploads/a.png`); assets are loaded
/// relative to the asset root.
fn asset_path(image: &str) -> &str {
    image.trim().trim_start_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::camera::{TravelBounds, ViewpointConfig};
    use crate::engine::layout::{CorridorConfig, LayoutGenerator, assign};
    use gallery_catalog::ArtworkRecord;
    use std::time::Duration;

    fn placements(records: &[ArtworkRecord]) -> Vec<Placement> {
        let layout = LayoutGenerator::new(CorridorConfig::default())
            .unwrap()
            .generate(records.len());
        assign(records, &layout).unwrap()
    }

    fn piece(placement: &Placement) -> (ArtworkPiece, Transform) {
        (
            ArtworkPiece {
                record_id: placement.record.id,
                image: placement.record.image.clone(),
            },
            placement.transform(),
        )
    }

    #[test]
    fn test_first_sync_spawns_everything() {
        let placements = placements(&[
            ArtworkRecord::new(1, "uploads/a.png"),
            ArtworkRecord::new(2, "uploads/b.png"),
        ]);

        let diff = plan_artwork_diff(std::iter::empty(), &placements);

        assert_eq!(diff.spawn, [0, 1]);
        assert!(diff.relocate.is_empty());
        assert!(diff.despawn.is_empty());
    }

    #[test]
    fn test_unchanged_artwork_is_kept() {
        let placements = placements(&[
            ArtworkRecord::new(1, "uploads/a.png"),
            ArtworkRecord::new(2, "uploads/b.png"),
        ]);
        let (first, first_transform) = piece(&placements[0]);
        let (second, second_transform) = piece(&placements[1]);

        let diff = plan_artwork_diff(
            [
                (Entity::from_raw(1), &first, &first_transform),
                (Entity::from_raw(2), &second, &second_transform),
            ],
            &placements,
        );

        assert!(diff.is_empty());
    }

    #[test]
    fn test_removed_moved_and_new_artwork() {
        let old = placements(&[
            ArtworkRecord::new(1, "uploads/a.png"),
            ArtworkRecord::new(2, "uploads/b.png"),
        ]);
        let (first, first_transform) = piece(&old[0]);
        let (second, second_transform) = piece(&old[1]);

        // Record 1 is gone, so record 2 moves into the first slot and record 3 is new.
        let new = placements(&[
            ArtworkRecord::new(2, "uploads/b.png"),
            ArtworkRecord::new(3, "uploads/c.png"),
        ]);
        let diff = plan_artwork_diff(
            [
                (Entity::from_raw(1), &first, &first_transform),
                (Entity::from_raw(2), &second, &second_transform),
            ],
            &new,
        );

        assert_eq!(diff.despawn, [Entity::from_raw(1)]);
        assert_eq!(diff.relocate, [(Entity::from_raw(2), 0)]);
        assert_eq!(diff.spawn, [1]);
    }

    #[test]
    fn test_new_image_replaces_entity() {
        let old = placements(&[ArtworkRecord::new(1, "uploads/a.png")]);
        let (first, first_transform) = piece(&old[0]);
        let new = placements(&[ArtworkRecord::new(1, "uploads/other.png")]);

        let diff = plan_artwork_diff([(Entity::from_raw(1), &first, &first_transform)], &new);

        assert_eq!(diff.despawn, [Entity::from_raw(1)]);
        assert_eq!(diff.spawn, [0]);
    }

    #[test]
    fn test_canvas_keeps_aspect_ratio() {
        assert_eq!(canvas_size(None, None), Vec2::new(2.0, 1.5));
        assert_eq!(canvas_size(Some(400), Some(100)), Vec2::new(2.0, 0.5));
        assert_eq!(canvas_size(Some(100), Some(200)), Vec2::new(0.75, 1.5));
        assert_eq!(canvas_size(Some(0), Some(200)), Vec2::new(2.0, 1.5));
    }

    #[test]
    fn test_asset_path_drops_site_root() {
        assert_eq!(asset_path("/uploads/1-a.png"), "uploads/1-a.png");
        assert_eq!(asset_path("uploads/1-a.png"), "uploads/1-a.png");
    }

    #[test]
    fn test_highlight_eases_nearby_artwork() {
        let config = ViewpointConfig::default();
        let controller = ViewpointController::new(config, TravelBounds::new(-18.5, 6.0));
        let eye = controller.position();

        let mut app = App::new();
        app.init_resource::<Time>()
            .insert_resource(controller)
            .add_systems(Update, highlight_nearby_artwork);

        let piece = ArtworkPiece {
            record_id: 1,
            image: "uploads/a.png".to_string(),
        };
        let near = app
            .world_mut()
            .spawn((piece.clone(), Transform::from_translation(eye + Vec3::X * 2.0)))
            .id();
        let far = app
            .world_mut()
            .spawn((piece, Transform::from_translation(eye - Vec3::Z * 20.0)))
            .id();

        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs(5));
        app.update();

        let near_scale = app.world().get::<Transform>(near).unwrap().scale;
        let far_scale = app.world().get::<Transform>(far).unwrap().scale;
        assert!((near_scale.x - HIGHLIGHT_SCALE).abs() < 1e-3);
        assert_eq!(far_scale, Vec3::ONE);
    }
}
