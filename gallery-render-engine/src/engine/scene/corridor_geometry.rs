use bevy::prelude::*;
use constants::corridor::{ENTRANCE_DEPTH, WALL_HEIGHT};
use constants::render_settings::{
    BACK_WALL_COLOUR, FLOOR_COLOUR, FLOOR_THICKNESS, WALL_COLOUR, WALL_THICKNESS,
};

use crate::engine::layout::CorridorLayout;

/// One structural piece of the corridor, rendered as a scaled unit cube.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorridorPart {
    Floor,
    Ceiling,
    LeftWall,
    RightWall,
    BackWall,
}

impl CorridorPart {
    pub const ALL: [Self; 5] = [
        Self::Floor,
        Self::Ceiling,
        Self::LeftWall,
        Self::RightWall,
        Self::BackWall,
    ];

    fn colour(self) -> Color {
        match self {
            Self::Floor => FLOOR_COLOUR,
            Self::BackWall => BACK_WALL_COLOUR,
            Self::Ceiling | Self::LeftWall | Self::RightWall => WALL_COLOUR,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Floor => "Corridor floor",
            Self::Ceiling => "Corridor ceiling",
            Self::LeftWall => "Corridor left wall",
            Self::RightWall => "Corridor right wall",
            Self::BackWall => "Corridor back wall",
        }
    }

    /// Placement and scale of the unit cube for this part. The corridor runs from
    /// the entrance to the layout's back wall.
    pub fn transform(self, layout: &CorridorLayout) -> Transform {
        let far = layout.back_wall_depth;
        let length = ENTRANCE_DEPTH - far;
        let centre = (ENTRANCE_DEPTH + far) / 2.0;
        let half_width = layout.config.wall_half_width;
        let span = 2.0 * (half_width + WALL_THICKNESS);
        let wall_x = half_width + WALL_THICKNESS / 2.0;

        match self {
            Self::Floor => Transform::from_xyz(0.0, -FLOOR_THICKNESS / 2.0, centre)
                .with_scale(Vec3::new(span, FLOOR_THICKNESS, length)),
            Self::Ceiling => Transform::from_xyz(0.0, WALL_HEIGHT + FLOOR_THICKNESS / 2.0, centre)
                .with_scale(Vec3::new(span, FLOOR_THICKNESS, length)),
            Self::LeftWall => Transform::from_xyz(-wall_x, WALL_HEIGHT / 2.0, centre)
                .with_scale(Vec3::new(WALL_THICKNESS, WALL_HEIGHT, length)),
            Self::RightWall => Transform::from_xyz(wall_x, WALL_HEIGHT / 2.0, centre)
                .with_scale(Vec3::new(WALL_THICKNESS, WALL_HEIGHT, length)),
            Self::BackWall => {
                Transform::from_xyz(0.0, WALL_HEIGHT / 2.0, far - WALL_THICKNESS / 2.0)
                    .with_scale(Vec3::new(2.0 * half_width, WALL_HEIGHT, WALL_THICKNESS))
            }
        }
    }
}

/// The extent the corridor entities were last fitted to.
#[derive(Resource, Debug, Default)]
pub struct CorridorGeometry {
    applied: Option<CorridorExtent>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct CorridorExtent {
    back_wall_depth: f32,
    half_width: f32,
}

impl CorridorExtent {
    fn of(layout: &CorridorLayout) -> Self {
        Self {
            back_wall_depth: layout.back_wall_depth,
            half_width: layout.config.wall_half_width,
        }
    }
}

pub fn spawn_corridor_geometry(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    layout: Res<CorridorLayout>,
    mut geometry: ResMut<CorridorGeometry>,
) {
    let cube = meshes.add(Cuboid::new(1.0, 1.0, 1.0));

    for part in CorridorPart::ALL {
        let material = materials.add(StandardMaterial {
            base_color: part.colour(),
            perceptual_roughness: 0.9,
            ..default()
        });
        commands.spawn((
            part,
            Mesh3d(cube.clone()),
            MeshMaterial3d(material),
            part.transform(&layout),
            Name::new(part.name()),
        ));
    }

    geometry.applied = Some(CorridorExtent::of(&layout));
    info!(
        "Corridor geometry spawned, back wall at {:.1}",
        layout.back_wall_depth
    );
}

/// Refit the existing corridor entities when the extent changed.
pub fn sync_corridor_geometry(
    layout: Res<CorridorLayout>,
    mut geometry: ResMut<CorridorGeometry>,
    mut parts: Query<(&CorridorPart, &mut Transform)>,
) {
    if !layout.is_changed() {
        return;
    }

    let extent = CorridorExtent::of(&layout);
    if geometry.applied == Some(extent) {
        return;
    }

    for (part, mut transform) in &mut parts {
        *transform = part.transform(&layout);
    }
    geometry.applied = Some(extent);
    debug!(
        "Corridor geometry refitted, back wall at {:.1}",
        layout.back_wall_depth
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::layout::{CorridorConfig, LayoutGenerator};

    fn generator() -> LayoutGenerator {
        LayoutGenerator::new(CorridorConfig::default()).unwrap()
    }

    #[test]
    fn test_minimum_corridor_extent() {
        let layout = generator().generate(0);

        let floor = CorridorPart::Floor.transform(&layout);
        assert_eq!(floor.scale.z, 28.0);
        assert_eq!(floor.translation.z, -6.0);

        let back = CorridorPart::BackWall.transform(&layout);
        assert!((back.translation.z - -20.05).abs() < 1e-5);

        let left = CorridorPart::LeftWall.transform(&layout);
        let right = CorridorPart::RightWall.transform(&layout);
        assert_eq!(left.translation.x, -right.translation.x);
        assert!(left.translation.x < -layout.config.wall_half_width);
    }

    #[test]
    fn test_artwork_hangs_between_walls() {
        let layout = generator().generate(4);
        let right = CorridorPart::RightWall.transform(&layout);
        let wall_face = right.translation.x - right.scale.x / 2.0;

        for slot in layout.slots.iter().filter(|slot| slot.position.x > 0.0) {
            assert!(slot.position.x < wall_face);
        }
    }

    #[test]
    fn test_growth_refits_existing_parts() {
        let mut app = App::new();
        app.insert_resource(generator().generate(0))
            .init_resource::<CorridorGeometry>()
            .add_systems(Update, sync_corridor_geometry);
        let back_wall = app
            .world_mut()
            .spawn((CorridorPart::BackWall, Transform::default()))
            .id();
        app.update();

        let before = *app.world().get::<Transform>(back_wall).unwrap();
        assert!((before.translation.z - -20.05).abs() < 1e-5);

        app.insert_resource(generator().generate(20));
        app.update();

        let after = app.world().get::<Transform>(back_wall).unwrap();
        assert!(after.translation.z < before.translation.z);
    }
}
