use bevy::prelude::*;

use super::controller::{TravelBounds, ViewpointController};
use super::input::{
    InputFrame, KeyboardChannel, PointerChannel, ScrollChannel, TouchChannel, sample_keyboard,
    sample_pointer, sample_scroll, sample_touch,
};
use crate::engine::core::app_state::GallerySet;
use crate::engine::layout::CorridorLayout;

/// Marks the camera driven by the viewpoint controller.
#[derive(Component)]
pub struct GalleryCamera;

/// Registers the input channels and runs sampling, bounds sync and the viewpoint
/// tick in that order.
pub struct ViewpointPlugin;

impl Plugin for ViewpointPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<KeyboardChannel>()
            .init_resource::<PointerChannel>()
            .init_resource::<TouchChannel>()
            .init_resource::<ScrollChannel>()
            .add_systems(
                Update,
                (sample_keyboard, sample_pointer, sample_touch, sample_scroll)
                    .in_set(GallerySet::Input),
            )
            .add_systems(
                Update,
                (sync_travel_bounds, advance_viewpoint)
                    .chain()
                    .in_set(GallerySet::Viewpoint),
            );
    }
}

pub fn spawn_gallery_camera(mut commands: Commands, controller: Res<ViewpointController>) {
    commands.spawn((
        Camera3d::default(),
        controller.pose().transform(),
        GalleryCamera,
    ));
}

/// Follow the corridor's back wall whenever the layout is replaced.
pub fn sync_travel_bounds(
    layout: Res<CorridorLayout>,
    mut controller: ResMut<ViewpointController>,
) {
    if !layout.is_changed() {
        return;
    }

    let bounds = TravelBounds::from_layout(&layout, controller.config());
    if bounds != controller.bounds() {
        info!(
            "Viewpoint travel bounds: {:.1} to {:.1}",
            bounds.min_depth, bounds.max_depth
        );
        controller.set_bounds(bounds);
    }
}

/// Fuse this frame's samples into the controller and place the camera.
pub fn advance_viewpoint(
    time: Res<Time>,
    keyboard: Res<KeyboardChannel>,
    pointer: Res<PointerChannel>,
    touch: Res<TouchChannel>,
    scroll: Res<ScrollChannel>,
    mut controller: ResMut<ViewpointController>,
    mut cameras: Query<&mut Transform, With<GalleryCamera>>,
) {
    let frame = InputFrame {
        keyboard: *keyboard.latest(),
        pointer: *pointer.latest(),
        touch: touch.latest().clone(),
        scroll: *scroll.latest(),
    };

    let pose = controller.advance(time.delta_secs(), &frame);
    for mut transform in &mut cameras {
        *transform = pose.transform();
    }
}
