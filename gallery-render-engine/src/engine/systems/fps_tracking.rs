use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

use crate::engine::camera::ViewpointController;
use crate::engine::layout::GalleryPlacements;
use crate::rpc::web_rpc::WebRpcInterface;

const NOTIFICATION_INTERVAL_SECS: f32 = 0.5;

/// Native overlay text showing frame rate, artwork count and depth.
#[derive(Component)]
pub struct FpsText;

pub fn fps_notification_system(
    mut rpc_interface: ResMut<WebRpcInterface>,
    diagnostics: Res<DiagnosticsStore>,
    mut last_send_time: Local<f32>,
    time: Res<Time>,
) {
    let current_time = time.elapsed_secs();
    if current_time - *last_send_time < NOTIFICATION_INTERVAL_SECS {
        return;
    }

    if let Some(value) = smoothed_fps(&diagnostics) {
        rpc_interface.send_notification(
            "fps_update",
            serde_json::json!({
                "fps": value
            }),
        );
        *last_send_time = current_time;
    }
}

pub fn fps_text_update_system(
    diagnostics: Res<DiagnosticsStore>,
    placements: Res<GalleryPlacements>,
    controller: Option<Res<ViewpointController>>,
    mut query: Query<&mut Text, With<FpsText>>,
) {
    let Some(fps) = smoothed_fps(&diagnostics) else {
        return;
    };
    let depth = controller.map_or(0.0, |controller| controller.position().z);

    for mut text in &mut query {
        text.0 = format!(
            "FPS: {fps:.1}  Artworks: {}  Depth: {depth:.1}",
            placements.len()
        );
    }
}

pub fn smoothed_fps(diagnostics: &DiagnosticsStore) -> Option<f32> {
    diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed())
        .map(|value| value as f32)
}
