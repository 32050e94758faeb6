use bevy::prelude::*;

use crate::engine::loading::progress::LoadingProgress;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

/// Per-frame ordering of the running gallery: input is sampled before the layout
/// is regenerated, the viewpoint follows the new layout, and the scene is brought
/// in line last.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GallerySet {
    Input,
    Layout,
    Viewpoint,
    Scene,
}

pub fn transition_to_running(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.is_complete() {
        info!("→ Config and catalog resolved, transitioning to Running state");
        next_state.set(AppState::Running);
    }
}
