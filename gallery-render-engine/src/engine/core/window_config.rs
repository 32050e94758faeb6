use bevy::prelude::*;
use bevy::window::PresentMode;

/// Primary window. On the web the engine renders into the host page's `#bevy`
/// canvas and leaves browser gestures to the page.
pub fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        Window {
            canvas: Some("#bevy".to_owned()),
            fit_canvas_to_parent: true,
            prevent_default_event_handling: false,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: "Corridor Gallery".to_owned(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}
