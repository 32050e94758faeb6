use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::render_settings::{AMBIENT_BRIGHTNESS, CLEAR_COLOUR, DIRECTIONAL_ILLUMINANCE};

// Crate engine modules
use crate::engine::assets::{catalog_asset::GalleryCatalog, gallery_config::GalleryConfig};
use crate::engine::camera::{ViewpointPlugin, viewport_camera::spawn_gallery_camera};
use crate::engine::core::app_state::{AppState, GallerySet, transition_to_running};
use crate::engine::core::window_config::create_window_config;
use crate::engine::layout::{GalleryPlacements, LayoutChanged, regenerate_layout};
use crate::engine::loading::manifest_loader::{
    ManifestLoader, resolve_catalog, resolve_config, start_loading,
};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::artwork::{
    ArtworkLoadFailed, detect_failed_artwork, highlight_nearby_artwork, setup_artwork_materials,
    sync_artwork,
};
use crate::engine::scene::corridor_geometry::{
    CorridorGeometry, spawn_corridor_geometry, sync_corridor_geometry,
};
use crate::engine::systems::fps_tracking::fps_notification_system;
// Create Web RPC modules
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::{FpsText, fps_text_update_system};

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Distinct extensions keep the two JSON loaders from claiming each other's files.
        .add_plugins(JsonAssetPlugin::<GalleryCatalog>::new(&["gallery.json"]))
        .add_plugins(JsonAssetPlugin::<GalleryConfig>::new(&["config.json"]))
        .add_plugins(WebRpcPlugin)
        .add_plugins(ViewpointPlugin)
        .insert_resource(ClearColor(CLEAR_COLOUR))
        .insert_resource(AmbientLight {
            brightness: AMBIENT_BRIGHTNESS,
            ..default()
        });

    // Initialise resources early
    app.init_resource::<LoadingProgress>()
        .init_resource::<ManifestLoader>()
        .init_resource::<CorridorGeometry>()
        .init_resource::<GalleryPlacements>()
        .add_event::<LayoutChanged>()
        .add_event::<ArtworkLoadFailed>();

    app.configure_sets(
        Update,
        (
            GallerySet::Input,
            GallerySet::Layout,
            GallerySet::Viewpoint,
            GallerySet::Scene,
        )
            .chain()
            .run_if(in_state(AppState::Running)),
    );

    // State-based system scheduling
    app.add_systems(Startup, (setup, setup_artwork_materials, start_loading))
        .add_systems(
            Update,
            (resolve_config, resolve_catalog, transition_to_running)
                .chain()
                .run_if(in_state(AppState::Loading)),
        )
        .add_systems(
            OnEnter(AppState::Running),
            (spawn_gallery_camera, spawn_corridor_geometry),
        );

    app.add_systems(Update, regenerate_layout.in_set(GallerySet::Layout))
        .add_systems(
            Update,
            (
                sync_corridor_geometry,
                sync_artwork,
                detect_failed_artwork,
                highlight_nearby_artwork,
            )
                .chain()
                .in_set(GallerySet::Scene),
        )
        .add_systems(
            Update,
            fps_notification_system.run_if(in_state(AppState::Running)),
        );

    // Add fps_text_update_system only for native builds.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, fps_text_update_system);
    }

    app
}

fn spawn_lighting(commands: &mut Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: DIRECTIONAL_ILLUMINANCE,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            1.0,
            -std::f32::consts::FRAC_PI_4,
        )),
    ));
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands) {
    spawn_lighting(&mut commands);

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn create_native_overlays(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                FpsText,
            ));
        });
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
