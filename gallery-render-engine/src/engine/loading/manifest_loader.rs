use bevy::asset::LoadState;
use bevy::prelude::*;
use gallery_catalog::CATALOG_PATH;

use crate::engine::assets::catalog_asset::GalleryCatalog;
use crate::engine::assets::gallery_config::GalleryConfig;
use crate::engine::camera::{TravelBounds, ViewpointConfig, ViewpointController};
use crate::engine::layout::LayoutGenerator;
use crate::engine::loading::progress::LoadingProgress;

/// Deployment config, relative to the asset root.
pub const CONFIG_PATH: &str = "gallery.config.json";

#[derive(Resource, Default)]
pub struct ManifestLoader {
    config: Option<Handle<GalleryConfig>>,
    catalog: Option<Handle<GalleryCatalog>>,
}

/// Where a startup document stands.
#[derive(Debug, PartialEq)]
enum Resolution<T> {
    Pending,
    Loaded(T),
    /// Missing or unparsable. Carries the loader's reason.
    Missing(String),
}

// Start the loading process
pub fn start_loading(mut manifest_loader: ResMut<ManifestLoader>, asset_server: Res<AssetServer>) {
    manifest_loader.config = Some(asset_server.load(CONFIG_PATH));
    manifest_loader.catalog = Some(asset_server.load(CATALOG_PATH));
}

fn resolve<T: Asset + Clone>(
    handle: Option<&Handle<T>>,
    assets: &Assets<T>,
    asset_server: &AssetServer,
) -> Resolution<T> {
    let Some(handle) = handle else {
        return Resolution::Missing("loading was never started".to_string());
    };

    if let Some(asset) = assets.get(handle) {
        return Resolution::Loaded(asset.clone());
    }

    match asset_server.get_load_state(handle) {
        Some(LoadState::Failed(err)) => Resolution::Missing(err.to_string()),
        _ => Resolution::Pending,
    }
}

/// Build the layout generator and the viewpoint controller from the deployment
/// config, or from the compiled defaults when it is missing or invalid.
pub fn resolve_config(
    mut commands: Commands,
    mut loading_progress: ResMut<LoadingProgress>,
    manifest_loader: Res<ManifestLoader>,
    configs: Res<Assets<GalleryConfig>>,
    asset_server: Res<AssetServer>,
) {
    if loading_progress.config_resolved {
        return;
    }

    let config = match resolve(manifest_loader.config.as_ref(), &configs, &asset_server) {
        Resolution::Pending => return,
        Resolution::Loaded(config) => match config.validate() {
            Ok(()) => {
                info!("✓ Gallery config loaded from {CONFIG_PATH}");
                config
            }
            Err(e) => {
                warn!("Invalid gallery config, using defaults: {e}");
                GalleryConfig::default()
            }
        },
        Resolution::Missing(reason) => {
            warn!("No gallery config at {CONFIG_PATH} ({reason}), using defaults");
            GalleryConfig::default()
        }
    };

    let (generator, viewpoint) = match LayoutGenerator::new(config.corridor) {
        Ok(generator) => (generator, config.viewpoint),
        Err(e) => {
            warn!("Corridor config rejected, using defaults: {e}");
            (LayoutGenerator::default(), ViewpointConfig::default())
        }
    };

    let layout = generator.generate(0);
    let controller = ViewpointController::new(viewpoint, TravelBounds::from_layout(&layout, &viewpoint));

    commands.insert_resource(generator);
    commands.insert_resource(layout);
    commands.insert_resource(controller);
    loading_progress.config_resolved = true;
}

/// Install the catalog the layout follows. A missing catalog is an empty gallery.
/// Repeated ids are renumbered so every record still gets its own artwork entity.
pub fn resolve_catalog(
    mut commands: Commands,
    mut loading_progress: ResMut<LoadingProgress>,
    manifest_loader: Res<ManifestLoader>,
    catalogs: Res<Assets<GalleryCatalog>>,
    asset_server: Res<AssetServer>,
) {
    if loading_progress.catalog_resolved {
        return;
    }

    let catalog = match resolve(manifest_loader.catalog.as_ref(), &catalogs, &asset_server) {
        Resolution::Pending => return,
        Resolution::Loaded(mut catalog) => {
            if let Err(e) = catalog.validate() {
                warn!("Catalog at {CATALOG_PATH} is inconsistent ({e}), renumbering");
                for (old, new) in catalog.renumber_duplicates() {
                    warn!("Artwork id {old} repeated, serving this copy as #{new}");
                }
            }
            info!("✓ Catalog loaded: {} artworks", catalog.len());
            catalog
        }
        Resolution::Missing(reason) => {
            warn!("No catalog at {CATALOG_PATH} ({reason}), starting with an empty gallery");
            GalleryCatalog::default()
        }
    };

    commands.insert_resource(catalog);
    loading_progress.catalog_resolved = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::layout::CorridorLayout;
    use gallery_catalog::{ArtworkRecord, Catalog};

    fn loader_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<GalleryConfig>()
            .init_asset::<GalleryCatalog>()
            .init_resource::<LoadingProgress>()
            .init_resource::<ManifestLoader>()
            .add_systems(Update, (resolve_config, resolve_catalog));
        app
    }

    #[test]
    fn test_loaded_documents_are_installed() {
        let mut app = loader_app();

        let mut config = GalleryConfig::default();
        config.viewpoint.max_depth = 4.0;
        let config = app
            .world_mut()
            .resource_mut::<Assets<GalleryConfig>>()
            .add(config);

        let mut catalog = GalleryCatalog::default();
        catalog.append("uploads/a.png").unwrap();
        let catalog = app
            .world_mut()
            .resource_mut::<Assets<GalleryCatalog>>()
            .add(catalog);

        app.insert_resource(ManifestLoader {
            config: Some(config),
            catalog: Some(catalog),
        });
        app.update();

        assert!(app.world().resource::<LoadingProgress>().is_complete());
        assert_eq!(app.world().resource::<GalleryCatalog>().len(), 1);
        assert_eq!(
            app.world().resource::<ViewpointController>().bounds().max_depth,
            4.0
        );
        assert_eq!(
            app.world().resource::<CorridorLayout>().back_wall_depth,
            -20.0
        );
    }

    #[test]
    fn test_repeated_catalog_ids_are_renumbered() {
        let mut app = loader_app();

        let catalog = app
            .world_mut()
            .resource_mut::<Assets<GalleryCatalog>>()
            .add(GalleryCatalog(Catalog::from_records(vec![
                ArtworkRecord::new(2, "uploads/a.png"),
                ArtworkRecord::new(2, "uploads/b.png"),
                ArtworkRecord::new(1, "uploads/c.png"),
            ])));
        app.insert_resource(ManifestLoader {
            config: None,
            catalog: Some(catalog),
        });
        app.update();

        let installed = app.world().resource::<GalleryCatalog>();
        assert_eq!(installed.validate(), Ok(()));
        let ids: Vec<u32> = installed.list().iter().map(|r| r.id).collect();
        assert_eq!(ids, [2, 3, 1]);
        let images: Vec<&str> = installed.list().iter().map(|r| r.image.as_str()).collect();
        assert_eq!(images, ["uploads/a.png", "uploads/b.png", "uploads/c.png"]);
    }

    #[test]
    fn test_invalid_config_falls_back_to_defaults() {
        let mut app = loader_app();

        let mut config = GalleryConfig::default();
        config.corridor.slot_spacing = 0.0;
        let config = app
            .world_mut()
            .resource_mut::<Assets<GalleryConfig>>()
            .add(config);
        app.insert_resource(ManifestLoader {
            config: Some(config),
            catalog: None,
        });
        app.update();

        let progress = app.world().resource::<LoadingProgress>();
        assert!(progress.is_complete());
        assert_eq!(
            app.world().resource::<LayoutGenerator>(),
            &LayoutGenerator::default()
        );
        assert!(app.world().resource::<GalleryCatalog>().is_empty());
    }

    #[test]
    fn test_waits_while_documents_load() {
        let mut app = loader_app();
        app.insert_resource(ManifestLoader {
            config: Some(Handle::default()),
            catalog: Some(Handle::default()),
        });
        app.update();

        assert!(!app.world().resource::<LoadingProgress>().config_resolved);
        assert!(!app.world().resource::<LoadingProgress>().catalog_resolved);
    }
}
