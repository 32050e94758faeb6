//! Startup loading of the deployment config and the artwork catalog.
//!
//! Both documents are optional. Whatever state each one ends in, the loader
//! resolves it and the engine moves on to the running gallery.

/// Config and catalog loading, validation and fallback.
///
/// Inserts the layout generator, the initial corridor and the viewpoint controller
/// once the config is known.
pub mod manifest_loader;

/// Loading progress tracking resource for the state transition.
pub mod progress;
