//! JSON-backed catalog persistence and upload ingestion.
use chrono::Utc;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::catalog::{CATALOG_PATH, Catalog, UPLOADS_DIR};
use crate::error::CatalogError;
use crate::legacy::LegacyPlacementRule;
use crate::record::ArtworkRecord;

/// Catalog persisted under an asset root directory.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    root: PathBuf,
    legacy_rule: Option<LegacyPlacementRule>,
}

impl CatalogStore {
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            legacy_rule: None,
        }
    }

    /// Stamp a fixed wall and depth on every new upload, as older galleries did.
    pub fn with_legacy_positions(mut self, rule: LegacyPlacementRule) -> Self {
        self.legacy_rule = Some(rule);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_path(&self) -> PathBuf {
        self.root.join(CATALOG_PATH)
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.root.join(UPLOADS_DIR)
    }

    /// Read the catalog. A missing document is an empty catalog.
    pub fn load(&self) -> Result<Catalog, CatalogError> {
        let path = self.data_path();
        match fs::read_to_string(&path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Catalog::new()),
            Err(e) => Err(CatalogError::io(path)(e)),
        }
    }

    pub fn save(&self, catalog: &Catalog) -> Result<(), CatalogError> {
        let path = self.data_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(CatalogError::io(parent))?;
        }

        let json = serde_json::to_string_pretty(catalog)?;
        fs::write(&path, json).map_err(CatalogError::io(&path))
    }

    /// Copy an image into the uploads directory and append it to the catalog.
    ///
    /// The file must decode as an image and the existing catalog must load;
    /// otherwise nothing is written to the uploads directory.
    pub fn upload(&self, source: &Path) -> Result<ArtworkRecord, CatalogError> {
        let original_name = source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| CatalogError::MissingFileName(source.to_path_buf()))?;

        let (width, height) =
            image::image_dimensions(source).map_err(|e| CatalogError::UnreadableImage {
                path: source.to_path_buf(),
                source: e,
            })?;

        let mut catalog = self.load()?;
        let now = Utc::now();
        let file_name = stored_file_name(&original_name, now.timestamp_millis());
        let mut record = ArtworkRecord::new(0, format!("{UPLOADS_DIR}/{file_name}"));
        record.uploaded_at = Some(now.to_rfc3339());
        record.width = Some(width);
        record.height = Some(height);
        if let Some(rule) = &self.legacy_rule {
            let (wall, depth) = rule.placement(catalog.len());
            record.wall = Some(wall);
            record.depth = Some(depth);
        }
        let record = catalog.append_record(record)?.clone();

        let uploads_dir = self.uploads_dir();
        fs::create_dir_all(&uploads_dir).map_err(CatalogError::io(&uploads_dir))?;
        let destination = uploads_dir.join(&file_name);
        fs::copy(source, &destination).map_err(CatalogError::io(&destination))?;

        if let Err(e) = self.save(&catalog) {
            if let Err(cleanup) = fs::remove_file(&destination) {
                warn!("Failed to remove {}: {cleanup}", destination.display());
            }
            return Err(e);
        }

        info!(
            id = record.id,
            image = %record.image,
            width,
            height,
            "artwork uploaded"
        );
        Ok(record)
    }

    /// Delete the catalog document and every uploaded file. Returns the number of
    /// uploads removed. Clearing an already empty store is not an error.
    pub fn clear(&self) -> Result<usize, CatalogError> {
        let data_path = self.data_path();
        match fs::remove_file(&data_path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(CatalogError::io(data_path)(e)),
        }

        let uploads_dir = self.uploads_dir();
        let entries = match fs::read_dir(&uploads_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(CatalogError::io(uploads_dir)(e)),
        };

        let mut removed = 0;
        for entry in entries {
            let path = entry.map_err(CatalogError::io(&uploads_dir))?.path();
            if !path.is_file() {
                warn!("Skipping non-file entry in uploads: {}", path.display());
                continue;
            }
            fs::remove_file(&path).map_err(CatalogError::io(&path))?;
            removed += 1;
        }

        info!(removed, "gallery cleared");
        Ok(removed)
    }
}

/// `{millis}-{name}` with every whitespace run in the name collapsed to a dash.
fn stored_file_name(original: &str, timestamp_millis: i64) -> String {
    let mut name = String::with_capacity(original.len());
    let mut in_whitespace = false;
    for ch in original.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                name.push('-');
            }
            in_whitespace = true;
        } else {
            name.push(ch);
            in_whitespace = false;
        }
    }
    format!("{timestamp_millis}-{name}")
}
