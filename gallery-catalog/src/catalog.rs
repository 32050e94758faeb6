use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use crate::error::RecordError;
use crate::record::ArtworkRecord;

/// Catalog document, relative to the asset root.
pub const CATALOG_PATH: &str = "data/catalog.gallery.json";

/// Uploaded image directory, relative to the asset root. Image references in the
/// catalog are relative to the root so the render engine can load them as assets.
pub const UPLOADS_DIR: &str = "uploads";

/// Ordered artwork collection. Mirrors the persisted JSON document: `{"images": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub images: Vec<ArtworkRecord>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(images: Vec<ArtworkRecord>) -> Self {
        Self { images }
    }

    /// Records in insertion order.
    pub fn list(&self) -> &[ArtworkRecord] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Id the next appended record receives: previous maximum plus one, or 1.
    pub fn next_id(&self) -> Result<u32, RecordError> {
        match self.images.iter().map(|record| record.id).max() {
            Some(max) => max.checked_add(1).ok_or(RecordError::IdsExhausted(max)),
            None => Ok(1),
        }
    }

    /// Append a bare image reference.
    pub fn append(&mut self, image: impl Into<String>) -> Result<&ArtworkRecord, RecordError> {
        self.append_record(ArtworkRecord::new(0, image))
    }

    /// Append a record with caller-supplied metadata. Any id on `record` is replaced.
    pub fn append_record(
        &mut self,
        mut record: ArtworkRecord,
    ) -> Result<&ArtworkRecord, RecordError> {
        record.id = self.next_id()?;
        debug!(id = record.id, image = %record.image, "catalog append");

        let index = self.images.len();
        self.images.push(record);
        Ok(&self.images[index])
    }

    /// Ids must be unique: scene entities and RPC callers address records by id.
    pub fn validate(&self) -> Result<(), RecordError> {
        let mut seen = HashSet::with_capacity(self.images.len());
        match self.images.iter().find(|record| !seen.insert(record.id)) {
            Some(record) => Err(RecordError::DuplicateId(record.id)),
            None => Ok(()),
        }
    }

    /// Give every repeated id after its first occurrence an unused id, keeping
    /// record order. Returns the `(old, new)` pairs that were rewritten.
    pub fn renumber_duplicates(&mut self) -> Vec<(u32, u32)> {
        let mut used: HashSet<u32> = HashSet::with_capacity(self.images.len());
        let mut duplicates = Vec::new();
        for (index, record) in self.images.iter().enumerate() {
            if !used.insert(record.id) {
                duplicates.push(index);
            }
        }

        let mut candidate = self.images.iter().map(|record| record.id).max().unwrap_or(0);
        let mut renumbered = Vec::with_capacity(duplicates.len());
        for index in duplicates {
            // Fewer records than ids, so the search always lands.
            loop {
                candidate = candidate.wrapping_add(1).max(1);
                if used.insert(candidate) {
                    break;
                }
            }
            let record = &mut self.images[index];
            renumbered.push((record.id, candidate));
            record.id = candidate;
        }
        renumbered
    }

    /// Discard every record. Clearing an empty catalog is fine.
    pub fn clear(&mut self) {
        debug!(discarded = self.images.len(), "catalog clear");
        self.images.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_assigns_sequential_ids() {
        let mut catalog = Catalog::new();

        assert_eq!(catalog.append("uploads/a.png").unwrap().id, 1);
        assert_eq!(catalog.append("uploads/b.png").unwrap().id, 2);
        assert_eq!(catalog.append("uploads/c.png").unwrap().id, 3);

        let images: Vec<&str> = catalog.list().iter().map(|r| r.image.as_str()).collect();
        assert_eq!(images, ["uploads/a.png", "uploads/b.png", "uploads/c.png"]);
    }

    #[test]
    fn test_append_continues_from_max_id() {
        let mut catalog = Catalog::from_records(vec![
            ArtworkRecord::new(4, "uploads/a.png"),
            ArtworkRecord::new(9, "uploads/b.png"),
            ArtworkRecord::new(2, "uploads/c.png"),
        ]);

        assert_eq!(catalog.append("uploads/d.png").unwrap().id, 10);
    }

    #[test]
    fn test_append_record_overrides_id() {
        let mut catalog = Catalog::new();
        catalog.append("uploads/a.png").unwrap();

        let mut record = ArtworkRecord::new(99, "uploads/b.png");
        record.width = Some(640);

        let appended = catalog.append_record(record).unwrap();
        assert_eq!(appended.id, 2);
        assert_eq!(appended.width, Some(640));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut catalog = Catalog::new();
        catalog.append("uploads/a.png").unwrap();

        catalog.clear();
        assert!(catalog.is_empty());
        catalog.clear();
        assert!(catalog.is_empty());

        assert_eq!(catalog.append("uploads/b.png").unwrap().id, 1);
    }

    #[test]
    fn test_document_shape() {
        let catalog: Catalog = serde_json::from_str(r#"{"images": []}"#).unwrap();
        assert!(catalog.is_empty());

        let catalog: Catalog = serde_json::from_str("{}").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_append_refuses_to_wrap_past_max_id() {
        let mut catalog = Catalog::from_records(vec![ArtworkRecord::new(u32::MAX, "uploads/a.png")]);

        assert_eq!(catalog.next_id(), Err(RecordError::IdsExhausted(u32::MAX)));
        assert_eq!(
            catalog.append("uploads/b.png").unwrap_err(),
            RecordError::IdsExhausted(u32::MAX)
        );
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_validate_reports_first_duplicate() {
        let mut catalog = Catalog::from_records(vec![
            ArtworkRecord::new(1, "uploads/a.png"),
            ArtworkRecord::new(2, "uploads/b.png"),
        ]);
        assert_eq!(catalog.validate(), Ok(()));

        catalog.images.push(ArtworkRecord::new(2, "uploads/c.png"));
        assert_eq!(catalog.validate(), Err(RecordError::DuplicateId(2)));
    }

    #[test]
    fn test_renumber_duplicates_keeps_every_record() {
        let mut catalog = Catalog::from_records(vec![
            ArtworkRecord::new(1, "uploads/a.png"),
            ArtworkRecord::new(1, "uploads/b.png"),
            ArtworkRecord::new(3, "uploads/c.png"),
            ArtworkRecord::new(1, "uploads/d.png"),
        ]);

        assert_eq!(catalog.renumber_duplicates(), [(1, 4), (1, 5)]);
        assert_eq!(catalog.validate(), Ok(()));

        let ids: Vec<u32> = catalog.list().iter().map(|r| r.id).collect();
        assert_eq!(ids, [1, 4, 3, 5]);
        assert_eq!(catalog.list()[1].image, "uploads/b.png");

        assert!(catalog.renumber_duplicates().is_empty());
    }

    #[test]
    fn test_renumber_duplicates_wraps_below_max_id() {
        let mut catalog = Catalog::from_records(vec![
            ArtworkRecord::new(u32::MAX, "uploads/a.png"),
            ArtworkRecord::new(1, "uploads/b.png"),
            ArtworkRecord::new(u32::MAX, "uploads/c.png"),
        ]);

        assert_eq!(catalog.renumber_duplicates(), [(u32::MAX, 2)]);
        assert_eq!(catalog.validate(), Ok(()));
    }
}
