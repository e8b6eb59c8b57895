//! Photo store: the in-memory collection of pending photo records.
//!
//! This is the single state container for everything the app tracks
//! between capture and acknowledged upload. It is owned by the
//! application root and handed by mutable reference to whatever layer
//! needs it; all mutation goes through the operations below, so the
//! invariants (dedup keys, tag-map shape, custom-tag constraints) hold
//! in one place.

use crate::error::AppError;
use crate::models::{PhotoOrigin, PhotoRecord};
use crate::validation::validate_custom_tag;

/// Category used in the recent-tags list for free-text tags.
pub const CUSTOM_TAG_CATEGORY: &str = "custom-tag";

/// Maximum number of entries kept in the recent-tags list.
pub const RECENT_TAGS_CAP: usize = 10;

/// Most-recently-used `(category, title)` pairs, newest first.
///
/// Reusing a pair promotes it to the front; overflow evicts the oldest.
#[derive(Debug, Clone, Default)]
pub struct RecentTags {
    entries: Vec<(String, String)>,
}

impl RecentTags {
    pub fn touch(&mut self, category: &str, title: &str) {
        self.entries
            .retain(|(c, t)| !(c == category && t == title));
        self.entries
            .insert(0, (category.to_string(), title.to_string()));
        self.entries.truncate(RECENT_TAGS_CAP);
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// In-memory store of photo records plus the recent-tags list.
#[derive(Debug, Clone, Default)]
pub struct PhotoStore {
    photos: Vec<PhotoRecord>,
    recent_tags: RecentTags,
    next_local_id: i64,
}

impl PhotoStore {
    pub fn new() -> Self {
        Self {
            photos: Vec::new(),
            recent_tags: RecentTags::default(),
            next_local_id: 1,
        }
    }

    /// Allocate a local id for a device-sourced record. Server ids take
    /// over once the photo is uploaded.
    pub fn allocate_local_id(&mut self) -> i64 {
        let id = self.next_local_id;
        self.next_local_id += 1;
        id
    }

    pub fn records(&self) -> &[PhotoRecord] {
        &self.photos
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn recent_tags(&self) -> &RecentTags {
        &self.recent_tags
    }

    pub fn get(&self, index: usize) -> Option<&PhotoRecord> {
        self.photos.get(index)
    }

    /// Append records under `origin`, skipping any that duplicate an
    /// existing record by the origin-appropriate key (uri for device
    /// photos, id for web photos). Duplicates are silent no-ops.
    pub fn add_records(&mut self, records: Vec<PhotoRecord>, origin: PhotoOrigin) {
        for mut record in records {
            record.origin = origin;
            let duplicate = self.photos.iter().any(|p| p.same_photo(&record));
            if !duplicate {
                self.photos.push(record);
            }
        }
    }

    /// Add or bump a structured tag on the record at `index`.
    ///
    /// An explicit `quantity` overwrites; `None` increments the existing
    /// quantity by one (starting from zero for a new tag). The pair is
    /// recorded in the recent-tags list either way.
    pub fn add_tag(
        &mut self,
        index: usize,
        category: &str,
        title: &str,
        quantity: Option<u32>,
    ) -> Result<(), AppError> {
        let record = self.record_mut(index)?;
        let entry = record
            .tags
            .entry(category.to_string())
            .or_default()
            .entry(title.to_string())
            .or_insert(0);
        *entry = match quantity {
            Some(q) => q,
            None => *entry + 1,
        };
        self.recent_tags.touch(category, title);
        Ok(())
    }

    /// Append a validated free-text tag to the record at `index`.
    pub fn add_custom_tag(&mut self, index: usize, text: &str) -> Result<(), AppError> {
        let record = self.record_mut(index)?;
        validate_custom_tag(text, &record.custom_tags)?;
        record.custom_tags.push(text.to_string());
        self.recent_tags.touch(CUSTOM_TAG_CATEGORY, text);
        Ok(())
    }

    /// Remove one tag; drops the category key entirely when it was the
    /// last tag under that category.
    pub fn remove_tag(&mut self, index: usize, category: &str, title: &str) -> Result<(), AppError> {
        let record = self.record_mut(index)?;
        if let Some(titles) = record.tags.get_mut(category) {
            titles.remove(title);
            if titles.is_empty() {
                record.tags.remove(category);
            }
        }
        Ok(())
    }

    /// Remove a custom tag by position. Out-of-range positions are no-ops.
    pub fn remove_custom_tag(&mut self, index: usize, tag_index: usize) -> Result<(), AppError> {
        let record = self.record_mut(index)?;
        if tag_index < record.custom_tags.len() {
            record.custom_tags.remove(tag_index);
        }
        Ok(())
    }

    pub fn toggle_picked_up(&mut self, id: i64) {
        if let Some(record) = self.photos.iter_mut().find(|p| p.id == id) {
            record.picked_up = !record.picked_up;
        }
    }

    pub fn toggle_selected(&mut self, index: usize) -> Result<(), AppError> {
        let record = self.record_mut(index)?;
        record.selected = !record.selected;
        Ok(())
    }

    /// Drop a record by id (user-initiated delete).
    pub fn delete_record(&mut self, id: i64) {
        self.photos.retain(|p| p.id != id);
    }

    /// Drop a record by photo identity (post-upload reconciliation).
    /// Returns whether anything was removed.
    pub fn remove_photo(&mut self, photo: &PhotoRecord) -> bool {
        let before = self.photos.len();
        self.photos.retain(|p| !p.same_photo(photo));
        before != self.photos.len()
    }

    /// Reconcile a successful image upload for a photo that stays local
    /// awaiting tags: adopt the server id, reclassify as web-sourced,
    /// and mark it uploaded.
    pub fn mark_uploaded(&mut self, photo: &PhotoRecord, server_id: i64) -> bool {
        if let Some(record) = self.photos.iter_mut().find(|p| p.same_photo(photo)) {
            record.id = server_id;
            record.origin = PhotoOrigin::Web;
            record.uploaded = true;
            true
        } else {
            false
        }
    }

    fn record_mut(&mut self, index: usize) -> Result<&mut PhotoRecord, AppError> {
        let len = self.photos.len();
        self.photos
            .get_mut(index)
            .ok_or_else(|| AppError::InvalidInput(format!("No photo at index {} (have {})", index, len)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn gallery_record(uri: &str) -> PhotoRecord {
        PhotoRecord::new_device(
            0,
            PhotoOrigin::Gallery,
            uri,
            uri.trim_start_matches("file:///"),
            Utc::now(),
            Some(53.3),
            Some(-6.2),
        )
    }

    fn store_with_one() -> PhotoStore {
        let mut store = PhotoStore::new();
        let mut r = gallery_record("file:///a.jpg");
        r.id = store.allocate_local_id();
        store.add_records(vec![r], PhotoOrigin::Gallery);
        store
    }

    #[test]
    fn add_records_dedups_device_photos_by_uri() {
        let mut store = PhotoStore::new();
        store.add_records(
            vec![gallery_record("file:///a.jpg"), gallery_record("file:///b.jpg")],
            PhotoOrigin::Gallery,
        );
        store.add_records(vec![gallery_record("file:///a.jpg")], PhotoOrigin::Gallery);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn add_records_dedups_web_photos_by_id() {
        let mut store = PhotoStore::new();
        let mut w1 = gallery_record("remote-1");
        w1.id = 100;
        let mut w2 = gallery_record("remote-2");
        w2.id = 100;
        store.add_records(vec![w1], PhotoOrigin::Web);
        store.add_records(vec![w2], PhotoOrigin::Web);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn add_tag_then_remove_tag_drops_category_key() {
        let mut store = store_with_one();
        store.add_tag(0, "smoking", "butts", Some(4)).unwrap();
        assert_eq!(store.get(0).unwrap().tags["smoking"]["butts"], 4);

        store.remove_tag(0, "smoking", "butts").unwrap();
        // category key gone, not left as an empty map
        assert!(!store.get(0).unwrap().tags.contains_key("smoking"));
    }

    #[test]
    fn add_tag_without_quantity_increments() {
        let mut store = store_with_one();
        store.add_tag(0, "alcohol", "beer-cans", None).unwrap();
        store.add_tag(0, "alcohol", "beer-cans", None).unwrap();
        assert_eq!(store.get(0).unwrap().tags["alcohol"]["beer-cans"], 2);

        store.add_tag(0, "alcohol", "beer-cans", Some(7)).unwrap();
        assert_eq!(store.get(0).unwrap().tags["alcohol"]["beer-cans"], 7);
    }

    #[test]
    fn add_tag_out_of_range_is_invalid_input() {
        let mut store = PhotoStore::new();
        let err = store.add_tag(0, "coastal", "rope", None).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn custom_tag_validation_is_enforced_through_store() {
        let mut store = store_with_one();
        assert!(matches!(
            store.add_custom_tag(0, "ab"),
            Err(AppError::Validation(_))
        ));
        store.add_custom_tag(0, "fishing net").unwrap();
        assert!(matches!(
            store.add_custom_tag(0, "Fishing Net"),
            Err(AppError::Validation(_))
        ));
        assert_eq!(store.get(0).unwrap().custom_tags.len(), 1);
    }

    #[test]
    fn custom_tag_cap_of_ten() {
        let mut store = store_with_one();
        for i in 0..10 {
            store.add_custom_tag(0, &format!("tag number {}", i)).unwrap();
        }
        assert!(matches!(
            store.add_custom_tag(0, "the eleventh"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn remove_custom_tag_by_position() {
        let mut store = store_with_one();
        store.add_custom_tag(0, "first tag").unwrap();
        store.add_custom_tag(0, "second tag").unwrap();
        store.remove_custom_tag(0, 0).unwrap();
        assert_eq!(store.get(0).unwrap().custom_tags, vec!["second tag"]);
        // out-of-range position is a no-op
        store.remove_custom_tag(0, 5).unwrap();
        assert_eq!(store.get(0).unwrap().custom_tags.len(), 1);
    }

    #[test]
    fn recent_tags_cap_and_promotion() {
        let mut store = store_with_one();
        for i in 0..10 {
            store.add_tag(0, "brands", &format!("brand-{}", i), None).unwrap();
        }
        assert_eq!(store.recent_tags().len(), 10);

        // reuse promotes to front without growing the list
        store.add_tag(0, "brands", "brand-3", None).unwrap();
        assert_eq!(store.recent_tags().len(), 10);
        assert_eq!(
            store.recent_tags().entries()[0],
            ("brands".to_string(), "brand-3".to_string())
        );

        // an eleventh distinct pair evicts the oldest (brand-0)
        store.add_tag(0, "brands", "brand-10", None).unwrap();
        assert_eq!(store.recent_tags().len(), 10);
        assert!(!store
            .recent_tags()
            .entries()
            .iter()
            .any(|(_, t)| t == "brand-0"));
    }

    #[test]
    fn toggles_and_delete() {
        let mut store = store_with_one();
        let id = store.get(0).unwrap().id;

        store.toggle_picked_up(id);
        assert!(store.get(0).unwrap().picked_up);
        store.toggle_picked_up(id);
        assert!(!store.get(0).unwrap().picked_up);

        store.toggle_selected(0).unwrap();
        assert!(store.get(0).unwrap().selected);

        store.delete_record(id);
        assert!(store.is_empty());
    }

    #[test]
    fn mark_uploaded_reclassifies_to_web() {
        let mut store = store_with_one();
        let snapshot = store.get(0).unwrap().clone();
        assert!(store.mark_uploaded(&snapshot, 99));

        let record = store.get(0).unwrap();
        assert_eq!(record.id, 99);
        assert_eq!(record.origin, PhotoOrigin::Web);
        assert!(record.uploaded);
    }
}
