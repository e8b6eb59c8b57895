use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Structured litter tags: category -> tag title -> quantity.
///
/// BTreeMap keeps serialization deterministic, which matters for the
/// `tags` JSON field sent to the backend.
pub type TagMap = BTreeMap<String, BTreeMap<String, u32>>;

/// Where a photo record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoOrigin {
    /// Picked from the device photo library.
    Gallery,
    /// Captured in-app.
    Camera,
    /// Already uploaded to the backend but not yet tagged.
    Web,
}

impl PhotoOrigin {
    /// Gallery and camera photos live on the device and still need an
    /// image upload; web photos only need a tag submission.
    pub fn is_device(&self) -> bool {
        matches!(self, PhotoOrigin::Gallery | PhotoOrigin::Camera)
    }
}

/// One photo tracked by the app: a candidate for upload, or an
/// uploaded-but-untagged photo awaiting its tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoRecord {
    /// Local monotonic id for device photos; replaced by the
    /// server-assigned id once the image upload is acknowledged.
    pub id: i64,
    pub date: DateTime<Utc>,
    /// Nullable by design: web-sourced records may omit coordinates
    /// without being "not geotagged" (the server validated them).
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub filename: String,
    pub uri: String,
    pub origin: PhotoOrigin,
    #[serde(default)]
    pub tags: TagMap,
    #[serde(default)]
    pub custom_tags: Vec<String>,
    #[serde(default)]
    pub picked_up: bool,
    /// Transient UI state, never persisted or sent over the wire.
    #[serde(default, skip_serializing)]
    pub selected: bool,
    #[serde(default)]
    pub uploaded: bool,
}

impl PhotoRecord {
    /// Create a device-sourced record with no tags yet.
    pub fn new_device(
        id: i64,
        origin: PhotoOrigin,
        uri: impl Into<String>,
        filename: impl Into<String>,
        date: DateTime<Utc>,
        lat: Option<f64>,
        lon: Option<f64>,
    ) -> Self {
        Self {
            id,
            date,
            lat,
            lon,
            filename: filename.into(),
            uri: uri.into(),
            origin,
            tags: TagMap::new(),
            custom_tags: Vec::new(),
            picked_up: false,
            selected: false,
            uploaded: false,
        }
    }

    /// A record is geotagged when it carries numeric coordinates, or
    /// when it is web-sourced (the backend already validated those).
    pub fn is_geotagged(&self) -> bool {
        matches!(self.origin, PhotoOrigin::Web) || (self.lat.is_some() && self.lon.is_some())
    }

    /// A record is tagged when it has at least one structured or custom tag.
    pub fn is_tagged(&self) -> bool {
        !self.tags.is_empty() || !self.custom_tags.is_empty()
    }

    /// Identity within the store. Device photos are keyed by uri (ids
    /// are only unique per origin class), web photos by server id.
    pub fn same_photo(&self, other: &PhotoRecord) -> bool {
        if self.origin.is_device() != other.origin.is_device() {
            return false;
        }
        if self.origin.is_device() {
            self.uri == other.uri
        } else {
            self.id == other.id
        }
    }
}
