//! Domain methods for the litter-photo backend.
//!
//! Wire types mirror the backend's JSON shapes. The upload endpoint
//! reports refusals as HTTP 200 bodies with `success: false` and a
//! machine-readable `msg` code, so callers inspect [`UploadResponse`]
//! rather than relying on HTTP status alone.

use crate::ApiClient;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use litterlog_core::models::{PhotoOrigin, PhotoRecord, TagMap};
use serde::{Deserialize, Serialize};

/// Multipart image upload endpoint.
pub const UPLOAD_PATH: &str = "/api/photos/upload/with-or-without-tags";
/// Tags-only submission for an already-uploaded photo.
pub const ADD_TAGS_PATH: &str = "/api/v2/add-tags-to-uploaded-image";
/// Previously-uploaded photos that still lack tags.
pub const UNTAGGED_PATH: &str = "/api/v2/photos/get-untagged-uploads";
/// Delete an uploaded photo.
pub const DELETE_PATH: &str = "/api/photos/delete";

/// Everything the multipart upload endpoint needs for one photo.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub lat: f64,
    pub lon: f64,
    pub date: DateTime<Utc>,
    pub picked_up: bool,
    /// Device model string reported alongside the photo.
    pub model: String,
    pub tags: TagMap,
    pub custom_tags: Vec<String>,
}

/// Response from the image upload endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    /// Server-assigned photo id, present on success.
    pub photo_id: Option<i64>,
    /// Machine-readable refusal code, present on failure
    /// (e.g. "photo-already-uploaded", "invalid-coordinates").
    pub msg: Option<String>,
}

/// Response from the tags-only submission endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagSubmitResponse {
    pub success: bool,
}

/// Request body for the tags-only submission endpoint.
#[derive(Debug, Serialize)]
struct AddTagsRequest<'a> {
    photo_id: i64,
    tags: &'a TagMap,
    custom_tags: &'a [String],
    picked_up: bool,
}

/// One previously-uploaded, untagged photo stub as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UntaggedUpload {
    pub id: i64,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub datetime: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct UntaggedUploadsResponse {
    #[serde(default)]
    photos: Vec<UntaggedUpload>,
}

impl UntaggedUpload {
    /// Convert the stub into a local web-origin record awaiting tags.
    pub fn into_record(self) -> PhotoRecord {
        PhotoRecord {
            id: self.id,
            date: self.datetime.unwrap_or_else(Utc::now),
            lat: self.lat,
            lon: self.lon,
            filename: self.filename.unwrap_or_default(),
            uri: String::new(),
            origin: PhotoOrigin::Web,
            tags: TagMap::new(),
            custom_tags: Vec::new(),
            picked_up: false,
            selected: false,
            uploaded: true,
        }
    }
}

impl ApiClient {
    /// Submit one photo as a multipart form. The response must be
    /// inspected for `success`; refusals come back as 200s with a `msg`
    /// code.
    pub async fn upload_photo(&self, upload: PhotoUpload) -> Result<UploadResponse> {
        let mut form = reqwest::multipart::Form::new()
            .part(
                "photo",
                reqwest::multipart::Part::bytes(upload.bytes).file_name(upload.filename),
            )
            .text("lat", upload.lat.to_string())
            .text("lon", upload.lon.to_string())
            .text("date", upload.date.to_rfc3339())
            .text("picked_up", if upload.picked_up { "1" } else { "0" })
            .text("model", upload.model);

        if !upload.tags.is_empty() {
            let tags_json =
                serde_json::to_string(&upload.tags).context("Serialize tags to JSON")?;
            form = form.text("tags", tags_json);
        }
        if !upload.custom_tags.is_empty() {
            let custom_json = serde_json::to_string(&upload.custom_tags)
                .context("Serialize custom tags to JSON")?;
            form = form.text("custom_tags", custom_json);
        }

        self.post_multipart(UPLOAD_PATH, form).await
    }

    /// Attach tags to a photo that is already uploaded.
    pub async fn submit_tags(
        &self,
        photo_id: i64,
        tags: &TagMap,
        custom_tags: &[String],
        picked_up: bool,
    ) -> Result<TagSubmitResponse> {
        let body = AddTagsRequest {
            photo_id,
            tags,
            custom_tags,
            picked_up,
        };
        self.post_json(ADD_TAGS_PATH, &body).await
    }

    /// Fetch the caller's uploaded-but-untagged photo stubs.
    pub async fn get_untagged_uploads(&self) -> Result<Vec<UntaggedUpload>> {
        let response: UntaggedUploadsResponse = self.get(UNTAGGED_PATH, &[]).await?;
        Ok(response.photos)
    }

    /// Delete an uploaded photo by its server id.
    pub async fn delete_photo(&self, photo_id: i64) -> Result<()> {
        self.delete(DELETE_PATH, &[("photo_id", photo_id.to_string())])
            .await
    }
}
