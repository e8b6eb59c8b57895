//! Backend seam for the batch uploader.
//!
//! The uploader talks to the backend through this trait so tests can
//! substitute a scripted implementation; `ApiClient` is the production
//! one.

use anyhow::Result;
use async_trait::async_trait;
use litterlog_api_client::{ApiClient, PhotoUpload, TagSubmitResponse, UploadResponse};
use litterlog_core::TagMap;

/// The two backend operations a batch needs: image upload and tags-only
/// submission.
#[async_trait]
pub trait UploadBackend: Send + Sync {
    async fn upload_photo(&self, upload: PhotoUpload) -> Result<UploadResponse>;

    async fn submit_tags(
        &self,
        photo_id: i64,
        tags: &TagMap,
        custom_tags: &[String],
        picked_up: bool,
    ) -> Result<TagSubmitResponse>;
}

#[async_trait]
impl UploadBackend for ApiClient {
    async fn upload_photo(&self, upload: PhotoUpload) -> Result<UploadResponse> {
        ApiClient::upload_photo(self, upload).await
    }

    async fn submit_tags(
        &self,
        photo_id: i64,
        tags: &TagMap,
        custom_tags: &[String],
        picked_up: bool,
    ) -> Result<TagSubmitResponse> {
        ApiClient::submit_tags(self, photo_id, tags, custom_tags, picked_up).await
    }
}
