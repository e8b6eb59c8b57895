//! Sequential batch upload with cooperative cancellation.
//!
//! One request is in flight at a time; the backend accepts one multipart
//! upload per call and there is no batching endpoint. The cancellation
//! token is checked only at iteration boundaries: an in-flight request
//! is never aborted, and cancellation abandons the batch outright —
//! counters reset to zero, completed uploads stay reconciled.

use std::collections::BTreeMap;

use litterlog_api_client::PhotoUpload;
use litterlog_core::{PhotoRecord, PhotoStore, UploadFailureKind};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::backend::UploadBackend;

/// Per-batch settings carried from configuration.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Device model string sent with each upload.
    pub device_model: String,
    /// When set, uploads are tagged by a third party; successful image
    /// uploads are removed locally even without tags.
    pub admin_tagging: bool,
}

/// Aggregate result of one batch. Failures are counters, not per-item
/// errors; failed records stay in the store untouched for a later batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub uploaded: u32,
    pub failed: u32,
    pub tagged: u32,
    pub tagged_failed: u32,
    /// Failure counts per classification bucket.
    pub failure_kinds: BTreeMap<UploadFailureKind, u32>,
    /// True when the batch was abandoned via the cancellation token.
    /// All counters above are zero in that case.
    pub cancelled: bool,
}

impl BatchOutcome {
    fn record_failure(&mut self, kind: UploadFailureKind) {
        *self.failure_kinds.entry(kind).or_insert(0) += 1;
    }

    fn reset(&mut self) {
        *self = BatchOutcome {
            cancelled: self.cancelled,
            ..BatchOutcome::default()
        };
    }
}

/// Drives a store's pending records through upload and tag submission.
pub struct BatchUploader<B: UploadBackend + ?Sized> {
    backend: std::sync::Arc<B>,
    options: BatchOptions,
}

impl<B: UploadBackend + ?Sized> BatchUploader<B> {
    pub fn new(backend: std::sync::Arc<B>, options: BatchOptions) -> Self {
        Self { backend, options }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Process every eligible record in the store, strictly sequentially.
    ///
    /// Eligible records:
    /// - gallery/camera origin with numeric coordinates: multipart image
    ///   upload. On success the record is removed when admin tagging is
    ///   on or the record carried tags; otherwise it stays locally,
    ///   reclassified as web-sourced with the server id and
    ///   `uploaded = true`.
    /// - web origin with tags: tags-only submission; removed on success.
    ///
    /// Failures leave the record untouched and increment the matching
    /// counter plus a classification bucket. Cancellation is observed
    /// before each iteration; it stops the batch and zeroes all counters.
    #[tracing::instrument(skip_all, fields(batch_id = %Uuid::new_v4(), pending = store.len()))]
    pub async fn upload_all(
        &self,
        store: &mut PhotoStore,
        cancel: &CancellationToken,
    ) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        let snapshot: Vec<PhotoRecord> = store.records().to_vec();

        for record in snapshot {
            if cancel.is_cancelled() {
                tracing::info!("Batch cancelled, abandoning remaining records");
                outcome.cancelled = true;
                outcome.reset();
                break;
            }

            if record.origin.is_device() {
                self.upload_one(store, &record, &mut outcome).await;
            } else if record.is_tagged() {
                self.submit_tags_one(store, &record, &mut outcome).await;
            }
        }

        tracing::info!(
            uploaded = outcome.uploaded,
            failed = outcome.failed,
            tagged = outcome.tagged,
            tagged_failed = outcome.tagged_failed,
            cancelled = outcome.cancelled,
            "Batch finished"
        );
        outcome
    }

    async fn upload_one(
        &self,
        store: &mut PhotoStore,
        record: &PhotoRecord,
        outcome: &mut BatchOutcome,
    ) {
        // Device photos without coordinates cannot be uploaded; they are
        // skipped, not failed.
        let (Some(lat), Some(lon)) = (record.lat, record.lon) else {
            tracing::debug!(photo_id = record.id, "Skipping photo without coordinates");
            return;
        };

        let path = record.uri.trim_start_matches("file://");
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!(photo_id = record.id, uri = %record.uri, error = %e, "Failed to read photo file");
                outcome.failed += 1;
                outcome.record_failure(UploadFailureKind::Unknown);
                return;
            }
        };

        let upload = PhotoUpload {
            bytes,
            filename: record.filename.clone(),
            lat,
            lon,
            date: record.date,
            picked_up: record.picked_up,
            model: self.options.device_model.clone(),
            tags: record.tags.clone(),
            custom_tags: record.custom_tags.clone(),
        };

        match self.backend.upload_photo(upload).await {
            Ok(response) if response.success => {
                if self.options.admin_tagging || record.is_tagged() {
                    // Nothing left to do locally for this photo.
                    store.remove_photo(record);
                    outcome.uploaded += 1;
                    tracing::info!(photo_id = record.id, "Photo uploaded and released");
                } else if let Some(server_id) = response.photo_id {
                    // Kept locally for tagging, now under its server id.
                    store.mark_uploaded(record, server_id);
                    outcome.uploaded += 1;
                    tracing::info!(
                        photo_id = record.id,
                        server_id = server_id,
                        "Photo uploaded, awaiting tags"
                    );
                } else {
                    tracing::error!(photo_id = record.id, "Upload succeeded without a photo_id");
                    outcome.failed += 1;
                    outcome.record_failure(UploadFailureKind::Unknown);
                }
            }
            Ok(response) => {
                let kind = response
                    .msg
                    .as_deref()
                    .map(UploadFailureKind::from_server_msg)
                    .unwrap_or(UploadFailureKind::Unknown);
                tracing::warn!(photo_id = record.id, kind = %kind, "Upload refused by server");
                outcome.failed += 1;
                outcome.record_failure(kind);
            }
            Err(e) => {
                tracing::error!(photo_id = record.id, error = %e, "Upload request failed");
                outcome.failed += 1;
                outcome.record_failure(UploadFailureKind::Unknown);
            }
        }
    }

    async fn submit_tags_one(
        &self,
        store: &mut PhotoStore,
        record: &PhotoRecord,
        outcome: &mut BatchOutcome,
    ) {
        match self
            .backend
            .submit_tags(record.id, &record.tags, &record.custom_tags, record.picked_up)
            .await
        {
            Ok(response) if response.success => {
                store.remove_photo(record);
                outcome.tagged += 1;
                tracing::info!(photo_id = record.id, "Tags submitted, photo released");
            }
            Ok(_) => {
                tracing::warn!(photo_id = record.id, "Tag submission refused by server");
                outcome.tagged_failed += 1;
                outcome.record_failure(UploadFailureKind::Unknown);
            }
            Err(e) => {
                tracing::error!(photo_id = record.id, error = %e, "Tag submission request failed");
                outcome.tagged_failed += 1;
                outcome.record_failure(UploadFailureKind::Unknown);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_zeroes_counters_but_keeps_cancelled_flag() {
        let mut outcome = BatchOutcome {
            uploaded: 3,
            failed: 2,
            tagged: 1,
            tagged_failed: 1,
            cancelled: true,
            ..BatchOutcome::default()
        };
        outcome.record_failure(UploadFailureKind::InvalidCoordinates);
        outcome.reset();

        assert!(outcome.cancelled);
        assert_eq!(outcome.uploaded, 0);
        assert_eq!(outcome.failed, 0);
        assert_eq!(outcome.tagged, 0);
        assert_eq!(outcome.tagged_failed, 0);
        assert!(outcome.failure_kinds.is_empty());
    }
}
