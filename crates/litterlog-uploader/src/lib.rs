//! Batch uploader: drives pending photo records through image upload
//! and tag submission, strictly one request at a time, with cooperative
//! cancellation at iteration boundaries.

pub mod backend;
pub mod batch;
pub mod library;

pub use backend::UploadBackend;
pub use batch::{BatchOptions, BatchOutcome, BatchUploader};
pub use library::{import_all, LibraryPage, LibraryPhoto, PhotoLibrary};
