//! Error types module
//!
//! Core error types used throughout litterlog. All recoverable domain
//! errors are unified under the `AppError` enum: validation failures,
//! network/server failures, and platform permission denials. Nothing in
//! this taxonomy is fatal; callers absorb failures into counters or
//! field-level messages.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A local input constraint was violated (e.g. custom-tag length).
    /// Surfaced as a field-level message, never sent to the backend.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The request never produced a usable response (DNS, connect,
    /// timeout, malformed body).
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered but refused the operation.
    #[error("Server error: {msg}")]
    Server { msg: String },

    /// A device capability (photo library, location) is unavailable.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Failure buckets for a single upload or tag-submit attempt, derived
/// from the server's message code. Everything unrecognized lands in
/// `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UploadFailureKind {
    AlreadyUploaded,
    InvalidCoordinates,
    Unknown,
}

impl UploadFailureKind {
    /// Classify a server-returned `msg` code.
    pub fn from_server_msg(msg: &str) -> Self {
        match msg {
            "photo-already-uploaded" => UploadFailureKind::AlreadyUploaded,
            "invalid-coordinates" => UploadFailureKind::InvalidCoordinates,
            _ => UploadFailureKind::Unknown,
        }
    }
}

impl std::fmt::Display for UploadFailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            UploadFailureKind::AlreadyUploaded => "already-uploaded",
            UploadFailureKind::InvalidCoordinates => "invalid-coordinates",
            UploadFailureKind::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}
