//! Record service port: the three-endpoint contract of the remote service.
//!
//! The production implementation is `adapters::http::HttpRecordService`.
//! Tests substitute an in-memory fake.

use crate::domain::{Identity, Registration, RetrievedRecord, UploadReceipt, UploadRequest};

/// Trait for calls against the remote healthcare-record service.
///
/// Each method performs exactly one call and blocks until it settles.
/// Implementations must not retry and must not time out on their own.
pub trait RecordService: Send + Sync {
    /// Error type for failed calls.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Register a participant (`POST /users`).
    ///
    /// # Errors
    /// Returns error on transport failure, non-2xx status or malformed body.
    fn register(&self, registration: &Registration) -> Result<Identity, Self::Error>;

    /// Upload a record file for a patient (`POST /upload`, multipart).
    ///
    /// # Errors
    /// Returns error if the file cannot be read or the call fails.
    fn upload(&self, request: &UploadRequest) -> Result<UploadReceipt, Self::Error>;

    /// Retrieve record metadata (`GET /retrieve/{record_id}`).
    ///
    /// The identifier is interpolated into the path verbatim.
    ///
    /// # Errors
    /// Returns error on transport failure, non-2xx status or malformed body.
    fn retrieve(&self, record_id: &str) -> Result<RetrievedRecord, Self::Error>;
}
