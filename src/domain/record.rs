//! Record upload and retrieval types.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// An upload submission: the record file plus the patient it belongs to.
///
/// The file is read by the adapter when the request is sent, not when the
/// form is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub patient_id: String,
    pub file: PathBuf,
}

impl UploadRequest {
    #[must_use]
    pub fn new(patient_id: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            patient_id: patient_id.into(),
            file: file.into(),
        }
    }

    /// File name sent in the multipart `file` part.
    #[must_use]
    pub fn file_name(&self) -> String {
        file_name_of(&self.file)
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "record".to_string())
}

/// Confirmation returned by `POST /upload`.
///
/// Other response fields (`hashCID`, `status`) are not displayed and ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReceipt {
    pub record_id: String,
}

/// Record metadata returned by `GET /retrieve/{recordId}`.
///
/// Displayed as-is; the client does not check it against the request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievedRecord {
    pub record_id: String,
    pub patient_id: String,
    /// Decrypted file size in bytes
    pub file_size: u64,
    /// Free-form status message, echoed verbatim
    pub status: String,
}
