//! HTTP adapter: Implementation of RecordService over reqwest.
//!
//! Issues blocking calls against the configured base address. Each call runs
//! on a request worker thread, never on the UI loop.
//!
//! # Timeouts
//!
//! reqwest's blocking client applies a 30 second timeout by default. It is
//! disabled here: a hung call stays in flight until the service answers or
//! the connection drops.

use reqwest::blocking::{multipart, Client, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::domain::{Identity, Registration, RetrievedRecord, UploadReceipt, UploadRequest};
use crate::ports::RecordService;

/// Error type for HTTP calls.
///
/// Only used for the diagnostic log record; panels never branch on it.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Service responded with status {0}")]
    Status(StatusCode),

    #[error("Malformed response body: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("Cannot read upload file: {0}")]
    Io(#[from] std::io::Error),
}

/// reqwest-backed record service.
pub struct HttpRecordService {
    config: ClientConfig,
    client: Client,
}

impl HttpRecordService {
    /// Create a new HTTP adapter for the given configuration.
    ///
    /// # Errors
    /// Returns error if the underlying client cannot be built (e.g. TLS init).
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(None)
            .build()
            .map_err(ClientError::Transport)?;
        Ok(Self::with_client(config, client))
    }

    /// Create an adapter around a pre-built client (proxy or TLS settings
    /// chosen by the caller).
    #[must_use]
    pub fn with_client(config: ClientConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// The configuration this adapter sends requests to.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }
        response.json::<T>().map_err(ClientError::Decode)
    }
}

impl RecordService for HttpRecordService {
    type Error = ClientError;

    fn register(&self, registration: &Registration) -> Result<Identity, ClientError> {
        let url = self.config.endpoint("users");
        tracing::debug!(role = %registration.role, "POST {}", url);

        let response = self
            .client
            .post(url)
            .json(registration)
            .send()
            .map_err(ClientError::Transport)?;
        Self::read_json(response)
    }

    fn upload(&self, request: &UploadRequest) -> Result<UploadReceipt, ClientError> {
        let bytes = std::fs::read(&request.file)?;
        let size = bytes.len();

        let file_part = multipart::Part::bytes(bytes)
            .file_name(request.file_name())
            .mime_str("application/octet-stream")
            .map_err(ClientError::Transport)?;
        let form = multipart::Form::new()
            .part("file", file_part)
            .text("patientId", request.patient_id.clone());

        let url = self.config.endpoint("upload");
        tracing::debug!(bytes = size, "POST {}", url);

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .map_err(ClientError::Transport)?;
        Self::read_json(response)
    }

    fn retrieve(&self, record_id: &str) -> Result<RetrievedRecord, ClientError> {
        let url = self.config.endpoint(&format!("retrieve/{record_id}"));
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(ClientError::Transport)?;
        Self::read_json(response)
    }
}
