//! # MediBlock
//!
//! Terminal client for the MediBlock healthcare record service.
//!
//! This crate provides:
//! - Participant registration (patient or provider)
//! - Record upload bound to a patient identifier
//! - Record retrieval by identifier
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Wire and result types (Role, Identity, records)
//! - `ports`: Trait definition for the remote record service
//! - `adapters`: Concrete implementations (reqwest HTTP client, log sanitizer)
//! - `application`: Submission dispatch shared by all panels
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use config::ClientConfig;
pub use domain::{Identity, Registration, RetrievedRecord, Role, UploadReceipt, UploadRequest};

/// Result type for MediBlock operations
pub type Result<T> = std::result::Result<T, MediblockError>;

/// Main error type for MediBlock
#[derive(Debug, thiserror::Error)]
pub enum MediblockError {
    #[error("Invalid configuration: {0}")]
    Config(String),
}
