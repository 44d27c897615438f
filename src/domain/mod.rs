//! Domain layer: Request and result types exchanged with the record service.
//!
//! This module contains plain Rust types with serde wire mappings.
//! Field names follow the service's camelCase JSON contract.

mod participant;
mod record;

pub use participant::{Identity, Registration, Role};
pub use record::{RetrievedRecord, UploadReceipt, UploadRequest};
