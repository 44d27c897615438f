//! Adapters layer: Concrete implementations of ports.
//!
//! - `http`: reqwest client for the remote record service
//! - `sanitize`: secret filtering for logs

pub mod http;
pub mod sanitize;

pub use http::{ClientError, HttpRecordService};
