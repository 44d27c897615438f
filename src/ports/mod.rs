//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, this trait defines the boundary
//! between the panels and the remote healthcare-record service.

mod record_service;

pub use record_service::RecordService;
