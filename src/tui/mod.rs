//! TUI module: Terminal User Interface using Ratatui.
//!
//! One page, three independent panels:
//! - Register User
//! - Upload Record
//! - Retrieve Record

mod app;
mod styles;
pub mod ui;
mod worker;

pub use app::App;
pub use styles::{Theme, SUCCESS_GLYPH};
pub use ui::{Alert, FormPanel};
pub use worker::{RequestWorker, RequestWorkerHandle};
