//! Application layer: Use cases shared by the panels.
//!
//! Each panel submission becomes one `Submission`; `dispatch::execute` runs
//! it against a `RecordService` and reduces the result to an `Outcome`.

pub mod dispatch;

pub use dispatch::{execute, Action, Outcome, Submission};
