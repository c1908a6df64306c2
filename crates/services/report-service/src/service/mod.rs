//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate validation, persistence and messaging. They depend
//! on abstractions (traits) for dependency inversion.

mod report_service;

pub use report_service::{ReportManager, ReportService};
