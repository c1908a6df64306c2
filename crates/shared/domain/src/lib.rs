//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Types here are shared between the report service and its callers.

pub mod constants;
pub mod error;
pub mod report;
pub mod user;

pub use constants::*;
pub use error::ErrorCode;
pub use report::{CreateReportDto, NewReport, Report, ReportDto, UpdateReportDto};
pub use user::User;
