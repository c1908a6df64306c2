//! Business-rule validation for report operations.

mod report_validator;

pub use report_validator::{ReportValidation, ReportValidator};
