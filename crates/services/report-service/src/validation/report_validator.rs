//! Report validator.
//!
//! Pure checks over entity snapshots already loaded by the service; the
//! validator never touches the store.

use common::ResultError;
use domain::{ErrorCode, Report, User};

/// Validator trait for dependency injection.
pub trait ReportValidator: Send + Sync {
    /// Fail with `ReportNotFound` when the report is absent
    fn validate_on_null<'a>(&self, report: Option<&'a Report>) -> Result<&'a Report, ResultError>;

    /// Check preconditions for creating a report.
    ///
    /// `existing` is the report already holding the requested name, if any.
    /// A missing user is reported before a name collision.
    fn validate_create(
        &self,
        existing: Option<&Report>,
        user: Option<&User>,
    ) -> Result<(), ResultError>;
}

/// Default report validation rules
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportValidation;

impl ReportValidator for ReportValidation {
    fn validate_on_null<'a>(&self, report: Option<&'a Report>) -> Result<&'a Report, ResultError> {
        report.ok_or_else(|| ResultError::from(ErrorCode::ReportNotFound))
    }

    fn validate_create(
        &self,
        existing: Option<&Report>,
        user: Option<&User>,
    ) -> Result<(), ResultError> {
        if user.is_none() {
            return Err(ErrorCode::UserNotFound.into());
        }
        if existing.is_some() {
            return Err(ErrorCode::ReportAlreadyExists.into());
        }
        Ok(())
    }
}
