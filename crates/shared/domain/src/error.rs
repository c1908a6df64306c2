//! Domain-level error codes.
//!
//! Expected failures (absence, duplicates) are not Rust errors: they travel
//! inside result wrappers as an [`ErrorCode`] plus a message. The numeric
//! values are part of the public contract and must not be renumbered.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Typed failure kinds reported by the report service.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum ErrorCode {
    #[error("Reports not found")]
    ReportsNotFound,

    #[error("Report not found")]
    ReportNotFound,

    #[error("Report already exists")]
    ReportAlreadyExists,

    #[error("Internal server error")]
    InternalServerError,

    #[error("User not found")]
    UserNotFound,
}

impl ErrorCode {
    /// Numeric code sent to clients
    pub fn code(self) -> i32 {
        match self {
            ErrorCode::ReportsNotFound => 0,
            ErrorCode::ReportNotFound => 1,
            ErrorCode::ReportAlreadyExists => 2,
            ErrorCode::InternalServerError => 10,
            ErrorCode::UserNotFound => 11,
        }
    }

    /// Default human-readable message
    pub fn message(self) -> String {
        self.to_string()
    }
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl TryFrom<i32> for ErrorCode {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ErrorCode::ReportsNotFound),
            1 => Ok(ErrorCode::ReportNotFound),
            2 => Ok(ErrorCode::ReportAlreadyExists),
            10 => Ok(ErrorCode::InternalServerError),
            11 => Ok(ErrorCode::UserNotFound),
            other => Err(format!("unknown error code {}", other)),
        }
    }
}
