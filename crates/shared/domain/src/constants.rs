//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Validation
// =============================================================================

/// Maximum report name length (matches the `reports.name` column)
pub const MAX_REPORT_NAME_LENGTH: u32 = 100;

/// Maximum report description length (matches the `reports.description` column)
pub const MAX_REPORT_DESCRIPTION_LENGTH: u32 = 1000;

// =============================================================================
// Presentation
// =============================================================================

/// Long date pattern used for `ReportDto::created_at`, e.g. "Monday, October 19, 2026"
pub const LONG_DATE_FORMAT: &str = "%A, %B %-d, %Y";
