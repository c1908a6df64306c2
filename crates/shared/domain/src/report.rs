//! Report domain entity and related transfer objects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::LONG_DATE_FORMAT;

/// Report domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: i64,
    /// Unique across all reports
    pub name: String,
    pub description: String,
    /// Owning user
    pub user_id: i64,
    /// Set once, when the row is first persisted
    pub created_at: DateTime<Utc>,
}

impl Report {
    /// Overwrite the mutable fields. Identity, owner and creation time are kept.
    pub fn rename(&mut self, name: String, description: String) {
        self.name = name;
        self.description = description;
    }
}

/// Report that has not been persisted yet (no id, no creation time).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReport {
    pub name: String,
    pub description: String,
    pub user_id: i64,
}

impl NewReport {
    pub fn new(name: impl Into<String>, description: impl Into<String>, user_id: i64) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            user_id,
        }
    }
}

/// Report read model returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Creation date as a long date string, e.g. "Monday, October 19, 2026"
    pub created_at: String,
}

impl From<Report> for ReportDto {
    fn from(report: Report) -> Self {
        Self {
            id: report.id,
            name: report.name,
            description: report.description,
            created_at: report.created_at.format(LONG_DATE_FORMAT).to_string(),
        }
    }
}

impl From<&Report> for ReportDto {
    fn from(report: &Report) -> Self {
        Self::from(report.clone())
    }
}

/// Report creation payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportDto {
    /// Owner of the new report
    #[validate(range(min = 1, message = "User id must be positive"))]
    pub user_id: i64,
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(length(
        min = 1,
        max = 1000,
        message = "Description must be between 1 and 1000 characters"
    ))]
    pub description: String,
}

/// Report update payload (name and description only)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReportDto {
    #[validate(range(min = 1, message = "Report id must be positive"))]
    pub id: i64,
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(length(
        min = 1,
        max = 1000,
        message = "Description must be between 1 and 1000 characters"
    ))]
    pub description: String,
}
