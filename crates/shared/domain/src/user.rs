//! User domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Report owner.
///
/// Only the identity matters to the report service: a user must exist
/// before a report can be created for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub login: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a user snapshot
    pub fn new(id: i64, login: impl Into<String>) -> Self {
        Self {
            id,
            login: login.into(),
            created_at: Utc::now(),
        }
    }
}
