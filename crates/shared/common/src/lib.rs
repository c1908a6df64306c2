//! Common utilities shared across the workspace.
//!
//! This crate provides:
//! - Unified error handling for unexpected faults
//! - Result wrappers for expected failures
//! - Configuration structures

pub mod config;
pub mod error;
pub mod result;

pub use config::*;
pub use error::{AppError, AppResult};
pub use result::{BaseResult, CollectionResult, ResultError};
