//! Repository layer for data access.

mod base;
pub mod entities;
mod report_repository;
mod user_repository;

pub use base::{DeleteRepository, ReadRepository, WriteRepository};
pub use report_repository::{ReportRepository, ReportStore};
pub use user_repository::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use report_repository::MockReportRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
