//! HTTP request handlers.

pub mod health_handler;
pub mod report_handler;

pub use health_handler::health;
pub use report_handler::report_routes;
