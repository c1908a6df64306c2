//! Infrastructure layer - database and external services.

mod db;
mod migrations;

pub use db::Database;
