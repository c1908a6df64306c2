//! Postgres connection pool.

use std::sync::Arc;

use common::DatabaseConfig;
use sea_orm::{ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr, Statement};
use sea_orm_migration::MigratorTrait;

use super::migrations::Migrator;

/// Shared handle to the pool used by the stores and the health check.
pub struct Database {
    connection: Arc<DatabaseConnection>,
}

impl Database {
    /// Open the pool and bring the `users` and `reports` tables up to date.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(config.url.clone());
        options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .sqlx_logging(false);

        let connection = SeaDatabase::connect(options).await?;
        Migrator::up(&connection, None).await?;

        tracing::info!(
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            "Database pool ready"
        );

        Ok(Self::from_connection(connection))
    }

    /// Wrap an already opened connection, e.g. a `MockDatabase` in tests.
    pub fn from_connection(connection: DatabaseConnection) -> Self {
        Self {
            connection: Arc::new(connection),
        }
    }

    /// Handle for a store; every store shares the same pool.
    pub fn shared(&self) -> Arc<DatabaseConnection> {
        Arc::clone(&self.connection)
    }

    /// Round-trip `SELECT 1`.
    pub async fn ping(&self) -> Result<(), DbErr> {
        let backend = self.connection.get_database_backend();
        self.connection
            .execute(Statement::from_string(backend, "SELECT 1"))
            .await
            .map(|_| ())
    }
}
