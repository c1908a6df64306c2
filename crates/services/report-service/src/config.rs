//! Report service configuration.

use std::env;

use common::{DatabaseConfig, RabbitMqSettings};

/// Report service configuration.
#[derive(Debug, Clone)]
pub struct ReportServiceConfig {
    /// Database connection settings
    pub database: DatabaseConfig,
    /// Broker connection and report-created event addressing
    pub rabbitmq: RabbitMqSettings,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
}

impl ReportServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset variables fall back to development defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            database: DatabaseConfig {
                url: env::var("REPORT_SERVICE_DATABASE_URL")
                    .or_else(|_| env::var("DATABASE_URL"))
                    .unwrap_or(defaults.database.url),
                max_connections: parse_var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or(defaults.database.max_connections),
                min_connections: parse_var("DATABASE_MIN_CONNECTIONS")
                    .unwrap_or(defaults.database.min_connections),
            },
            rabbitmq: RabbitMqSettings {
                host: env::var("RABBITMQ_HOST").unwrap_or(defaults.rabbitmq.host),
                port: parse_var("RABBITMQ_PORT").unwrap_or(defaults.rabbitmq.port),
                username: env::var("RABBITMQ_USERNAME").unwrap_or(defaults.rabbitmq.username),
                password: env::var("RABBITMQ_PASSWORD").unwrap_or(defaults.rabbitmq.password),
                exchange_name: env::var("RABBITMQ_EXCHANGE_NAME")
                    .unwrap_or(defaults.rabbitmq.exchange_name),
                routing_key: env::var("RABBITMQ_ROUTING_KEY")
                    .unwrap_or(defaults.rabbitmq.routing_key),
            },
            host: env::var("REPORT_SERVICE_HOST").unwrap_or(defaults.host),
            port: parse_var("REPORT_SERVICE_PORT").unwrap_or(defaults.port),
        }
    }
}

impl Default for ReportServiceConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            rabbitmq: RabbitMqSettings::default(),
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
