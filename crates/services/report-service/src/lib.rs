//! Report Service Library
//!
//! This crate manages reports over HTTP: listing a user's reports, fetching,
//! creating, updating and deleting them. Every successful creation is
//! announced on a RabbitMQ topic exchange.

pub mod api;
pub mod config;
pub mod infra;
pub mod messaging;
pub mod repository;
pub mod service;
pub mod validation;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use crate::api::{create_router, AppState};
use crate::config::ReportServiceConfig;
use crate::infra::Database;
use crate::messaging::AmqpProducer;
use crate::repository::{ReportStore, UserStore};
use crate::service::ReportManager;
use crate::validation::ReportValidation;

/// Run the HTTP server with configuration loaded from the environment.
///
/// `host` and `port` override the configured bind address when given.
pub async fn run_server(
    host: Option<String>,
    port: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ReportServiceConfig::from_env();
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    run_server_with_config(config).await
}

async fn run_server_with_config(config: ReportServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    let db = Arc::new(Database::connect(&config.database).await?);

    let producer = Arc::new(AmqpProducer::connect(&config.rabbitmq).await?);

    let reports = Arc::new(ReportStore::new(db.shared()));
    let users = Arc::new(UserStore::new(db.shared()));
    let report_service = Arc::new(ReportManager::new(
        reports,
        users,
        Arc::new(ReportValidation),
        producer,
        config.rabbitmq.clone(),
    ));

    let app = create_router(AppState::new(report_service, db));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Report service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
