//! Report service - Handles report-related business logic.
//!
//! Read operations never fail: store errors are logged and reported as
//! `InternalServerError` inside the result wrapper. Write operations return
//! `AppResult`, so store and broker errors reach the caller as `Err`, while
//! expected failures (missing report, missing user, duplicate name) are
//! still wrapped.

use async_trait::async_trait;
use std::sync::Arc;

use common::{AppError, AppResult, BaseResult, CollectionResult, RabbitMqSettings};
use domain::{CreateReportDto, ErrorCode, NewReport, ReportDto, UpdateReportDto};

use crate::messaging::MessageProducer;
use crate::repository::{ReportRepository, UserRepository};
use crate::validation::ReportValidator;

/// Report service trait for dependency injection.
#[async_trait]
pub trait ReportService: Send + Sync {
    /// List every report owned by a user. An empty list is `ReportsNotFound`.
    async fn get_reports(&self, user_id: i64) -> CollectionResult<ReportDto>;

    /// Get a report by ID
    async fn get_report_by_id(&self, id: i64) -> BaseResult<ReportDto>;

    /// Create a report and publish a report-created event
    async fn create_report(&self, dto: CreateReportDto) -> AppResult<BaseResult<ReportDto>>;

    /// Delete a report, returning its last state
    async fn delete_report(&self, id: i64) -> AppResult<BaseResult<ReportDto>>;

    /// Overwrite a report's name and description
    async fn update_report(&self, dto: UpdateReportDto) -> AppResult<BaseResult<ReportDto>>;
}

/// Concrete implementation of ReportService.
pub struct ReportManager {
    reports: Arc<dyn ReportRepository>,
    users: Arc<dyn UserRepository>,
    validator: Arc<dyn ReportValidator>,
    producer: Arc<dyn MessageProducer>,
    settings: RabbitMqSettings,
}

impl ReportManager {
    /// Create new report service instance
    pub fn new(
        reports: Arc<dyn ReportRepository>,
        users: Arc<dyn UserRepository>,
        validator: Arc<dyn ReportValidator>,
        producer: Arc<dyn MessageProducer>,
        settings: RabbitMqSettings,
    ) -> Self {
        Self {
            reports,
            users,
            validator,
            producer,
            settings,
        }
    }
}

#[async_trait]
impl ReportService for ReportManager {
    async fn get_reports(&self, user_id: i64) -> CollectionResult<ReportDto> {
        let reports = match self.reports.find_by_user(user_id).await {
            Ok(reports) => reports,
            Err(e) => {
                tracing::error!(error = ?e, user_id, "Failed to load reports");
                return CollectionResult::failure(ErrorCode::InternalServerError);
            }
        };

        if reports.is_empty() {
            tracing::warn!(user_id, count = reports.len(), "Reports not found");
            return CollectionResult::failure(ErrorCode::ReportsNotFound);
        }

        CollectionResult::success(reports.into_iter().map(ReportDto::from).collect())
    }

    async fn get_report_by_id(&self, id: i64) -> BaseResult<ReportDto> {
        match self.reports.find_by_id(id).await {
            Ok(Some(report)) => BaseResult::success(ReportDto::from(report)),
            Ok(None) => {
                tracing::warn!(report_id = id, "Report not found");
                BaseResult::failure(ErrorCode::ReportNotFound)
            }
            Err(e) => {
                tracing::error!(error = ?e, report_id = id, "Failed to load report");
                BaseResult::failure(ErrorCode::InternalServerError)
            }
        }
    }

    async fn create_report(&self, dto: CreateReportDto) -> AppResult<BaseResult<ReportDto>> {
        let user = self.users.find_by_id(dto.user_id).await?;
        let existing = self.reports.find_by_name(&dto.name).await?;

        if let Err(error) = self.validator.validate_create(existing.as_ref(), user.as_ref()) {
            return Ok(error.into());
        }

        // validate_create has already rejected a missing user
        let owner_id = user.map_or(dto.user_id, |u| u.id);
        let report = self
            .reports
            .create(NewReport::new(dto.name, dto.description, owner_id))
            .await?;

        // Publish strictly after the insert is committed
        let payload = serde_json::to_vec(&report)
            .map_err(|e| AppError::internal(format!("Failed to serialize report: {}", e)))?;

        if let Err(e) = self
            .producer
            .send_message(payload, &self.settings.routing_key, &self.settings.exchange_name)
            .await
        {
            tracing::error!(
                error = %e,
                report_id = report.id,
                exchange = %self.settings.exchange_name,
                routing_key = %self.settings.routing_key,
                "Report created but report-created event was not published"
            );
            return Err(e);
        }

        tracing::info!(report_id = report.id, user_id = report.user_id, "Report created");
        Ok(BaseResult::success(ReportDto::from(report)))
    }

    async fn delete_report(&self, id: i64) -> AppResult<BaseResult<ReportDto>> {
        let report = self.reports.find_by_id(id).await?;
        let report = match self.validator.validate_on_null(report.as_ref()) {
            Ok(report) => report,
            Err(error) => return Ok(error.into()),
        };

        self.reports.remove(report).await?;

        tracing::info!(report_id = id, "Report deleted");
        Ok(BaseResult::success(ReportDto::from(report)))
    }

    async fn update_report(&self, dto: UpdateReportDto) -> AppResult<BaseResult<ReportDto>> {
        let report = self.reports.find_by_id(dto.id).await?;
        let mut report = match self.validator.validate_on_null(report.as_ref()) {
            Ok(report) => report.clone(),
            Err(error) => return Ok(error.into()),
        };

        report.rename(dto.name, dto.description);
        let updated = self.reports.update(report).await?;

        tracing::info!(report_id = updated.id, "Report updated");
        Ok(BaseResult::success(ReportDto::from(updated)))
    }
}
