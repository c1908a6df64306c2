//! Report repository implementation.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ActiveValue::Unchanged, ColumnTrait, DatabaseConnection, QueryFilter, Set};

use super::base::{DeleteRepository, ReadRepository, WriteRepository};
use super::entities::report::{self, ActiveModel, Entity as ReportEntity};
use common::AppResult;
use domain::{NewReport, Report};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Report repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// All reports owned by a user, in store order
    async fn find_by_user(&self, user_id: i64) -> AppResult<Vec<Report>>;

    /// Find report by ID
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Report>>;

    /// Find report by its unique name
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Report>>;

    /// Insert a new report; the store assigns id and creation time
    async fn create(&self, report: NewReport) -> AppResult<Report>;

    /// Persist name and description of an existing report
    async fn update(&self, report: Report) -> AppResult<Report>;

    /// Delete a report
    async fn remove(&self, report: &Report) -> AppResult<()>;
}

/// Concrete implementation of ReportRepository
pub struct ReportStore {
    db: Arc<DatabaseConnection>,
}

impl ReportStore {
    /// Create new repository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl ReadRepository<ReportEntity> for ReportStore {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl WriteRepository<ReportEntity, ActiveModel> for ReportStore {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl DeleteRepository<ReportEntity> for ReportStore {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl ReportRepository for ReportStore {
    async fn find_by_user(&self, user_id: i64) -> AppResult<Vec<Report>> {
        let models = self
            .fetch_all(self.query().filter(report::Column::UserId.eq(user_id)))
            .await?;

        Ok(models.into_iter().map(Report::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Report>> {
        let result = self.get(id).await?;
        Ok(result.map(Report::from))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Report>> {
        let result = self
            .fetch_one(self.query().filter(report::Column::Name.eq(name)))
            .await?;

        Ok(result.map(Report::from))
    }

    async fn create(&self, report: NewReport) -> AppResult<Report> {
        let active_model = ActiveModel {
            name: Set(report.name),
            description: Set(report.description),
            user_id: Set(report.user_id),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let model = self.insert(active_model).await?;
        Ok(Report::from(model))
    }

    async fn update(&self, report: Report) -> AppResult<Report> {
        // Owner and creation time stay NotSet so they are never rewritten
        let active_model = ActiveModel {
            id: Unchanged(report.id),
            name: Set(report.name),
            description: Set(report.description),
            ..Default::default()
        };

        let model = self.save(active_model).await?;
        Ok(Report::from(model))
    }

    async fn remove(&self, report: &Report) -> AppResult<()> {
        let removed = self.delete_by_id(report.id).await?;
        if removed == 0 {
            tracing::warn!(report_id = report.id, "Report was already gone when removed");
        }
        Ok(())
    }
}
