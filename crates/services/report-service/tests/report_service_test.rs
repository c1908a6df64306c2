//! Report service unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use mockall::Sequence;
use sea_orm::DbErr;

use common::{AppError, AppResult, RabbitMqSettings};
use domain::{CreateReportDto, ErrorCode, NewReport, Report, UpdateReportDto, User};
use report_service_lib::messaging::MockMessageProducer;
use report_service_lib::repository::{MockReportRepository, MockUserRepository, ReportRepository};
use report_service_lib::service::{ReportManager, ReportService};
use report_service_lib::validation::ReportValidation;

const EXCHANGE: &str = "reports";
const ROUTING_KEY: &str = "report.created";

fn settings() -> RabbitMqSettings {
    RabbitMqSettings {
        exchange_name: EXCHANGE.to_string(),
        routing_key: ROUTING_KEY.to_string(),
        ..Default::default()
    }
}

fn create_test_report(id: i64, name: &str, user_id: i64) -> Report {
    Report {
        id,
        name: name.to_string(),
        description: format!("{} description", name),
        user_id,
        created_at: Utc::now(),
    }
}

fn create_dto(user_id: i64, name: &str) -> CreateReportDto {
    CreateReportDto {
        user_id,
        name: name.to_string(),
        description: "Totals per region".to_string(),
    }
}

fn manager(
    reports: impl ReportRepository + 'static,
    users: MockUserRepository,
    producer: MockMessageProducer,
) -> ReportManager {
    ReportManager::new(
        Arc::new(reports),
        Arc::new(users),
        Arc::new(ReportValidation),
        Arc::new(producer),
        settings(),
    )
}

fn db_error() -> AppError {
    AppError::Database(DbErr::Custom("connection refused".to_string()))
}

// =============================================================================
// List by user
// =============================================================================

#[tokio::test]
async fn test_get_reports_empty_is_error() {
    let mut reports = MockReportRepository::new();
    reports.expect_find_by_user().returning(|_| Ok(vec![]));

    let service = manager(reports, MockUserRepository::new(), MockMessageProducer::new());
    let result = service.get_reports(1).await;

    assert!(!result.is_success());
    assert_eq!(result.error_code(), Some(ErrorCode::ReportsNotFound));
    assert!(result.data().is_none());
    assert_eq!(result.count(), 0);
}

#[tokio::test]
async fn test_get_reports_success() {
    let mut reports = MockReportRepository::new();
    reports.expect_find_by_user().returning(|user_id| {
        Ok(vec![
            create_test_report(1, "Weekly", user_id),
            create_test_report(2, "Monthly", user_id),
            create_test_report(3, "Yearly", user_id),
        ])
    });

    let service = manager(reports, MockUserRepository::new(), MockMessageProducer::new());
    let result = service.get_reports(5).await;

    assert!(result.is_success());
    assert_eq!(result.count(), 3);
    assert_eq!(result.data().unwrap().len(), 3);
    assert_eq!(result.data().unwrap()[0].name, "Weekly");
}

#[tokio::test]
async fn test_get_reports_store_failure() {
    let mut reports = MockReportRepository::new();
    reports.expect_find_by_user().returning(|_| Err(db_error()));

    let service = manager(reports, MockUserRepository::new(), MockMessageProducer::new());
    let result = service.get_reports(1).await;

    assert_eq!(result.error_code(), Some(ErrorCode::InternalServerError));
    assert_eq!(result.error_message(), Some("Internal server error"));
}

// =============================================================================
// Get by id
// =============================================================================

#[tokio::test]
async fn test_get_report_by_id_success() {
    let mut reports = MockReportRepository::new();
    reports
        .expect_find_by_id()
        .returning(|id| Ok(Some(create_test_report(id, "Weekly", 1))));

    let service = manager(reports, MockUserRepository::new(), MockMessageProducer::new());
    let result = service.get_report_by_id(42).await;

    assert!(result.is_success());
    assert_eq!(result.data().unwrap().id, 42);
}

#[tokio::test]
async fn test_get_report_by_id_not_found() {
    let mut reports = MockReportRepository::new();
    reports.expect_find_by_id().returning(|_| Ok(None));

    let service = manager(reports, MockUserRepository::new(), MockMessageProducer::new());
    let result = service.get_report_by_id(42).await;

    assert_eq!(result.error_code(), Some(ErrorCode::ReportNotFound));
    assert!(result.data().is_none());
}

#[tokio::test]
async fn test_get_report_by_id_store_failure() {
    let mut reports = MockReportRepository::new();
    reports.expect_find_by_id().returning(|_| Err(db_error()));

    let service = manager(reports, MockUserRepository::new(), MockMessageProducer::new());
    let result = service.get_report_by_id(42).await;

    assert_eq!(result.error_code(), Some(ErrorCode::InternalServerError));
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_report_user_not_found() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().returning(|_| Ok(None));

    let mut reports = MockReportRepository::new();
    reports.expect_find_by_name().returning(|_| Ok(None));
    reports.expect_create().never();

    let mut producer = MockMessageProducer::new();
    producer.expect_send_message().never();

    let service = manager(reports, users, producer);
    let result = service.create_report(create_dto(9, "Weekly")).await.unwrap();

    assert_eq!(result.error_code(), Some(ErrorCode::UserNotFound));
    assert_eq!(result.error_message(), Some("User not found"));
}

#[tokio::test]
async fn test_create_report_duplicate_name() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(User::new(id, "alice"))));

    let mut reports = MockReportRepository::new();
    reports
        .expect_find_by_name()
        .returning(|name| Ok(Some(create_test_report(3, name, 1))));
    reports.expect_create().never();

    let mut producer = MockMessageProducer::new();
    producer.expect_send_message().never();

    let service = manager(reports, users, producer);
    let result = service.create_report(create_dto(1, "Weekly")).await.unwrap();

    assert_eq!(result.error_code(), Some(ErrorCode::ReportAlreadyExists));
}

#[tokio::test]
async fn test_create_report_inserts_then_publishes() {
    let mut seq = Sequence::new();

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(User::new(id, "alice"))));

    let mut reports = MockReportRepository::new();
    reports.expect_find_by_name().returning(|_| Ok(None));
    reports
        .expect_create()
        .withf(|new: &NewReport| new.user_id == 7 && new.name == "Weekly")
        .times(1)
        .in_sequence(&mut seq)
        .returning(|new| {
            Ok(Report {
                id: 100,
                name: new.name,
                description: new.description,
                user_id: new.user_id,
                created_at: Utc::now(),
            })
        });

    let mut producer = MockMessageProducer::new();
    producer
        .expect_send_message()
        .withf(|payload, routing_key, exchange| {
            let published: Report = serde_json::from_slice(payload).unwrap();
            published.id == 100
                && routing_key.to_string() == ROUTING_KEY
                && exchange.to_string() == EXCHANGE
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _| Ok(()));

    let service = manager(reports, users, producer);
    let result = service.create_report(create_dto(7, "Weekly")).await.unwrap();

    assert!(result.is_success());
    let dto = result.into_data().unwrap();
    assert_eq!(dto.id, 100);
    assert_eq!(dto.name, "Weekly");
    assert_eq!(dto.description, "Totals per region");
}

#[tokio::test]
async fn test_create_report_publish_failure_is_surfaced() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(User::new(id, "alice"))));

    let mut reports = MockReportRepository::new();
    reports.expect_find_by_name().returning(|_| Ok(None));
    reports
        .expect_create()
        .times(1)
        .returning(|new| Ok(create_test_report(5, &new.name, new.user_id)));

    let mut producer = MockMessageProducer::new();
    producer
        .expect_send_message()
        .times(1)
        .returning(|_, _, _| Err(AppError::messaging("channel closed")));

    let service = manager(reports, users, producer);
    let result = service.create_report(create_dto(1, "Weekly")).await;

    assert!(matches!(result, Err(AppError::Messaging(_))));
}

#[tokio::test]
async fn test_create_report_store_failure_propagates() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(User::new(id, "alice"))));

    let mut reports = MockReportRepository::new();
    reports.expect_find_by_name().returning(|_| Ok(None));
    reports.expect_create().returning(|_| Err(db_error()));

    let mut producer = MockMessageProducer::new();
    producer.expect_send_message().never();

    let service = manager(reports, users, producer);
    let result = service.create_report(create_dto(1, "Weekly")).await;

    assert!(matches!(result, Err(AppError::Database(_))));
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn test_update_report_not_found() {
    let mut reports = MockReportRepository::new();
    reports.expect_find_by_id().returning(|_| Ok(None));
    reports.expect_update().never();

    let service = manager(reports, MockUserRepository::new(), MockMessageProducer::new());
    let result = service
        .update_report(UpdateReportDto {
            id: 8,
            name: "Renamed".to_string(),
            description: "New".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(result.error_code(), Some(ErrorCode::ReportNotFound));
}

#[tokio::test]
async fn test_update_report_overwrites_name_and_description() {
    let mut reports = MockReportRepository::new();
    reports
        .expect_find_by_id()
        .returning(|id| Ok(Some(create_test_report(id, "Weekly", 4))));
    reports
        .expect_update()
        .withf(|report: &Report| {
            report.id == 8
                && report.user_id == 4
                && report.name == "Renamed"
                && report.description == "New"
        })
        .times(1)
        .returning(Ok);

    let service = manager(reports, MockUserRepository::new(), MockMessageProducer::new());
    let result = service
        .update_report(UpdateReportDto {
            id: 8,
            name: "Renamed".to_string(),
            description: "New".to_string(),
        })
        .await
        .unwrap();

    let dto = result.into_data().unwrap();
    assert_eq!(dto.id, 8);
    assert_eq!(dto.name, "Renamed");
    assert_eq!(dto.description, "New");
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_report_not_found() {
    let mut reports = MockReportRepository::new();
    reports.expect_find_by_id().returning(|_| Ok(None));
    reports.expect_remove().never();

    let service = manager(reports, MockUserRepository::new(), MockMessageProducer::new());
    let result = service.delete_report(3).await.unwrap();

    assert_eq!(result.error_code(), Some(ErrorCode::ReportNotFound));
}

#[tokio::test]
async fn test_delete_report_returns_previous_state() {
    let mut reports = MockReportRepository::new();
    reports
        .expect_find_by_id()
        .returning(|id| Ok(Some(create_test_report(id, "Weekly", 1))));
    reports
        .expect_remove()
        .withf(|report| report.id == 3)
        .times(1)
        .returning(|_| Ok(()));

    let service = manager(reports, MockUserRepository::new(), MockMessageProducer::new());
    let result = service.delete_report(3).await.unwrap();

    let dto = result.into_data().unwrap();
    assert_eq!(dto.id, 3);
    assert_eq!(dto.name, "Weekly");
}

#[tokio::test]
async fn test_delete_report_store_failure_propagates() {
    let mut reports = MockReportRepository::new();
    reports
        .expect_find_by_id()
        .returning(|id| Ok(Some(create_test_report(id, "Weekly", 1))));
    reports.expect_remove().returning(|_| Err(db_error()));

    let service = manager(reports, MockUserRepository::new(), MockMessageProducer::new());
    let result = service.delete_report(3).await;

    assert!(matches!(result, Err(AppError::Database(_))));
}

// =============================================================================
// Stateful flows
// =============================================================================

/// Vec-backed store used to check behavior across several calls
#[derive(Default)]
struct InMemoryReports {
    rows: Mutex<Vec<Report>>,
}

#[async_trait]
impl ReportRepository for InMemoryReports {
    async fn find_by_user(&self, user_id: i64) -> AppResult<Vec<Report>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().filter(|r| r.user_id == user_id).cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Report>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Report>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|r| r.name == name).cloned())
    }

    async fn create(&self, report: NewReport) -> AppResult<Report> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let stored = Report {
            id,
            name: report.name,
            description: report.description,
            user_id: report.user_id,
            created_at: Utc::now(),
        };
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, report: Report) -> AppResult<Report> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.id == report.id)
            .ok_or_else(|| AppError::internal("missing row"))?;
        row.name = report.name;
        row.description = report.description;
        Ok(row.clone())
    }

    async fn remove(&self, report: &Report) -> AppResult<()> {
        self.rows.lock().unwrap().retain(|r| r.id != report.id);
        Ok(())
    }
}

fn in_memory_manager() -> ReportManager {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(User::new(id, "alice"))));

    let mut producer = MockMessageProducer::new();
    producer.expect_send_message().returning(|_, _, _| Ok(()));

    manager(InMemoryReports::default(), users, producer)
}

#[tokio::test]
async fn test_delete_twice_then_not_found() {
    let service = in_memory_manager();
    let created = service
        .create_report(create_dto(1, "Weekly"))
        .await
        .unwrap()
        .into_data()
        .unwrap();

    let first = service.delete_report(created.id).await.unwrap();
    let second = service.delete_report(created.id).await.unwrap();

    assert!(first.is_success());
    assert_eq!(second.error_code(), Some(ErrorCode::ReportNotFound));
}

#[tokio::test]
async fn test_deleted_report_disappears_from_reads() {
    let service = in_memory_manager();
    let weekly = service
        .create_report(create_dto(1, "Weekly"))
        .await
        .unwrap()
        .into_data()
        .unwrap();
    service.create_report(create_dto(1, "Monthly")).await.unwrap();

    assert_eq!(service.get_reports(1).await.count(), 2);

    service.delete_report(weekly.id).await.unwrap();

    let remaining = service.get_reports(1).await;
    assert_eq!(remaining.count(), 1);
    assert_eq!(remaining.data().unwrap()[0].name, "Monthly");
    assert_eq!(
        service.get_report_by_id(weekly.id).await.error_code(),
        Some(ErrorCode::ReportNotFound)
    );
}

#[tokio::test]
async fn test_second_create_with_same_name_is_rejected() {
    let service = in_memory_manager();
    service.create_report(create_dto(1, "Weekly")).await.unwrap();

    let duplicate = service.create_report(create_dto(2, "Weekly")).await.unwrap();

    assert_eq!(duplicate.error_code(), Some(ErrorCode::ReportAlreadyExists));
    assert_eq!(service.get_reports(2).await.error_code(), Some(ErrorCode::ReportsNotFound));
}

#[tokio::test]
async fn test_update_is_visible_to_get() {
    let service = in_memory_manager();
    let created = service
        .create_report(create_dto(1, "Weekly"))
        .await
        .unwrap()
        .into_data()
        .unwrap();

    service
        .update_report(UpdateReportDto {
            id: created.id,
            name: "Renamed".to_string(),
            description: "New".to_string(),
        })
        .await
        .unwrap();

    let fetched = service.get_report_by_id(created.id).await.into_data().unwrap();
    assert_eq!(fetched.name, "Renamed");
    assert_eq!(fetched.description, "New");
}
