//! Report handlers.
//!
//! Every handler answers with the result envelope; the HTTP status is
//! derived from the envelope's error code.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};

use common::{AppResult, BaseResult, CollectionResult};
use domain::{CreateReportDto, ErrorCode, ReportDto, UpdateReportDto};

use crate::api::extractors::{PathParam, ValidatedJson};
use crate::api::state::AppState;

type Envelope<T> = (StatusCode, Json<T>);

/// Create report routes
pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_report).put(update_report))
        .route("/user/:user_id", get(list_user_reports))
        .route("/:id", get(get_report).delete(delete_report))
}

/// List all reports of a user
pub async fn list_user_reports(
    State(state): State<AppState>,
    PathParam(user_id): PathParam<i64>,
) -> Envelope<CollectionResult<ReportDto>> {
    let result = state.report_service.get_reports(user_id).await;
    (status_for(result.error_code(), StatusCode::OK), Json(result))
}

/// Get report by ID
pub async fn get_report(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Envelope<BaseResult<ReportDto>> {
    let result = state.report_service.get_report_by_id(id).await;
    (status_for(result.error_code(), StatusCode::OK), Json(result))
}

/// Create a report
pub async fn create_report(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateReportDto>,
) -> AppResult<Envelope<BaseResult<ReportDto>>> {
    let result = state.report_service.create_report(payload).await?;
    Ok((status_for(result.error_code(), StatusCode::CREATED), Json(result)))
}

/// Update a report's name and description
pub async fn update_report(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateReportDto>,
) -> AppResult<Envelope<BaseResult<ReportDto>>> {
    let result = state.report_service.update_report(payload).await?;
    Ok((status_for(result.error_code(), StatusCode::OK), Json(result)))
}

/// Delete a report
pub async fn delete_report(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> AppResult<Envelope<BaseResult<ReportDto>>> {
    let result = state.report_service.delete_report(id).await?;
    Ok((status_for(result.error_code(), StatusCode::OK), Json(result)))
}

fn status_for(code: Option<ErrorCode>, success: StatusCode) -> StatusCode {
    match code {
        None => success,
        Some(ErrorCode::ReportsNotFound | ErrorCode::ReportNotFound | ErrorCode::UserNotFound) => {
            StatusCode::NOT_FOUND
        }
        Some(ErrorCode::ReportAlreadyExists) => StatusCode::CONFLICT,
        Some(ErrorCode::InternalServerError) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
