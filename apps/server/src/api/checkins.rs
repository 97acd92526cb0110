use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Response,
    routing::{get, post},
    Extension, Router,
};
use willpower_core::checkins::NewCheckIn;
use willpower_core::outcome::WriteOutcome;

use super::extract::{ApiJson, ApiQuery};
use crate::{
    auth::AuthUser,
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::{ok, respond, CheckInQuery, SummaryQuery},
};

async fn record_check_in(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ApiJson(check_in): ApiJson<NewCheckIn>,
) -> ApiResult<Response> {
    let outcome = state
        .check_in_service
        .record_check_in(user.id, check_in)
        .await?;
    let (status, message) = match &outcome {
        WriteOutcome::Created(_) => (StatusCode::CREATED, "Check-in recorded"),
        _ => (StatusCode::OK, "Check-in updated"),
    };
    Ok(respond(status, message, Some(outcome.into_inner())))
}

async fn get_check_ins(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ApiQuery(query): ApiQuery<CheckInQuery>,
) -> ApiResult<Response> {
    let raw = query
        .goal_id
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("goal_id is required".to_string()))?;
    let goal_id = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| ApiError::BadRequest("Invalid goal id".to_string()))?;
    let check_ins = state.check_in_service.get_check_ins(user.id, goal_id)?;
    Ok(ok(check_ins))
}

async fn get_summary(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ApiQuery(query): ApiQuery<SummaryQuery>,
) -> ApiResult<Response> {
    let summaries = state
        .summary_service
        .summarize(user.id, query.date.as_deref())?;
    Ok(ok(summaries))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/checkins", post(record_check_in).get(get_check_ins))
        .route("/checkins/summary", get(get_summary))
}
