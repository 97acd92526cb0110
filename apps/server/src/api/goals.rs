use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Response,
    routing::{delete, get, patch, post},
    Extension, Router,
};
use willpower_core::goals::{GoalStatus, GoalUpdate, NewGoal};
use willpower_core::outcome::WriteOutcome;

use super::extract::{ApiJson, ApiPath};
use crate::{
    auth::AuthUser,
    error::ApiResult,
    main_lib::AppState,
    models::{self, ok, respond, StatusUpdate},
};

async fn create_goal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ApiJson(goal): ApiJson<NewGoal>,
) -> ApiResult<Response> {
    let goal = state.goal_service.create_goal(user.id, goal).await?;
    Ok(respond(
        StatusCode::CREATED,
        "Goal created",
        Some(models::Goal::from(goal)),
    ))
}

async fn get_goals(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Response> {
    let goals = state.goal_service.get_goals(user.id)?;
    Ok(ok(models::goals(goals)))
}

async fn get_deleted_goals(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Response> {
    let goals = state.goal_service.get_deleted_goals(user.id)?;
    Ok(ok(models::goals(goals)))
}

async fn get_goal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Response> {
    let goal = state.goal_service.get_goal(user.id, id)?;
    Ok(ok(models::Goal::from(goal)))
}

async fn update_goal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(update): ApiJson<GoalUpdate>,
) -> ApiResult<Response> {
    let outcome = state.goal_service.update_goal(user.id, id, update).await?;
    let message = match &outcome {
        WriteOutcome::Unchanged(_) => "No updates",
        _ => "Success",
    };
    Ok(respond(
        StatusCode::OK,
        message,
        Some(models::Goal::from(outcome.into_inner())),
    ))
}

async fn update_goal_status(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<StatusUpdate>,
) -> ApiResult<Response> {
    let status = body.status.parse::<GoalStatus>()?;
    let outcome = state
        .goal_service
        .update_goal_status(user.id, id, status)
        .await?;
    let message = match &outcome {
        WriteOutcome::Unchanged(_) => "Status unchanged",
        _ => "Success",
    };
    Ok(respond(
        StatusCode::OK,
        message,
        Some(models::Goal::from(outcome.into_inner())),
    ))
}

async fn delete_goal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Response> {
    state.goal_service.delete_goal(user.id, id).await?;
    Ok(respond::<()>(
        StatusCode::OK,
        "Goal moved to recycle bin",
        None,
    ))
}

async fn restore_goal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Response> {
    let goal = state.goal_service.restore_goal(user.id, id).await?;
    Ok(respond(
        StatusCode::OK,
        "Goal restored",
        Some(models::Goal::from(goal)),
    ))
}

async fn purge_goal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Response> {
    state.goal_service.purge_goal(user.id, id).await?;
    Ok(respond::<()>(
        StatusCode::OK,
        "Goal permanently deleted",
        None,
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/goals", get(get_goals).post(create_goal))
        .route("/goals/recycle-bin", get(get_deleted_goals))
        .route(
            "/goals/{id}",
            get(get_goal).patch(update_goal).delete(delete_goal),
        )
        .route("/goals/{id}/status", patch(update_goal_status))
        .route("/goals/{id}/restore", post(restore_goal))
        .route("/goals/{id}/permanent", delete(purge_goal))
}
