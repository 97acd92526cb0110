use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use willpower_core::goals as core_goals;

/// Success envelope; `data` is left out entirely when there is no payload.
#[derive(Serialize, Debug)]
pub struct Envelope<T: Serialize> {
    pub code: u32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Success response with the given status, message and optional payload.
pub fn respond<T: Serialize>(
    status: StatusCode,
    message: &str,
    data: Option<T>,
) -> Response {
    (
        status,
        Json(Envelope {
            code: 0,
            message: message.to_string(),
            data,
        }),
    )
        .into_response()
}

pub fn ok<T: Serialize>(data: T) -> Response {
    respond(StatusCode::OK, "Success", Some(data))
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Goal {
    pub id: i64,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub goal_type: String,
    pub title: String,
    pub status: String,
    pub deleted_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<core_goals::Goal> for Goal {
    fn from(g: core_goals::Goal) -> Self {
        Self {
            id: g.id,
            user_id: g.user_id,
            goal_type: g.goal_type.to_string(),
            title: g.title,
            status: g.status.to_string(),
            deleted_at: g.lifecycle.deleted_at(),
            created_at: g.created_at,
            updated_at: g.updated_at,
        }
    }
}

pub fn goals(list: Vec<core_goals::Goal>) -> Vec<Goal> {
    list.into_iter().map(Goal::from).collect()
}

#[derive(Deserialize, Debug)]
pub struct StatusUpdate {
    pub status: String,
}

#[derive(Deserialize, Debug)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize, Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Debug)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: i64,
}

#[derive(Deserialize, Debug)]
pub struct CheckInQuery {
    pub goal_id: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct SummaryQuery {
    pub date: Option<String>,
}
