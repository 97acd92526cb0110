//! Check-in domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// How a day went for a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckInStatus {
    Completed,
    Partial,
    Failed,
}

impl CheckInStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            CheckInStatus::Completed => "completed",
            CheckInStatus::Partial => "partial",
            CheckInStatus::Failed => "failed",
        }
    }
}

impl FromStr for CheckInStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "completed" => Ok(CheckInStatus::Completed),
            "partial" => Ok(CheckInStatus::Partial),
            "failed" => Ok(CheckInStatus::Failed),
            other => Err(ValidationError::UnknownVariant {
                field: "check-in status",
                value: other.to_string(),
            }
            .into()),
        }
    }
}

impl fmt::Display for CheckInStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain model representing one goal's check-in for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckIn {
    pub id: i64,
    pub goal_id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub status: CheckInStatus,
    pub review_notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for recording today's check-in
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NewCheckIn {
    pub goal_id: i64,
    pub status: String,
    #[serde(default)]
    pub review_notes: Option<String>,
}

/// Validated check-in ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckInDraft {
    pub goal_id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub status: CheckInStatus,
    pub review_notes: Option<String>,
    pub created_at: NaiveDateTime,
}

/// The mutable part of an existing check-in.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckInRevision {
    pub status: CheckInStatus,
    pub review_notes: Option<String>,
    pub updated_at: NaiveDateTime,
}

/// Number of check-ins a goal has with one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCount {
    pub goal_id: i64,
    pub status: CheckInStatus,
    pub count: i64,
}

/// Trims notes; blank notes are stored as absent.
pub(crate) fn normalize_notes(notes: Option<String>) -> Option<String> {
    notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
}
