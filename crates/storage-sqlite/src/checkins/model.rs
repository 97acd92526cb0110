//! Database models for check-ins.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::errors::StorageError;
use willpower_core::checkins::{CheckIn, CheckInDraft, CheckInRevision, CheckInStatus};

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::check_ins)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CheckInDB {
    pub id: i64,
    pub goal_id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub status: String,
    pub review_notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::check_ins)]
pub struct NewCheckInDB {
    pub goal_id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub status: String,
    pub review_notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Overwrites status and notes; cleared notes are written as NULL.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::check_ins)]
#[diesel(treat_none_as_null = true)]
pub struct CheckInRevisionDB {
    pub status: String,
    pub review_notes: Option<String>,
    pub updated_at: NaiveDateTime,
}

pub(crate) fn parse_status(raw: &str) -> Result<CheckInStatus, StorageError> {
    raw.parse::<CheckInStatus>()
        .map_err(|e| StorageError::InvalidRow(format!("check-in status: {}", e)))
}

impl TryFrom<CheckInDB> for CheckIn {
    type Error = StorageError;

    fn try_from(db: CheckInDB) -> Result<Self, Self::Error> {
        Ok(CheckIn {
            id: db.id,
            goal_id: db.goal_id,
            user_id: db.user_id,
            date: db.date,
            status: parse_status(&db.status)?,
            review_notes: db.review_notes,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<CheckInDraft> for NewCheckInDB {
    fn from(draft: CheckInDraft) -> Self {
        Self {
            goal_id: draft.goal_id,
            user_id: draft.user_id,
            date: draft.date,
            status: draft.status.as_str().to_string(),
            review_notes: draft.review_notes,
            created_at: draft.created_at,
            updated_at: draft.created_at,
        }
    }
}

impl From<CheckInRevision> for CheckInRevisionDB {
    fn from(revision: CheckInRevision) -> Self {
        Self {
            status: revision.status.as_str().to_string(),
            review_notes: revision.review_notes,
            updated_at: revision.updated_at,
        }
    }
}
