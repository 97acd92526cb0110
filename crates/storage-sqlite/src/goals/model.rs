//! Database models for goals.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::errors::StorageError;
use willpower_core::goals::{Goal, GoalChanges, GoalDraft, GoalLifecycle, GoalStatus, GoalType};

/// Database model for goals
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GoalDB {
    pub id: i64,
    pub user_id: i64,
    pub goal_type: String,
    pub title: String,
    pub status: String,
    pub deleted_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for creating a new goal
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::goals)]
pub struct NewGoalDB {
    pub user_id: i64,
    pub goal_type: String,
    pub title: String,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Partial update; `None` fields are left untouched.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::goals)]
pub struct GoalChangesDB {
    pub goal_type: Option<String>,
    pub title: Option<String>,
    pub status: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<GoalDB> for Goal {
    type Error = StorageError;

    fn try_from(db: GoalDB) -> Result<Self, Self::Error> {
        let goal_type = db
            .goal_type
            .parse::<GoalType>()
            .map_err(|e| StorageError::InvalidRow(format!("goal {}: {}", db.id, e)))?;
        let status = db
            .status
            .parse::<GoalStatus>()
            .map_err(|e| StorageError::InvalidRow(format!("goal {}: {}", db.id, e)))?;
        Ok(Goal {
            id: db.id,
            user_id: db.user_id,
            goal_type,
            title: db.title,
            status,
            lifecycle: GoalLifecycle::from_tombstone(db.deleted_at),
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<GoalDraft> for NewGoalDB {
    fn from(draft: GoalDraft) -> Self {
        Self {
            user_id: draft.user_id,
            goal_type: draft.goal_type.as_str().to_string(),
            title: draft.title,
            status: GoalStatus::Active.as_str().to_string(),
            created_at: draft.created_at,
            updated_at: draft.created_at,
        }
    }
}

impl From<GoalChanges> for GoalChangesDB {
    fn from(changes: GoalChanges) -> Self {
        Self {
            goal_type: changes.goal_type.map(|t| t.as_str().to_string()),
            title: changes.title,
            status: changes.status.map(|s| s.as_str().to_string()),
            updated_at: changes.updated_at,
        }
    }
}
