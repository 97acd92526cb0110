use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use std::sync::Arc;

use super::model::{GoalChangesDB, GoalDB, NewGoalDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::goals;
use willpower_core::errors::{Error, Result};
use willpower_core::goals::{Goal, GoalChanges, GoalDraft, GoalRepositoryTrait, GoalScope};

pub struct GoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        GoalRepository { pool, writer }
    }
}

fn owned_in_scope<'a>(user_id: i64, scope: GoalScope) -> goals::BoxedQuery<'a, Sqlite> {
    let query = goals::table.filter(goals::user_id.eq(user_id)).into_boxed();
    match scope {
        GoalScope::Live => query.filter(goals::deleted_at.is_null()),
        GoalScope::RecycleBin => query.filter(goals::deleted_at.is_not_null()),
    }
}

fn to_domain(rows: Vec<GoalDB>) -> Result<Vec<Goal>> {
    rows.into_iter()
        .map(|row| Goal::try_from(row).map_err(Error::from))
        .collect()
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn find_goal(&self, user_id: i64, goal_id: i64, scope: GoalScope) -> Result<Option<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let row = owned_in_scope(user_id, scope)
            .filter(goals::id.eq(goal_id))
            .select(GoalDB::as_select())
            .first::<GoalDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(Goal::try_from).transpose()?)
    }

    fn list_goals(&self, user_id: i64, scope: GoalScope) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let query = owned_in_scope(user_id, scope).select(GoalDB::as_select());
        let query = match scope {
            GoalScope::Live => query.order((goals::created_at.desc(), goals::id.desc())),
            GoalScope::RecycleBin => query.order((goals::deleted_at.desc(), goals::id.desc())),
        };
        let rows = query
            .load::<GoalDB>(&mut conn)
            .map_err(StorageError::from)?;
        to_domain(rows)
    }

    async fn insert_goal(&self, draft: GoalDraft) -> Result<Goal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let row = diesel::insert_into(goals::table)
                    .values(NewGoalDB::from(draft))
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Goal::try_from(row)?)
            })
            .await
    }

    async fn update_goal(&self, user_id: i64, goal_id: i64, changes: GoalChanges) -> Result<Goal> {
        let changes = GoalChangesDB::from(changes);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let row = diesel::update(
                    goals::table
                        .filter(goals::id.eq(goal_id))
                        .filter(goals::user_id.eq(user_id))
                        .filter(goals::deleted_at.is_null()),
                )
                .set(&changes)
                .returning(GoalDB::as_returning())
                .get_result(conn)
                .optional()
                .map_err(StorageError::from)?
                .ok_or_else(|| Error::NotFound("Goal".to_string()))?;
                Ok(Goal::try_from(row)?)
            })
            .await
    }

    async fn mark_deleted(&self, user_id: i64, goal_id: i64, at: NaiveDateTime) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::update(
                    goals::table
                        .filter(goals::id.eq(goal_id))
                        .filter(goals::user_id.eq(user_id))
                        .filter(goals::deleted_at.is_null()),
                )
                .set(goals::deleted_at.eq(Some(at)))
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }

    async fn clear_deleted(&self, user_id: i64, goal_id: i64) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::update(
                    goals::table
                        .filter(goals::id.eq(goal_id))
                        .filter(goals::user_id.eq(user_id))
                        .filter(goals::deleted_at.is_not_null()),
                )
                .set(goals::deleted_at.eq(None::<NaiveDateTime>))
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }

    async fn purge_goal(&self, user_id: i64, goal_id: i64) -> Result<usize> {
        // check_ins rows go with the goal through ON DELETE CASCADE.
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    goals::table
                        .filter(goals::id.eq(goal_id))
                        .filter(goals::user_id.eq(user_id))
                        .filter(goals::deleted_at.is_not_null()),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }

    fn find_deleted_before(&self, cutoff: NaiveDateTime) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = goals::table
            .filter(goals::deleted_at.le(cutoff))
            .order(goals::deleted_at.asc())
            .select(GoalDB::as_select())
            .load::<GoalDB>(&mut conn)
            .map_err(StorageError::from)?;
        to_domain(rows)
    }

    async fn purge_deleted_before(&self, cutoff: NaiveDateTime) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(goals::table.filter(goals::deleted_at.le(cutoff)))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
