use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::dsl::count_star;
use diesel::prelude::*;
use std::sync::Arc;

use super::model::{parse_status, CheckInDB, CheckInRevisionDB, NewCheckInDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::check_ins;
use willpower_core::checkins::{
    CheckIn, CheckInDraft, CheckInRepositoryTrait, CheckInRevision, StatusCount,
};
use willpower_core::errors::{Error, Result};

pub struct CheckInRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CheckInRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CheckInRepository { pool, writer }
    }
}

#[async_trait]
impl CheckInRepositoryTrait for CheckInRepository {
    fn find_check_in(&self, goal_id: i64, date: NaiveDate) -> Result<Option<CheckIn>> {
        let mut conn = get_connection(&self.pool)?;
        let row = check_ins::table
            .filter(check_ins::goal_id.eq(goal_id))
            .filter(check_ins::date.eq(date))
            .select(CheckInDB::as_select())
            .first::<CheckInDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(CheckIn::try_from).transpose()?)
    }

    async fn insert_check_in(&self, draft: CheckInDraft) -> Result<CheckIn> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<CheckIn> {
                // A second row for (goal_id, date) fails on idx_check_ins_goal_date.
                let row = diesel::insert_into(check_ins::table)
                    .values(NewCheckInDB::from(draft))
                    .returning(CheckInDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(CheckIn::try_from(row)?)
            })
            .await
    }

    async fn update_check_in(
        &self,
        goal_id: i64,
        date: NaiveDate,
        revision: CheckInRevision,
    ) -> Result<CheckIn> {
        let revision = CheckInRevisionDB::from(revision);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<CheckIn> {
                let row = diesel::update(
                    check_ins::table
                        .filter(check_ins::goal_id.eq(goal_id))
                        .filter(check_ins::date.eq(date)),
                )
                .set(&revision)
                .returning(CheckInDB::as_returning())
                .get_result(conn)
                .optional()
                .map_err(StorageError::from)?
                .ok_or_else(|| Error::NotFound("Check-in".to_string()))?;
                Ok(CheckIn::try_from(row)?)
            })
            .await
    }

    fn list_check_ins(&self, user_id: i64, goal_id: i64) -> Result<Vec<CheckIn>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = check_ins::table
            .filter(check_ins::user_id.eq(user_id))
            .filter(check_ins::goal_id.eq(goal_id))
            .order(check_ins::date.desc())
            .select(CheckInDB::as_select())
            .load::<CheckInDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter()
            .map(|row| CheckIn::try_from(row).map_err(Error::from))
            .collect()
    }

    fn count_by_status(&self, user_id: i64, date: Option<NaiveDate>) -> Result<Vec<StatusCount>> {
        let mut conn = get_connection(&self.pool)?;
        let rows: Vec<(i64, String, i64)> = match date {
            Some(day) => check_ins::table
                .filter(check_ins::user_id.eq(user_id))
                .filter(check_ins::date.eq(day))
                .group_by((check_ins::goal_id, check_ins::status))
                .select((check_ins::goal_id, check_ins::status, count_star()))
                .load(&mut conn),
            None => check_ins::table
                .filter(check_ins::user_id.eq(user_id))
                .group_by((check_ins::goal_id, check_ins::status))
                .select((check_ins::goal_id, check_ins::status, count_star()))
                .load(&mut conn),
        }
        .map_err(StorageError::from)?;

        rows.into_iter()
            .map(|(goal_id, status, count)| -> Result<StatusCount> {
                Ok(StatusCount {
                    goal_id,
                    status: parse_status(&status)?,
                    count,
                })
            })
            .collect()
    }
}
