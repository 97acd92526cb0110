use crate::checkins::checkins_model::{
    CheckIn, CheckInDraft, CheckInRevision, NewCheckIn, StatusCount,
};
use crate::errors::Result;
use crate::outcome::WriteOutcome;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Trait for check-in repository operations.
///
/// Implementations must enforce at most one row per `(goal_id, date)` and
/// report a second insert for the same pair as a unique violation.
#[async_trait]
pub trait CheckInRepositoryTrait: Send + Sync {
    fn find_check_in(&self, goal_id: i64, date: NaiveDate) -> Result<Option<CheckIn>>;

    async fn insert_check_in(&self, draft: CheckInDraft) -> Result<CheckIn>;

    /// Overwrites status and notes of the existing row for `(goal_id, date)`.
    async fn update_check_in(
        &self,
        goal_id: i64,
        date: NaiveDate,
        revision: CheckInRevision,
    ) -> Result<CheckIn>;

    /// All check-ins of one goal, newest day first.
    fn list_check_ins(&self, user_id: i64, goal_id: i64) -> Result<Vec<CheckIn>>;

    /// Check-in counts of `user_id` grouped by goal and status, optionally
    /// limited to one day.
    fn count_by_status(&self, user_id: i64, date: Option<NaiveDate>) -> Result<Vec<StatusCount>>;
}

/// Trait for check-in service operations
#[async_trait]
pub trait CheckInServiceTrait: Send + Sync {
    async fn record_check_in(
        &self,
        user_id: i64,
        check_in: NewCheckIn,
    ) -> Result<WriteOutcome<CheckIn>>;
    fn get_check_ins(&self, user_id: i64, goal_id: i64) -> Result<Vec<CheckIn>>;
}
