use crate::errors::Result;
use crate::goals::goals_model::{
    Goal, GoalChanges, GoalDraft, GoalScope, GoalStatus, GoalUpdate, NewGoal,
};
use crate::outcome::WriteOutcome;
use async_trait::async_trait;
use chrono::NaiveDateTime;

/// Trait for goal repository operations.
///
/// Every per-goal method is scoped by owner: a goal owned by someone else is
/// indistinguishable from a missing one.
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    fn find_goal(&self, user_id: i64, goal_id: i64, scope: GoalScope) -> Result<Option<Goal>>;

    /// Live goals newest-created first; recycle-bin goals newest-deleted first.
    fn list_goals(&self, user_id: i64, scope: GoalScope) -> Result<Vec<Goal>>;

    async fn insert_goal(&self, draft: GoalDraft) -> Result<Goal>;

    /// Applies `changes` to a live goal. Fails with not-found when no live
    /// goal matches.
    async fn update_goal(&self, user_id: i64, goal_id: i64, changes: GoalChanges) -> Result<Goal>;

    /// Tombstones a live goal. Returns the number of rows changed.
    async fn mark_deleted(&self, user_id: i64, goal_id: i64, at: NaiveDateTime) -> Result<usize>;

    /// Clears the tombstone of a deleted goal. Returns the number of rows changed.
    async fn clear_deleted(&self, user_id: i64, goal_id: i64) -> Result<usize>;

    /// Destroys a tombstoned goal and its check-ins. Returns the number of goals removed.
    async fn purge_goal(&self, user_id: i64, goal_id: i64) -> Result<usize>;

    /// Tombstoned goals of every owner deleted at or before `cutoff`.
    fn find_deleted_before(&self, cutoff: NaiveDateTime) -> Result<Vec<Goal>>;

    /// Destroys every goal deleted at or before `cutoff`.
    async fn purge_deleted_before(&self, cutoff: NaiveDateTime) -> Result<usize>;
}

/// Trait for goal service operations
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    fn get_goal(&self, user_id: i64, goal_id: i64) -> Result<Goal>;
    fn get_goals(&self, user_id: i64) -> Result<Vec<Goal>>;
    fn get_deleted_goals(&self, user_id: i64) -> Result<Vec<Goal>>;
    async fn create_goal(&self, user_id: i64, new_goal: NewGoal) -> Result<Goal>;
    async fn update_goal_status(
        &self,
        user_id: i64,
        goal_id: i64,
        status: GoalStatus,
    ) -> Result<WriteOutcome<Goal>>;
    async fn update_goal(
        &self,
        user_id: i64,
        goal_id: i64,
        update: GoalUpdate,
    ) -> Result<WriteOutcome<Goal>>;
    async fn delete_goal(&self, user_id: i64, goal_id: i64) -> Result<()>;
    async fn restore_goal(&self, user_id: i64, goal_id: i64) -> Result<Goal>;
    async fn purge_goal(&self, user_id: i64, goal_id: i64) -> Result<()>;
}
