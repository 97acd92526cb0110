use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use super::goals_model::{
    validate_title, Goal, GoalChanges, GoalDraft, GoalScope, GoalStatus, GoalType, GoalUpdate,
    NewGoal,
};
use super::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use crate::errors::{Error, Result};
use crate::outcome::WriteOutcome;
use crate::utils::time_utils::utc_now;

fn goal_not_found() -> Error {
    Error::NotFound("Goal".to_string())
}

/// Owner-scoped goal store with the recycle-bin lifecycle.
pub struct GoalService {
    repository: Arc<dyn GoalRepositoryTrait>,
    clock: Arc<dyn Clock>,
}

impl GoalService {
    pub fn new(repository: Arc<dyn GoalRepositoryTrait>, clock: Arc<dyn Clock>) -> Self {
        GoalService { repository, clock }
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    fn get_goal(&self, user_id: i64, goal_id: i64) -> Result<Goal> {
        self.repository
            .find_goal(user_id, goal_id, GoalScope::Live)?
            .ok_or_else(goal_not_found)
    }

    fn get_goals(&self, user_id: i64) -> Result<Vec<Goal>> {
        self.repository.list_goals(user_id, GoalScope::Live)
    }

    fn get_deleted_goals(&self, user_id: i64) -> Result<Vec<Goal>> {
        self.repository.list_goals(user_id, GoalScope::RecycleBin)
    }

    async fn create_goal(&self, user_id: i64, new_goal: NewGoal) -> Result<Goal> {
        let goal_type = new_goal.goal_type.parse::<GoalType>()?;
        let title = validate_title(&new_goal.title)?;
        let draft = GoalDraft {
            user_id,
            goal_type,
            title,
            created_at: utc_now(self.clock.as_ref()),
        };
        self.repository.insert_goal(draft).await
    }

    async fn update_goal_status(
        &self,
        user_id: i64,
        goal_id: i64,
        status: GoalStatus,
    ) -> Result<WriteOutcome<Goal>> {
        let current = self.get_goal(user_id, goal_id)?;
        if current.status == status {
            return Ok(WriteOutcome::Unchanged(current));
        }
        let changes = GoalChanges {
            goal_type: None,
            title: None,
            status: Some(status),
            updated_at: utc_now(self.clock.as_ref()),
        };
        let updated = self.repository.update_goal(user_id, goal_id, changes).await?;
        Ok(WriteOutcome::Updated(updated))
    }

    async fn update_goal(
        &self,
        user_id: i64,
        goal_id: i64,
        update: GoalUpdate,
    ) -> Result<WriteOutcome<Goal>> {
        let current = self.get_goal(user_id, goal_id)?;
        let (goal_type, title) = update.resolve()?;
        let changes = GoalChanges {
            goal_type,
            title,
            status: None,
            updated_at: utc_now(self.clock.as_ref()),
        };
        if changes.is_empty() {
            return Ok(WriteOutcome::Unchanged(current));
        }
        let updated = self.repository.update_goal(user_id, goal_id, changes).await?;
        Ok(WriteOutcome::Updated(updated))
    }

    async fn delete_goal(&self, user_id: i64, goal_id: i64) -> Result<()> {
        let at = utc_now(self.clock.as_ref());
        match self.repository.mark_deleted(user_id, goal_id, at).await? {
            0 => Err(goal_not_found()),
            _ => Ok(()),
        }
    }

    async fn restore_goal(&self, user_id: i64, goal_id: i64) -> Result<Goal> {
        if self.repository.clear_deleted(user_id, goal_id).await? == 0 {
            return Err(goal_not_found());
        }
        self.get_goal(user_id, goal_id)
    }

    async fn purge_goal(&self, user_id: i64, goal_id: i64) -> Result<()> {
        match self.repository.purge_goal(user_id, goal_id).await? {
            0 => Err(goal_not_found()),
            _ => Ok(()),
        }
    }
}
