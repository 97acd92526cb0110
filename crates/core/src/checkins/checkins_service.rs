use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use super::checkins_model::{
    normalize_notes, CheckIn, CheckInDraft, CheckInRevision, CheckInStatus, NewCheckIn,
};
use super::checkins_traits::{CheckInRepositoryTrait, CheckInServiceTrait};
use crate::errors::Result;
use crate::goals::GoalServiceTrait;
use crate::outcome::WriteOutcome;
use crate::utils::time_utils::{check_in_day, utc_now};

/// Records at most one check-in per goal and calendar day.
///
/// The lookup before the insert is only a fast path. The repository's unique
/// index on `(goal_id, date)` is what keeps concurrent submissions from
/// producing two rows: an insert that loses the race comes back as a unique
/// violation and is replayed as an update.
pub struct CheckInService {
    goal_service: Arc<dyn GoalServiceTrait>,
    repository: Arc<dyn CheckInRepositoryTrait>,
    clock: Arc<dyn Clock>,
}

impl CheckInService {
    pub fn new(
        goal_service: Arc<dyn GoalServiceTrait>,
        repository: Arc<dyn CheckInRepositoryTrait>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        CheckInService {
            goal_service,
            repository,
            clock,
        }
    }
}

#[async_trait]
impl CheckInServiceTrait for CheckInService {
    async fn record_check_in(
        &self,
        user_id: i64,
        check_in: NewCheckIn,
    ) -> Result<WriteOutcome<CheckIn>> {
        let status = check_in.status.parse::<CheckInStatus>()?;
        let goal = self.goal_service.get_goal(user_id, check_in.goal_id)?;

        let date = check_in_day(self.clock.as_ref());
        let now = utc_now(self.clock.as_ref());
        let review_notes = normalize_notes(check_in.review_notes);
        let revision = CheckInRevision {
            status,
            review_notes: review_notes.clone(),
            updated_at: now,
        };

        if self.repository.find_check_in(goal.id, date)?.is_some() {
            let updated = self
                .repository
                .update_check_in(goal.id, date, revision)
                .await?;
            return Ok(WriteOutcome::Updated(updated));
        }

        let draft = CheckInDraft {
            goal_id: goal.id,
            user_id: goal.user_id,
            date,
            status,
            review_notes,
            created_at: now,
        };
        match self.repository.insert_check_in(draft).await {
            Ok(created) => Ok(WriteOutcome::Created(created)),
            Err(err) if err.is_unique_violation() => {
                let updated = self
                    .repository
                    .update_check_in(goal.id, date, revision)
                    .await?;
                Ok(WriteOutcome::Updated(updated))
            }
            Err(err) => Err(err),
        }
    }

    fn get_check_ins(&self, user_id: i64, goal_id: i64) -> Result<Vec<CheckIn>> {
        let goal = self.goal_service.get_goal(user_id, goal_id)?;
        self.repository.list_check_ins(user_id, goal.id)
    }
}
