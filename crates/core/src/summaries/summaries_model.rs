use serde::Serialize;

use crate::checkins::CheckInStatus;

/// Check-in counts for one live goal. Derived on read, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoalSummary {
    pub goal_id: i64,
    pub title: String,
    pub completed: i64,
    pub partial: i64,
    pub failed: i64,
}

impl GoalSummary {
    pub fn empty(goal_id: i64, title: String) -> Self {
        GoalSummary {
            goal_id,
            title,
            completed: 0,
            partial: 0,
            failed: 0,
        }
    }

    pub(crate) fn set(&mut self, status: CheckInStatus, count: i64) {
        match status {
            CheckInStatus::Completed => self.completed = count,
            CheckInStatus::Partial => self.partial = count,
            CheckInStatus::Failed => self.failed = count,
        }
    }
}
