use std::collections::HashMap;
use std::sync::Arc;

use super::summaries_model::GoalSummary;
use crate::checkins::CheckInRepositoryTrait;
use crate::errors::Result;
use crate::goals::GoalServiceTrait;
use crate::utils::time_utils::parse_calendar_date;

pub trait SummaryServiceTrait: Send + Sync {
    /// One summary per live goal, oldest goal first. `date` restricts the
    /// counts to a single `YYYY-MM-DD` day.
    fn summarize(&self, user_id: i64, date: Option<&str>) -> Result<Vec<GoalSummary>>;
}

pub struct SummaryService {
    goal_service: Arc<dyn GoalServiceTrait>,
    check_in_repository: Arc<dyn CheckInRepositoryTrait>,
}

impl SummaryService {
    pub fn new(
        goal_service: Arc<dyn GoalServiceTrait>,
        check_in_repository: Arc<dyn CheckInRepositoryTrait>,
    ) -> Self {
        SummaryService {
            goal_service,
            check_in_repository,
        }
    }
}

impl SummaryServiceTrait for SummaryService {
    fn summarize(&self, user_id: i64, date: Option<&str>) -> Result<Vec<GoalSummary>> {
        let date = date
            .filter(|raw| !raw.trim().is_empty())
            .map(parse_calendar_date)
            .transpose()?;

        let mut goals = self.goal_service.get_goals(user_id)?;
        if goals.is_empty() {
            return Ok(Vec::new());
        }
        goals.sort_by_key(|g| (g.created_at, g.id));

        let mut summaries: Vec<GoalSummary> = Vec::with_capacity(goals.len());
        let mut index: HashMap<i64, usize> = HashMap::with_capacity(goals.len());
        for goal in goals {
            index.insert(goal.id, summaries.len());
            summaries.push(GoalSummary::empty(goal.id, goal.title));
        }

        // Rows for goals outside the live set (recycle bin) are dropped here.
        for row in self.check_in_repository.count_by_status(user_id, date)? {
            if let Some(&idx) = index.get(&row.goal_id) {
                summaries[idx].set(row.status, row.count);
            }
        }

        Ok(summaries)
    }
}
