//! Shared test doubles for the service tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::checkins::{
    CheckIn, CheckInDraft, CheckInRepositoryTrait, CheckInRevision, StatusCount,
};
use crate::errors::{DatabaseError, Error, Result};
use crate::goals::{
    Goal, GoalChanges, GoalDraft, GoalLifecycle, GoalRepositoryTrait, GoalScope, GoalStatus,
};
use crate::users::{NewUser, User, UserRepositoryTrait};

pub struct FixedClock(Mutex<DateTime<Utc>>);

impl FixedClock {
    pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Self {
        let now = Utc
            .with_ymd_and_hms(year, month, day, hour, minute, 0)
            .single()
            .unwrap();
        Self(Mutex::new(now))
    }

    pub fn advance_minutes(&self, minutes: i64) {
        *self.lock() += TimeDelta::minutes(minutes);
    }

    pub fn advance_days(&self, days: i64) {
        *self.lock() += TimeDelta::days(days);
    }

    fn lock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        self.0.lock().unwrap()
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock()
    }
}

#[derive(Default)]
struct State {
    next_id: i64,
    users: BTreeMap<i64, User>,
    goals: BTreeMap<i64, Goal>,
    check_ins: BTreeMap<i64, CheckIn>,
}

impl State {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn goal_mut(&mut self, user_id: i64, goal_id: i64) -> Option<&mut Goal> {
        self.goals
            .get_mut(&goal_id)
            .filter(|goal| goal.user_id == user_id)
    }

    fn remove_goals(&mut self, ids: &[i64]) -> usize {
        self.check_ins.retain(|_, c| !ids.contains(&c.goal_id));
        ids.iter()
            .filter(|id| self.goals.remove(id).is_some())
            .count()
    }
}

/// In-memory repository with the same uniqueness and cascade rules as the
/// SQLite schema.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
    goal_updates: AtomicUsize,
    hide_next_lookup: AtomicBool,
}

impl InMemoryStore {
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// Ids of every stored goal, tombstoned or not, ascending.
    pub fn goal_ids(&self) -> Vec<i64> {
        self.state().goals.keys().copied().collect()
    }

    pub fn goal_update_count(&self) -> usize {
        self.goal_updates.load(Ordering::SeqCst)
    }

    pub fn check_in_count(&self) -> usize {
        self.state().check_ins.len()
    }

    /// Makes the next `find_check_in` report nothing, simulating a row
    /// written by another request between lookup and insert.
    pub fn hide_next_check_in_lookup(&self) {
        self.hide_next_lookup.store(true, Ordering::SeqCst);
    }
}

fn in_scope(goal: &Goal, scope: GoalScope) -> bool {
    match scope {
        GoalScope::Live => goal.lifecycle.is_live(),
        GoalScope::RecycleBin => !goal.lifecycle.is_live(),
    }
}

fn deleted_at_or_before(goal: &Goal, cutoff: NaiveDateTime) -> bool {
    goal.lifecycle.deleted_at().is_some_and(|at| at <= cutoff)
}

#[async_trait]
impl GoalRepositoryTrait for InMemoryStore {
    fn find_goal(&self, user_id: i64, goal_id: i64, scope: GoalScope) -> Result<Option<Goal>> {
        Ok(self
            .state()
            .goals
            .get(&goal_id)
            .filter(|g| g.user_id == user_id && in_scope(g, scope))
            .cloned())
    }

    fn list_goals(&self, user_id: i64, scope: GoalScope) -> Result<Vec<Goal>> {
        let mut goals: Vec<Goal> = self
            .state()
            .goals
            .values()
            .filter(|g| g.user_id == user_id && in_scope(g, scope))
            .cloned()
            .collect();
        match scope {
            GoalScope::Live => {
                goals.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)))
            }
            GoalScope::RecycleBin => goals.sort_by(|a, b| {
                (b.lifecycle.deleted_at(), b.id).cmp(&(a.lifecycle.deleted_at(), a.id))
            }),
        }
        Ok(goals)
    }

    async fn insert_goal(&self, draft: GoalDraft) -> Result<Goal> {
        let mut state = self.state();
        let goal = Goal {
            id: state.allocate_id(),
            user_id: draft.user_id,
            goal_type: draft.goal_type,
            title: draft.title,
            status: GoalStatus::Active,
            lifecycle: GoalLifecycle::Live,
            created_at: draft.created_at,
            updated_at: draft.created_at,
        };
        state.goals.insert(goal.id, goal.clone());
        Ok(goal)
    }

    async fn update_goal(&self, user_id: i64, goal_id: i64, changes: GoalChanges) -> Result<Goal> {
        self.goal_updates.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state();
        let goal = state
            .goal_mut(user_id, goal_id)
            .filter(|g| g.lifecycle.is_live())
            .ok_or_else(|| Error::NotFound("Goal".to_string()))?;
        if let Some(goal_type) = changes.goal_type {
            goal.goal_type = goal_type;
        }
        if let Some(title) = changes.title {
            goal.title = title;
        }
        if let Some(status) = changes.status {
            goal.status = status;
        }
        goal.updated_at = changes.updated_at;
        Ok(goal.clone())
    }

    async fn mark_deleted(&self, user_id: i64, goal_id: i64, at: NaiveDateTime) -> Result<usize> {
        let mut state = self.state();
        match state.goal_mut(user_id, goal_id).filter(|g| g.lifecycle.is_live()) {
            Some(goal) => {
                goal.lifecycle = GoalLifecycle::Deleted { at };
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn clear_deleted(&self, user_id: i64, goal_id: i64) -> Result<usize> {
        let mut state = self.state();
        match state.goal_mut(user_id, goal_id).filter(|g| !g.lifecycle.is_live()) {
            Some(goal) => {
                goal.lifecycle = GoalLifecycle::Live;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn purge_goal(&self, user_id: i64, goal_id: i64) -> Result<usize> {
        let mut state = self.state();
        let deleted = state
            .goal_mut(user_id, goal_id)
            .is_some_and(|g| !g.lifecycle.is_live());
        if !deleted {
            return Ok(0);
        }
        Ok(state.remove_goals(&[goal_id]))
    }

    fn find_deleted_before(&self, cutoff: NaiveDateTime) -> Result<Vec<Goal>> {
        Ok(self
            .state()
            .goals
            .values()
            .filter(|g| deleted_at_or_before(g, cutoff))
            .cloned()
            .collect())
    }

    async fn purge_deleted_before(&self, cutoff: NaiveDateTime) -> Result<usize> {
        let mut state = self.state();
        let ids: Vec<i64> = state
            .goals
            .values()
            .filter(|g| deleted_at_or_before(g, cutoff))
            .map(|g| g.id)
            .collect();
        Ok(state.remove_goals(&ids))
    }
}

#[async_trait]
impl CheckInRepositoryTrait for InMemoryStore {
    fn find_check_in(&self, goal_id: i64, date: NaiveDate) -> Result<Option<CheckIn>> {
        if self.hide_next_lookup.swap(false, Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(self
            .state()
            .check_ins
            .values()
            .find(|c| c.goal_id == goal_id && c.date == date)
            .cloned())
    }

    async fn insert_check_in(&self, draft: CheckInDraft) -> Result<CheckIn> {
        let mut state = self.state();
        let taken = state
            .check_ins
            .values()
            .any(|c| c.goal_id == draft.goal_id && c.date == draft.date);
        if taken {
            return Err(DatabaseError::UniqueViolation(format!(
                "check_ins.goal_id, check_ins.date ({}, {})",
                draft.goal_id, draft.date
            ))
            .into());
        }
        let check_in = CheckIn {
            id: state.allocate_id(),
            goal_id: draft.goal_id,
            user_id: draft.user_id,
            date: draft.date,
            status: draft.status,
            review_notes: draft.review_notes,
            created_at: draft.created_at,
            updated_at: draft.created_at,
        };
        state.check_ins.insert(check_in.id, check_in.clone());
        Ok(check_in)
    }

    async fn update_check_in(
        &self,
        goal_id: i64,
        date: NaiveDate,
        revision: CheckInRevision,
    ) -> Result<CheckIn> {
        let mut state = self.state();
        let check_in = state
            .check_ins
            .values_mut()
            .find(|c| c.goal_id == goal_id && c.date == date)
            .ok_or_else(|| DatabaseError::NotFound(format!("check-in {goal_id} on {date}")))?;
        check_in.status = revision.status;
        check_in.review_notes = revision.review_notes;
        check_in.updated_at = revision.updated_at;
        Ok(check_in.clone())
    }

    fn list_check_ins(&self, user_id: i64, goal_id: i64) -> Result<Vec<CheckIn>> {
        let mut rows: Vec<CheckIn> = self
            .state()
            .check_ins
            .values()
            .filter(|c| c.user_id == user_id && c.goal_id == goal_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(rows)
    }

    fn count_by_status(&self, user_id: i64, date: Option<NaiveDate>) -> Result<Vec<StatusCount>> {
        let mut counts: BTreeMap<(i64, &'static str), StatusCount> = BTreeMap::new();
        for c in self.state().check_ins.values() {
            if c.user_id != user_id || date.is_some_and(|d| d != c.date) {
                continue;
            }
            counts
                .entry((c.goal_id, c.status.as_str()))
                .or_insert(StatusCount {
                    goal_id: c.goal_id,
                    status: c.status,
                    count: 0,
                })
                .count += 1;
        }
        Ok(counts.into_values().collect())
    }
}

#[async_trait]
impl UserRepositoryTrait for InMemoryStore {
    fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .state()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn insert_user(&self, new_user: NewUser) -> Result<User> {
        let mut state = self.state();
        if state.users.values().any(|u| u.username == new_user.username) {
            return Err(DatabaseError::UniqueViolation("users.username".to_string()).into());
        }
        let user = User {
            id: state.allocate_id(),
            username: new_user.username,
            password_hash: new_user.password_hash,
            created_at: new_user.created_at,
            updated_at: new_user.created_at,
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }
}
