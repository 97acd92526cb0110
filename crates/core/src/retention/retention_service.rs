use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime};
use mockable::Clock;
use serde::Serialize;

use crate::constants::DEFAULT_RETENTION_DAYS;
use crate::errors::{Result, ValidationError};
use crate::goals::GoalRepositoryTrait;
use crate::utils::time_utils::utc_now;

/// What one sweep looked at and removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    pub cutoff: NaiveDateTime,
    pub found: usize,
    pub purged: usize,
}

#[async_trait]
pub trait RetentionServiceTrait: Send + Sync {
    /// Purges every goal, across all owners, whose tombstone is at least the
    /// retention period old. Check-ins of a purged goal go with it.
    async fn sweep(&self) -> Result<SweepReport>;
}

pub struct RetentionService {
    repository: Arc<dyn GoalRepositoryTrait>,
    clock: Arc<dyn Clock>,
    retention: Duration,
}

impl RetentionService {
    pub fn new(repository: Arc<dyn GoalRepositoryTrait>, clock: Arc<dyn Clock>) -> Self {
        RetentionService {
            repository,
            clock,
            retention: Duration::days(DEFAULT_RETENTION_DAYS),
        }
    }

    /// Overrides the retention period. It must be at least one day.
    pub fn with_retention_days(mut self, days: i64) -> Result<Self> {
        if days < 1 {
            return Err(ValidationError::InvalidInput(format!(
                "retention must be at least 1 day, got {days}"
            ))
            .into());
        }
        self.retention = Duration::days(days);
        Ok(self)
    }

    pub fn retention(&self) -> Duration {
        self.retention
    }
}

#[async_trait]
impl RetentionServiceTrait for RetentionService {
    async fn sweep(&self) -> Result<SweepReport> {
        let cutoff = utc_now(self.clock.as_ref()) - self.retention;
        let found = self.repository.find_deleted_before(cutoff)?.len();
        if found == 0 {
            return Ok(SweepReport {
                cutoff,
                found,
                purged: 0,
            });
        }
        let purged = self.repository.purge_deleted_before(cutoff).await?;
        Ok(SweepReport {
            cutoff,
            found,
            purged,
        })
    }
}
