//! Background retention sweep.
//!
//! Sweeps once right after start and then on a fixed interval until stopped.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{info, warn};

use willpower_core::retention::RetentionServiceTrait;

pub struct RetentionScheduler;

/// Owns the spawned sweep loop.
pub struct RetentionSchedulerHandle {
    task: JoinHandle<()>,
}

impl RetentionScheduler {
    pub fn start(
        service: Arc<dyn RetentionServiceTrait>,
        every: Duration,
    ) -> RetentionSchedulerHandle {
        let task = tokio::spawn(async move {
            info!("Retention scheduler started ({}s interval)", every.as_secs());
            // First tick completes immediately.
            let mut ticks = interval(every);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                run_sweep(service.as_ref()).await;
            }
        });
        RetentionSchedulerHandle { task }
    }
}

impl RetentionSchedulerHandle {
    pub async fn stop(self) {
        self.task.abort();
        let _ = self.task.await;
        info!("Retention scheduler stopped");
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

async fn run_sweep(service: &dyn RetentionServiceTrait) {
    match service.sweep().await {
        Ok(report) if report.found == 0 => {
            info!("Retention sweep: no old deleted goals");
        }
        Ok(report) => {
            info!(
                cutoff = %report.cutoff,
                found = report.found,
                "Retention sweep purged {} goal(s)",
                report.purged
            );
        }
        Err(e) => {
            warn!("Retention sweep failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use willpower_core::errors::{DatabaseError, Error, Result};
    use willpower_core::retention::SweepReport;

    #[derive(Default)]
    struct CountingSweeper {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl RetentionServiceTrait for CountingSweeper {
        async fn sweep(&self) -> Result<SweepReport> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(Error::from(DatabaseError::QueryFailed("locked".into())));
            }
            Ok(SweepReport {
                cutoff: NaiveDate::from_ymd_opt(2024, 5, 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap(),
                found: 0,
                purged: 0,
            })
        }
    }

    impl CountingSweeper {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[tokio::test]
    async fn sweeps_once_at_start() {
        let sweeper = Arc::new(CountingSweeper::default());
        let handle = RetentionScheduler::start(sweeper.clone(), Duration::from_secs(3600));
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(sweeper.calls(), 1);
        assert!(handle.is_running());
        handle.stop().await;
    }

    #[tokio::test]
    async fn keeps_sweeping_after_failures_until_stopped() {
        let sweeper = Arc::new(CountingSweeper {
            fail: true,
            ..Default::default()
        });
        let handle = RetentionScheduler::start(sweeper.clone(), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(150)).await;
        handle.stop().await;

        let after_stop = sweeper.calls();
        assert!(after_stop >= 3, "only {after_stop} sweeps ran");
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(sweeper.calls(), after_stop);
    }
}
