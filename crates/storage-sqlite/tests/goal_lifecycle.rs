use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use futures::future::join_all;
use mockable::Clock;
use tempfile::{tempdir, TempDir};

use willpower_core::checkins::{CheckInService, CheckInServiceTrait, CheckInStatus, NewCheckIn};
use willpower_core::errors::ErrorKind;
use willpower_core::goals::{GoalService, GoalServiceTrait, GoalStatus, NewGoal};
use willpower_core::retention::{RetentionService, RetentionServiceTrait};
use willpower_core::summaries::{SummaryService, SummaryServiceTrait};
use willpower_core::users::{UserService, UserServiceTrait};
use willpower_storage_sqlite::checkins::CheckInRepository;
use willpower_storage_sqlite::goals::GoalRepository;
use willpower_storage_sqlite::users::UserRepository;
use willpower_storage_sqlite::{create_pool, init, run_migrations, spawn_writer};

struct SteppedClock(Mutex<DateTime<Utc>>);

impl SteppedClock {
    fn advance_days(&self, days: i64) {
        *self.0.lock().unwrap() += TimeDelta::days(days);
    }
}

impl Clock for SteppedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

struct App {
    users: UserService,
    goals: Arc<GoalService>,
    check_ins: Arc<CheckInService>,
    summaries: SummaryService,
    sweeper: RetentionService,
    clock: Arc<SteppedClock>,
    _dir: TempDir,
}

fn app() -> App {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data").join("willpower.db");
    let path = init(&path.to_string_lossy()).unwrap();
    let pool = create_pool(&path).unwrap();
    run_migrations(&pool).unwrap();
    let writer = spawn_writer((*pool).clone());

    let clock = Arc::new(SteppedClock(Mutex::new(
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).single().unwrap(),
    )));
    let goal_repo = Arc::new(GoalRepository::new(pool.clone(), writer.clone()));
    let check_in_repo = Arc::new(CheckInRepository::new(pool.clone(), writer.clone()));
    let user_repo = Arc::new(UserRepository::new(pool, writer));

    let goals = Arc::new(GoalService::new(goal_repo.clone(), clock.clone()));
    App {
        users: UserService::new(user_repo, clock.clone()),
        check_ins: Arc::new(CheckInService::new(
            goals.clone(),
            check_in_repo.clone(),
            clock.clone(),
        )),
        summaries: SummaryService::new(goals.clone(), check_in_repo),
        sweeper: RetentionService::new(goal_repo, clock.clone()),
        goals,
        clock,
        _dir: dir,
    }
}

async fn user(app: &App, name: &str) -> i64 {
    app.users.register(name, "hash".into()).await.unwrap().id
}

async fn goal(app: &App, user_id: i64, title: &str) -> i64 {
    app.goals
        .create_goal(
            user_id,
            NewGoal {
                goal_type: "I_WILL".into(),
                title: title.into(),
            },
        )
        .await
        .unwrap()
        .id
}

fn submit(goal_id: i64, status: &str) -> NewCheckIn {
    NewCheckIn {
        goal_id,
        status: status.into(),
        review_notes: None,
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_same_day_submissions_leave_one_row() {
    let app = app();
    let owner = user(&app, "frank").await;
    let goal_id = goal(&app, owner, "Walk").await;

    let statuses = ["completed", "partial", "failed", "completed"];
    let submissions = (0..8).map(|i| {
        let check_ins = app.check_ins.clone();
        let status = statuses[i % statuses.len()];
        async move {
            tokio::spawn(async move {
                check_ins
                    .record_check_in(owner, submit(goal_id, status))
                    .await
            })
            .await
            .unwrap()
        }
    });
    let outcomes: Vec<_> = join_all(submissions)
        .await
        .into_iter()
        .map(|outcome| outcome.unwrap())
        .collect();

    assert_eq!(outcomes.iter().filter(|o| o.is_created()).count(), 1);
    assert_eq!(outcomes.iter().filter(|o| o.is_updated()).count(), 7);
    let rows = app.check_ins.get_check_ins(owner, goal_id).unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn goal_round_trip_through_the_recycle_bin() {
    let app = app();
    let owner = user(&app, "gina").await;
    let other = user(&app, "hank").await;
    let goal_id = goal(&app, owner, "Journal").await;

    let archived = app
        .goals
        .update_goal_status(owner, goal_id, GoalStatus::Archived)
        .await
        .unwrap();
    assert!(archived.is_updated());

    app.check_ins
        .record_check_in(owner, submit(goal_id, "completed"))
        .await
        .unwrap();

    assert_eq!(
        app.goals.delete_goal(other, goal_id).await.unwrap_err().kind(),
        ErrorKind::NotFound
    );
    app.goals.delete_goal(owner, goal_id).await.unwrap();
    assert!(app.summaries.summarize(owner, None).unwrap().is_empty());
    assert_eq!(app.goals.get_deleted_goals(owner).unwrap().len(), 1);

    let restored = app.goals.restore_goal(owner, goal_id).await.unwrap();
    assert_eq!(restored.status, GoalStatus::Archived);
    let summary = app.summaries.summarize(owner, None).unwrap();
    assert_eq!(summary[0].completed, 1);

    let history = app.check_ins.get_check_ins(owner, goal_id).unwrap();
    assert_eq!(history[0].status, CheckInStatus::Completed);
}

#[tokio::test]
async fn sweep_purges_only_expired_tombstones() {
    let app = app();
    let owner = user(&app, "ivy").await;
    let expired = goal(&app, owner, "Old habit").await;
    let fresh = goal(&app, owner, "New habit").await;
    app.check_ins
        .record_check_in(owner, submit(expired, "failed"))
        .await
        .unwrap();

    app.goals.delete_goal(owner, expired).await.unwrap();
    app.clock.advance_days(2);
    app.goals.delete_goal(owner, fresh).await.unwrap();
    app.clock.advance_days(29);

    let report = app.sweeper.sweep().await.unwrap();
    assert_eq!((report.found, report.purged), (1, 1));

    let bin: Vec<i64> = app
        .goals
        .get_deleted_goals(owner)
        .unwrap()
        .iter()
        .map(|g| g.id)
        .collect();
    assert_eq!(bin, vec![fresh]);
    assert_eq!(
        app.goals.restore_goal(owner, expired).await.unwrap_err().kind(),
        ErrorKind::NotFound
    );
}
