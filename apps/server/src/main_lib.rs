use std::sync::Arc;

use crate::{auth::AuthManager, config::Config};
use mockable::{Clock, DefaultClock};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use willpower_core::{
    checkins::{CheckInService, CheckInServiceTrait},
    goals::{GoalService, GoalServiceTrait},
    retention::{RetentionService, RetentionServiceTrait},
    summaries::{SummaryService, SummaryServiceTrait},
    users::{UserService, UserServiceTrait},
};
use willpower_storage_sqlite::{
    checkins::CheckInRepository, create_pool, goals::GoalRepository, init, run_migrations,
    spawn_writer, users::UserRepository,
};

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub goal_service: Arc<dyn GoalServiceTrait>,
    pub check_in_service: Arc<dyn CheckInServiceTrait>,
    pub summary_service: Arc<dyn SummaryServiceTrait>,
    pub retention_service: Arc<dyn RetentionServiceTrait>,
    pub auth: Arc<AuthManager>,
}

pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = create_pool(&db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer((*pool).clone());

    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let user_repo = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let goal_repo = Arc::new(GoalRepository::new(pool.clone(), writer.clone()));
    let check_in_repo = Arc::new(CheckInRepository::new(pool.clone(), writer.clone()));

    let user_service = Arc::new(UserService::new(user_repo, clock.clone()));
    let goal_service: Arc<dyn GoalServiceTrait> =
        Arc::new(GoalService::new(goal_repo.clone(), clock.clone()));
    let check_in_service = Arc::new(CheckInService::new(
        goal_service.clone(),
        check_in_repo.clone(),
        clock.clone(),
    ));
    let summary_service = Arc::new(SummaryService::new(goal_service.clone(), check_in_repo));
    let retention_service = Arc::new(
        RetentionService::new(goal_repo, clock).with_retention_days(config.retention_days)?,
    );

    if config.uses_default_secret() {
        tracing::warn!("WP_JWT_SECRET is not set; using the development default");
    }
    let auth = Arc::new(AuthManager::new(
        config.jwt_secret.as_bytes(),
        config.token_ttl,
    ));

    Ok(Arc::new(AppState {
        user_service,
        goal_service,
        check_in_service,
        summary_service,
        retention_service,
        auth,
    }))
}
