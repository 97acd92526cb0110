use tower_http::services::{ServeDir, ServeFile};
use willpower_server::{
    api::app_router, build_state, config::Config, init_tracing, scheduler::RetentionScheduler,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing();
    let state = build_state(&config).await?;

    let sweeper = RetentionScheduler::start(state.retention_service.clone(), config.sweep_interval);

    let mut router = app_router(state, &config);
    if let Some(dir) = &config.static_dir {
        let static_dir = std::path::PathBuf::from(dir);
        let index_file = static_dir.join("index.html");
        let static_service = ServeDir::new(static_dir).fallback(ServeFile::new(index_file));
        router = router.fallback_service(static_service);
    }

    tracing::info!("Listening on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
        })
        .await?;
    sweeper.stop().await;
    Ok(())
}
