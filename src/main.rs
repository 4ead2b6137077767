use de_analytics::{
    poller::spawn_poller,
    router,
    upstream::Upstream,
    AppState, Config,
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env()?;
    let state = AppState::new(Upstream::new(config.upstream_url.clone()));

    let poll_state = state.clone();
    let apps_poller = spawn_poller("apps", config.poll_interval, move || {
        let state = poll_state.clone();
        async move {
            state.refresh_apps().await;
        }
    });

    let app = router(state);

    info!("upstream analytics source at {}", config.upstream_url);
    info!("listening on http://{}", config.addr);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    apps_poller.cancel().await;
    info!("shut down");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
}
