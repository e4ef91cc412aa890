mod api;
mod middleware;
mod runs;
mod scheduler;

use std::sync::Arc;

use shelfsort_shopify::{AdminClient, ClientPolicy};
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, AppState},
    middleware::AuthState,
    runs::RunCoordinator,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = shelfsort_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(
        env = %config.env,
        bind_addr = %config.bind_addr,
        collections = config.collection_ids.len(),
        "starting shelfsort-server"
    );

    let client = AdminClient::new(
        &config.shopify_store,
        &config.shopify_access_token,
        &config.shopify_api_version,
        ClientPolicy::from_app_config(&config),
    )?;
    let runner = RunCoordinator::new(Arc::new(client), Arc::new(config.run_settings()));

    let _scheduler = match config.schedule.as_deref() {
        Some(schedule) => Some(scheduler::build_scheduler(schedule, runner.clone()).await?),
        None => None,
    };

    let auth = AuthState::from_secret(
        config.cron_secret.as_deref(),
        matches!(config.env, shelfsort_core::Environment::Development),
    )?;
    let app = build_app(AppState { runner }, auth);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
