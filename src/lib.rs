pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod models;
pub mod services;
pub mod state;

use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
pub use config::Config;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Runs the selected command with a config loaded by the caller.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let cli = Cli::parse();

    config.validate()?;

    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let json_logs = config.general.json_logs;
    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(tracing_subscriber::fmt::layer))
        .init();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let prometheus_handle = if config.observability.metrics_enabled {
                use metrics_exporter_prometheus::PrometheusBuilder;
                let handle = PrometheusBuilder::new()
                    .install_recorder()
                    .context("Failed to install Prometheus recorder")?;
                info!("Prometheus metrics recorder initialized");
                Some(handle)
            } else {
                None
            };

            run_server(config, prometheus_handle).await
        }
        Commands::Seed { path } => cli::cmd_seed(&config, &path).await,
        Commands::Movies => cli::cmd_list_movies(&config).await,
        Commands::Actors => cli::cmd_list_actors(&config).await,
    }
}

async fn run_server(
    config: Config,
    prometheus_handle: Option<metrics_exporter_prometheus::PrometheusHandle>,
) -> anyhow::Result<()> {
    info!("Filmoteka v{} starting...", env!("CARGO_PKG_VERSION"));

    if !config.server.enabled {
        info!("Web API disabled in config, nothing to do");
        return Ok(());
    }

    let port = config.server.port;
    let api_state = api::create_app_state_from_config(config, prometheus_handle).await?;
    let app = api::router(api_state).await;

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("🌐 Web Server running at http://0.0.0.0:{}", port);
    info!("Press Ctrl+C to stop.");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }
}
