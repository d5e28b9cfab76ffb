use std::path::PathBuf;
use std::sync::Arc;

use alert_translator::Result;
use alert_translator::config::Config;
use alert_translator::gchat::GChatClient;
use alert_translator::metrics::Metrics;
use alert_translator::server::{AppState, serve};
use alert_translator::telemetry::init_tracing;
use tokio::signal;
use tracing::{info, warn};

use super::cli::Cli;

const DEFAULT_CONFIG: &str = "config.toml";

pub async fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.log_filter.as_deref(), cli.log_format)?;

    let config_path = cli.config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let mut config = Config::from_env_and_file(&config_path)?;

    if let Some(bind) = cli.bind {
        config.bind = bind;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    let client = GChatClient::new(
        config.gchat_base_url.clone(),
        config.http_request_timeout,
        config.http_connect_timeout,
        cli.insecure,
    )?;

    let state = AppState {
        provider: config.provider,
        client,
        metrics: Arc::new(Metrics::new()?),
    };

    info!(
        config = %config_path.display(),
        base_url = %config.gchat_base_url,
        timeout_ms = config.http_request_timeout.as_millis(),
        "configured for {}",
        config.provider
    );

    serve(config.listen_addr(), state, shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received, draining connections"),
        Err(err) => {
            warn!(error = %err, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
