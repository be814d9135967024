//! aqi-web - AQI prediction service
//!
//! Serves the prediction pages, the AQI record API and a health endpoint.
//! Refuses to start when the regression model cannot be loaded.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use aqi_common::config::{load_toml_config, ConfigOverrides, ServiceConfig};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aqi_web::model::RegressionModel;
use aqi_web::services::OpenWeatherClient;
use aqi_web::{build_router, AppState};

/// Command-line arguments for aqi-web
#[derive(Parser, Debug)]
#[command(name = "aqi-web")]
#[command(about = "Air Quality Index prediction service")]
#[command(version)]
struct Args {
    /// TOML config file (defaults to the platform config dir)
    #[arg(short, long, env = "AQI_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "AQI_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "AQI_PORT")]
    port: Option<u16>,

    /// Exported regression model (JSON)
    #[arg(short, long, env = "AQI_MODEL_PATH")]
    model: Option<PathBuf>,

    /// OpenWeather API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// OpenWeather API base URL
    #[arg(long, env = "OPENWEATHER_BASE_URL")]
    openweather_url: Option<String>,

    /// Timeout for outbound HTTP requests, in seconds
    #[arg(long, env = "AQI_HTTP_TIMEOUT_SECS")]
    http_timeout: Option<u64>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            host: self.host.clone(),
            port: self.port,
            model_path: self.model.clone(),
            api_key: self.api_key.clone(),
            base_url: self.openweather_url.clone(),
            timeout_secs: self.http_timeout,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aqi_web=debug,aqi_common=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting aqi-web v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let toml_config =
        load_toml_config(args.config.as_deref()).context("Failed to load config file")?;
    let config = ServiceConfig::resolve(args.overrides(), toml_config)
        .context("Invalid configuration")?;

    // No model, no service
    let model = RegressionModel::load(&config.model_path).context("Failed to load AQI model")?;

    let client = OpenWeatherClient::new(
        config.openweather_base_url.clone(),
        config.openweather_api_key.clone(),
        config.http_timeout,
    )
    .context("Failed to build OpenWeather client")?;
    info!(
        "OpenWeather: {} (timeout {:?})",
        config.openweather_base_url, config.http_timeout
    );

    let state = AppState::new(Arc::new(model), Arc::new(client));
    let app = build_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("aqi-web listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
