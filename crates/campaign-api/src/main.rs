//! Campaign API
//!
//! Entry point for the messaging-campaign REST backend.
//!
//! Startup order:
//! 1. Tracing and configuration
//! 2. Metrics recorder
//! 3. PostgreSQL (reachability check, then schema initialization)
//! 4. Redis session store (reachability check)
//! 5. Bind listener and serve until SIGINT/SIGTERM, then drain

use campaign_api::config::Config;
use campaign_api::observability::metrics::init_metrics_recorder;
use campaign_api::routes::{self, AppState};
use campaign_api::server::{self, DrainOutcome};
use campaign_api::startup::{self, StartupError};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default log filter when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "campaign_api=debug,tower_http=info";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Campaign API");

    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        StartupError::from(e)
    })?;

    info!(
        bind_address = %config.bind_address(),
        environment = %config.environment,
        token_source = ?config.token_source,
        allowed_origins = config.allowed_origins.len(),
        "Configuration loaded successfully"
    );

    let metrics_handle = init_metrics_recorder().map_err(|e| {
        error!("Failed to initialize metrics: {}", e);
        StartupError::Metrics(e)
    })?;

    let pool = startup::connect_database(&config.database_url).await?;
    startup::run_migrations(&pool).await?;
    let sessions =
        startup::connect_sessions(&config.redis_url, &config.session_key_prefix).await?;

    let bind_address = config.bind_address();
    let drain_timeout = Duration::from_secs(config.shutdown_timeout_seconds);

    let state = Arc::new(AppState::new(pool.clone(), config, Arc::new(sessions)));
    let app = routes::build_routes(state, metrics_handle);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .map_err(|source| {
            error!(addr = %bind_address, error = %source, "Failed to bind listener");
            StartupError::Bind {
                addr: bind_address.clone(),
                source,
            }
        })?;

    info!("Campaign API listening on {}", bind_address);

    match server::serve(listener, app, server::shutdown_signal(), drain_timeout).await? {
        DrainOutcome::Completed => info!("All in-flight requests completed"),
        DrainOutcome::TimedOut => warn!(
            drain_timeout_seconds = drain_timeout.as_secs(),
            "Shutdown drain window elapsed with requests still running"
        ),
    }

    pool.close().await;

    info!("Campaign API shutdown complete");

    Ok(())
}

/// Install the global tracing subscriber.
///
/// `LOG_FORMAT=json` switches to JSON lines for log shippers.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
