use oretrack::services::mill::PredictionTable;
use oretrack::{config, routes, services, state};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Missing .env is fine; the process environment still applies.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match config::AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "configuration rejected");
            std::process::exit(1);
        }
    };

    // Non-fatal: the prediction chart is disabled if the table is missing.
    let predictions = match PredictionTable::load(&config.prediction_path).await {
        Ok(table) => {
            tracing::info!(rows = table.rows.len(), path = %config.prediction_path.display(), "mill prediction table loaded");
            Some(table)
        }
        Err(e) => {
            tracing::warn!(error = %e, path = %config.prediction_path.display(), "mill prediction table unavailable");
            None
        }
    };

    let port = config.port;
    let prune_every = config.session_prune_every;
    let state = state::AppState::new(config, predictions);

    // Spawn background session expiry.
    let _pruner = services::session::spawn_prune_task(state.sessions.clone(), prune_every);

    let app = routes::app(state);
    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %port, "failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!(%port, "oretrack listening");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server failed");
        std::process::exit(1);
    }
}
