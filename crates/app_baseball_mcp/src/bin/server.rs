use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::info;

use app_baseball_client::config::Config;
use app_baseball_client::http_client::ReqwestAppBaseballClient;
use app_baseball_client::{AppBaseballClient, Recommender, TrainingMenu};
use app_baseball_mcp::http::{self, AppState};
use app_baseball_mcp::{AppBaseballMcpHandler, logging, rubric_source};

const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024;

/// Listen address from `ADDRESS`, falling back to 127.0.0.1:3000 when unset or unparsable.
fn listen_addr_from(value: Option<&str>) -> SocketAddr {
    value
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 3000)))
}

fn max_body_size_from(value: Option<&str>) -> usize {
    value
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_MAX_BODY_SIZE)
}


#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let log_env = logging::init_tracing();
    tracing::info!(%log_env, "app_baseball_mcp:http: log filter");

    let handle = PrometheusBuilder::new().install_recorder()?;

    let config = Config::from_env()?;
    let client: Arc<dyn AppBaseballClient> =
        Arc::new(ReqwestAppBaseballClient::from_config(&config)?);

    let (rubric, source) = rubric_source::resolve_rubric(&config, client.as_ref()).await?;
    info!(%source, "rubric loaded");

    let recommender = Recommender::new(rubric, TrainingMenu::builtin().clone());
    let handler = AppBaseballMcpHandler::with_recommender(client, recommender);
    let state = Arc::new(AppState {
        handler,
        metrics: handle,
    });

    let max_body_size = max_body_size_from(std::env::var("MAX_HTTP_BODY_SIZE").ok().as_deref());
    let app = http::router(state).layer(axum::extract::DefaultBodyLimit::max(max_body_size));

    let addr = listen_addr_from(std::env::var("ADDRESS").ok().as_deref());
    info!(%addr, max_body_bytes = max_body_size, base_url = %config.base_url, "starting HTTP server");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind to address {addr}: {e}");
            std::process::exit(1);
        }
    };

    let server = axum::serve(listener, app.into_make_service());
    if let Err(e) = server
        .with_graceful_shutdown(async {
            if let Err(e) = signal::ctrl_c().await {
                tracing::error!("failed to listen for ctrl+c: {e}");
            }
        })
        .await
    {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }

    Ok(())
}
