use std::sync::Arc;

use app_baseball_client::config::Config;
use app_baseball_client::http_client::ReqwestAppBaseballClient;
use app_baseball_client::{AppBaseballClient, Recommender, TrainingMenu};
use app_baseball_mcp::{AppBaseballMcpHandler, logging, rubric_source};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_env = logging::init_tracing();
    tracing::info!("app_baseball_mcp: log filter: {}", log_env);

    let config = Config::from_env()?;
    let client: Arc<dyn AppBaseballClient> =
        Arc::new(ReqwestAppBaseballClient::from_config(&config)?);

    let (rubric, source) = rubric_source::resolve_rubric(&config, client.as_ref()).await?;
    tracing::info!(%source, "app_baseball_mcp: rubric loaded");

    let recommender = Recommender::new(rubric, TrainingMenu::builtin().clone());
    let handler = AppBaseballMcpHandler::with_recommender(client, recommender);

    tracing::info!(
        "app_baseball_mcp: registered {} tools and {} prompts",
        handler.tool_count(),
        handler.prompt_count()
    );

    // stdout carries the MCP transport; logs go to stderr
    tracing::info!("app_baseball_mcp: starting stdio MCP server...");

    let transport = (tokio::io::stdin(), tokio::io::stdout());
    let server = rmcp::serve_server(handler, transport).await?;

    tracing::info!("app_baseball_mcp: service initialized as server");

    server.waiting().await?;

    Ok(())
}
