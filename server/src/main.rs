use tokio::net::TcpListener;
use todo_server::{config::ServiceConfig, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ServiceConfig::from_env()?;
    let state = AppState::from_config(&config).await;

    let addr = config.socket_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "listening");
    todo_server::run(listener, state).await?;
    Ok(())
}
