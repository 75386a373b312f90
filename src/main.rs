mod application;
mod domain;
mod infrastructure;
mod presentation;

use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

use crate::infrastructure::container::AppContainer;
use crate::presentation::http::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("PORT").ok().and_then(|port| port.parse().ok());

    let container = AppContainer::new()?;
    let server = HttpServer::new(
        container.document_handler.clone(),
        container.generate_handler.clone(),
        port,
    );

    server.run().await
}
