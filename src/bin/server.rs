use log::{error, info, warn};
use std::net::SocketAddr;
use std::sync::Arc;

use rusty_canvas::config::ServerConfig;
use rusty_canvas::core::ServerManager;
use rusty_canvas::handlers::routes;

#[tokio::main]
async fn main() {
    // Initialize env
    let dotenv_result = dotenvy::dotenv();

    // Initialize logging
    env_logger::init();

    match dotenv_result {
        Ok(path) => info!("Environment variables loaded from {}", path.display()),
        Err(e) => warn!("Failed to load .env file: {}", e),
    };

    // Load config from environment
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Configuration: host={}, port={}, storage={:?} ({})",
        config.host,
        config.port,
        config.storage_backend,
        config.storage_dir.display()
    );

    let server = Arc::new(ServerManager::from_config(&config));

    // Build the server address
    let addr: SocketAddr = match format!("{}:{}", config.host, config.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!("Failed to parse server address: {}", e);
            std::process::exit(1);
        }
    };

    info!("Starting Rusty Canvas server on {}", addr);

    warp::serve(routes(server)).run(addr).await;
}
