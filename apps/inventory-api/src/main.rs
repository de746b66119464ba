//! Inventory API - REST server for the store's product inventory

use axum_helpers::server::{create_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_products::{InMemoryProductRepository, ProductService};
use tracing::info;

mod api;
mod config;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let repository = InMemoryProductRepository::new();
    let service = ProductService::new(repository);

    let router = create_router(api::routes(service)).merge(api::health::router());

    info!("Starting Inventory API on port {}", config.server.port);

    create_app(router, &config.server).await?;

    info!("Inventory API shutdown complete");
    Ok(())
}
