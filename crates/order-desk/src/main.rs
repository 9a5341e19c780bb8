use order_desk::api::{self, AppState};
use order_desk::config::Config;
use order_desk::lifecycle::{setup_tracing, shutdown_signal, RestaurantSystem};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = Config::load()?;
    let system = RestaurantSystem::open(config.actor_buffer, config.data_dir.as_deref()).await?;

    let state = AppState {
        menu: system.menu_client.clone(),
        orders: system.order_client.clone(),
    };
    let app = api::router(state, config.allowed_origins.clone());

    let address = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped, draining actors");
    system.shutdown().await?;
    Ok(())
}
