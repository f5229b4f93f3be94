use std::net::SocketAddr;

use backend::shared::{config, data::db, state::AppState};
use backend::system;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    system::tracing::initialize()?;

    let config = config::load_config()?;
    let database_url = config.database_url()?;
    let port = config.server.port;

    let conn = db::initialize_database(database_url)
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;

    let app = backend::routes::configure_routes(AppState::new(conn, port));

    let addr: SocketAddr = ([0, 0, 0, 0], port).into();

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    port
                );
            } else {
                tracing::error!("Failed to bind to port {}. Error: {}", port, e);
            }
            return Err(e.into());
        }
    };

    tracing::info!("Server running on http://localhost:{}", port);
    tracing::info!("Swagger UI available at http://localhost:{}/api-docs", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(system::shutdown::shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
