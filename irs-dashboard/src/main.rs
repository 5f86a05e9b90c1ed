//! US Tax Filing Dashboard - serves choropleth and trend charts of IRS
//! filing statistics by state and year.
//!
//! Startup:
//! 1. Load `irs_audit_data.csv` into the in-memory database. Any failure
//!    here is fatal; the server never binds without data.
//! 2. Derive the dropdown options and register the callbacks.
//! 3. Serve on `0.0.0.0:5000`, one event at a time.

mod config;
mod server;

use anyhow::Context;
use config::DashboardConfig;
use irs_db::Database;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DashboardConfig::default();
    let db = Database::open_csv(&config.data_path)?;
    let app = server::router(server::AppState::new(db)?);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    log::info!("Serving US Tax Filing Dashboard on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
}
