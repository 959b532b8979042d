use anyhow::Context;
use tokio::net::TcpListener;

use flashcard_srs::{
    AppState, Config, build_app,
    db::{build_pool, run_migrations},
    utils::logging::init_logger,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_logger();

    let config = Config::from_env().context("Invalid configuration")?;

    // Database configuration
    let pool = build_pool(&config.database_url, config.db_pool_size).context("Failed to create DB pool")?;
    {
        let mut conn = pool.get().context("Failed to get DB connection")?;
        run_migrations(&mut conn).map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;
    }

    let state = AppState {
        pool,
        bcrypt_cost: config.bcrypt_cost,
    };
    let app = build_app(state, &config);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    log::info!("Server running on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }
}
