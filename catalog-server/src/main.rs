use catalog_server::{Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. dotenv, config, logging
    let config = setup_environment()?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        work_dir = %config.work_dir,
        "Catalog server starting..."
    );

    // 2. Database and category tree
    let state = match ServerState::initialize(&config).await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "Failed to open database");
            return Err(e.into());
        }
    };

    // 3. Serve until Ctrl+C
    if let Err(e) = Server::with_state(config, state).run().await {
        tracing::error!(error = %e, "Server error");
        return Err(e);
    }

    Ok(())
}
