use gateway_server::{AppState, Config, Server, init_logger_with_file, print_banner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env();

    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());
    let log_dir = format!("{}/logs", config.work_dir);
    init_logger_with_file(&level, config.is_production(), Some(&log_dir))?;

    print_banner();
    tracing::info!("Vehicle gateway starting...");

    let state = AppState::initialize(&config).await?;
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}
