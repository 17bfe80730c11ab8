use mesa_server::{Config, Server, ServerState, print_banner};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment (dotenv before config, logging before everything else)
    dotenv::dotenv().ok();
    mesa_server::init_logger();

    print_banner();

    tracing::info!("Mesa server starting...");

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize state (database, JWT)
    let state = ServerState::initialize(&config).await?;

    // 4. Run the HTTP server
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
