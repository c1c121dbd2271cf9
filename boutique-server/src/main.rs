use boutique_server::{Config, Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment setup (dotenv, logging)
    setup_environment();

    tracing::info!("Boutique storefront server starting...");

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize server state (database, blob store)
    let state = ServerState::initialize(&config).await?;

    // 4. Run the HTTP server until shutdown
    let server = Server::with_state(config, state);
    server.run().await
}
