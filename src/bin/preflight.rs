//! Connectivity preflight: checks configuration and the MongoDB deployment
//! without starting the HTTP server.

use toy_house_api::infra::logging;
use toy_house_api::{AppConfig, MongoToyStore, ToyStore};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight\n\
         \n\
         Reads env vars (or .env):\n\
           MONGODB_URI, or DB_USER + DB_PASS [+ DB_CLUSTER_HOST, DB_APP_NAME]\n\
           DB_NAME, TOYS_COLLECTION, PORT (optional)\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    logging::init_tracing()?;

    let config = AppConfig::from_env()?;
    tracing::info!(
        port = config.port,
        database = %config.database,
        collection = %config.collection,
        "configuration ok"
    );

    let store =
        MongoToyStore::connect(&config.mongodb_uri, &config.database, &config.collection).await?;
    store.ping().await?;
    tracing::info!("ping ok");

    let toys = store.count().await?;
    tracing::info!(toys, "collection reachable");

    store.shutdown().await;
    tracing::info!("preflight passed");
    Ok(())
}
