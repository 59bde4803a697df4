use std::path::PathBuf;

use carpool_data_management::DataManager;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// CLI for manual data operations: creates and seeds the database, then reports what it holds.
#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=trace", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let path = std::env::args().nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(DataManager::default_database_path);

    let data_manager = match DataManager::start(&path).await {
        Ok(data_manager) => data_manager,
        Err(err) => {
            tracing::error!("Failed to open {}: {err}", path.display());
            std::process::exit(1);
        }
    };

    match (data_manager.get_states().await, data_manager.count_users().await) {
        (Ok(states), Ok(users)) => tracing::info!("{} holds {} states and {} users", path.display(), states.len(), users),
        (Err(err), _) | (_, Err(err)) => tracing::error!("Failed to inspect database: {err}"),
    }
}
