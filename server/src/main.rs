use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use task_server::store::TaskStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "task_server=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db_path = std::env::var("TASKS_DB").unwrap_or_else(|_| "tasks.db".to_string());
    let store = TaskStore::open(&db_path)?;
    if std::env::var("SEED_TASKS").is_ok_and(|v| v == "1") {
        store.seed().await?;
        tracing::info!("seeded sample tasks");
    }

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("listening on {addr}");
    task_server::run(listener, store).await?;
    Ok(())
}
