use todolist::application::todo_item_service::TodoItemServiceImpl;
use todolist::domain::repository::TodoItemStore;
use todolist::http::routing::{self, todo_items};
use todolist::infrastructure::config::{prepare_sqlite_file, AppConfig};
use todolist::infrastructure::sqlite_store::SqliteTodoItemStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    prepare_sqlite_file(&config.database_url)?;
    let store = SqliteTodoItemStore::connect(&config.database_url).await?;
    store.init().await?;
    let service = TodoItemServiceImpl::new(store);
    let router = routing::app(todo_items::router(todo_items::AppState { service }));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, database_url = %config.database_url, "listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal::ctrl_c;
    let _ = ctrl_c().await;
    tracing::info!("shutdown");
}
