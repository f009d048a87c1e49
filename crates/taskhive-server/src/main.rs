//! TaskHive Server — application entry point.

use std::sync::Arc;

use taskhive_auth::AuthService;
use taskhive_db::repository::{SurrealTodoRepository, SurrealUserRepository};
use taskhive_db::{DbManager, run_migrations};
use taskhive_server::config::ServerConfig;
use taskhive_server::routes::create_router;
use taskhive_server::state::AppState;
use taskhive_todo::TodoService;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("taskhive=info".parse().unwrap()),
        )
        .json()
        .init();

    tracing::info!("Starting TaskHive server...");

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "configuration error");
            std::process::exit(1);
        }
    };

    let db = match DbManager::connect(&config.db).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!(error = %e, "failed to connect to SurrealDB");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_migrations(db.client()).await {
        tracing::error!(error = %e, "failed to run migrations");
        std::process::exit(1);
    }

    let user_repo = match &config.auth.pepper {
        Some(pepper) => SurrealUserRepository::with_pepper(db.client().clone(), pepper.clone()),
        None => SurrealUserRepository::new(db.client().clone()),
    };
    let todo_repo = SurrealTodoRepository::new(db.client().clone());

    let state = AppState {
        auth: Arc::new(AuthService::new(user_repo, config.auth.clone())),
        todos: Arc::new(TodoService::new(todo_repo)),
        auth_config: config.auth.clone(),
        cookie_secure: config.cookie_secure,
    };

    let app = create_router(state, &config.cors_origins);

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = match TcpListener::bind(&bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, address = %bind_address, "failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!("TaskHive server listening on http://{bind_address}");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "server error");
    }

    tracing::info!("TaskHive server stopped.");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");
    tracing::info!("Shutdown signal received");
}
