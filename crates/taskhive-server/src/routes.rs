//! Route table and middleware stack.

use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::response::Envelope;
use crate::state::AppState;
use crate::{error::ApiError, handlers};

/// GET / — liveness probe.
async fn health() -> Json<Envelope<()>> {
    Json(Envelope::message_only("Server is running"))
}

/// Catch-all for unmatched routes.
async fn not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "Route not found")
}

/// Build the application router with all routes and middleware.
pub fn create_router(state: AppState, cors_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = cors_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true);

    Router::new()
        .route("/", get(health))
        // Auth
        .route("/api/users/register", post(handlers::users::register))
        .route("/api/users/login", post(handlers::users::login))
        .route("/api/users/refresh", post(handlers::users::refresh))
        .route("/api/users/logout", post(handlers::users::logout))
        // Todos
        .route(
            "/api/todos",
            post(handlers::todos::create_todo).get(handlers::todos::list_todos),
        )
        .route("/api/todos/analytics", get(handlers::todos::analytics))
        .route(
            "/api/todos/permanent/{id}",
            delete(handlers::todos::delete_todo_permanently),
        )
        .route(
            "/api/todos/{id}",
            get(handlers::todos::get_todo)
                .put(handlers::todos::update_todo)
                .delete(handlers::todos::archive_todo),
        )
        .fallback(not_found)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
