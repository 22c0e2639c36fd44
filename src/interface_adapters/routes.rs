use crate::interface_adapters::handlers::{
    create_session, get_session, health, list_sessions, not_found, record_client_log,
    session_not_found,
};
use crate::interface_adapters::state::AppState;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{MethodRouter, get, get_service, post},
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir};

// Build the HTTP router for the session API and the client asset fallback.
// The AR client may be served from another origin during development, so every
// response carries permissive CORS headers and preflights are answered here.
pub fn app(state: Arc<AppState>) -> Router {
    // Unknown GET/HEAD paths are served from the asset directory; any other
    // method on an unknown path gets the JSON not_found envelope.
    let assets: MethodRouter =
        get_service(ServeDir::new(&state.static_dir)).fallback(not_found);

    Router::new()
        .route("/api/health", get(health).fallback(not_found))
        .route(
            "/api/sessions",
            get(list_sessions).post(create_session).fallback(not_found),
        )
        .route("/api/sessions/", get(session_not_found).fallback(not_found))
        .route(
            "/api/sessions/{*session_id}",
            get(get_session).fallback(not_found),
        )
        .route("/api/log", post(record_client_log).fallback(not_found))
        .fallback_service(assets)
        .layer(DefaultBodyLimit::max(state.max_body_bytes))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}
