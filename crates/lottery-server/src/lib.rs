pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(app_state: state::AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Action dispatch
        .route(
            "/api",
            get(routes::actions::get_action).post(routes::actions::post_action),
        )
        // Participants
        .route(
            "/api/participants",
            get(routes::participants::list_participants)
                .post(routes::participants::add_participant),
        )
        // Pairings
        .route("/api/pairings", get(routes::pairings::get_pairings))
        // Status
        .route("/api/status", get(routes::status::get_status))
        // Lottery
        .route("/api/lottery", post(routes::lottery::run_lottery))
        .route("/api/clear", post(routes::lottery::clear_all))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Start the lottery API server.
pub async fn serve(root: PathBuf, port: u16) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    serve_on(root, listener).await
}

/// Start the lottery API server on a pre-bound listener.
///
/// Unlike `serve`, this accepts a `TcpListener` that was already bound so the
/// caller can read the actual port before starting (useful when `port = 0` and
/// the OS picks a free port).
pub async fn serve_on(root: PathBuf, listener: tokio::net::TcpListener) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let app_state = state::AppState::open(&root)?;
    let app = build_router(app_state);

    tracing::info!("lunch lottery API listening on http://localhost:{actual_port}");

    axum::serve(listener, app).await?;
    Ok(())
}
