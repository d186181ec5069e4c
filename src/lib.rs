//! HTTP service exposing create/read/update/delete over the `player` table.
//!
//! Each handler issues exactly one parameterized statement through the
//! shared [`PgPool`] held in [`AppState`].

use axum::{
    extract::FromRef,
    routing::get,
    Router,
};
use sqlx::postgres::PgPool;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;

use config::DeleteResponse;

/// Everything a handler may borrow. Built once by the entry point.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub pool: PgPool,
    pub delete_response: DeleteResponse,
}

impl AppState {
    pub fn new(pool: PgPool, delete_response: DeleteResponse) -> Self {
        AppState {
            pool,
            delete_response,
        }
    }
}

pub fn app(state: AppState) -> Router {
    // Any origin may call the API. Narrow this for production deployments.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health::health_check))

        // Player endpoints
        .route(
            "/players",
            get(routes::players::list_players).post(routes::players::create_player),
        )
        .route(
            "/players/{id}",
            get(routes::players::get_player)
                .put(routes::players::update_player)
                .delete(routes::players::delete_player),
        )

        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
