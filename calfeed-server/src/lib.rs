//! HTTP surface for calfeed.
//!
//! Authenticates callers, fetches the requested ICS feed and hands the text to
//! `calfeed-core`. Everything that touches the network or the environment lives
//! here so the core engine stays pure.

pub mod auth;
pub mod config;
pub mod feed;
pub mod routes;
pub mod state;

use axum::Router;
use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .merge(routes::health::router())
        .merge(routes::agenda::router())
        .with_state(state)
        .layer(cors)
}
