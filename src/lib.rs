pub mod catalog;
pub mod client;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::catalog::Catalog;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/movie",
            get(routes::list_movies).post(routes::create_movie).put(routes::update_movie),
        )
        .route("/api/movie/{id}", get(routes::movie_detail))
        .route("/api/genre", get(routes::list_genres))
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any).allow_methods(Any))
        .layer(TraceLayer::new_for_http())
}
