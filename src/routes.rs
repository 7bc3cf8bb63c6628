use std::sync::Arc;

use anyhow::Context;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::{
    AppState,
    error::AppResult,
    models::{Created, Genre, Movie, MovieDetail, MovieUpdate, NewMovie},
};

pub async fn list_movies(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Movie>>> {
    let movies = state.catalog.list_movies().await?;
    debug!(count = movies.len(), "listed movies");
    Ok(Json(movies))
}

/// Genre rows first, then the movie row. Whichever step fails, the request
/// gets exactly one response.
pub async fn movie_detail(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    let result = async {
        let movie_id: i32 = id.trim().parse().with_context(|| format!("movie id {id:?}"))?;
        debug!(movie_id, "fetching movie detail");

        let movie_genres = state.catalog.movie_genres(movie_id).await?;
        debug!(movie_id, genres = movie_genres.len(), "fetched movie genres");

        let movie_details = state.catalog.find_movie(movie_id).await?;
        debug!(movie_id, found = movie_details.is_some(), "fetched movie row");

        Ok::<_, crate::error::AppError>(MovieDetail { movie_details, movie_genres })
    }
    .await;

    match result {
        Ok(detail) => Json(detail).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewMovie>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Created>)> {
    let Json(req) = payload?;
    let movie_id = state.catalog.insert_movie(&req).await?;
    debug!(movie_id, title = %req.title, "inserted movie");

    // Not transactional: a failed link leaves the movie row in place.
    state.catalog.link_genre(movie_id, req.genre_id).await?;
    debug!(movie_id, genre_id = req.genre_id, "linked genre");

    Ok((StatusCode::CREATED, Json(Created { id: movie_id })))
}

pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MovieUpdate>, JsonRejection>,
) -> AppResult<StatusCode> {
    let Json(req) = payload?;
    let rows = state.catalog.update_movie(&req).await?;
    debug!(movie_id = req.id, rows, "updated movie");
    Ok(StatusCode::OK)
}

pub async fn list_genres(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Genre>>> {
    Ok(Json(state.catalog.list_genres().await?))
}
