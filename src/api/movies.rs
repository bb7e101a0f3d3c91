// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Public catalog endpoints.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};

use crate::{
    error::{ApiError, ErrorBody},
    models::{GenresResponse, MovieResponse, MoviesResponse},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/v1/movie/{id}",
    params(
        ("id" = i64, Path, description = "Movie id")
    ),
    tag = "Movies",
    responses(
        (status = 200, body = MovieResponse),
        (status = 400, description = "Id is not an integer", body = ErrorBody),
        (status = 404, description = "Movie not found", body = ErrorBody)
    )
)]
pub async fn get_movie(
    id: Result<Path<i64>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Json<MovieResponse>, ApiError> {
    let Path(id) = id?;
    let store = state.store.read().await;
    let movie = store.get_movie(id)?;
    Ok(Json(MovieResponse { movie }))
}

/// List every movie, ordered by title.
#[utoipa::path(
    get,
    path = "/v1/movies",
    tag = "Movies",
    responses((status = 200, body = MoviesResponse))
)]
pub async fn list_movies(State(state): State<AppState>) -> Json<MoviesResponse> {
    let store = state.store.read().await;
    Json(MoviesResponse {
        movies: store.list_movies(None),
    })
}

/// List movies tagged with a genre, ordered by title.
#[utoipa::path(
    get,
    path = "/v1/movies/{genre_id}",
    params(
        ("genre_id" = i64, Path, description = "Genre id")
    ),
    tag = "Movies",
    responses(
        (status = 200, body = MoviesResponse),
        (status = 400, description = "Genre id is not an integer", body = ErrorBody)
    )
)]
pub async fn list_movies_by_genre(
    genre_id: Result<Path<i64>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Json<MoviesResponse>, ApiError> {
    let Path(genre_id) = genre_id?;
    let store = state.store.read().await;
    Ok(Json(MoviesResponse {
        movies: store.list_movies(Some(genre_id)),
    }))
}

#[utoipa::path(
    get,
    path = "/v1/genres",
    tag = "Genres",
    responses((status = 200, body = GenresResponse))
)]
pub async fn list_genres(State(state): State<AppState>) -> Json<GenresResponse> {
    let store = state.store.read().await;
    Json(GenresResponse {
        genres: store.list_genres(),
    })
}
