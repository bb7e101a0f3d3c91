// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Admin endpoints for catalog mutation.
//!
//! These routes sit behind the authorization gate; see [`super::router`].

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};

use crate::{
    auth::Auth,
    error::{ApiError, ErrorBody},
    models::{EditMovieRequest, MovieResponse, OkResponse},
    state::AppState,
};

/// Create a movie (`id` 0) or update an existing one.
#[utoipa::path(
    post,
    path = "/v1/admin/editmovie",
    request_body = EditMovieRequest,
    tag = "Admin",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Saved movie", body = MovieResponse),
        (status = 400, description = "Invalid payload or authorization header", body = ErrorBody),
        (status = 403, description = "Missing or invalid token", body = ErrorBody),
        (status = 404, description = "Movie not found", body = ErrorBody),
    )
)]
pub async fn edit_movie(
    Auth(user): Auth,
    State(state): State<AppState>,
    payload: Result<Json<EditMovieRequest>, JsonRejection>,
) -> Result<Json<MovieResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    let mut store = state.store.write().await;
    let movie = store.upsert_movie(request)?;
    tracing::info!(user_id = user.user_id, movie_id = movie.id, "movie saved");
    Ok(Json(MovieResponse { movie }))
}

#[utoipa::path(
    get,
    path = "/v1/admin/deletemovie/{id}",
    params(
        ("id" = i64, Path, description = "Identifier of the movie to delete")
    ),
    tag = "Admin",
    security(("bearer" = [])),
    responses(
        (status = 200, body = OkResponse),
        (status = 400, description = "Malformed authorization header or id", body = ErrorBody),
        (status = 403, description = "Missing or invalid token", body = ErrorBody),
        (status = 404, description = "Movie not found", body = ErrorBody),
    )
)]
pub async fn delete_movie(
    Auth(user): Auth,
    id: Result<Path<i64>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Json<OkResponse>, ApiError> {
    let Path(id) = id?;
    let mut store = state.store.write().await;
    store.delete_movie(id)?;
    tracing::info!(user_id = user.user_id, movie_id = id, "movie deleted");
    Ok(Json(OkResponse { ok: true }))
}
