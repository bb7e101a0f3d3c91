// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::header::{AUTHORIZATION, CONTENT_TYPE},
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{require_auth, AuthenticatedUser, Credential},
    error::ErrorBody,
    models::{
        EditMovieRequest, Genre, GenresResponse, Movie, MovieResponse, MoviesResponse, OkResponse,
        SignInResponse,
    },
    state::AppState,
};

pub mod admin;
pub mod movies;
pub mod signin;
pub mod status;

pub fn router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/admin/editmovie", post(admin::edit_movie))
        .route("/admin/deletemovie/{id}", get(admin::delete_movie))
        .route_layer(middleware::from_fn_with_state(
            state.verifier.clone(),
            require_auth,
        ));

    let v1_routes = Router::new()
        .route("/signin", post(signin::sign_in))
        .route("/movie/{id}", get(movies::get_movie))
        .route("/movies", get(movies::list_movies))
        .route("/movies/{genre_id}", get(movies::list_movies_by_genre))
        .route("/genres", get(movies::list_genres))
        .merge(admin_routes)
        .with_state(state.clone());

    Router::new()
        .route("/status", get(status::status))
        .with_state(state)
        .nest("/v1", v1_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(cors_layer()),
        )
}

/// Any origin may call the API with JSON bodies and bearer tokens.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
}

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        status::status,
        signin::sign_in,
        movies::get_movie,
        movies::list_movies,
        movies::list_movies_by_genre,
        movies::list_genres,
        admin::edit_movie,
        admin::delete_movie
    ),
    components(
        schemas(
            Movie,
            Genre,
            EditMovieRequest,
            MovieResponse,
            MoviesResponse,
            GenresResponse,
            OkResponse,
            SignInResponse,
            Credential,
            AuthenticatedUser,
            ErrorBody,
            status::StatusResponse
        )
    ),
    modifiers(&BearerSecurity),
    tags(
        (name = "Status", description = "Service status"),
        (name = "Auth", description = "Sign-in and token issuing"),
        (name = "Movies", description = "Movie catalog"),
        (name = "Genres", description = "Genre list"),
        (name = "Admin", description = "Catalog mutation (bearer token required)")
    )
)]
struct ApiDoc;
