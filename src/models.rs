// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response data structures used by the REST API. Catalog
//! responses are wrapped in a single named field (`{"movie": ...}`,
//! `{"movies": [...]}`) so clients can tell payload kinds apart.
//!
//! ## Model Categories
//!
//! - **Movies**: catalog entries with their genre tags
//! - **Genres**: the fixed genre list
//! - **Envelopes**: wrappers for sign-in, status and mutation results

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// Movie Models
// =============================================================================

/// A movie in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Release year.
    pub year: i32,
    pub release_date: NaiveDate,
    /// Runtime in minutes.
    pub runtime: i32,
    /// Rating from 0 to 5.
    pub rating: i32,
    /// MPAA rating, e.g. `PG-13`. Empty when unrated.
    pub mpaa_rating: String,
    /// Genre names keyed by genre id.
    #[schema(value_type = Object)]
    pub genres: BTreeMap<i64, String>,
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    pub updated_at: DateTime<Utc>,
}

/// Request to create or update a movie.
///
/// An `id` of `0` (or none) creates a new movie; any other id updates it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EditMovieRequest {
    #[serde(default)]
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub year: i32,
    pub release_date: NaiveDate,
    pub runtime: i32,
    pub rating: i32,
    #[serde(default)]
    pub mpaa_rating: String,
    /// Ids of the genres to tag the movie with.
    #[serde(default)]
    pub genre_ids: Vec<i64>,
}

// =============================================================================
// Genre Models
// =============================================================================

/// A movie genre.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Genre {
    pub id: i64,
    pub genre_name: String,
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Response Envelopes
// =============================================================================

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MovieResponse {
    pub movie: Movie,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MoviesResponse {
    pub movies: Vec<Movie>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GenresResponse {
    pub genres: Vec<Genre>,
}

/// Result of a mutation that returns no payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OkResponse {
    pub ok: bool,
}

/// Successful sign-in.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SignInResponse {
    /// Bearer token to send as `Authorization: Bearer <token>`.
    pub response: String,
}
