// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory movie catalog.
//!
//! Movies and genres are keyed by id. Listings are sorted by title (movies)
//! or name (genres) on the way out.

use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, Utc};
use thiserror::Error;

use crate::error::ApiError;
use crate::models::{EditMovieRequest, Genre, Movie};

/// Highest accepted rating.
pub const MAX_RATING: i32 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("movie {0} not found")]
    MovieNotFound(i64),
    #[error("genre {0} does not exist")]
    UnknownGenre(i64),
    #[error("{0}")]
    Invalid(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MovieNotFound(_) => ApiError::not_found(err.to_string()),
            StoreError::UnknownGenre(_) | StoreError::Invalid(_) => {
                ApiError::bad_request(err.to_string())
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct MovieStore {
    movies: HashMap<i64, Movie>,
    /// Genre ids tagged on each movie.
    movie_genres: HashMap<i64, Vec<i64>>,
    genres: BTreeMap<i64, Genre>,
    next_movie_id: i64,
}

impl MovieStore {
    pub fn new() -> Self {
        Self {
            next_movie_id: 1,
            ..Self::default()
        }
    }

    /// Store preloaded with a small catalog.
    pub fn seeded() -> Self {
        let mut store = Self::new();
        for name in [
            "Drama",
            "Crime",
            "Action",
            "Comic Book",
            "Sci-Fi",
            "Mystery",
            "Horror",
            "Romance",
            "Comedy",
        ] {
            store.insert_genre(name);
        }

        let seed = [
            (
                "The Shawshank Redemption",
                "Two imprisoned men bond over a number of years",
                1994,
                (1994, 10, 14),
                142,
                5,
                "R",
                vec![1],
            ),
            (
                "The Godfather",
                "The aging patriarch of an organized crime dynasty transfers control to his son",
                1972,
                (1972, 3, 24),
                175,
                5,
                "R",
                vec![1, 2],
            ),
            (
                "The Dark Knight",
                "The menace known as the Joker wreaks havoc on Gotham City",
                2008,
                (2008, 7, 18),
                152,
                5,
                "PG-13",
                vec![2, 3, 4],
            ),
            (
                "American Psycho",
                "A wealthy New York investment banking executive hides his alternate psychopathic ego",
                2000,
                (2000, 4, 14),
                102,
                4,
                "R",
                vec![2, 7, 9],
            ),
        ];

        for (title, description, year, (y, m, d), runtime, rating, mpaa, genre_ids) in seed {
            let request = EditMovieRequest {
                id: 0,
                title: title.to_string(),
                description: description.to_string(),
                year,
                release_date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
                runtime,
                rating,
                mpaa_rating: mpaa.to_string(),
                genre_ids,
            };
            if let Err(e) = store.upsert_movie(request) {
                tracing::warn!(error = %e, title, "skipping invalid seed movie");
            }
        }

        store
    }

    pub fn insert_genre(&mut self, name: impl Into<String>) -> Genre {
        let id = self.genres.keys().next_back().copied().unwrap_or(0) + 1;
        let now = Utc::now();
        let genre = Genre {
            id,
            genre_name: name.into(),
            created_at: now,
            updated_at: now,
        };
        self.genres.insert(id, genre.clone());
        genre
    }

    pub fn get_movie(&self, id: i64) -> Result<Movie, StoreError> {
        self.movies
            .get(&id)
            .map(|movie| self.with_genres(movie))
            .ok_or(StoreError::MovieNotFound(id))
    }

    /// All movies ordered by title, optionally only those tagged with `genre_id`.
    pub fn list_movies(&self, genre_id: Option<i64>) -> Vec<Movie> {
        let mut movies: Vec<Movie> = self
            .movies
            .values()
            .filter(|movie| match genre_id {
                Some(genre_id) => self
                    .movie_genres
                    .get(&movie.id)
                    .is_some_and(|ids| ids.contains(&genre_id)),
                None => true,
            })
            .map(|movie| self.with_genres(movie))
            .collect();
        movies.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
        movies
    }

    /// All genres ordered by name.
    pub fn list_genres(&self) -> Vec<Genre> {
        let mut genres: Vec<Genre> = self.genres.values().cloned().collect();
        genres.sort_by(|a, b| a.genre_name.cmp(&b.genre_name));
        genres
    }

    /// Create a movie when `request.id == 0`, otherwise replace an existing one.
    pub fn upsert_movie(&mut self, request: EditMovieRequest) -> Result<Movie, StoreError> {
        validate_movie(&request)?;
        if let Some(unknown) = request
            .genre_ids
            .iter()
            .find(|id| !self.genres.contains_key(*id))
        {
            return Err(StoreError::UnknownGenre(*unknown));
        }

        let now = Utc::now();
        let (id, created_at) = if request.id == 0 {
            let id = self.next_movie_id;
            self.next_movie_id += 1;
            (id, now)
        } else {
            let existing = self
                .movies
                .get(&request.id)
                .ok_or(StoreError::MovieNotFound(request.id))?;
            (existing.id, existing.created_at)
        };

        let mut genre_ids = request.genre_ids;
        genre_ids.sort_unstable();
        genre_ids.dedup();

        let movie = Movie {
            id,
            title: request.title.trim().to_string(),
            description: request.description,
            year: request.year,
            release_date: request.release_date,
            runtime: request.runtime,
            rating: request.rating,
            mpaa_rating: request.mpaa_rating,
            genres: BTreeMap::new(),
            created_at,
            updated_at: now,
        };
        self.movies.insert(id, movie);
        self.movie_genres.insert(id, genre_ids);
        self.get_movie(id)
    }

    pub fn delete_movie(&mut self, id: i64) -> Result<(), StoreError> {
        if self.movies.remove(&id).is_some() {
            self.movie_genres.remove(&id);
            Ok(())
        } else {
            Err(StoreError::MovieNotFound(id))
        }
    }

    fn with_genres(&self, movie: &Movie) -> Movie {
        let genres = self
            .movie_genres
            .get(&movie.id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.genres.get(id))
            .map(|genre| (genre.id, genre.genre_name.clone()))
            .collect();
        Movie {
            genres,
            ..movie.clone()
        }
    }
}

fn validate_movie(request: &EditMovieRequest) -> Result<(), StoreError> {
    if request.title.trim().is_empty() {
        return Err(StoreError::Invalid("title is required".to_string()));
    }
    if request.year < 1888 {
        return Err(StoreError::Invalid("year is out of range".to_string()));
    }
    if request.runtime < 0 {
        return Err(StoreError::Invalid("runtime cannot be negative".to_string()));
    }
    if !(0..=MAX_RATING).contains(&request.rating) {
        return Err(StoreError::Invalid(format!(
            "rating must be between 0 and {MAX_RATING}"
        )));
    }
    Ok(())
}
