// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Movies API - Movie & Genre Catalog Service
//!
//! A REST backend serving a movie catalog. Reads are public; catalog
//! mutation requires a bearer token obtained from `/v1/signin`.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Credential sign-in, token issuing and verification
//! - `store` - In-memory movie catalog
//! - `config` - Environment configuration

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod store;
pub mod telemetry;
