// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

/// Service status.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    /// Always `"Available"` while the process serves requests.
    pub status: String,
    /// Deployment environment (`development` or `production`).
    pub environment: String,
    /// Crate version.
    pub version: String,
}

/// Status endpoint handler.
///
/// Always returns 200 if the process is running.
#[utoipa::path(
    get,
    path = "/status",
    tag = "Status",
    responses(
        (status = 200, description = "Service is available", body = StatusResponse)
    )
)]
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "Available".to_string(),
        environment: state.environment.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
