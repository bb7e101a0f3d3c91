// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Sign-in endpoint.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::{
    auth::{AuthError, Credential},
    error::ErrorBody,
    models::SignInResponse,
    state::AppState,
};

/// Exchange an email and password for a bearer token.
///
/// The token is valid for 24 hours. Unknown emails and wrong passwords
/// produce the same response.
#[utoipa::path(
    post,
    path = "/v1/signin",
    request_body = Credential,
    tag = "Auth",
    responses(
        (status = 200, description = "Signed token", body = SignInResponse),
        (status = 400, description = "Malformed request body", body = ErrorBody),
        (status = 403, description = "Invalid credentials", body = ErrorBody),
    )
)]
pub async fn sign_in(
    State(state): State<AppState>,
    payload: Result<Json<Credential>, JsonRejection>,
) -> Result<Json<SignInResponse>, AuthError> {
    let Json(credential) = payload.map_err(|rejection| {
        let err = AuthError::DecodeError(rejection.body_text());
        tracing::info!(reason = %err, "sign-in rejected");
        err
    })?;

    let identity = state.credentials.verify_blocking(credential).await?;
    let token = state.signer.issue(&identity).inspect_err(|e| {
        tracing::error!(user_id = identity.id, error = %e, "failed to sign token");
    })?;

    tracing::info!(user_id = identity.id, "user signed in");
    Ok(Json(SignInResponse { response: token }))
}
