// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for authenticated users.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user.user_id is the token subject
//! }
//! ```

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use super::{AuthError, AuthenticatedUser, TokenVerifier};

/// Extractor for authenticated users.
///
/// Behind [`super::middleware::require_auth`] this reuses the gate's result.
/// On an ungated route it runs the token verifier itself.
pub struct Auth(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for Auth
where
    TokenVerifier: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // First check if middleware already set the user
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>().copied() {
            return Ok(Auth(user));
        }

        let header = match parts.headers.get(AUTHORIZATION) {
            Some(value) => value.to_str().map_err(|_| AuthError::MalformedHeader)?,
            None => "",
        };

        let verifier = TokenVerifier::from_ref(state);
        let user_id = verifier.verify(header).inspect_err(|e| {
            tracing::warn!(reason = %e, code = e.error_code(), "request rejected");
        })?;

        let user = AuthenticatedUser { user_id };
        parts.extensions.insert(user);
        Ok(Auth(user))
    }
}
