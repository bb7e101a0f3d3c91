// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authorization gate for protected routes.
//!
//! Apply with `route_layer` so only matched routes are gated:
//!
//! ```rust,ignore
//! let admin = Router::new()
//!     .route("/v1/admin/editmovie", post(admin::edit_movie))
//!     .route_layer(axum::middleware::from_fn_with_state(
//!         state.verifier.clone(),
//!         require_auth,
//!     ));
//! ```

use axum::{
    extract::{Request, State},
    http::{
        header::{AUTHORIZATION, VARY},
        HeaderValue,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::{AuthError, AuthenticatedUser, TokenVerifier};

/// Authentication middleware function.
///
/// Admitted requests get an [`AuthenticatedUser`] extension and are passed
/// on. Rejected requests never reach the inner handler. Every response
/// carries `Vary: Authorization`.
pub async fn require_auth(
    State(verifier): State<TokenVerifier>,
    mut request: Request,
    next: Next,
) -> Response {
    let mut response = match authorize(&verifier, &request) {
        Ok(user) => {
            tracing::debug!(user_id = user.user_id, "request authenticated");
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => {
            tracing::warn!(
                reason = %e,
                code = e.error_code(),
                method = %request.method(),
                path = %request.uri().path(),
                "request rejected"
            );
            e.into_response()
        }
    };

    response
        .headers_mut()
        .append(VARY, HeaderValue::from_static("Authorization"));
    response
}

/// Run the verifier against the request's `Authorization` header.
pub(crate) fn authorize(
    verifier: &TokenVerifier,
    request: &Request,
) -> Result<AuthenticatedUser, AuthError> {
    let header = match request.headers().get(AUTHORIZATION) {
        Some(value) => value.to_str().map_err(|_| AuthError::MalformedHeader)?,
        None => "",
    };
    let user_id = verifier.verify(header)?;
    Ok(AuthenticatedUser { user_id })
}
