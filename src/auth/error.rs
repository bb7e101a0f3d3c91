// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::error::ApiError;

/// Per-request authentication failure.
///
/// The `Display` text names the exact reason and is meant for logs only.
/// Responses carry [`AuthError::public_message`], which depends solely on
/// the status code so clients cannot tell which check failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Request body could not be decoded
    #[error("request body could not be decoded: {0}")]
    DecodeError(String),
    /// Credential mismatch (unknown email and wrong password alike)
    #[error("invalid credentials")]
    Unauthorized,
    /// Authorization header missing or not exactly two tokens
    #[error("authorization header is missing or malformed")]
    MalformedHeader,
    /// Scheme other than `Bearer`
    #[error("unsupported authorization scheme")]
    UnsupportedScheme,
    /// Token structure or MAC invalid
    #[error("token signature check failed")]
    BadSignature,
    /// Outside the `[nbf, exp)` window
    #[error("token is expired or not yet valid")]
    Expired,
    /// Configured domain not in `aud`
    #[error("token audience is invalid")]
    InvalidAudience,
    /// `iss` differs from configured domain
    #[error("token issuer is invalid")]
    InvalidIssuer,
    /// `sub` is not a base-10 integer
    #[error("token subject is not a user id")]
    InvalidSubject,
    /// Token encoding failed
    #[error("token signing failed: {0}")]
    Signing(String),
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::DecodeError(_) => "decode_error",
            AuthError::Unauthorized => "unauthorized",
            AuthError::MalformedHeader => "malformed_header",
            AuthError::UnsupportedScheme => "unsupported_scheme",
            AuthError::BadSignature => "bad_signature",
            AuthError::Expired => "expired",
            AuthError::InvalidAudience => "invalid_audience",
            AuthError::InvalidIssuer => "invalid_issuer",
            AuthError::InvalidSubject => "invalid_subject",
            AuthError::Signing(_) => "signing_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::DecodeError(_) | AuthError::MalformedHeader | AuthError::UnsupportedScheme => {
                StatusCode::BAD_REQUEST
            }
            AuthError::Unauthorized
            | AuthError::BadSignature
            | AuthError::Expired
            | AuthError::InvalidAudience
            | AuthError::InvalidIssuer
            | AuthError::InvalidSubject => StatusCode::FORBIDDEN,
            AuthError::Signing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to clients.
    pub fn public_message(&self) -> &'static str {
        match self.status_code() {
            StatusCode::BAD_REQUEST => "bad request",
            StatusCode::FORBIDDEN => "unauthorized",
            _ => "internal server error",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let error = match self {
            // Server-side fault, not a client rejection.
            AuthError::Signing(_) => ApiError::internal(),
            _ => ApiError::new(self.status_code(), self.public_message()),
        };
        error.into_response()
    }
}
