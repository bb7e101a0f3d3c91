// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Credential sign-in, bearer token issuing, and route-level authorization.
//!
//! ## Auth Flow
//!
//! 1. Client posts `{ email, password }` to `/v1/signin`
//! 2. Server:
//!    - Looks the email up in the identity store
//!    - Compares the password with the stored bcrypt hash
//!    - Issues an HS256 JWT (`sub` = user id, `iss`/`aud` = configured
//!      domain, valid for 24 hours)
//! 3. Client sends `Authorization: Bearer <token>` on admin routes
//! 4. The gate verifies the token and exposes the user id to the handler
//!
//! ## Security
//!
//! - Unknown email and wrong password are indistinguishable
//! - Response bodies never say which verification step failed; logs do
//! - The signing secret is redacted from `Debug` output
//! - No clock skew tolerance

pub mod claims;
pub mod error;
pub mod extractor;
pub mod identity;
pub mod middleware;
pub mod password;
pub mod settings;
pub mod signer;
pub mod verifier;

pub use claims::{AuthenticatedUser, TokenClaims};
pub use error::AuthError;
pub use extractor::Auth;
pub use identity::{Credential, IdentityStore, InMemoryIdentityStore, StoredIdentity};
pub use middleware::require_auth;
pub use password::CredentialVerifier;
pub use settings::{AuthSettings, SigningSecret};
pub use signer::TokenSigner;
pub use verifier::TokenVerifier;
