// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HS256 token issuing.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};

use super::claims::TokenClaims;
use super::error::AuthError;
use super::identity::StoredIdentity;
use super::settings::AuthSettings;

/// Issues signed bearer tokens.
#[derive(Clone)]
pub struct TokenSigner {
    key: Arc<EncodingKey>,
    domain: Arc<str>,
}

impl TokenSigner {
    pub fn new(settings: &AuthSettings) -> Self {
        Self {
            key: Arc::new(EncodingKey::from_secret(settings.secret().as_bytes())),
            domain: Arc::from(settings.domain()),
        }
    }

    /// Issue a token for `identity` valid from now for 24 hours.
    pub fn issue(&self, identity: &StoredIdentity) -> Result<String, AuthError> {
        self.issue_at(identity, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(&self, identity: &StoredIdentity, now: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = TokenClaims::for_identity(identity, &self.domain, now);
        encode(&Header::default(), &claims, &self.key).map_err(|e| AuthError::Signing(e.to_string()))
    }
}
