// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Signing secret and issuer/audience domain shared by signer and verifier.

use std::fmt;
use std::sync::Arc;

use crate::config::ConfigError;

/// Symmetric HS256 signing key.
///
/// `Debug` is redacted so the secret cannot leak through logs or panics.
#[derive(Clone)]
pub struct SigningSecret(Arc<[u8]>);

impl SigningSecret {
    /// Wrap a secret. Blank values are a startup configuration error.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        Ok(Self(Arc::from(secret.into_bytes())))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(<redacted>)")
    }
}

/// Authentication settings, fixed for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    secret: SigningSecret,
    domain: Arc<str>,
}

impl AuthSettings {
    /// Create settings from a raw secret and the deployment domain.
    ///
    /// The domain is used as both the token issuer and its sole audience.
    pub fn new(secret: impl Into<String>, domain: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = SigningSecret::new(secret)?;
        let domain = domain.into();
        if domain.trim().is_empty() {
            return Err(ConfigError::EmptyDomain);
        }
        Ok(Self {
            secret,
            domain: Arc::from(domain.trim()),
        })
    }

    pub fn secret(&self) -> &SigningSecret {
        &self.secret
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }
}
