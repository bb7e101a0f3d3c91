// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Credential verification against stored bcrypt hashes.

use std::sync::Arc;

use super::error::AuthError;
use super::identity::{Credential, IdentityStore, StoredIdentity};

/// Cost-12 bcrypt hash of a random string, compared against when the email is
/// unknown so both failure paths do the same amount of work.
const DUMMY_HASH: &str = "$2b$12$S829YZFlrA2Zkx3oaGX8keFgnMpsjUjWqXIzVF8q.lQ78rqEDOKEG";

/// Checks submitted credentials against an [`IdentityStore`].
#[derive(Clone)]
pub struct CredentialVerifier {
    identities: Arc<dyn IdentityStore>,
}

impl CredentialVerifier {
    pub fn new(identities: Arc<dyn IdentityStore>) -> Self {
        Self { identities }
    }

    /// Verify a credential.
    ///
    /// Returns [`AuthError::Unauthorized`] for an unknown email, a wrong
    /// password, and a hash that cannot be compared. This call is CPU-bound;
    /// async callers should use [`CredentialVerifier::verify_blocking`].
    pub fn verify(&self, credential: &Credential) -> Result<StoredIdentity, AuthError> {
        let Some(identity) = self.identities.find_by_email(&credential.email) else {
            let _ = bcrypt::verify(&credential.password, DUMMY_HASH);
            tracing::info!("sign-in rejected: unknown email");
            return Err(AuthError::Unauthorized);
        };

        match bcrypt::verify(&credential.password, &identity.password_hash) {
            Ok(true) => Ok(identity),
            Ok(false) => {
                tracing::info!(user_id = identity.id, "sign-in rejected: password mismatch");
                Err(AuthError::Unauthorized)
            }
            Err(e) => {
                tracing::warn!(user_id = identity.id, error = %e, "sign-in rejected: hash comparison failed");
                Err(AuthError::Unauthorized)
            }
        }
    }

    /// Run [`CredentialVerifier::verify`] on the blocking thread pool.
    pub async fn verify_blocking(&self, credential: Credential) -> Result<StoredIdentity, AuthError> {
        let verifier = self.clone();
        tokio::task::spawn_blocking(move || verifier.verify(&credential))
            .await
            .unwrap_or_else(|e| {
                tracing::error!(error = %e, "credential verification task failed");
                Err(AuthError::Unauthorized)
            })
    }
}
