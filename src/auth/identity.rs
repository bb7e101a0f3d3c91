// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Identities that may sign in, and the lookup used to find them.

use std::fmt;

use serde::Deserialize;
use utoipa::ToSchema;

/// User id of the seeded account.
pub const SEED_USER_ID: i64 = 10;

/// Email of the seeded account.
pub const SEED_USER_EMAIL: &str = "me@here.com";

/// bcrypt hash of the seeded account's password.
pub const SEED_USER_PASSWORD_HASH: &str =
    "$2a$12$Sxit9n9u.FeuUtS16frpLuGPyHBWvtBsPpG2rmK4XMmB3MqHRN7eO";

/// Sign-in request body.
#[derive(Clone, Deserialize, ToSchema)]
pub struct Credential {
    /// Account email.
    pub email: String,
    /// Plaintext password. Never persisted or logged.
    pub password: String,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// An account known to the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredIdentity {
    pub id: i64,
    pub email: String,
    /// One-way bcrypt hash; never the plaintext.
    pub password_hash: String,
}

/// Lookup of identities by email.
pub trait IdentityStore: Send + Sync {
    fn find_by_email(&self, email: &str) -> Option<StoredIdentity>;
}

/// Fixed set of identities held in memory for the process lifetime.
#[derive(Debug, Default)]
pub struct InMemoryIdentityStore {
    identities: Vec<StoredIdentity>,
}

impl InMemoryIdentityStore {
    pub fn new(identities: Vec<StoredIdentity>) -> Self {
        Self { identities }
    }

    /// Store containing only the seeded account.
    pub fn seeded() -> Self {
        Self::new(vec![StoredIdentity {
            id: SEED_USER_ID,
            email: SEED_USER_EMAIL.to_string(),
            password_hash: SEED_USER_PASSWORD_HASH.to_string(),
        }])
    }
}

impl IdentityStore for InMemoryIdentityStore {
    fn find_by_email(&self, email: &str) -> Option<StoredIdentity> {
        let email = email.trim();
        self.identities
            .iter()
            .find(|identity| identity.email.eq_ignore_ascii_case(email))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_store_finds_seed_user() {
        let store = InMemoryIdentityStore::seeded();
        let identity = store.find_by_email(SEED_USER_EMAIL).unwrap();
        assert_eq!(identity.id, SEED_USER_ID);
        assert!(identity.password_hash.starts_with("$2a$12$"));
    }

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        let store = InMemoryIdentityStore::seeded();
        assert!(store.find_by_email("  ME@Here.com ").is_some());
    }

    #[test]
    fn unknown_email_is_none() {
        let store = InMemoryIdentityStore::seeded();
        assert!(store.find_by_email("someone@else.com").is_none());
    }

    #[test]
    fn credential_debug_hides_password() {
        let credential = Credential {
            email: "me@here.com".into(),
            password: "password".into(),
        };
        let rendered = format!("{credential:?}");
        assert!(rendered.contains("me@here.com"));
        assert!(!rendered.contains("\"password\""));
    }
}
