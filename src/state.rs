// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use axum::extract::FromRef;
use tokio::sync::RwLock;

use crate::auth::{
    AuthSettings, CredentialVerifier, IdentityStore, InMemoryIdentityStore, TokenSigner,
    TokenVerifier,
};
use crate::config::Environment;
use crate::store::MovieStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<MovieStore>>,
    pub credentials: CredentialVerifier,
    pub signer: TokenSigner,
    pub verifier: TokenVerifier,
    pub environment: Environment,
}

impl AppState {
    pub fn new(
        store: MovieStore,
        identities: Arc<dyn IdentityStore>,
        settings: &AuthSettings,
    ) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            credentials: CredentialVerifier::new(identities),
            signer: TokenSigner::new(settings),
            verifier: TokenVerifier::new(settings),
            environment: Environment::default(),
        }
    }

    /// Seeded catalog and the seeded sign-in account.
    pub fn seeded(settings: &AuthSettings) -> Self {
        Self::new(
            MovieStore::seeded(),
            Arc::new(InMemoryIdentityStore::seeded()),
            settings,
        )
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }
}

impl FromRef<AppState> for TokenVerifier {
    fn from_ref(state: &AppState) -> Self {
        state.verifier.clone()
    }
}
