// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT claims and authenticated user representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use utoipa::ToSchema;

use super::identity::StoredIdentity;

/// How long an issued token stays valid, in seconds.
pub const TOKEN_LIFETIME_SECS: i64 = 24 * 60 * 60;

/// Token audience: a single string or a list of strings on the wire.
///
/// Any other JSON shape is kept as `Other` and matches no domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    One(String),
    Many(Vec<String>),
    Other(Value),
}

impl Audience {
    pub fn contains(&self, domain: &str) -> bool {
        match self {
            Audience::One(aud) => aud == domain,
            Audience::Many(auds) => auds.iter().any(|aud| aud == domain),
            Audience::Other(_) => false,
        }
    }
}

impl Default for Audience {
    fn default() -> Self {
        Audience::Many(Vec::new())
    }
}

/// JSON NumericDate: Unix seconds, possibly fractional.
///
/// Whole values serialize as integers. A non-numeric value decodes to NaN,
/// which fails every comparison against the clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct NumericDate(f64);

impl NumericDate {
    pub fn from_secs(secs: i64) -> Self {
        Self(secs as f64)
    }

    pub fn as_secs_f64(self) -> f64 {
        self.0
    }
}

impl Serialize for NumericDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.is_finite() && self.0.fract() == 0.0 {
            serializer.serialize_i64(self.0 as i64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

impl<'de> Deserialize<'de> for NumericDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self(value.as_f64().unwrap_or(f64::NAN)))
    }
}

/// Claims carried by tokens issued at sign-in.
///
/// Decoding never fails on claim shape: missing fields take empty/zero
/// values and `sub`/`iss` stay raw JSON, so a correctly signed token with
/// an odd claim is rejected by the check that owns that claim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenClaims {
    /// Subject: the user id as a decimal string
    pub sub: Value,
    /// Issuer
    pub iss: Value,
    /// Audience
    pub aud: Audience,
    /// Issued at
    pub iat: NumericDate,
    /// Not before
    pub nbf: NumericDate,
    /// Expiration
    pub exp: NumericDate,
}

impl TokenClaims {
    /// Build fresh claims for `identity` at `now`.
    pub fn for_identity(identity: &StoredIdentity, domain: &str, now: DateTime<Utc>) -> Self {
        let issued_at = now.timestamp();
        Self {
            sub: Value::String(identity.id.to_string()),
            iss: Value::String(domain.to_string()),
            aud: Audience::Many(vec![domain.to_string()]),
            iat: NumericDate::from_secs(issued_at),
            nbf: NumericDate::from_secs(issued_at),
            exp: NumericDate::from_secs(issued_at + TOKEN_LIFETIME_SECS),
        }
    }
}

/// Caller admitted by the token verifier.
///
/// Inserted into request extensions by the authorization gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Numeric user id taken from the token subject
    pub user_id: i64,
}
