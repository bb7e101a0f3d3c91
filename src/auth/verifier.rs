// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer token verification.
//!
//! A request is admitted only after every step below succeeds, in this
//! order; the first failure decides the rejection:
//!
//! 1. header is exactly two whitespace-separated tokens (`MalformedHeader`)
//! 2. scheme is exactly `Bearer` (`UnsupportedScheme`)
//! 3. token is a well-formed HS256 JWS whose MAC verifies (`BadSignature`)
//! 4. `nbf <= now < exp` (`Expired`)
//! 5. configured domain is in `aud` (`InvalidAudience`)
//! 6. `iss` equals the configured domain (`InvalidIssuer`)
//! 7. `sub` is a string holding a base-10 integer (`InvalidSubject`)
//!
//! The clock is read in whole Unix seconds; claim times may be fractional.
//! A claim of the wrong JSON type fails its own check, never step 3.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::Value;

use super::claims::TokenClaims;
use super::error::AuthError;
use super::settings::AuthSettings;

/// The only accepted authorization scheme (case-sensitive).
pub const BEARER_SCHEME: &str = "Bearer";

/// Inputs shared by the claim checks.
struct CheckContext<'a> {
    domain: &'a str,
    now: f64,
}

type ClaimCheck = fn(&TokenClaims, &CheckContext<'_>) -> Result<(), AuthError>;

/// Claim checks run after the signature is verified, in order.
const CLAIM_CHECKS: [ClaimCheck; 3] = [check_validity_window, check_audience, check_issuer];

/// Verifies bearer tokens issued by [`super::TokenSigner`].
#[derive(Clone)]
pub struct TokenVerifier {
    key: Arc<DecodingKey>,
    validation: Arc<Validation>,
    domain: Arc<str>,
}

impl TokenVerifier {
    pub fn new(settings: &AuthSettings) -> Self {
        // Only the MAC and structure are checked by the decoder; every claim
        // is checked below so the order of checks stays fixed.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        Self {
            key: Arc::new(DecodingKey::from_secret(settings.secret().as_bytes())),
            validation: Arc::new(validation),
            domain: Arc::from(settings.domain()),
        }
    }

    /// Verify a raw `Authorization` header value against the current time.
    ///
    /// A missing header should be passed as the empty string.
    pub fn verify(&self, header: &str) -> Result<i64, AuthError> {
        self.verify_at(header, Utc::now())
    }

    /// Verify a raw `Authorization` header value as of `now`.
    ///
    /// Returns the authenticated user id.
    pub fn verify_at(&self, header: &str, now: DateTime<Utc>) -> Result<i64, AuthError> {
        let token = parse_bearer(header)?;
        let claims = self.check_signature(token)?;

        let ctx = CheckContext {
            domain: &self.domain,
            now: now.timestamp() as f64,
        };
        for check in CLAIM_CHECKS {
            check(&claims, &ctx)?;
        }

        parse_subject(&claims)
    }

    fn check_signature(&self, token: &str) -> Result<TokenClaims, AuthError> {
        decode::<TokenClaims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "token failed signature check");
                AuthError::BadSignature
            })
    }
}

fn parse_bearer(header: &str) -> Result<&str, AuthError> {
    let mut parts = header.split_whitespace();
    let (Some(scheme), Some(token), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(AuthError::MalformedHeader);
    };
    if scheme != BEARER_SCHEME {
        return Err(AuthError::UnsupportedScheme);
    }
    Ok(token)
}

fn check_validity_window(claims: &TokenClaims, ctx: &CheckContext<'_>) -> Result<(), AuthError> {
    let started = claims.nbf.as_secs_f64() <= ctx.now;
    let unexpired = ctx.now < claims.exp.as_secs_f64();
    if !(started && unexpired) {
        return Err(AuthError::Expired);
    }
    Ok(())
}

fn check_audience(claims: &TokenClaims, ctx: &CheckContext<'_>) -> Result<(), AuthError> {
    if !claims.aud.contains(ctx.domain) {
        return Err(AuthError::InvalidAudience);
    }
    Ok(())
}

fn check_issuer(claims: &TokenClaims, ctx: &CheckContext<'_>) -> Result<(), AuthError> {
    if claims.iss.as_str() != Some(ctx.domain) {
        return Err(AuthError::InvalidIssuer);
    }
    Ok(())
}

fn parse_subject(claims: &TokenClaims) -> Result<i64, AuthError> {
    match &claims.sub {
        Value::String(sub) => sub.parse::<i64>().map_err(|_| AuthError::InvalidSubject),
        _ => Err(AuthError::InvalidSubject),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::claims::{Audience, TOKEN_LIFETIME_SECS};
    use crate::auth::identity::StoredIdentity;
    use crate::auth::TokenSigner;
    use chrono::{Duration, TimeZone};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    const SECRET: &str = "verifier-test-secret";
    const DOMAIN: &str = "mydomain.com";

    fn settings() -> AuthSettings {
        AuthSettings::new(SECRET, DOMAIN).unwrap()
    }

    fn issued_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 4, 9, 30, 0).unwrap()
    }

    fn identity() -> StoredIdentity {
        StoredIdentity {
            id: 10,
            email: "me@here.com".into(),
            password_hash: String::new(),
        }
    }

    fn valid_claims() -> TokenClaims {
        TokenClaims::for_identity(&identity(), DOMAIN, issued_at())
    }

    fn sign_with(claims: &TokenClaims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn sign_json(claims: &Value) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    fn raw_claims(overrides: Value) -> Value {
        let mut claims = serde_json::to_value(valid_claims()).unwrap();
        if let (Value::Object(base), Value::Object(extra)) = (&mut claims, overrides) {
            base.extend(extra);
        }
        claims
    }

    fn bearer(token: &str) -> String {
        format!("Bearer {token}")
    }

    fn verify(header: &str) -> Result<i64, AuthError> {
        TokenVerifier::new(&settings()).verify_at(header, issued_at())
    }

    #[test]
    fn round_trip_recovers_subject() {
        let token = TokenSigner::new(&settings())
            .issue_at(&identity(), issued_at())
            .unwrap();
        assert_eq!(verify(&bearer(&token)), Ok(10));
    }

    #[test]
    fn accepted_until_exactly_twenty_four_hours() {
        let verifier = TokenVerifier::new(&settings());
        let token = TokenSigner::new(&settings())
            .issue_at(&identity(), issued_at())
            .unwrap();
        let header = bearer(&token);
        let lifetime = Duration::seconds(TOKEN_LIFETIME_SECS);

        assert_eq!(verifier.verify_at(&header, issued_at()), Ok(10));
        assert_eq!(
            verifier.verify_at(&header, issued_at() + Duration::hours(12)),
            Ok(10)
        );
        assert_eq!(
            verifier.verify_at(&header, issued_at() + lifetime - Duration::seconds(1)),
            Ok(10)
        );
        assert_eq!(
            verifier.verify_at(&header, issued_at() + lifetime),
            Err(AuthError::Expired)
        );
        assert_eq!(
            verifier.verify_at(&header, issued_at() + lifetime + Duration::days(3)),
            Err(AuthError::Expired)
        );
    }

    #[test]
    fn rejected_before_not_before() {
        let verifier = TokenVerifier::new(&settings());
        let token = sign_with(&valid_claims(), SECRET);
        assert_eq!(
            verifier.verify_at(&bearer(&token), issued_at() - Duration::seconds(1)),
            Err(AuthError::Expired)
        );
    }

    #[test]
    fn missing_header_is_malformed() {
        assert_eq!(verify(""), Err(AuthError::MalformedHeader));
    }

    #[test]
    fn scheme_without_token_is_malformed() {
        assert_eq!(verify("Bearer"), Err(AuthError::MalformedHeader));
        assert_eq!(verify("Bearer "), Err(AuthError::MalformedHeader));
    }

    #[test]
    fn extra_tokens_are_malformed() {
        let token = sign_with(&valid_claims(), SECRET);
        assert_eq!(
            verify(&format!("Bearer {token} extra")),
            Err(AuthError::MalformedHeader)
        );
    }

    #[test]
    fn other_schemes_are_unsupported() {
        assert_eq!(verify("Basic abc123"), Err(AuthError::UnsupportedScheme));
        let token = sign_with(&valid_claims(), SECRET);
        assert_eq!(
            verify(&format!("bearer {token}")),
            Err(AuthError::UnsupportedScheme)
        );
    }

    #[test]
    fn garbage_token_is_bad_signature() {
        assert_eq!(verify("Bearer abc123"), Err(AuthError::BadSignature));
        assert_eq!(verify("Bearer a.b.c"), Err(AuthError::BadSignature));
    }

    #[test]
    fn token_from_other_secret_is_bad_signature() {
        let token = sign_with(&valid_claims(), "some-other-secret");
        assert_eq!(verify(&bearer(&token)), Err(AuthError::BadSignature));
    }

    #[test]
    fn other_algorithm_is_bad_signature() {
        let token = encode(
            &Header::new(Algorithm::HS512),
            &valid_claims(),
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert_eq!(verify(&bearer(&token)), Err(AuthError::BadSignature));
    }

    #[test]
    fn any_tampered_signature_byte_is_bad_signature() {
        let token = sign_with(&valid_claims(), SECRET);
        let signature_start = token.rfind('.').unwrap() + 1;

        for index in signature_start..token.len() {
            let mut bytes = token.clone().into_bytes();
            bytes[index] = if bytes[index] == b'A' { b'B' } else { b'A' };
            let tampered = String::from_utf8(bytes).unwrap();
            assert_eq!(
                verify(&bearer(&tampered)),
                Err(AuthError::BadSignature),
                "tampered byte {index}"
            );
        }
    }

    #[test]
    fn signature_is_checked_before_expiry() {
        let verifier = TokenVerifier::new(&settings());
        let token = sign_with(&valid_claims(), "some-other-secret");
        let long_after = issued_at() + Duration::days(30);
        assert_eq!(
            verifier.verify_at(&bearer(&token), long_after),
            Err(AuthError::BadSignature)
        );
    }

    #[test]
    fn expiry_is_checked_before_audience() {
        let verifier = TokenVerifier::new(&settings());
        let claims = TokenClaims {
            aud: Audience::One("elsewhere.com".into()),
            ..valid_claims()
        };
        let token = sign_with(&claims, SECRET);
        let long_after = issued_at() + Duration::days(30);
        assert_eq!(
            verifier.verify_at(&bearer(&token), long_after),
            Err(AuthError::Expired)
        );
    }

    #[test]
    fn wrong_audience_is_rejected_before_issuer() {
        let claims = TokenClaims {
            aud: Audience::Many(vec!["elsewhere.com".into()]),
            iss: "elsewhere.com".into(),
            ..valid_claims()
        };
        let token = sign_with(&claims, SECRET);
        assert_eq!(verify(&bearer(&token)), Err(AuthError::InvalidAudience));
    }

    #[test]
    fn single_string_audience_is_accepted() {
        let claims = TokenClaims {
            aud: Audience::One(DOMAIN.into()),
            ..valid_claims()
        };
        let token = sign_with(&claims, SECRET);
        assert_eq!(verify(&bearer(&token)), Ok(10));
    }

    #[test]
    fn wrong_issuer_is_rejected_before_subject() {
        let claims = TokenClaims {
            iss: "elsewhere.com".into(),
            sub: "not-a-number".into(),
            ..valid_claims()
        };
        let token = sign_with(&claims, SECRET);
        assert_eq!(verify(&bearer(&token)), Err(AuthError::InvalidIssuer));
    }

    #[test]
    fn non_numeric_subject_is_rejected() {
        for sub in ["user_10", "", "10.5", "0x0a"] {
            let claims = TokenClaims {
                sub: sub.into(),
                ..valid_claims()
            };
            let token = sign_with(&claims, SECRET);
            assert_eq!(
                verify(&bearer(&token)),
                Err(AuthError::InvalidSubject),
                "subject {sub:?}"
            );
        }
    }

    #[test]
    fn signed_token_without_claims_fails_at_expiry() {
        let token = sign_with(&TokenClaims::default(), SECRET);
        assert_eq!(verify(&bearer(&token)), Err(AuthError::Expired));
    }

    #[test]
    fn fractional_times_are_accepted() {
        let verifier = TokenVerifier::new(&settings());
        let iat = issued_at().timestamp() as f64;
        let token = sign_json(&raw_claims(json!({
            "nbf": iat - 0.5,
            "exp": iat + TOKEN_LIFETIME_SECS as f64 + 0.25,
        })));
        let header = bearer(&token);
        let lifetime = Duration::seconds(TOKEN_LIFETIME_SECS);

        assert_eq!(verifier.verify_at(&header, issued_at()), Ok(10));
        assert_eq!(verifier.verify_at(&header, issued_at() + lifetime), Ok(10));
        assert_eq!(
            verifier.verify_at(&header, issued_at() + lifetime + Duration::seconds(1)),
            Err(AuthError::Expired)
        );
    }

    #[test]
    fn fractional_not_before_in_the_future_is_rejected() {
        let iat = issued_at().timestamp() as f64;
        let token = sign_json(&raw_claims(json!({ "nbf": iat + 0.5 })));
        assert_eq!(verify(&bearer(&token)), Err(AuthError::Expired));
    }

    #[test]
    fn numeric_subject_is_invalid_subject() {
        for sub in [json!(10), json!(null), json!(["10"])] {
            let token = sign_json(&raw_claims(json!({ "sub": sub })));
            assert_eq!(
                verify(&bearer(&token)),
                Err(AuthError::InvalidSubject),
                "subject {sub}"
            );
        }
    }

    #[test]
    fn non_numeric_expiry_is_expired() {
        let token = sign_json(&raw_claims(json!({ "exp": "tomorrow" })));
        assert_eq!(verify(&bearer(&token)), Err(AuthError::Expired));
    }

    #[test]
    fn non_string_audience_is_invalid_audience() {
        let token = sign_json(&raw_claims(json!({ "aud": [1, 2] })));
        assert_eq!(verify(&bearer(&token)), Err(AuthError::InvalidAudience));
    }

    #[test]
    fn non_string_issuer_is_invalid_issuer() {
        let token = sign_json(&raw_claims(json!({ "iss": 42 })));
        assert_eq!(verify(&bearer(&token)), Err(AuthError::InvalidIssuer));
    }
}
