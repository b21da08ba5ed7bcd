//! Session token service
//!
//! Issues and verifies the signed tokens behind cookie-based authentication.
//! Tokens are HS256 JWTs carrying the principal's email and a fixed 365-day
//! expiry. Issuance is trust-on-assertion: whatever email the client claims
//! is the email the token encodes. Verification is stateless; there is no
//! session store and no server-side revocation list.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::Environment;
use crate::models::Identity;

/// Fixed session token lifetime
const TOKEN_TTL_DAYS: i64 = 365;

/// Cookie name carrying the session token
pub const TOKEN_COOKIE: &str = "token";

/// Error types for session token operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The token is malformed, tampered with, signed with another secret,
    /// or expired. The distinction is deliberately not surfaced to callers.
    #[error("Invalid session token")]
    InvalidToken,

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// JWT claims embedded in a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Principal's email
    pub sub: String,
    /// Issued-at, seconds since epoch
    pub iat: i64,
    /// Expiry, seconds since epoch
    pub exp: i64,
}

/// Mints and verifies session tokens and builds their cookie headers.
///
/// The signing secret and deployment mode are injected at construction;
/// nothing here reads process-wide state.
pub struct SessionService {
    secret: String,
    environment: Environment,
}

impl SessionService {
    pub fn new(secret: impl Into<String>, environment: Environment) -> Self {
        Self {
            secret: secret.into(),
            environment,
        }
    }

    /// Mint a signed token for the asserted email. No identity proof is
    /// required; any email yields a token.
    pub fn issue(&self, email: &str) -> Result<String, SessionError> {
        let now = Utc::now();
        let claims = Claims {
            sub: email.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| SessionError::InternalError(anyhow::anyhow!("Failed to sign token: {}", e)))
    }

    /// Verify a token's signature and expiry and return the embedded
    /// identity. Expiry is checked with zero leeway. Every failure mode
    /// collapses into [`SessionError::InvalidToken`]; the specific cause is
    /// only logged.
    pub fn verify(&self, token: &str) -> Result<Identity, SessionError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| {
            tracing::debug!("Session token rejected: {}", e);
            SessionError::InvalidToken
        })?;

        Ok(Identity::new(data.claims.sub))
    }

    /// Set-Cookie value carrying a fresh token. Development mode leaves the
    /// cookie reachable over plain HTTP with SameSite=Lax; production requires
    /// HTTPS and strict same-site.
    pub fn issue_cookie(&self, token: &str) -> String {
        let max_age = TOKEN_TTL_DAYS * 24 * 60 * 60;
        if self.environment.is_production() {
            format!(
                "{}={}; Path=/; HttpOnly; Secure; SameSite=Strict; Max-Age={}",
                TOKEN_COOKIE, token, max_age
            )
        } else {
            format!(
                "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
                TOKEN_COOKIE, token, max_age
            )
        }
    }

    /// Set-Cookie value clearing the session cookie via zero max-age. The
    /// previously issued token is not checked; revocation is purely a
    /// client-cookie operation.
    pub fn clear_cookie(&self) -> String {
        if self.environment.is_production() {
            format!(
                "{}=; Path=/; HttpOnly; Secure; SameSite=Strict; Max-Age=0",
                TOKEN_COOKIE
            )
        } else {
            format!(
                "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
                TOKEN_COOKIE
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dev_service() -> SessionService {
        SessionService::new("test-secret", Environment::Development)
    }

    #[test]
    fn test_issue_then_verify_round_trip() {
        let service = dev_service();

        let token = service.issue("alice@example.com").expect("Failed to issue");
        let identity = service.verify(&token).expect("Failed to verify");

        assert_eq!(identity.email, "alice@example.com");
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let service = dev_service();
        let other = SessionService::new("another-secret", Environment::Development);

        let token = service.issue("alice@example.com").expect("Failed to issue");
        let result = other.verify(&token);

        assert!(matches!(result, Err(SessionError::InvalidToken)));
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let service = dev_service();

        let token = service.issue("alice@example.com").expect("Failed to issue");

        // Flip a character in the payload segment
        let mut parts: Vec<String> = token.split('.').map(|s| s.to_string()).collect();
        assert_eq!(parts.len(), 3);
        let payload = &parts[1];
        let replacement = if payload.starts_with('A') { "B" } else { "A" };
        parts[1] = format!("{}{}", replacement, &payload[1..]);
        let tampered = parts.join(".");

        let result = service.verify(&tampered);
        assert!(matches!(result, Err(SessionError::InvalidToken)));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let service = dev_service();
        assert!(matches!(
            service.verify("not-a-jwt"),
            Err(SessionError::InvalidToken)
        ));
        assert!(matches!(service.verify(""), Err(SessionError::InvalidToken)));
    }

    #[test]
    fn test_expired_token_is_rejected_despite_valid_signature() {
        let service = dev_service();

        // Sign an already-expired set of claims with the same secret
        let now = Utc::now();
        let claims = Claims {
            sub: "alice@example.com".to_string(),
            iat: (now - Duration::days(2)).timestamp(),
            exp: (now - Duration::days(1)).timestamp(),
        };
        let expired = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test-secret".as_bytes()),
        )
        .expect("Failed to sign");

        let result = service.verify(&expired);
        assert!(matches!(result, Err(SessionError::InvalidToken)));
    }

    #[test]
    fn test_issue_cookie_development_attributes() {
        let service = dev_service();
        let token = service.issue("alice@example.com").expect("Failed to issue");
        let cookie = service.issue_cookie(&token);

        assert!(cookie.starts_with(&format!("token={}", token)));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Max-Age=31536000"));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_issue_cookie_production_attributes() {
        let service = SessionService::new("test-secret", Environment::Production);
        let cookie = service.issue_cookie("sometoken");

        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=31536000"));
    }

    #[test]
    fn test_clear_cookie_zeroes_max_age() {
        let service = dev_service();
        let cookie = service.clear_cookie();

        assert!(cookie.starts_with("token=;"));
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.contains("HttpOnly"));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(20))]

            /// Issuing a token for any email and verifying it yields the
            /// same email back.
            #[test]
            fn issued_tokens_round_trip(local in "[a-z0-9]{1,16}", domain in "[a-z]{2,10}") {
                let email = format!("{}@{}.example", local, domain);
                let service = SessionService::new("prop-secret", Environment::Development);

                let token = service.issue(&email).expect("Failed to issue");
                let identity = service.verify(&token).expect("Failed to verify");

                prop_assert_eq!(identity.email, email);
            }

            /// A verifier holding a different secret rejects every token.
            #[test]
            fn foreign_secret_never_verifies(email in "[a-z]{1,12}@[a-z]{2,8}\\.example") {
                let issuer = SessionService::new("secret-one", Environment::Development);
                let verifier = SessionService::new("secret-two", Environment::Development);

                let token = issuer.issue(&email).expect("Failed to issue");
                prop_assert!(matches!(verifier.verify(&token), Err(SessionError::InvalidToken)));
            }
        }
    }
}
