//! JWT issuing and verification.
//!
//! Tokens are HMAC-signed with the server-held secret. Verification checks the
//! signature, the algorithm and the `exp` claim; nothing is stored server-side,
//! so an issued token stays valid until it expires.

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Claims carried by admin tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Admin identity (the admin email)
    pub sub: String,
    /// Issued-at, seconds since the epoch
    pub iat: i64,
    /// Expiry, seconds since the epoch
    pub exp: i64,
}

/// Signs and verifies bearer tokens.
///
/// Holds only immutable key material, so a single instance is shared across
/// all requests behind an `Arc`.
pub struct TokenService {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: TimeDelta,
}

impl TokenService {
    /// Build a token service for an HMAC algorithm name (`HS256`, `HS384`, `HS512`).
    ///
    /// # Errors
    ///
    /// `Internal` if the algorithm is unknown or not an HMAC algorithm, if the
    /// secret is empty, or if `ttl_hours` is not a positive, representable
    /// number of hours.
    pub fn new(secret: &str, algorithm: &str, ttl_hours: i64) -> Result<Self, AppError> {
        let algorithm: Algorithm = algorithm
            .trim()
            .parse()
            .map_err(|_| AppError::Internal(format!("Unsupported JWT algorithm: {}", algorithm)))?;

        if !matches!(algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) {
            return Err(AppError::Internal(format!(
                "JWT algorithm {:?} is not an HMAC algorithm",
                algorithm
            )));
        }

        if secret.is_empty() {
            return Err(AppError::Internal("JWT secret must not be empty".to_string()));
        }

        let ttl = TimeDelta::try_hours(ttl_hours)
            .filter(|ttl| *ttl > TimeDelta::zero())
            .ok_or_else(|| {
                AppError::Internal(format!("Invalid token lifetime: {} hours", ttl_hours))
            })?;

        // Only the configured algorithm is accepted; `exp` is required by default.
        let validation = Validation::new(algorithm);

        Ok(Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        })
    }

    /// Issue a token for `subject`, valid for the configured lifetime.
    pub fn issue(&self, subject: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::Internal("Token expiry out of range".to_string()))?;
        self.issue_with_times(subject, now, expires_at)
    }

    /// Issue a token with explicit issue and expiry times.
    pub fn issue_with_times(
        &self,
        subject: &str,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let claims = Claims {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode JWT: {:?}", e);
            AppError::Internal("Failed to encode token".to_string())
        })
    }

    /// Verify signature, algorithm and expiry of `token`.
    ///
    /// Every failure collapses into `InvalidCredential`; the cause is logged at debug.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Token verification failed: {:?}", e.kind());
                AppError::InvalidCredential
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret-key", "HS256", 1).unwrap()
    }

    #[test]
    fn issued_token_verifies() {
        let service = service();
        let token = service.issue("admin@example.com").unwrap();

        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.sub, "admin@example.com");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn verification_is_repeatable() {
        let service = service();
        let token = service.issue("admin@example.com").unwrap();

        let first = service.verify(&token).unwrap();
        let second = service.verify(&token).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            service().verify("invalid-token"),
            Err(AppError::InvalidCredential)
        ));
        assert!(matches!(service().verify(""), Err(AppError::InvalidCredential)));
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let other = TokenService::new("another-secret", "HS256", 1).unwrap();
        let token = other.issue("admin@example.com").unwrap();

        assert!(matches!(
            service().verify(&token),
            Err(AppError::InvalidCredential)
        ));
    }

    #[test]
    fn rejects_token_signed_with_other_algorithm() {
        let other = TokenService::new("test-secret-key", "HS512", 1).unwrap();
        let token = other.issue("admin@example.com").unwrap();

        assert!(matches!(
            service().verify(&token),
            Err(AppError::InvalidCredential)
        ));
    }

    #[test]
    fn rejects_expired_token() {
        let service = service();
        let now = Utc::now();
        let token = service
            .issue_with_times(
                "admin@example.com",
                now - TimeDelta::hours(2),
                now - TimeDelta::hours(1),
            )
            .unwrap();

        assert!(matches!(
            service.verify(&token),
            Err(AppError::InvalidCredential)
        ));
    }

    #[test]
    fn rejects_tampered_payload() {
        let service = service();
        let token = service.issue("admin@example.com").unwrap();

        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        let forged = service.issue("intruder@example.com").unwrap();
        parts[1] = forged.split('.').nth(1).unwrap().to_string();
        let tampered = parts.join(".");

        assert!(matches!(
            service.verify(&tampered),
            Err(AppError::InvalidCredential)
        ));
    }

    #[test]
    fn rejects_unusable_lifetimes() {
        for ttl_hours in [0, -5, i64::MAX / 1000, i64::MAX] {
            assert!(
                matches!(
                    TokenService::new("secret", "HS256", ttl_hours),
                    Err(AppError::Internal(_))
                ),
                "ttl {ttl_hours}"
            );
        }
    }

    #[test]
    fn expiry_past_the_calendar_is_an_error() {
        // Representable as a duration, but now + ttl overflows the date range
        let service = TokenService::new("secret", "HS256", 24 * 365 * 300_000).unwrap();
        assert!(matches!(
            service.issue("admin@example.com"),
            Err(AppError::Internal(_))
        ));
    }

    #[test]
    fn rejects_non_hmac_algorithms() {
        assert!(TokenService::new("secret", "RS256", 1).is_err());
        assert!(TokenService::new("secret", "nonsense", 1).is_err());
        assert!(TokenService::new("", "HS256", 1).is_err());
    }
}
