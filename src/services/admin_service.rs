//! Admin login.
//!
//! A single admin identity is configured through `ADMIN_EMAIL` and
//! `ADMIN_PASSWORD`. Only SHA-256 digests of the password are kept in memory.

use sha2::{Digest, Sha256};

use crate::error::AppError;
use crate::services::token_service::TokenService;

pub struct AdminCredentials {
    email: String,
    password_digest: [u8; 32],
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

/// Compare digests without short-circuiting on the first differing byte.
fn digests_match(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

impl AdminCredentials {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.trim().to_ascii_lowercase(),
            password_digest: digest(password),
        }
    }

    fn matches(&self, email: &str, password: &str) -> bool {
        let email_ok = email.trim().eq_ignore_ascii_case(&self.email);
        let password_ok = digests_match(&self.password_digest, &digest(password));
        email_ok && password_ok
    }

    /// Check the credentials and issue a token for the admin.
    ///
    /// # Errors
    ///
    /// - `InvalidLogin`: wrong email or password
    pub fn login(
        &self,
        tokens: &TokenService,
        email: &str,
        password: &str,
    ) -> Result<String, AppError> {
        if !self.matches(email, password) {
            tracing::warn!("Rejected admin login attempt");
            return Err(AppError::InvalidLogin);
        }

        tracing::info!(admin = %self.email, "Admin logged in");
        tokens.issue(&self.email)
    }
}
