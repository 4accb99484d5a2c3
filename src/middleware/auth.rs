//! Bearer token authentication middleware.
//!
//! This middleware intercepts every protected request to:
//! 1. Extract the token from the `Authorization: Bearer <token>` header
//! 2. Verify its signature and expiry against the server secret
//! 3. Inject the decoded identity into the request
//! 4. Reject unauthorized requests with HTTP 401
//!
//! Verification is stateless: there is no token registry, so a token cannot
//! be revoked before it expires.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};

use crate::{error::AppError, services::token_service::TokenService, state::AppState};

const BEARER_PREFIX: &str = "Bearer ";

/// Authentication context attached to authenticated requests.
///
/// Inserted into the request's extension map; handlers take it with
/// `Extension<AuthContext>` to know who made the request.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthContext {
    /// Admin identity from the token's `sub` claim
    pub subject: String,

    pub issued_at: Option<DateTime<Utc>>,

    pub expires_at: Option<DateTime<Utc>>,
}

/// Extract the candidate token from the headers.
///
/// # Errors
///
/// `MissingCredential` if the header is absent, not visible ASCII, or lacks
/// the case-sensitive `"Bearer "` prefix.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_PREFIX))
        .ok_or(AppError::MissingCredential)
}

/// Run the full gate decision for a set of headers.
///
/// Pure: the same headers always produce the same decision.
pub fn authenticate(tokens: &TokenService, headers: &HeaderMap) -> Result<AuthContext, AppError> {
    let token = bearer_token(headers)?;
    let claims = tokens.verify(token)?;

    Ok(AuthContext {
        subject: claims.sub,
        issued_at: DateTime::from_timestamp(claims.iat, 0),
        expires_at: DateTime::from_timestamp(claims.exp, 0),
    })
}

/// Bearer token authentication middleware function.
///
/// # Flow
///
/// 1. Read `Authorization` header; missing or not `Bearer ...` → 401
///    `"Unauthorized - Token missing or malformed"`
/// 2. Verify the token; any failure → 401 `"Invalid token"`
/// 3. On success: insert `AuthContext` into the request and call the next handler
///
/// The gate never writes a response on success and never lets a request with
/// a bad credential reach the handler.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_context = authenticate(&state.tokens, request.headers()).map_err(|e| {
        tracing::warn!(
            method = %request.method(),
            path = %request.uri().path(),
            reason = %e,
            "Rejected unauthenticated request"
        );
        e
    })?;

    tracing::debug!(subject = %auth_context.subject, "Request authenticated");

    // Route handlers can now extract this using Extension<AuthContext>
    request.extensions_mut().insert(auth_context);

    Ok(next.run(request).await)
}
