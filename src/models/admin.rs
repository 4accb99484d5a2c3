//! Admin login request/response types.

use serde::{Deserialize, Serialize};

/// Request body for `POST /api/admin/login`.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login: the bearer token to present on protected routes.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
}
