//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `JWT_SECRET` (required): HMAC secret used to sign and verify bearer tokens
/// - `ADMIN_EMAIL` / `ADMIN_PASSWORD` (required): credentials accepted by the admin login
/// - `DATABASE_URL` (optional): PostgreSQL connection string, in-memory store when unset
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `GEMINI_API_KEY` (optional): enables AI content generation
#[derive(Clone, Deserialize)]
pub struct Config {
    pub jwt_secret: String,

    #[serde(default = "default_jwt_algorithm")]
    pub jwt_algorithm: String,

    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,

    pub admin_email: String,

    pub admin_password: String,

    #[serde(default)]
    pub database_url: Option<String>,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,

    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    #[serde(default)]
    pub gemini_api_key: Option<String>,

    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    #[serde(default = "default_gemini_base_url")]
    pub gemini_base_url: String,

    #[serde(default = "default_generation_timeout_secs")]
    pub generation_timeout_secs: u64,
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

fn default_jwt_algorithm() -> String {
    "HS256".to_string()
}

fn default_token_ttl_hours() -> i64 {
    24
}

fn default_upload_dir() -> String {
    "uploads".to_string()
}

/// 5 MiB, enough for a cover image.
fn default_max_upload_bytes() -> usize {
    5 * 1024 * 1024
}

fn default_gemini_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_generation_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing (e.g., JWT_SECRET)
    /// - Environment variable values cannot be parsed into expected types
    pub fn from_env() -> Result<Self, envy::Error> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        // Field names are automatically converted: jwt_secret -> JWT_SECRET
        envy::from_env::<Config>()
    }
}

// Hand-written so secrets never reach the logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("jwt_secret", &"***")
            .field("jwt_algorithm", &self.jwt_algorithm)
            .field("token_ttl_hours", &self.token_ttl_hours)
            .field("admin_email", &self.admin_email)
            .field("admin_password", &"***")
            .field("database_url", &self.database_url.as_ref().map(|_| "***"))
            .field("server_port", &self.server_port)
            .field("upload_dir", &self.upload_dir)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| "***"))
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("generation_timeout_secs", &self.generation_timeout_secs)
            .finish()
    }
}
