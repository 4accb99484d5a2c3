//! Shared application state.
//!
//! Everything here is immutable or internally synchronized, so the state is
//! cloned into every handler through axum's `State` extractor.

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::error::AppError;
use crate::services::admin_service::AdminCredentials;
use crate::services::content_generator::{ContentGenerator, GeminiGenerator, UnconfiguredGenerator};
use crate::services::image_store::ImageStore;
use crate::services::token_service::TokenService;
use crate::store::BlogStore;

#[derive(Clone)]
pub struct AppState {
    pub blogs: Arc<dyn BlogStore>,
    pub images: Arc<dyn ImageStore>,
    pub generator: Arc<dyn ContentGenerator>,
    pub tokens: Arc<TokenService>,
    pub admin: Arc<AdminCredentials>,
}

impl AppState {
    pub fn new(
        blogs: Arc<dyn BlogStore>,
        images: Arc<dyn ImageStore>,
        generator: Arc<dyn ContentGenerator>,
        tokens: TokenService,
        admin: AdminCredentials,
    ) -> Self {
        Self {
            blogs,
            images,
            generator,
            tokens: Arc::new(tokens),
            admin: Arc::new(admin),
        }
    }

    /// Build the state from configuration and already-constructed storage.
    ///
    /// # Errors
    ///
    /// Fails on an unsupported JWT algorithm or an invalid Gemini base URL.
    pub fn from_config(
        config: &Config,
        blogs: Arc<dyn BlogStore>,
        images: Arc<dyn ImageStore>,
    ) -> Result<Self, AppError> {
        let tokens = TokenService::new(
            &config.jwt_secret,
            &config.jwt_algorithm,
            config.token_ttl_hours,
        )?;

        let generator: Arc<dyn ContentGenerator> = match &config.gemini_api_key {
            Some(key) if !key.trim().is_empty() => Arc::new(GeminiGenerator::new(
                &config.gemini_base_url,
                &config.gemini_model,
                key.trim().to_string(),
                Duration::from_secs(config.generation_timeout_secs),
            )?),
            _ => {
                tracing::warn!("GEMINI_API_KEY not set, content generation disabled");
                Arc::new(UnconfiguredGenerator)
            }
        };

        let admin = AdminCredentials::new(&config.admin_email, &config.admin_password);

        Ok(Self::new(blogs, images, generator, tokens, admin))
    }
}
