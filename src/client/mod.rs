//! HTTP client for the admin API.
//!
//! Mirrors what the admin UI does: every mutating call carries the bearer
//! credential passed in by the caller (never read from ambient storage), and
//! every reply is read as `{success, message, ...}` whatever the status code.

use std::fmt;

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::models::admin::LoginRequest;
use crate::models::blog::{BlogIdRequest, BlogPost, GenerateRequest};

mod session;

pub use session::{AdminSession, BlogDraft, ImageFile};

/// Errors raised before a server reply could be interpreted.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Unexpected response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The server answered `success: false`.
    #[error("{0}")]
    Rejected(String),
}

/// A bearer credential obtained from login.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Uniform reply body of the blog endpoints.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub is_published: Option<bool>,
}

/// A transient notification for the operator (the UI's toast).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn is_success(&self) -> bool {
        matches!(self, Notice::Success(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Success(m) | Notice::Error(m) => m,
        }
    }

    /// Notice for a call outcome. Transport and decoding failures fall back to
    /// the error text, and replies without a message get a generic one.
    pub fn from_outcome(outcome: &Result<ApiReply, ClientError>) -> Self {
        match outcome {
            Ok(reply) if reply.success => Notice::Success(
                reply
                    .message
                    .clone()
                    .unwrap_or_else(|| "Request completed".to_string()),
            ),
            Ok(reply) => Notice::Error(
                reply
                    .message
                    .clone()
                    .unwrap_or_else(|| "Request failed".to_string()),
            ),
            Err(e) => Notice::Error(e.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LoginReply {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BlogListReply {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    blogs: Vec<BlogPost>,
    #[serde(default)]
    message: Option<String>,
}

/// Thin typed wrapper over the admin endpoints.
#[derive(Debug, Clone)]
pub struct AdminClient {
    http: reqwest::Client,
    base_url: Url,
}

impl AdminClient {
    /// `base_url` is the server origin, e.g. `http://localhost:3000`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: Url::parse(base_url)?,
        })
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path)?)
    }

    /// Send and decode the `{success, message, ...}` body regardless of status.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<ApiReply, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        let reply: ApiReply = serde_json::from_slice(&bytes)?;
        tracing::debug!(%status, success = reply.success, "Admin API reply");
        Ok(reply)
    }

    /// Exchange admin credentials for a bearer credential.
    pub async fn login(&self, email: &str, password: &str) -> Result<Credential, ClientError> {
        let response = self
            .http
            .post(self.url("/api/admin/login")?)
            .json(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;

        let reply: LoginReply = serde_json::from_slice(&response.bytes().await?)?;
        match reply.token {
            Some(token) if reply.success => Ok(Credential::new(token)),
            _ => Err(ClientError::Rejected(
                reply.message.unwrap_or_else(|| "Login failed".to_string()),
            )),
        }
    }

    /// `POST /api/blog/add` as multipart: `blog` JSON plus the optional image.
    pub async fn add_blog(
        &self,
        credential: &Credential,
        draft: &BlogDraft,
    ) -> Result<ApiReply, ClientError> {
        let mut form = Form::new().text("blog", draft.payload().to_string());

        if let Some(image) = &draft.image {
            let part = Part::bytes(image.bytes.clone())
                .file_name(image.file_name.clone())
                .mime_str(&image.content_type)?;
            form = form.part("image", part);
        }

        self.send(
            self.http
                .post(self.url("/api/blog/add")?)
                .header(reqwest::header::AUTHORIZATION, credential.header_value())
                .multipart(form),
        )
        .await
    }

    pub async fn delete_blog(
        &self,
        credential: &Credential,
        id: &str,
    ) -> Result<ApiReply, ClientError> {
        self.post_json(credential, "/api/blog/delete", &BlogIdRequest { id: id.to_string() })
            .await
    }

    pub async fn toggle_publish(
        &self,
        credential: &Credential,
        id: &str,
    ) -> Result<ApiReply, ClientError> {
        self.post_json(
            credential,
            "/api/blog/toggle-publish",
            &BlogIdRequest { id: id.to_string() },
        )
        .await
    }

    pub async fn generate_content(
        &self,
        credential: &Credential,
        prompt: &str,
    ) -> Result<ApiReply, ClientError> {
        self.post_json(
            credential,
            "/api/blog/generate",
            &GenerateRequest {
                prompt: prompt.to_string(),
            },
        )
        .await
    }

    /// Every post, drafts included.
    pub async fn list_blogs(&self, credential: &Credential) -> Result<Vec<BlogPost>, ClientError> {
        let response = self
            .http
            .get(self.url("/api/admin/blogs")?)
            .header(reqwest::header::AUTHORIZATION, credential.header_value())
            .send()
            .await?;

        let reply: BlogListReply = serde_json::from_slice(&response.bytes().await?)?;
        if !reply.success {
            return Err(ClientError::Rejected(reply.message.unwrap_or_default()));
        }
        Ok(reply.blogs)
    }

    async fn post_json<T: serde::Serialize>(
        &self,
        credential: &Credential,
        path: &str,
        body: &T,
    ) -> Result<ApiReply, ClientError> {
        self.send(
            self.http
                .post(self.url(path)?)
                .header(reqwest::header::AUTHORIZATION, credential.header_value())
                .json(body),
        )
        .await
    }
}

impl BlogDraft {
    /// JSON carried in the `blog` multipart field.
    pub fn payload(&self) -> serde_json::Value {
        json!({
            "title": self.title,
            "subTitle": self.sub_title,
            "description": self.description,
            "category": self.category.map(|c| c.as_str()).unwrap_or_default(),
            "isPublished": self.is_published,
        })
    }
}
