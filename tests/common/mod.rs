//! Shared helpers for the router-level tests.
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use blog_cms_server::{
    AppError, AppState, RouterConfig, build_router,
    services::{
        admin_service::AdminCredentials, content_generator::ContentGenerator,
        image_store::InMemoryImageStore, token_service::TokenService,
    },
    store::InMemoryBlogStore,
};
use serde_json::Value;
use tower::ServiceExt;

pub const JWT_SECRET: &str = "integration-test-secret";
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";
pub const BOUNDARY: &str = "X-BLOG-TEST-BOUNDARY";

/// Generator that answers with a fixed result.
pub struct StubGenerator(pub Result<String, String>);

#[async_trait]
impl ContentGenerator for StubGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, AppError> {
        self.0.clone().map_err(AppError::Upstream)
    }
}

pub fn test_state_with(generator: StubGenerator) -> AppState {
    AppState::new(
        Arc::new(InMemoryBlogStore::new()),
        Arc::new(InMemoryImageStore::new()),
        Arc::new(generator),
        TokenService::new(JWT_SECRET, "HS256", 1).expect("valid token config"),
        AdminCredentials::new(ADMIN_EMAIL, ADMIN_PASSWORD),
    )
}

pub fn test_state() -> AppState {
    test_state_with(StubGenerator(Ok("# Generated\n\nBody".to_string())))
}

pub fn test_router(state: AppState) -> Router {
    build_router(state, &RouterConfig::default())
}

pub fn bearer(state: &AppState) -> String {
    format!(
        "Bearer {}",
        state.tokens.issue(ADMIN_EMAIL).expect("token issued")
    )
}

/// Send a request and decode the JSON body (Null when empty).
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.expect("infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    (status, body)
}

pub fn json_request(uri: &str, auth: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::from(body.to_string())).expect("request")
}

pub fn get_request(uri: &str, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::empty()).expect("request")
}

/// Hand-built multipart body with optional `blog` and `image` parts.
pub fn multipart_body(blog: Option<&str>, image: Option<(&str, &str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();

    if let Some(blog) = blog {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"blog\"\r\n\r\n{blog}\r\n"
            )
            .as_bytes(),
        );
    }

    if let Some((file_name, content_type, bytes)) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn add_request(auth: Option<&str>, body: Vec<u8>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/blog/add")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::from(body)).expect("request")
}

pub const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

pub fn blog_json(title: &str, is_published: bool) -> String {
    serde_json::json!({
        "title": title,
        "subTitle": "A subtitle",
        "description": "<p>Hello</p>",
        "category": "Technology",
        "isPublished": is_published,
    })
    .to_string()
}

/// Create a post through the API and return its id.
pub async fn create_post(router: &Router, auth: &str, title: &str, is_published: bool) -> String {
    let body = multipart_body(
        Some(&blog_json(title, is_published)),
        Some(("cover.png", "image/png", PNG)),
    );
    let (status, body) = send(router, add_request(Some(auth), body)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
    body["id"].as_str().expect("id").to_string()
}
