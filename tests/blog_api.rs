//! Blog endpoints end to end, behind a valid token.

mod common;

use axum::http::StatusCode;
use blog_cms_server::{RouterConfig, build_router};
use common::*;
use serde_json::json;

#[tokio::test]
async fn create_toggle_delete_lifecycle() {
    let state = test_state();
    let router = test_router(state.clone());
    let auth = bearer(&state);

    let body = multipart_body(
        Some(&blog_json("Lifecycle", false)),
        Some(("cover.png", "image/png", PNG)),
    );
    let (status, created) = send(&router, add_request(Some(&auth), body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["success"], true);
    assert_eq!(created["message"], "Blog added successfully");
    let id = created["id"].as_str().unwrap().to_string();

    let (_, listed) = send(&router, get_request("/api/admin/blogs", Some(&auth))).await;
    assert_eq!(listed["blogs"][0]["id"], id.as_str());
    assert_eq!(listed["blogs"][0]["isPublished"], false);
    let created_at = listed["blogs"][0]["createdAt"].clone();

    let (status, toggled) = send(
        &router,
        json_request("/api/blog/toggle-publish", Some(&auth), json!({ "id": id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        toggled,
        json!({ "success": true, "message": "Blog status updated", "isPublished": true })
    );

    // Identity and creation time are untouched by the toggle
    let (_, listed) = send(&router, get_request("/api/admin/blogs", Some(&auth))).await;
    assert_eq!(listed["blogs"][0]["id"], id.as_str());
    assert_eq!(listed["blogs"][0]["createdAt"], created_at);

    let (status, deleted) = send(
        &router,
        json_request("/api/blog/delete", Some(&auth), json!({ "id": id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        deleted,
        json!({ "success": true, "message": "Blog deleted successfully" })
    );

    let (status, missing) = send(
        &router,
        json_request("/api/blog/toggle-publish", Some(&auth), json!({ "id": id })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing, json!({ "success": false, "message": "Blog not found" }));

    let (status, _) = send(
        &router,
        json_request("/api/blog/delete", Some(&auth), json!({ "id": id })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_requires_fields_and_image() {
    let state = test_state();
    let router = test_router(state.clone());
    let auth = bearer(&state);

    let cases = [
        (
            multipart_body(Some(&blog_json("No image", false)), None),
            "Missing required fields",
        ),
        (
            multipart_body(None, Some(("cover.png", "image/png", PNG))),
            "Missing required fields",
        ),
        (
            multipart_body(
                Some(r#"{"title":"","description":"d","category":"Startup"}"#),
                Some(("cover.png", "image/png", PNG)),
            ),
            "Missing required fields",
        ),
        (
            multipart_body(
                Some(r#"{"title":"t","description":"d","category":"Gardening"}"#),
                Some(("cover.png", "image/png", PNG)),
            ),
            "Invalid category",
        ),
        (
            multipart_body(Some("{oops"), Some(("cover.png", "image/png", PNG))),
            "Invalid blog payload",
        ),
        (
            multipart_body(
                Some(&blog_json("Pdf", false)),
                Some(("cover.pdf", "application/pdf", b"%PDF-1.7")),
            ),
            "Image must be an image file",
        ),
    ];

    for (body, expected) in cases {
        let (status, reply) = send(&router, add_request(Some(&auth), body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{expected}");
        assert_eq!(reply, json!({ "success": false, "message": expected }));
    }

    let (_, listed) = send(&router, get_request("/api/admin/blogs", Some(&auth))).await;
    assert_eq!(listed["blogs"], json!([]));
}

#[tokio::test]
async fn unknown_and_malformed_ids_are_not_found() {
    let state = test_state();
    let router = test_router(state.clone());
    let auth = bearer(&state);

    for id in [uuid::Uuid::new_v4().to_string(), "not-an-id".to_string()] {
        for uri in ["/api/blog/toggle-publish", "/api/blog/delete"] {
            let (status, body) =
                send(&router, json_request(uri, Some(&auth), json!({ "id": id }))).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body["message"], "Blog not found");
        }
    }
}

#[tokio::test]
async fn malformed_json_body_uses_error_envelope() {
    let state = test_state();
    let router = test_router(state.clone());
    let auth = bearer(&state);

    let (status, body) = send(
        &router,
        json_request("/api/blog/delete", Some(&auth), json!({ "identifier": 1 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn public_reads_only_show_published_posts() {
    let state = test_state();
    let router = test_router(state.clone());
    let auth = bearer(&state);

    let draft = create_post(&router, &auth, "Draft", false).await;
    let live = create_post(&router, &auth, "Live", true).await;

    let (_, all) = send(&router, get_request("/api/blog/all", None)).await;
    let ids: Vec<&str> = all["blogs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![live.as_str()]);

    let (status, one) = send(&router, get_request(&format!("/api/blog/{live}"), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(one["blog"]["title"], "Live");
    assert_eq!(one["blog"]["subTitle"], "A subtitle");
    assert!(one["blog"]["image"].as_str().unwrap().starts_with("/uploads/"));

    let (status, _) = send(&router, get_request(&format!("/api/blog/{draft}"), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, admin) = send(&router, get_request("/api/admin/blogs", Some(&auth))).await;
    assert_eq!(admin["blogs"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn generate_returns_content() {
    let state = test_state();
    let router = test_router(state.clone());
    let auth = bearer(&state);

    let (status, body) = send(
        &router,
        json_request("/api/blog/generate", Some(&auth), json!({ "prompt": "Rust" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "success": true, "content": "# Generated\n\nBody" })
    );
}

#[tokio::test]
async fn generate_with_blank_prompt_is_rejected() {
    let state = test_state();
    let router = test_router(state.clone());
    let auth = bearer(&state);

    let (status, body) = send(
        &router,
        json_request("/api/blog/generate", Some(&auth), json!({ "prompt": "  " })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please enter the title");
}

#[tokio::test]
async fn upstream_failure_is_generic() {
    let state = test_state_with(StubGenerator(Err("quota exhausted for key abc".to_string())));
    let router = test_router(state.clone());
    let auth = bearer(&state);

    let (status, body) = send(
        &router,
        json_request("/api/blog/generate", Some(&auth), json!({ "prompt": "Rust" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(
        body,
        json!({ "success": false, "message": "Content generation failed" })
    );
}

#[tokio::test]
async fn stored_image_extension_comes_from_content_type() {
    let state = test_state();
    let router = test_router(state.clone());
    let auth = bearer(&state);

    let body = multipart_body(
        Some(&blog_json("Sneaky", true)),
        Some(("evil.html", "image/png", b"<script>alert(1)</script>")),
    );
    let (status, created) = send(&router, add_request(Some(&auth), body)).await;
    assert_eq!(status, StatusCode::CREATED);

    let id = created["id"].as_str().unwrap();
    let (_, one) = send(&router, get_request(&format!("/api/blog/{id}"), None)).await;
    let image = one["blog"]["image"].as_str().unwrap();
    assert!(image.ends_with(".png"), "{image}");

    let body = multipart_body(
        Some(&blog_json("Vector", true)),
        Some(("logo.svg", "image/svg+xml", b"<svg onload=\"alert(1)\"/>")),
    );
    let (status, reply) = send(&router, add_request(Some(&auth), body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(reply["message"], "Image must be an image file");
}

#[tokio::test]
async fn upload_over_body_limit_is_413() {
    let state = test_state();
    let router = build_router(
        state.clone(),
        &RouterConfig {
            max_upload_bytes: 1024,
            upload_dir: None,
        },
    );
    let auth = bearer(&state);

    let big = vec![0u8; 4096];
    let body = multipart_body(
        Some(&blog_json("Huge", false)),
        Some(("huge.png", "image/png", &big)),
    );
    let (status, reply) = send(&router, add_request(Some(&auth), body)).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(reply, json!({ "success": false, "message": "Image too large" }));

    let (_, listed) = send(&router, get_request("/api/admin/blogs", Some(&auth))).await;
    assert_eq!(listed["blogs"], json!([]));
}
