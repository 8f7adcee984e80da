// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Router tests driven through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::{Body, to_bytes};
use http::{Request, StatusCode, header};
use shelf_dispatch::Dispatcher;
use shelf_gateway::{AppState, ExtensionContentTypes, router};
use shelf_test_utils::{MockBehavior, MockSource, MockTransformer, TestHarness};
use tower::ServiceExt;

fn app(harness: TestHarness) -> axum::Router {
    let dispatcher = Dispatcher::new(harness.registry, Arc::new(ExtensionContentTypes::new()));
    router(AppState::new(dispatcher))
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, body.to_vec())
}

fn error_message(body: &[u8]) -> String {
    let json: serde_json::Value = serde_json::from_slice(body).unwrap();
    json["error"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn streams_a_file_with_its_content_type() {
    let source = MockSource::new("mem").with_file("notes.txt", "hello");
    let app = app(TestHarness::builder().with_source(&source).build());

    let (status, content_type, body) = get(app, "/fileserver/notes.txt").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/plain"));
    assert_eq!(body, b"hello");
}

#[tokio::test]
async fn transformed_variant_keeps_the_requested_content_type() {
    let source = MockSource::new("mem").with_file("notes.txt", "quiet");
    let upper = MockTransformer::new("upper", "_upper");
    let app = app(
        TestHarness::builder()
            .with_source(&source)
            .with_transformer(&upper)
            .build(),
    );

    let (status, content_type, body) = get(app, "/fileserver/notes_upper.txt").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/plain"));
    assert_eq!(body, b"QUIET");
    assert_eq!(source.requests().await, vec!["notes.txt"]);
}

#[tokio::test]
async fn blank_name_is_a_bad_request() {
    let source = MockSource::new("mem");
    let harness = TestHarness::builder().with_source(&source).build();
    let app = app(harness);

    for uri in ["/fileserver/", "/fileserver", "/fileserver/%20"] {
        let (status, _, body) = get(app.clone(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(error_message(&body), "Invalid file name passed");
    }
    assert_eq!(source.request_count().await, 0);
}

#[tokio::test]
async fn missing_file_is_not_found() {
    let app = app(
        TestHarness::builder()
            .with_source(&MockSource::new("mem"))
            .build(),
    );

    let (status, _, body) = get(app, "/fileserver/missing.png").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        error_message(&body),
        "No file found for missing.png (missing.png)"
    );
}

#[tokio::test]
async fn unknown_extension_is_a_bad_request() {
    let source = MockSource::new("mem").with_file("data.zzz", "?");
    let app = app(TestHarness::builder().with_source(&source).build());

    let (status, _, body) = get(app, "/fileserver/data.zzz").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(&body),
        "No content type found for data.zzz (data.zzz)"
    );
}

#[tokio::test]
async fn lost_stream_is_a_generic_server_error() {
    let source = MockSource::new("mem").with_file("a.txt", "a");
    let leaky = MockTransformer::with_behavior("leaky", "_x", MockBehavior::DropStream);
    let app = app(
        TestHarness::builder()
            .with_source(&source)
            .with_transformer(&leaky)
            .build(),
    );

    let (status, _, body) = get(app, "/fileserver/a_x.txt").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_message(&body), "internal server error");
}

#[tokio::test]
async fn health_reports_registered_capabilities() {
    let source = MockSource::new("mem");
    let upper = MockTransformer::new("upper", "_upper");
    let app = app(
        TestHarness::builder()
            .with_source(&source)
            .with_transformer(&upper)
            .build(),
    );

    let (status, content_type, body) = get(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["file_sources"], 1);
    assert_eq!(json["transformers"], 1);
}
