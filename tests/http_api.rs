//! HTTP control surface smoke tests

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use egg_timer::{api::create_router, state::AppState};

fn test_router() -> (Arc<AppState>, axum::Router) {
    let state = Arc::new(AppState::new(0, "127.0.0.1".to_string()));
    let router = create_router(Arc::clone(&state));
    (state, router)
}

fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_endpoint_responds() {
    let (_state, app) = test_router();

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn duration_and_start_round_trip_through_status() {
    let (_state, app) = test_router();

    let response = app
        .clone()
        .oneshot(post_json("/duration", r#"{"minutes":2}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(post("/start")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "running");

    let response = app.clone().oneshot(get("/status")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["display"], "02 : 00");
    assert_eq!(body["phase"], "running");
    assert_eq!(body["timer"]["remaining_seconds"], 120);
    assert_eq!(body["last_action"], "start");
}

#[tokio::test]
async fn pause_and_reset_report_their_phase() {
    let (_state, app) = test_router();

    app.clone()
        .oneshot(post_json("/duration", r#"{"minutes":1}"#))
        .await
        .unwrap();
    app.clone().oneshot(post("/start")).await.unwrap();

    let response = app.clone().oneshot(post("/pause")).await.unwrap();
    let body = json_body(response).await;
    assert_eq!(body["status"], "paused");
    assert_eq!(body["message"], "Countdown paused");

    let response = app.clone().oneshot(post("/pause")).await.unwrap();
    let body = json_body(response).await;
    assert_eq!(body["status"], "running");
    assert_eq!(body["message"], "Countdown resumed");

    let response = app.clone().oneshot(post("/reset")).await.unwrap();
    let body = json_body(response).await;
    assert_eq!(body["status"], "idle");
    assert_eq!(body["timer"]["remaining_seconds"], 0);
}

#[tokio::test]
async fn starting_with_nothing_on_the_clock_expires() {
    let (state, app) = test_router();
    let mut expiry_rx = state.subscribe_expiry();

    let response = app.clone().oneshot(post("/start")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "idle");
    assert_eq!(body["message"], "Countdown expired");

    assert!(expiry_rx.try_recv().is_ok());
    assert!(expiry_rx.try_recv().is_err());

    let response = app.clone().oneshot(get("/status")).await.unwrap();
    let body = json_body(response).await;
    assert!(body["last_expiry"].is_string());
}

#[tokio::test]
async fn malformed_duration_input_is_rejected() {
    let (_state, app) = test_router();

    let response = app
        .clone()
        .oneshot(post_json("/duration", r#"{"minutes":1.5}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app
        .clone()
        .oneshot(post_json("/duration", r#"{"minutes":-3}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app
        .clone()
        .oneshot(post_json("/duration", r#"{"minutes":"soon"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Rejected input leaves the countdown untouched
    let response = app.clone().oneshot(get("/status")).await.unwrap();
    let body = json_body(response).await;
    assert_eq!(body["timer"]["remaining_seconds"], 0);
}
