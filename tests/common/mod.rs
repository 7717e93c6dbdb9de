#![allow(dead_code)]

use std::collections::HashMap;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header::CONTENT_TYPE},
    response::Response,
};
use serde_json::Value;
use speed_alert_relay::config::Config;
use tower::ServiceExt;

pub fn config_from(pairs: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(move |key| vars.get(key).cloned()).expect("valid test configuration")
}

pub fn telegram_config(cooldown_secs: u64) -> Config {
    let cooldown = cooldown_secs.to_string();
    config_from(&[
        ("TELEGRAM_API_TOKEN", "test-token"),
        ("TELEGRAM_USER_ID", "42"),
        ("ALERT_COOLDOWN_SECS", &cooldown),
    ])
}

pub fn main_st_alert() -> Value {
    serde_json::json!({
        "street": "Main St",
        "coordinates": "1.23,4.56",
        "speed": 120
    })
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.expect("router is infallible")
}

pub async fn post_raw(app: &Router, uri: &str, body: impl Into<Body>) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap();
    send(app, request).await
}

pub async fn post_alert(app: &Router, body: &Value) -> (StatusCode, Value) {
    let response = post_raw(app, "/api/alert", body.to_string()).await;
    into_json(response).await
}

pub async fn into_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
