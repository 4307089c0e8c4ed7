#![allow(dead_code)]

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

pub use edu_api_rust::testing::{TestContext, TEST_PASSWORD};

pub const MULTIPART_BOUNDARY: &str = "edu-api-test-boundary";

/// Drive one request through the router in-process and decode the JSON body
pub async fn send(app: &Router, request: Request<Body>) -> Result<(StatusCode, Value)> {
    let response = app.clone().oneshot(request).await.context("router call failed")?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    Ok((status, body))
}

fn builder(method: Method, path: &str, token: Option<&str>) -> axum::http::request::Builder {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder
}

pub fn get(path: &str, token: Option<&str>) -> Request<Body> {
    builder(Method::GET, path, token).body(Body::empty()).unwrap()
}

pub fn delete(path: &str, token: Option<&str>) -> Request<Body> {
    builder(Method::DELETE, path, token).body(Body::empty()).unwrap()
}

pub fn post_json(path: &str, token: Option<&str>, body: Value) -> Request<Body> {
    builder(Method::POST, path, token)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_raw(path: &str, content_type: &str, body: &str) -> Request<Body> {
    builder(Method::POST, path, None)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Single-part `multipart/form-data` upload
pub fn post_file(path: &str, token: Option<&str>, field: &str, file_name: &str, contents: &str) -> Request<Body> {
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n{contents}\r\n--{b}--\r\n",
        b = MULTIPART_BOUNDARY,
    );
    builder(Method::POST, path, token)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Seed an admin and return its bearer token
pub async fn admin_token(ctx: &TestContext) -> Result<String> {
    let admin = ctx.seed_admin("Admin", "admin@kampus.id").await?;
    ctx.token_for(&admin)
}
