mod common;

use anyhow::Result;
use axum::http::StatusCode;

use common::{get, send, TestContext};

#[tokio::test]
async fn root_describes_service() -> Result<()> {
    let ctx = TestContext::new()?;
    let (status, body) = send(&ctx.app(), get("/", None)).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "edu-api-rust");
    assert!(body["endpoints"].is_object());
    Ok(())
}

#[tokio::test]
async fn health_reports_database_state() -> Result<()> {
    let ctx = TestContext::new()?;
    let app = ctx.app();

    let (status, body) = send(&app, get("/health", None)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");

    ctx.store.set_offline(true).await;
    let (status, body) = send(&app, get("/health", None)).await?;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["database"], "unavailable");
    Ok(())
}

#[tokio::test]
async fn unknown_route_is_not_found() -> Result<()> {
    let ctx = TestContext::new()?;
    let (status, _) = send(&ctx.app(), get("/api/v1/nope", None)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}
