mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use common::{get, post_file, post_json, send, TestContext};

async fn student_with_chapters(ctx: &TestContext) -> Result<String> {
    ctx.store.add_chapter(1, "Pengenalan Algoritma").await;
    ctx.store.add_chapter(2, "Percabangan").await;
    let user = ctx.seed_student("Budi", "budi@kampus.id", Some("TI-2")).await?;
    ctx.token_for(&user)
}

#[tokio::test]
async fn record_and_read_back_quiz_scores() -> Result<()> {
    let ctx = TestContext::new()?;
    let token = student_with_chapters(&ctx).await?;
    let app = ctx.app();

    let (status, body) = send(
        &app,
        post_json(
            "/api/v1/user-chapters",
            Some(&token),
            json!({"chapter_id": 2, "completed_at": "2024-05-01T08:30:00Z", "quiz_score": 87.5}),
        ),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User chapter created successfully");
    assert!(body["id"].as_i64().unwrap() > 0);

    send(&app, post_json("/api/v1/user-chapters", Some(&token), json!({"chapter_id": 1}))).await?;

    let (status, body) = send(&app, get("/api/v1/user-chapters", Some(&token))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User quiz scores retrieved successfully");

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["chapter_name"], "Pengenalan Algoritma");
    assert!(data[0].get("quiz_score").is_none());
    assert_eq!(data[1]["chapter_name"], "Percabangan");
    assert_eq!(data[1]["quiz_score"], 87.5);
    Ok(())
}

#[tokio::test]
async fn bad_chapter_ids() -> Result<()> {
    let ctx = TestContext::new()?;
    let token = student_with_chapters(&ctx).await?;
    let app = ctx.app();

    let (status, body) = send(&app, post_json("/api/v1/user-chapters", Some(&token), json!({"quiz_score": 50}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Chapter ID must be a positive integer");

    let (status, _) = send(&app, post_json("/api/v1/user-chapters", Some(&token), json!({"chapter_id": 99}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        post_json("/api/v1/user-chapters/check-completion", Some(&token), json!({"chapter_id": 0})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn check_completion_messages() -> Result<()> {
    let ctx = TestContext::new()?;
    let token = student_with_chapters(&ctx).await?;
    let app = ctx.app();

    let (status, body) = send(
        &app,
        post_json("/api/v1/user-chapters/check-completion", Some(&token), json!({"chapter_id": 1})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_completed"], false);
    assert_eq!(body["message"], "User has not completed chapter 1 yet");

    send(&app, post_json("/api/v1/user-chapters", Some(&token), json!({"chapter_id": 1}))).await?;

    let (_, body) = send(
        &app,
        post_json("/api/v1/user-chapters/check-completion", Some(&token), json!({"chapter_id": 1})),
    )
    .await?;
    assert_eq!(body["is_completed"], true);
    assert_eq!(body["chapter_id"], 1);
    assert_eq!(body["message"], "User has completed chapter 1");
    Ok(())
}

#[tokio::test]
async fn chapter_routes_need_a_token() -> Result<()> {
    let ctx = TestContext::new()?;
    let app = ctx.app();

    let (status, _) = send(&app, get("/api/v1/user-chapters", None)).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = send(&app, post_json("/api/v1/user-chapters", None, json!({"chapter_id": 1}))).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn profile_image_upload_is_stored_and_served() -> Result<()> {
    let ctx = TestContext::new()?;
    let user = ctx.seed_student("Budi", "budi@kampus.id", None).await?;
    let token = ctx.token_for(&user)?;
    let app = ctx.app();

    let (status, body) = send(
        &app,
        post_file(
            "/api/v1/users/profile/image",
            Some(&token),
            "profile_image",
            "foto saya (1).png",
            "not-really-a-png",
        ),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Profile image updated successfully");

    let profile_url = body["profile_url"].as_str().unwrap().to_string();
    let prefix = format!("{}/uploads/profile_images/", ctx.state.config.server.base_url);
    assert!(profile_url.starts_with(&prefix));
    let file_name = &profile_url[prefix.len()..];
    assert!(file_name.ends_with("_foto_saya_1.png"));

    let stored = ctx.upload_dir().join("profile_images").join(file_name);
    assert_eq!(std::fs::read_to_string(&stored)?, "not-really-a-png");

    let (_, profile) = send(&app, get("/api/v1/users/profile", Some(&token))).await?;
    assert_eq!(profile["profile_url"], profile_url.as_str());

    let (status, _) = send(&app, get(&format!("/uploads/profile_images/{}", file_name), None)).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn upload_without_image_field_is_rejected() -> Result<()> {
    let ctx = TestContext::new()?;
    let user = ctx.seed_student("Budi", "budi@kampus.id", None).await?;
    let token = ctx.token_for(&user)?;

    let (status, body) = send(
        &ctx.app(),
        post_file("/api/v1/users/profile/image", Some(&token), "avatar", "a.png", "x"),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Failed to get profile image file");
    Ok(())
}
