use axum::{
    extract::{DefaultBodyLimit, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    response::{IntoResponse, Json},
    routing::{delete, get, post},
    Router,
};
use serde_json::{json, Value};
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::handlers::{elevated, protected, public};
use crate::middleware::{jwt_auth_middleware, require_admin};
use crate::state::AppState;

pub const API_PREFIX: &str = "/api/v1";

/// Full application router: API under `/api/v1`, uploads under `/uploads`
pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    let api = Router::new()
        .merge(public_routes())
        .merge(protected_routes(state.clone()))
        .merge(elevated_routes(state.clone()));

    let mut router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .nest(API_PREFIX, api)
        .nest_service("/uploads", ServeDir::new(&config.server.upload_dir))
        // Global middleware
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .layer(cors_layer(&config.security.cors_origins));

    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(public::users::register_post))
        .route("/auth/login", post(public::auth::login_post))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/users/profile", get(protected::profile::profile_get))
        .route("/users/profile/image", post(protected::profile::profile_image_post))
        .route(
            "/user-chapters",
            post(protected::user_chapters::user_chapter_post).get(protected::user_chapters::quiz_scores_get),
        )
        .route(
            "/user-chapters/check-completion",
            post(protected::user_chapters::check_completion_post),
        )
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn elevated_routes(state: AppState) -> Router<AppState> {
    use elevated::admin;

    Router::new()
        .route("/users/admin", post(admin::admin_post))
        .route("/users/summary/students", get(admin::student_summary_get))
        .route("/users/summary/admins", get(admin::admin_summary_get))
        .route("/users/mahasiswa", get(admin::students_get))
        .route("/users/:id", delete(admin::user_delete))
        .route("/user-chapters/summary/all-scores", get(admin::all_scores_get))
        // Layers run bottom-up: token first, then the role gate
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers([header::CONTENT_LENGTH])
        .max_age(Duration::from_secs(12 * 60 * 60));

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(allowed))
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "description": env!("CARGO_PKG_DESCRIPTION"),
        "endpoints": {
            "health": "/health (public)",
            "users": "/api/v1/users (public register), /api/v1/users/profile (bearer)",
            "auth": "/api/v1/auth/login (public)",
            "user_chapters": "/api/v1/user-chapters (bearer)",
            "admin": "/api/v1/users/summary/*, /api/v1/users/mahasiswa, /api/v1/user-chapters/summary/all-scores (admin)",
            "uploads": "/uploads/profile_images/* (public)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.users.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
