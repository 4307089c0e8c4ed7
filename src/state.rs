use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::{JwtError, JwtUtil};
use crate::config::AppConfig;
use crate::database::{PgUserChapterRepository, PgUserRepository, UserChapterRepository, UserRepository};
use crate::services::{UserChapterService, UserService};

/// Shared handler state; cheap to clone
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub jwt: Arc<JwtUtil>,
    pub users: Arc<UserService>,
    pub user_chapters: Arc<UserChapterService>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        user_repo: Arc<dyn UserRepository>,
        user_chapter_repo: Arc<dyn UserChapterRepository>,
    ) -> Result<Self, JwtError> {
        let jwt = Arc::new(JwtUtil::new(&config.security.secret_key, config.security.jwt_expiry_hours)?);
        let users = UserService::new(user_repo, jwt.clone()).with_password_cost(config.security.bcrypt_cost);

        Ok(Self {
            config: Arc::new(config),
            jwt,
            users: Arc::new(users),
            user_chapters: Arc::new(UserChapterService::new(user_chapter_repo)),
        })
    }

    /// Postgres-backed state for the server binary
    pub fn from_pool(config: AppConfig, pool: PgPool) -> Result<Self, JwtError> {
        Self::new(
            config,
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgUserChapterRepository::new(pool)),
        )
    }
}
