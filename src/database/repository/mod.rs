// database/repository/mod.rs - Storage seams used by the services
//
// Services only see these traits. `PgUserRepository` / `PgUserChapterRepository`
// run the SQL; `crate::testing` provides in-memory versions with the same
// observable behaviour for router-level tests.

use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewUser, NewUserChapter, QuizScore, Role, User, UserChapter};
use crate::summary::ScoreRow;

pub mod user;
pub mod user_chapter;

pub use user::PgUserRepository;
pub use user_chapter::PgUserChapterRepository;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user; duplicate email is `DatabaseError::Conflict`
    async fn create_user(&self, user: NewUser) -> Result<User, DatabaseError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    /// `DatabaseError::NotFound` when no row was updated
    async fn update_profile_url(&self, id: i64, profile_url: &str) -> Result<(), DatabaseError>;

    /// `DatabaseError::NotFound` when no row was deleted
    async fn delete_user(&self, id: i64) -> Result<(), DatabaseError>;

    /// All users, ascending by id
    async fn list_users(&self) -> Result<Vec<User>, DatabaseError>;

    /// Users with the given role, ascending by id
    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, DatabaseError>;

    async fn ping(&self) -> Result<(), DatabaseError>;
}

#[async_trait]
pub trait UserChapterRepository: Send + Sync {
    async fn create_user_chapter(&self, user_chapter: NewUserChapter) -> Result<UserChapter, DatabaseError>;

    async fn quiz_scores_for_user(&self, user_id: i64) -> Result<Vec<QuizScore>, DatabaseError>;

    async fn has_completed(&self, user_id: i64, chapter_id: i64) -> Result<bool, DatabaseError>;

    /// Every student joined with their chapter rows; students without any
    /// chapter appear once with chapter id 0 and score 0.
    async fn score_rows(&self) -> Result<Vec<ScoreRow>, DatabaseError>;
}
