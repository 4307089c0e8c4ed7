// testing/mod.rs - In-memory storage and a ready-made app for router tests
//
// The in-memory repositories mirror what the Postgres ones observably do:
// unique emails, cascade on user delete, foreign-key checks on chapter
// rows and the LEFT JOIN shape of `score_rows`.

use async_trait::async_trait;
use axum::Router;
use chrono::Utc;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::api::CreateUserRequest;
use crate::config::AppConfig;
use crate::database::manager::DatabaseError;
use crate::database::models::{NewUser, NewUserChapter, QuizScore, Role, User, UserChapter};
use crate::database::repository::{UserChapterRepository, UserRepository};
use crate::state::AppState;
use crate::summary::ScoreRow;

/// Password used by every seeded account
pub const TEST_PASSWORD: &str = "rahasia123";

#[derive(Default)]
struct StoreState {
    users: Vec<User>,
    chapters: BTreeMap<i64, String>,
    user_chapters: Vec<UserChapter>,
    next_user_id: i64,
    next_user_chapter_id: i64,
    offline: bool,
}

/// Shared tables behind both in-memory repositories
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<StoreState>>,
}

impl InMemoryStore {
    pub async fn add_chapter(&self, id: i64, name: &str) {
        self.inner.write().await.chapters.insert(id, name.to_string());
    }

    /// Insert a user directly; the stored password hash never verifies
    pub async fn add_user(&self, name: &str, email: &str, class: Option<&str>, role: Role) -> i64 {
        let mut state = self.inner.write().await;
        state.next_user_id += 1;
        let now = Utc::now();
        let user = User {
            id: state.next_user_id,
            name: name.to_string(),
            email: email.to_string(),
            password: "!".to_string(),
            class: class.map(str::to_string),
            birthday: None,
            role: role.as_str().to_string(),
            profile_url: None,
            created_at: now,
            updated_at: now,
        };
        state.users.push(user);
        state.next_user_id
    }

    pub async fn user(&self, id: i64) -> Option<User> {
        self.inner.read().await.users.iter().find(|u| u.id == id).cloned()
    }

    /// Simulate a lost database: `ping` starts failing
    pub async fn set_offline(&self, offline: bool) {
        self.inner.write().await.offline = offline;
    }
}

#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    store: InMemoryStore,
}

impl InMemoryUserRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut state = self.store.inner.write().await;
        if state.users.iter().any(|u| u.email == user.email) {
            return Err(DatabaseError::Conflict(format!("user with email {} already exists", user.email)));
        }

        state.next_user_id += 1;
        let now = Utc::now();
        let created = User {
            id: state.next_user_id,
            name: user.name,
            email: user.email,
            password: user.password,
            class: user.class,
            birthday: user.birthday,
            role: user.role.as_str().to_string(),
            profile_url: None,
            created_at: now,
            updated_at: now,
        };
        state.users.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        Ok(self.store.user(id).await)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let state = self.store.inner.read().await;
        Ok(state.users.iter().find(|u| u.email == email).cloned())
    }

    async fn update_profile_url(&self, id: i64, profile_url: &str) -> Result<(), DatabaseError> {
        let mut state = self.store.inner.write().await;
        let user = state
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| DatabaseError::NotFound(format!("user {}", id)))?;
        user.profile_url = Some(profile_url.to_string());
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn delete_user(&self, id: i64) -> Result<(), DatabaseError> {
        let mut state = self.store.inner.write().await;
        let before = state.users.len();
        state.users.retain(|u| u.id != id);
        if state.users.len() == before {
            return Err(DatabaseError::NotFound(format!("user {}", id)));
        }
        state.user_chapters.retain(|uc| uc.user_id != id);
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        Ok(self.store.inner.read().await.users.clone())
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, DatabaseError> {
        let state = self.store.inner.read().await;
        Ok(state.users.iter().filter(|u| u.has_role(role)).cloned().collect())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        if self.store.inner.read().await.offline {
            return Err(DatabaseError::Sqlx(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryUserChapterRepository {
    store: InMemoryStore,
}

impl InMemoryUserChapterRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserChapterRepository for InMemoryUserChapterRepository {
    async fn create_user_chapter(&self, user_chapter: NewUserChapter) -> Result<UserChapter, DatabaseError> {
        let mut state = self.store.inner.write().await;
        let user_exists = state.users.iter().any(|u| u.id == user_chapter.user_id);
        if !user_exists || !state.chapters.contains_key(&user_chapter.chapter_id) {
            return Err(DatabaseError::NotFound(format!(
                "chapter {} or user {} does not exist",
                user_chapter.chapter_id, user_chapter.user_id
            )));
        }

        state.next_user_chapter_id += 1;
        let now = Utc::now();
        let row = UserChapter {
            id: state.next_user_chapter_id,
            user_id: user_chapter.user_id,
            chapter_id: user_chapter.chapter_id,
            completed_at: user_chapter.completed_at,
            quiz_score: user_chapter.quiz_score,
            created_at: now,
            updated_at: now,
        };
        state.user_chapters.push(row.clone());
        Ok(row)
    }

    async fn quiz_scores_for_user(&self, user_id: i64) -> Result<Vec<QuizScore>, DatabaseError> {
        let state = self.store.inner.read().await;
        let mut rows: Vec<&UserChapter> = state.user_chapters.iter().filter(|uc| uc.user_id == user_id).collect();
        rows.sort_by_key(|uc| (uc.chapter_id, uc.id));

        Ok(rows
            .into_iter()
            .filter_map(|uc| {
                state.chapters.get(&uc.chapter_id).map(|name| QuizScore {
                    chapter_name: name.clone(),
                    quiz_score: uc.quiz_score,
                    completed_at: uc.completed_at,
                })
            })
            .collect())
    }

    async fn has_completed(&self, user_id: i64, chapter_id: i64) -> Result<bool, DatabaseError> {
        let state = self.store.inner.read().await;
        Ok(state
            .user_chapters
            .iter()
            .any(|uc| uc.user_id == user_id && uc.chapter_id == chapter_id))
    }

    async fn score_rows(&self) -> Result<Vec<ScoreRow>, DatabaseError> {
        let state = self.store.inner.read().await;
        let mut rows = Vec::new();

        for user in state.users.iter().filter(|u| u.has_role(Role::Mahasiswa)) {
            let class = user.class.clone().unwrap_or_default();
            let mut chapters: Vec<&UserChapter> =
                state.user_chapters.iter().filter(|uc| uc.user_id == user.id).collect();
            chapters.sort_by_key(|uc| uc.chapter_id);

            if chapters.is_empty() {
                rows.push(ScoreRow::new(user.id, user.name.clone(), class, ScoreRow::NO_CHAPTER, 0.0));
                continue;
            }
            for uc in chapters {
                rows.push(ScoreRow::new(
                    user.id,
                    user.name.clone(),
                    class.clone(),
                    uc.chapter_id,
                    uc.quiz_score.unwrap_or(0.0),
                ));
            }
        }

        Ok(rows)
    }
}

/// Registration body with the shared test password
pub fn student_request(name: &str, email: &str, class: Option<&str>) -> CreateUserRequest {
    CreateUserRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: TEST_PASSWORD.to_string(),
        class: class.map(str::to_string),
        birthday: None,
    }
}

/// App state over the in-memory store with a private upload directory
pub struct TestContext {
    pub store: InMemoryStore,
    pub state: AppState,
    upload_dir: PathBuf,
}

impl TestContext {
    pub fn new() -> anyhow::Result<Self> {
        let upload_dir = std::env::temp_dir().join(format!("edu-api-test-{}", Uuid::new_v4().simple()));
        let config = AppConfig::for_tests(upload_dir.to_string_lossy());

        let store = InMemoryStore::default();
        let state = AppState::new(
            config,
            Arc::new(InMemoryUserRepository::new(store.clone())),
            Arc::new(InMemoryUserChapterRepository::new(store.clone())),
        )?;

        Ok(Self {
            store,
            state,
            upload_dir,
        })
    }

    pub fn app(&self) -> Router {
        crate::router::app(self.state.clone())
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub async fn seed_student(&self, name: &str, email: &str, class: Option<&str>) -> anyhow::Result<User> {
        Ok(self
            .state
            .users
            .register(student_request(name, email, class), Role::Mahasiswa)
            .await?)
    }

    pub async fn seed_admin(&self, name: &str, email: &str) -> anyhow::Result<User> {
        Ok(self
            .state
            .users
            .register(student_request(name, email, None), Role::Admin)
            .await?)
    }

    pub fn token_for(&self, user: &User) -> anyhow::Result<String> {
        Ok(self.state.jwt.generate_token(user)?)
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        if self.upload_dir.exists() {
            let _ = std::fs::remove_dir_all(&self.upload_dir);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn score_rows_follow_left_join_shape() {
        let store = InMemoryStore::default();
        store.add_chapter(2, "Loop").await;
        store.add_chapter(1, "Intro").await;
        let a = store.add_user("A", "a@x.id", Some("K1"), Role::Mahasiswa).await;
        let b = store.add_user("B", "b@x.id", None, Role::Mahasiswa).await;
        store.add_user("Admin", "admin@x.id", None, Role::Admin).await;

        let repo = InMemoryUserChapterRepository::new(store.clone());
        for chapter_id in [2, 1] {
            repo.create_user_chapter(NewUserChapter {
                user_id: a,
                chapter_id,
                completed_at: None,
                quiz_score: None,
            })
            .await
            .unwrap();
        }

        let rows = repo.score_rows().await.unwrap();
        assert_eq!(
            rows,
            vec![
                ScoreRow::new(a, "A", "K1", 1, 0.0),
                ScoreRow::new(a, "A", "K1", 2, 0.0),
                ScoreRow::new(b, "B", "", ScoreRow::NO_CHAPTER, 0.0),
            ]
        );
    }

    #[tokio::test]
    async fn deleting_a_user_cascades() {
        let store = InMemoryStore::default();
        store.add_chapter(1, "Intro").await;
        let id = store.add_user("A", "a@x.id", None, Role::Mahasiswa).await;

        let users = InMemoryUserRepository::new(store.clone());
        let chapters = InMemoryUserChapterRepository::new(store.clone());
        chapters
            .create_user_chapter(NewUserChapter {
                user_id: id,
                chapter_id: 1,
                completed_at: None,
                quiz_score: Some(70.0),
            })
            .await
            .unwrap();

        users.delete_user(id).await.unwrap();
        assert!(!chapters.has_completed(id, 1).await.unwrap());
        assert!(matches!(users.delete_user(id).await, Err(DatabaseError::NotFound(_))));
    }
}
