use async_trait::async_trait;
use sqlx::PgPool;

use super::UserRepository;
use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{NewUser, Role, User};

const USER_COLUMNS: &str =
    "id, name, email, password, class, birthday, role, profile_url, created_at, updated_at";

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let query = format!(
            "INSERT INTO users (name, email, password, class, birthday, role, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
             RETURNING {}",
            USER_COLUMNS
        );

        sqlx::query_as::<_, User>(&query)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password)
            .bind(&user.class)
            .bind(user.birthday)
            .bind(user.role.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_insert(e, format!("user with email {} already exists", user.email)))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let query = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn update_profile_url(&self, id: i64, profile_url: &str) -> Result<(), DatabaseError> {
        let result = sqlx::query("UPDATE users SET profile_url = $1, updated_at = NOW() WHERE id = $2")
            .bind(profile_url)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("user with ID {} not found", id)));
        }
        Ok(())
    }

    async fn delete_user(&self, id: i64) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("user with ID {} not found", id)));
        }
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        let query = format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS);
        let users = sqlx::query_as::<_, User>(&query).fetch_all(&self.pool).await?;
        Ok(users)
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, DatabaseError> {
        let query = format!("SELECT {} FROM users WHERE role = $1 ORDER BY id", USER_COLUMNS);
        let users = sqlx::query_as::<_, User>(&query)
            .bind(role.as_str())
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
