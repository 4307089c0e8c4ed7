use async_trait::async_trait;
use sqlx::PgPool;

use super::UserChapterRepository;
use crate::database::manager::DatabaseError;
use crate::database::models::{NewUserChapter, QuizScore, Role, UserChapter};
use crate::summary::ScoreRow;

pub struct PgUserChapterRepository {
    pool: PgPool,
}

impl PgUserChapterRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserChapterRepository for PgUserChapterRepository {
    async fn create_user_chapter(&self, user_chapter: NewUserChapter) -> Result<UserChapter, DatabaseError> {
        let row = sqlx::query_as::<_, UserChapter>(
            "INSERT INTO user_chapters (user_id, chapter_id, completed_at, quiz_score, created_at, updated_at)
             VALUES ($1, $2, $3, $4, NOW(), NOW())
             RETURNING id, user_id, chapter_id, completed_at, quiz_score, created_at, updated_at",
        )
        .bind(user_chapter.user_id)
        .bind(user_chapter.chapter_id)
        .bind(user_chapter.completed_at)
        .bind(user_chapter.quiz_score)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return DatabaseError::NotFound(format!(
                        "chapter {} or user {} does not exist",
                        user_chapter.chapter_id, user_chapter.user_id
                    ));
                }
            }
            DatabaseError::Sqlx(e)
        })?;

        Ok(row)
    }

    async fn quiz_scores_for_user(&self, user_id: i64) -> Result<Vec<QuizScore>, DatabaseError> {
        let scores = sqlx::query_as::<_, QuizScore>(
            r#"
            SELECT
                c.name AS chapter_name,
                uc.quiz_score,
                uc.completed_at
            FROM user_chapters uc
            JOIN chapters c ON uc.chapter_id = c.id
            WHERE uc.user_id = $1
            ORDER BY uc.chapter_id, uc.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(scores)
    }

    async fn has_completed(&self, user_id: i64, chapter_id: i64) -> Result<bool, DatabaseError> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(id) FROM user_chapters WHERE user_id = $1 AND chapter_id = $2")
                .bind(user_id)
                .bind(chapter_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count.0 > 0)
    }

    async fn score_rows(&self) -> Result<Vec<ScoreRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ScoreRow>(
            r#"
            SELECT
                u.id AS user_id,
                u.name AS user_name,
                COALESCE(u.class, '') AS user_class,
                COALESCE(uc.chapter_id, 0) AS chapter_id,
                COALESCE(uc.quiz_score, 0.0)::DOUBLE PRECISION AS score
            FROM users u
            LEFT JOIN user_chapters uc ON u.id = uc.user_id
            WHERE u.role = $1
            ORDER BY u.id, uc.chapter_id
            "#,
        )
        .bind(Role::Mahasiswa.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
