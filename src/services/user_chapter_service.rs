use std::sync::Arc;

use crate::api::CreateUserChapterRequest;
use crate::database::manager::DatabaseError;
use crate::database::models::{NewUserChapter, QuizScore, UserChapter};
use crate::database::repository::UserChapterRepository;
use crate::summary::{aggregate_chapter_scores, UserChapterScoresSummary};

#[derive(Debug, thiserror::Error)]
pub enum UserChapterServiceError {
    #[error("user ID must be a positive integer")]
    InvalidUserId,

    #[error("Chapter ID must be a positive integer")]
    InvalidChapterId,

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Chapter completion records and the admin score summary
pub struct UserChapterService {
    user_chapters: Arc<dyn UserChapterRepository>,
}

impl UserChapterService {
    pub fn new(user_chapters: Arc<dyn UserChapterRepository>) -> Self {
        Self { user_chapters }
    }

    pub async fn record_completion(
        &self,
        user_id: i64,
        request: CreateUserChapterRequest,
    ) -> Result<UserChapter, UserChapterServiceError> {
        if user_id <= 0 {
            return Err(UserChapterServiceError::InvalidUserId);
        }
        if request.chapter_id <= 0 {
            return Err(UserChapterServiceError::InvalidChapterId);
        }

        let row = self
            .user_chapters
            .create_user_chapter(NewUserChapter {
                user_id,
                chapter_id: request.chapter_id,
                completed_at: request.completed_at,
                quiz_score: request.quiz_score,
            })
            .await?;

        tracing::debug!("User {} recorded chapter {} (row {})", user_id, row.chapter_id, row.id);
        Ok(row)
    }

    pub async fn quiz_scores(&self, user_id: i64) -> Result<Vec<QuizScore>, UserChapterServiceError> {
        Ok(self.user_chapters.quiz_scores_for_user(user_id).await?)
    }

    pub async fn has_completed(&self, user_id: i64, chapter_id: i64) -> Result<bool, UserChapterServiceError> {
        if chapter_id <= 0 {
            return Err(UserChapterServiceError::InvalidChapterId);
        }
        Ok(self.user_chapters.has_completed(user_id, chapter_id).await?)
    }

    /// Every student with their chapter scores, ascending by id
    pub async fn scores_summary(&self) -> Result<UserChapterScoresSummary, UserChapterServiceError> {
        let rows = self.user_chapters.score_rows().await?;
        Ok(aggregate_chapter_scores(rows).into())
    }
}
