use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::models::QuizScore;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserChapterRequest {
    #[serde(default)]
    pub chapter_id: i64,
    pub completed_at: Option<DateTime<Utc>>,
    pub quiz_score: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserChapterResponse {
    pub message: String,
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizScoresResponse {
    pub message: String,
    pub data: Vec<QuizScore>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckChapterCompletionRequest {
    #[serde(default)]
    pub chapter_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterCompletionResponse {
    pub is_completed: bool,
    pub chapter_id: i64,
    pub user_id: i64,
    pub message: String,
}

impl ChapterCompletionResponse {
    pub fn new(user_id: i64, chapter_id: i64, is_completed: bool) -> Self {
        let message = if is_completed {
            format!("User has completed chapter {}", chapter_id)
        } else {
            format!("User has not completed chapter {} yet", chapter_id)
        };

        Self {
            is_completed,
            chapter_id,
            user_id,
            message,
        }
    }
}
