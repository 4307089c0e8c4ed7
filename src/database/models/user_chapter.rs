use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A recorded chapter completion, optionally with a quiz score
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserChapter {
    pub id: i64,
    pub user_id: i64,
    pub chapter_id: i64,
    pub completed_at: Option<DateTime<Utc>>,
    pub quiz_score: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUserChapter {
    pub user_id: i64,
    pub chapter_id: i64,
    pub completed_at: Option<DateTime<Utc>>,
    pub quiz_score: Option<f64>,
}

/// Quiz result joined with the chapter name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct QuizScore {
    pub chapter_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}
