// api/mod.rs - Request and response bodies
//
// Wire shapes live here so handlers and services agree on field names.
// Summary shapes (`usersScores`, `classCounts`) come from `crate::summary`.

pub mod summary;
pub mod user;
pub mod user_chapter;
pub mod validate;

pub use summary::{AdminSummary, StudentSummary};
pub use user::{CreateUserRequest, LoginRequest, LoginResponse, MessageResponse, ProfileImageResponse, UserResponse};
pub use user_chapter::{
    ChapterCompletionResponse, CheckChapterCompletionRequest, CreateUserChapterRequest, CreateUserChapterResponse,
    QuizScoresResponse,
};
