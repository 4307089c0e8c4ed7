// handlers/protected/user_chapters/mod.rs - Chapter progress of the caller
//
// The user id always comes from the token, never from the body.

pub mod completion; // POST /api/v1/user-chapters/check-completion
pub mod create; // POST /api/v1/user-chapters
pub mod quiz_scores; // GET /api/v1/user-chapters

pub use completion::check_completion_post;
pub use create::user_chapter_post;
pub use quiz_scores::quiz_scores_get;
