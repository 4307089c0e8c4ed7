pub mod user_chapter_service;
pub mod user_service;

pub use user_chapter_service::{UserChapterService, UserChapterServiceError};
pub use user_service::{UserService, UserServiceError};
