pub mod user;
pub mod user_chapter;

pub use user::{NewUser, Role, User};
pub use user_chapter::{NewUserChapter, QuizScore, UserChapter};
