// handlers/protected/profile/mod.rs - The caller's own account

pub mod get; // GET /api/v1/users/profile
pub mod image; // POST /api/v1/users/profile/image
pub mod utils;

pub use get::profile_get;
pub use image::profile_image_post;
