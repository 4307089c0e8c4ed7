// handlers/public/auth/mod.rs - Token acquisition

pub mod login; // POST /api/v1/auth/login

pub use login::login_post;
