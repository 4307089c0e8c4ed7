// handlers/public/users/mod.rs - Self-service registration

pub mod register; // POST /api/v1/users

pub use register::register_post;
