// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Every route here sits behind `jwt_auth_middleware`, so handlers can take
// `Extension<AuthUser>` and act on the caller's own records.

pub mod profile; // GET /users/profile, POST /users/profile/image
pub mod user_chapters; // chapter completion and quiz scores
