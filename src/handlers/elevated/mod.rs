// handlers/elevated/mod.rs - Elevated handlers (admin role required)
//
// Routes here run `jwt_auth_middleware` and then `require_admin`; a valid
// token without the admin role answers 403.

pub mod admin;
