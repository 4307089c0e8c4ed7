// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Account creation and token acquisition. Every input is untrusted, so
// request bodies are validated before they reach a service.

pub mod auth;
pub mod users;
