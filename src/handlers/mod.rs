// handlers/mod.rs - 3-Tier Handler Architecture
//
// Public (no auth) → Protected (JWT auth) → Elevated (JWT auth + admin role)
//
// The tiers only group handlers; the middleware that enforces each tier is
// attached in `crate::router`.
pub mod public; // Tier 1: registration and login
pub mod protected; // Tier 2: the caller's own profile and chapter progress
pub mod elevated; // Tier 3: admin-only user management and summaries
