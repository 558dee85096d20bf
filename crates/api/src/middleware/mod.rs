//! Request extractors that authenticate the caller and enforce plan limits.
//!
//! - [`auth::AuthUser`] -- the caller's identity from a JWT Bearer token.
//! - [`limits::WithinProjectLimit`] -- rejects project creation past the plan cap.
//! - [`limits::WithinIntegrationLimit`] -- rejects integration creation past the plan cap.

pub mod auth;
pub mod limits;
