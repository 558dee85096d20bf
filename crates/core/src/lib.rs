//! Domain types and pure logic for the devpulse monitoring backend.
//!
//! Nothing in this crate performs I/O; database access lives in
//! `devpulse-db` and HTTP concerns in `devpulse-api`.

pub mod alert;
pub mod billing;
pub mod credentials;
pub mod date_range;
pub mod error;
pub mod providers;
pub mod service_type;
pub mod subscription;
pub mod types;
pub mod widget;
