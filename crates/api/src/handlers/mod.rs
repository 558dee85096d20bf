//! Request handlers, one submodule per resource.
//!
//! Handlers delegate to the repositories in `devpulse_db` and map errors via
//! [`AppError`]. Every project-scoped handler resolves the project through
//! [`owned_project`] first, so another user's data reads as missing.

pub mod alert;
pub mod auth;
pub mod dashboard;
pub mod dashboard_widget;
pub mod metric;
pub mod project;
pub mod project_metrics;
pub mod service_integration;
pub mod subscription;
pub mod users;
pub mod webhook;

use devpulse_core::types::DbId;
use devpulse_db::models::project::Project;
use devpulse_db::repositories::ProjectRepo;
use devpulse_db::DbPool;

use crate::error::{AppError, AppResult};

/// Load a project the caller owns. Missing and foreign projects are both 404.
pub async fn owned_project(pool: &DbPool, user_id: DbId, project_id: DbId) -> AppResult<Project> {
    match ProjectRepo::find_by_id(pool, project_id).await? {
        Some(project) if project.user_id == user_id => Ok(project),
        _ => Err(AppError::not_found("Project", project_id)),
    }
}
