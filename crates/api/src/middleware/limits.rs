//! Subscription-limit guards.
//!
//! Each guard wraps [`AuthUser`], loads the caller's plan and current usage,
//! and rejects with 403 Forbidden when one more resource would exceed the
//! plan's cap. Put the guard in a handler's parameter list to enforce the
//! limit before the handler body runs.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use devpulse_core::error::CoreError;
use devpulse_core::subscription::{check_integration_limit, check_project_limit};
use devpulse_db::models::user::User;
use devpulse_db::repositories::{ProjectRepo, ServiceIntegrationRepo, UserRepo};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Load the user a token refers to. A token for a deleted user is treated as
/// invalid.
pub async fn current_user(state: &AppState, auth: &AuthUser) -> Result<User, AppError> {
    UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Unknown user".into())))
}

/// The caller may create one more project.
///
/// ```ignore
/// async fn create(WithinProjectLimit(user): WithinProjectLimit) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct WithinProjectLimit(pub AuthUser);

impl FromRequestParts<AppState> for WithinProjectLimit {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;
        let user = current_user(state, &auth).await?;
        let current = ProjectRepo::count_by_user(&state.pool, user.id).await?;

        if let Err(e) = check_project_limit(user.subscription_status, current) {
            tracing::info!(user_id = user.id, current, "Project limit reached");
            return Err(e.into());
        }
        Ok(WithinProjectLimit(auth))
    }
}

/// The caller may create one more service integration.
pub struct WithinIntegrationLimit(pub AuthUser);

impl FromRequestParts<AppState> for WithinIntegrationLimit {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;
        let user = current_user(state, &auth).await?;
        let current = ServiceIntegrationRepo::count_by_user(&state.pool, user.id).await?;

        if let Err(e) = check_integration_limit(user.subscription_status, current) {
            tracing::info!(user_id = user.id, current, "Integration limit reached");
            return Err(e.into());
        }
        Ok(WithinIntegrationLimit(auth))
    }
}
