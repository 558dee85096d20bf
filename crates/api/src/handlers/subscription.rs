//! Handlers for the `/subscription` resource: plan status, checkout and the
//! billing portal.

use axum::extract::State;
use axum::Json;
use devpulse_core::subscription::{SubscriptionStatus, Usage};
use devpulse_db::repositories::{ProjectRepo, ServiceIntegrationRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::billing::{with_query_param, PaymentError};
use crate::error::AppResult;
use crate::extract::ApiJson;
use crate::middleware::auth::AuthUser;
use crate::middleware::limits::current_user;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionStatusResponse {
    pub status: SubscriptionStatus,
    pub projects: Usage,
    pub integrations: Usage,
    pub tokens: i32,
}

/// Optional body for checkout and billing-portal requests.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnUrlRequest {
    pub return_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RedirectResponse {
    pub url: String,
}

/// GET /api/subscription/status
pub async fn status(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<SubscriptionStatusResponse>> {
    let user = current_user(&state, &auth).await?;
    let projects = ProjectRepo::count_by_user(&state.pool, user.id).await?;
    let integrations = ServiceIntegrationRepo::count_by_user(&state.pool, user.id).await?;
    let tier = user.subscription_status;

    Ok(Json(SubscriptionStatusResponse {
        status: tier,
        projects: Usage::new(projects, tier.project_limit()),
        integrations: Usage::new(integrations, tier.integration_limit()),
        tokens: user.available_tokens,
    }))
}

/// POST /api/subscription/checkout
///
/// Creates the payment customer on first use, then starts a hosted checkout
/// for the premium plan.
pub async fn checkout(
    auth: AuthUser,
    State(state): State<AppState>,
    input: Option<ApiJson<ReturnUrlRequest>>,
) -> AppResult<Json<RedirectResponse>> {
    let user = current_user(&state, &auth).await?;

    let customer_id = match user.stripe_customer_id.clone() {
        Some(id) => id,
        None => {
            let id = state.payments.create_customer(&user).await?;
            UserRepo::set_stripe_customer(&state.pool, user.id, &id).await?;
            id
        }
    };

    let return_url = input
        .and_then(|ApiJson(body)| body.return_url)
        .unwrap_or_else(|| state.config.billing.app_base_url.clone());
    let url = state
        .payments
        .create_checkout_session(
            &customer_id,
            user.id,
            &with_query_param(&return_url, "success", "true"),
            &with_query_param(&return_url, "canceled", "true"),
        )
        .await?;

    tracing::info!(user_id = user.id, %customer_id, "Checkout session started");
    Ok(Json(RedirectResponse { url }))
}

/// POST /api/subscription/billing-portal
pub async fn billing_portal(
    auth: AuthUser,
    State(state): State<AppState>,
    input: Option<ApiJson<ReturnUrlRequest>>,
) -> AppResult<Json<RedirectResponse>> {
    let user = current_user(&state, &auth).await?;
    let customer_id = user
        .stripe_customer_id
        .as_deref()
        .ok_or(PaymentError::NoCustomerId)?;

    let return_url = input
        .and_then(|ApiJson(body)| body.return_url)
        .unwrap_or_else(|| state.config.billing.app_base_url.clone());
    let url = state
        .payments
        .create_billing_portal_session(customer_id, &return_url)
        .await?;
    Ok(Json(RedirectResponse { url }))
}
