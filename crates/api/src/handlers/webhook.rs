//! Payment provider webhook receiver.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use devpulse_core::billing::SubscriptionChange;
use devpulse_core::types::DbId;
use devpulse_db::models::user::User;
use devpulse_db::repositories::UserRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub received: bool,
}

/// Resolve the user a subscription change belongs to: by customer id first,
/// then by the user id the checkout session was opened with.
async fn find_subscriber(state: &AppState, change: &SubscriptionChange) -> AppResult<Option<User>> {
    if let Some(user) = UserRepo::find_by_stripe_customer(&state.pool, &change.customer_id).await? {
        return Ok(Some(user));
    }
    let Some(user_id) = change
        .client_reference_id
        .as_deref()
        .and_then(|id| id.parse::<DbId>().ok())
    else {
        return Ok(None);
    };
    Ok(UserRepo::find_by_id(&state.pool, user_id).await?)
}

/// POST /api/webhook/stripe
///
/// Takes the raw body so the provider can check the signature against the
/// exact bytes that were signed. Events that do not change a subscription
/// are acknowledged and ignored.
pub async fn stripe(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> AppResult<Json<WebhookAck>> {
    let change = state
        .payments
        .validate_webhook(&headers, &body)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "Rejected webhook delivery"))?;

    let Some(change) = change else {
        tracing::debug!("Ignoring webhook event");
        return Ok(Json(WebhookAck { received: true }));
    };

    let Some(user) = find_subscriber(&state, &change).await? else {
        tracing::warn!(
            customer_id = %change.customer_id,
            subscription_id = %change.subscription_id,
            "Webhook for unknown customer",
        );
        return Ok(Json(WebhookAck { received: true }));
    };

    if let Some((user, granted)) = UserRepo::apply_subscription_change(
        &state.pool,
        user.id,
        change.status,
        &change.customer_id,
        &change.subscription_id,
    )
    .await?
    {
        tracing::info!(
            user_id = user.id,
            status = user.subscription_status.as_str(),
            bonus_granted = granted,
            "Subscription updated",
        );
    }

    Ok(Json(WebhookAck { received: true }))
}
