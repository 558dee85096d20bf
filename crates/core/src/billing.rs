//! Subscription changes carried by payment webhooks.
//!
//! Providers turn their own event formats into a [`SubscriptionChange`].
//! [`subscription_change`] reads the plain JSON shape of a Stripe event and
//! serves deliveries that are not checked against a signing secret.

use serde_json::Value;

use crate::subscription::SubscriptionStatus;

/// A subscription state change carried by a webhook event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionChange {
    pub customer_id: String,
    pub subscription_id: String,
    pub status: SubscriptionStatus,
    /// Our user id, when the checkout session carried one.
    pub client_reference_id: Option<String>,
}

/// Extract the subscription change from a Stripe event, if it carries one.
///
/// Handles `checkout.session.completed` and
/// `customer.subscription.updated` / `.deleted`. Other event types, and
/// checkout sessions without a customer and subscription, yield `None`.
pub fn subscription_change(event: &Value) -> Option<SubscriptionChange> {
    let event_type = event.get("type")?.as_str()?;
    let object = event.get("data")?.get("object")?;
    let str_field = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_string);

    match event_type {
        "checkout.session.completed" => Some(SubscriptionChange {
            customer_id: str_field("customer")?,
            subscription_id: str_field("subscription")?,
            status: SubscriptionStatus::Premium,
            client_reference_id: str_field("client_reference_id"),
        }),
        "customer.subscription.updated" | "customer.subscription.deleted" => {
            let status = match object.get("status").and_then(Value::as_str) {
                Some("active") => SubscriptionStatus::Premium,
                _ => SubscriptionStatus::Free,
            };
            Some(SubscriptionChange {
                customer_id: str_field("customer")?,
                subscription_id: str_field("id")?,
                status,
                client_reference_id: None,
            })
        }
        _ => None,
    }
}
