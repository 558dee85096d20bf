//! Stripe payment provider on the `async-stripe` SDK.

use std::collections::HashMap;

use async_trait::async_trait;
use axum::http::HeaderMap;
use devpulse_core::billing::SubscriptionChange;
use devpulse_core::subscription::SubscriptionStatus;
use devpulse_db::models::user::User;
use stripe::{
    BillingPortalSession, CheckoutSession, CheckoutSessionMode, Client,
    CreateBillingPortalSession, CreateCheckoutSession, CreateCheckoutSessionLineItems,
    CreateCustomer, Customer, CustomerId, Event, EventObject, EventType, StripeError, Webhook,
};

use super::{PaymentError, PaymentProvider, Result};
use crate::config::StripeConfig;

const SIGNATURE_HEADER: &str = "stripe-signature";

pub struct StripeProvider {
    client: Client,
    price_id: String,
    webhook_secret: Option<String>,
}

impl From<StripeConfig> for StripeProvider {
    fn from(config: StripeConfig) -> Self {
        if config.webhook_secret.is_none() {
            tracing::warn!("STRIPE_WEBHOOK_SECRET is unset; webhook signatures will not be verified");
        }
        Self {
            client: Client::new(config.secret_key),
            price_id: config.price_id,
            webhook_secret: config.webhook_secret,
        }
    }
}

fn api_error(operation: &'static str) -> impl FnOnce(StripeError) -> PaymentError {
    move |e| {
        tracing::error!(error = ?e, operation, "Stripe API call failed");
        PaymentError::ProviderApi(e.to_string())
    }
}

fn parse_customer_id(customer_id: &str) -> Result<CustomerId> {
    customer_id
        .parse()
        .map_err(|_| PaymentError::InvalidData(format!("Invalid Stripe customer id: {customer_id}")))
}

/// Map the event types that move a subscription onto a [`SubscriptionChange`].
fn subscription_change(event: &Event) -> Option<SubscriptionChange> {
    match (&event.type_, &event.data.object) {
        (EventType::CheckoutSessionCompleted, EventObject::CheckoutSession(session)) => {
            Some(SubscriptionChange {
                customer_id: session.customer.as_ref()?.id().to_string(),
                subscription_id: session.subscription.as_ref()?.id().to_string(),
                status: SubscriptionStatus::Premium,
                client_reference_id: session.client_reference_id.clone(),
            })
        }
        (
            EventType::CustomerSubscriptionUpdated | EventType::CustomerSubscriptionDeleted,
            EventObject::Subscription(subscription),
        ) => {
            let status = if matches!(subscription.status, stripe::SubscriptionStatus::Active) {
                SubscriptionStatus::Premium
            } else {
                SubscriptionStatus::Free
            };
            Some(SubscriptionChange {
                customer_id: subscription.customer.id().to_string(),
                subscription_id: subscription.id.to_string(),
                status,
                client_reference_id: None,
            })
        }
        _ => None,
    }
}

#[async_trait]
impl PaymentProvider for StripeProvider {
    async fn create_customer(&self, user: &User) -> Result<String> {
        let mut params = CreateCustomer::new();
        params.email = Some(user.email.as_str());
        params.name = user.full_name.as_deref();
        params.metadata = Some(HashMap::from([(
            "user_id".to_string(),
            user.id.to_string(),
        )]));

        let customer = Customer::create(&self.client, params)
            .await
            .map_err(api_error("create customer"))?;
        tracing::info!(user_id = user.id, customer_id = %customer.id, "Stripe customer created");
        Ok(customer.id.to_string())
    }

    async fn create_checkout_session(
        &self,
        customer_id: &str,
        user_id: i64,
        success_url: &str,
        cancel_url: &str,
    ) -> Result<String> {
        let client_reference_id = user_id.to_string();
        let params = CreateCheckoutSession {
            customer: Some(parse_customer_id(customer_id)?),
            client_reference_id: Some(client_reference_id.as_str()),
            mode: Some(CheckoutSessionMode::Subscription),
            line_items: Some(vec![CreateCheckoutSessionLineItems {
                price: Some(self.price_id.clone()),
                quantity: Some(1),
                ..Default::default()
            }]),
            success_url: Some(success_url),
            cancel_url: Some(cancel_url),
            ..Default::default()
        };

        let session = CheckoutSession::create(&self.client, params)
            .await
            .map_err(api_error("create checkout session"))?;
        tracing::info!(user_id, session_id = %session.id, "Stripe checkout session created");

        session.url.ok_or_else(|| {
            tracing::error!(session_id = %session.id, "Checkout session missing URL");
            PaymentError::ProviderApi("Checkout session missing URL".to_string())
        })
    }

    async fn create_billing_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> Result<String> {
        let mut params = CreateBillingPortalSession::new(parse_customer_id(customer_id)?);
        params.return_url = Some(return_url);

        let session = BillingPortalSession::create(&self.client, params)
            .await
            .map_err(api_error("create billing portal session"))?;
        Ok(session.url)
    }

    async fn validate_webhook(
        &self,
        headers: &HeaderMap,
        body: &str,
    ) -> Result<Option<SubscriptionChange>> {
        let event = match &self.webhook_secret {
            Some(secret) => {
                let signature = headers
                    .get(SIGNATURE_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .ok_or_else(|| {
                        PaymentError::InvalidSignature("Missing stripe-signature header".into())
                    })?;
                Webhook::construct_event(body, signature, secret).map_err(|e| {
                    tracing::warn!(error = %e, "Stripe webhook failed validation");
                    PaymentError::InvalidSignature(e.to_string())
                })?
            }
            None => serde_json::from_str::<Event>(body).map_err(|e| {
                PaymentError::InvalidData(format!("Webhook body is not a Stripe event: {e}"))
            })?,
        };

        tracing::debug!(event_id = %event.id, event_type = ?event.type_, "Stripe webhook received");
        Ok(subscription_change(&event))
    }
}
