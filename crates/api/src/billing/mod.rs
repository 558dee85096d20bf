//! Payment provider abstraction.
//!
//! [`PaymentProvider`] covers every call the subscription endpoints and the
//! webhook receiver make to the billing backend, including verifying that a
//! webhook delivery really came from it.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::HeaderMap;
use devpulse_core::billing::SubscriptionChange;
use devpulse_db::models::user::User;

use crate::config::PaymentConfig;

pub mod dummy;
pub mod stripe;

/// Build the provider selected by configuration.
///
/// Adding a provider means adding a match arm here.
pub fn create_provider(config: &PaymentConfig) -> Arc<dyn PaymentProvider> {
    match config {
        PaymentConfig::Stripe(stripe_config) => {
            Arc::new(stripe::StripeProvider::from(stripe_config.clone()))
        }
        PaymentConfig::Dummy => Arc::new(dummy::DummyProvider),
    }
}

pub type Result<T> = std::result::Result<T, PaymentError>;

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("Payment provider API error: {0}")]
    ProviderApi(String),

    #[error("Invalid payment data: {0}")]
    InvalidData(String),

    #[error("User does not have a payment provider customer ID")]
    NoCustomerId,

    #[error("Invalid webhook signature: {0}")]
    InvalidSignature(String),
}

/// Append `key=value` to `url`, joining with `&` when it already carries a
/// query string.
pub fn with_query_param(url: &str, key: &str, value: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{key}={value}")
}

#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Register a customer for `user` and return its id.
    async fn create_customer(&self, user: &User) -> Result<String>;

    /// Start a hosted subscription checkout and return its URL.
    async fn create_checkout_session(
        &self,
        customer_id: &str,
        user_id: i64,
        success_url: &str,
        cancel_url: &str,
    ) -> Result<String>;

    /// Open the self-service billing portal and return its URL.
    async fn create_billing_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> Result<String>;

    /// Authenticate a webhook delivery and read the subscription change it
    /// carries.
    ///
    /// `Ok(None)` means the event is genuine but does not touch a
    /// subscription. `Err` means it must be rejected.
    async fn validate_webhook(
        &self,
        headers: &HeaderMap,
        body: &str,
    ) -> Result<Option<SubscriptionChange>>;
}
