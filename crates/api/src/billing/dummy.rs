//! Payment provider that never leaves the process.
//!
//! Customers and sessions get random ids and every URL points back at the
//! caller-supplied return address, so the checkout flow can be exercised
//! without a billing account. Webhook deliveries are unsigned Stripe-shaped
//! JSON, which lets local tooling replay subscription events.

use async_trait::async_trait;
use axum::http::HeaderMap;
use devpulse_core::billing::{subscription_change, SubscriptionChange};
use devpulse_db::models::user::User;
use serde_json::Value;
use uuid::Uuid;

use super::{with_query_param, PaymentError, PaymentProvider, Result};

pub struct DummyProvider;

#[async_trait]
impl PaymentProvider for DummyProvider {
    async fn create_customer(&self, user: &User) -> Result<String> {
        let customer_id = format!("cus_dummy_{}", Uuid::new_v4().simple());
        tracing::info!(user_id = user.id, %customer_id, "Dummy customer created");
        Ok(customer_id)
    }

    async fn create_checkout_session(
        &self,
        customer_id: &str,
        user_id: i64,
        success_url: &str,
        _cancel_url: &str,
    ) -> Result<String> {
        let session_id = format!("cs_dummy_{}", Uuid::new_v4().simple());
        tracing::info!(user_id, customer_id, %session_id, "Dummy checkout session created");

        Ok(with_query_param(success_url, "session_id", &session_id))
    }

    async fn create_billing_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> Result<String> {
        tracing::info!(customer_id, "Dummy billing portal session created");
        Ok(return_url.to_string())
    }

    async fn validate_webhook(
        &self,
        _headers: &HeaderMap,
        body: &str,
    ) -> Result<Option<SubscriptionChange>> {
        let event: Value = serde_json::from_str(body)
            .map_err(|e| PaymentError::InvalidData(format!("Webhook body is not JSON: {e}")))?;
        Ok(subscription_change(&event))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[tokio::test]
    async fn checkout_url_appends_session_id() {
        let url = DummyProvider
            .create_checkout_session(
                "cus_1",
                1,
                "http://localhost:5173/settings?success=true",
                "http://localhost:5173/settings?canceled=true",
            )
            .await
            .unwrap();
        assert!(url.starts_with("http://localhost:5173/settings?success=true&session_id=cs_dummy_"));
    }

    #[tokio::test]
    async fn portal_returns_to_caller() {
        let url = DummyProvider
            .create_billing_portal_session("cus_1", "http://localhost:5173/billing")
            .await
            .unwrap();
        assert_eq!(url, "http://localhost:5173/billing");
    }

    #[tokio::test]
    async fn webhook_reads_unsigned_event() {
        let body = r#"{"type":"checkout.session.completed","data":{"object":{"customer":"cus_1","subscription":"sub_1"}}}"#;
        let change = DummyProvider
            .validate_webhook(&HeaderMap::new(), body)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(change.customer_id, "cus_1");

        let err = DummyProvider
            .validate_webhook(&HeaderMap::new(), "<xml/>")
            .await
            .unwrap_err();
        assert_matches!(err, PaymentError::InvalidData(_));
    }
}
