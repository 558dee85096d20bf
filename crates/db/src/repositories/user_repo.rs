//! Repository for the `users` table.

use devpulse_core::subscription::{SubscriptionStatus, PREMIUM_TOKEN_BONUS};
use devpulse_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

const COLUMNS: &str = "id, username, password_hash, email, full_name, subscription_status, \
    stripe_customer_id, stripe_subscription_id, available_tokens, created_at, updated_at";

/// Provides CRUD and subscription bookkeeping for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user with default subscription fields.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash, full_name)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.full_name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_stripe_customer(
        pool: &PgPool,
        customer_id: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE stripe_customer_id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(customer_id)
            .fetch_optional(pool)
            .await
    }

    /// Record the payment provider's customer id for a user.
    pub async fn set_stripe_customer(
        pool: &PgPool,
        id: DbId,
        customer_id: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET stripe_customer_id = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(customer_id)
            .fetch_optional(pool)
            .await
    }

    /// Apply a subscription change reported by the payment provider.
    ///
    /// Runs in a transaction with the row locked so that concurrent webhook
    /// deliveries grant [`PREMIUM_TOKEN_BONUS`] at most once per upgrade.
    /// Returns the updated user and whether the bonus was granted.
    pub async fn apply_subscription_change(
        pool: &PgPool,
        id: DbId,
        status: SubscriptionStatus,
        customer_id: &str,
        subscription_id: &str,
    ) -> Result<Option<(User, bool)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let current: Option<(String,)> =
            sqlx::query_as("SELECT subscription_status FROM users WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((current,)) = current else {
            return Ok(None);
        };

        let upgraded = status.is_premium() && current != SubscriptionStatus::Premium.as_str();
        let bonus = if upgraded { PREMIUM_TOKEN_BONUS } else { 0 };

        let query = format!(
            "UPDATE users SET
                subscription_status = $2,
                stripe_customer_id = $3,
                stripe_subscription_id = $4,
                available_tokens = available_tokens + $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(status.as_str())
            .bind(customer_id)
            .bind(subscription_id)
            .bind(bonus)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(
            user_id = id,
            from = %current,
            to = status.as_str(),
            bonus,
            "Applied subscription change"
        );
        Ok(Some((user, upgraded)))
    }

    /// Set the subscription status directly. Used by admin tooling and tests.
    pub async fn set_subscription_status(
        pool: &PgPool,
        id: DbId,
        status: SubscriptionStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET subscription_status = $2 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
