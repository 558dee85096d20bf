use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except secrets have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long to wait for background tasks on shutdown (default: `10`).
    pub shutdown_timeout_secs: u64,
    pub jwt: JwtConfig,
    pub billing: BillingConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                    |
    /// |-------------------------|----------------------------|
    /// | `HOST`                  | `0.0.0.0`                  |
    /// | `PORT`                  | `5000`                     |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `10`                       |
    ///
    /// See [`JwtConfig::from_env`] and [`BillingConfig::from_env`] for the rest.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            jwt: JwtConfig::from_env(),
            billing: BillingConfig::from_env(),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Which payment backend to talk to.
#[derive(Debug, Clone)]
pub enum PaymentConfig {
    Stripe(StripeConfig),
    /// Local development and tests: no network calls.
    Dummy,
}

#[derive(Debug, Clone)]
pub struct StripeConfig {
    pub secret_key: String,
    /// Price id of the premium monthly plan.
    pub price_id: String,
    /// Webhook signing secret (`whsec_...`). When unset, webhook signatures
    /// are not checked.
    pub webhook_secret: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BillingConfig {
    pub payment: PaymentConfig,
    /// Default return URL for checkout and the billing portal.
    pub app_base_url: String,
}

impl BillingConfig {
    /// Load billing configuration from environment variables.
    ///
    /// | Env Var                 | Required              | Default                 |
    /// |-------------------------|-----------------------|-------------------------|
    /// | `PAYMENT_PROVIDER`      | no                    | `stripe`                |
    /// | `STRIPE_SECRET_KEY`     | when provider=stripe  | --                      |
    /// | `STRIPE_PRICE_ID`       | no                    | `price_premium_monthly` |
    /// | `STRIPE_WEBHOOK_SECRET` | no                    | unset                   |
    /// | `APP_BASE_URL`          | no                    | `http://localhost:5173` |
    ///
    /// # Panics
    ///
    /// Panics if the provider is `stripe` and `STRIPE_SECRET_KEY` is missing,
    /// or if `PAYMENT_PROVIDER` names an unknown provider.
    pub fn from_env() -> Self {
        let provider = std::env::var("PAYMENT_PROVIDER").unwrap_or_else(|_| "stripe".into());

        let payment = match provider.as_str() {
            "stripe" => {
                let secret_key = std::env::var("STRIPE_SECRET_KEY")
                    .expect("Missing required Stripe secret: STRIPE_SECRET_KEY");
                assert!(!secret_key.is_empty(), "STRIPE_SECRET_KEY must not be empty");
                PaymentConfig::Stripe(StripeConfig {
                    secret_key,
                    price_id: std::env::var("STRIPE_PRICE_ID")
                        .unwrap_or_else(|_| "price_premium_monthly".into()),
                    webhook_secret: std::env::var("STRIPE_WEBHOOK_SECRET")
                        .ok()
                        .filter(|s| !s.is_empty()),
                })
            }
            "dummy" => PaymentConfig::Dummy,
            other => panic!("Unknown PAYMENT_PROVIDER '{other}'. Expected: stripe, dummy"),
        };

        let app_base_url =
            std::env::var("APP_BASE_URL").unwrap_or_else(|_| "http://localhost:5173".into());

        Self {
            payment,
            app_base_url,
        }
    }
}
