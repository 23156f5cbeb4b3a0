use std::env;

/// Application configuration, read once from the environment at startup and
/// shared with handlers through `web::Data<AppConfig>`. `DATABASE_URL` is
/// consumed separately by `db::create_pool()`.
#[derive(Clone)]
pub struct AppConfig {
    /// HS256 secret used to sign and validate access tokens.
    pub jwt_secret: String,
    /// Access token lifetime in days.
    pub token_ttl_days: i64,

    /// Payment gateway API base, e.g. `https://api.stripe.com`.
    pub payment_api_base: String,
    /// Secret key sent as a bearer token to the payment gateway.
    pub payment_secret_key: String,
    /// Shared secret for verifying webhook signatures.
    pub payment_webhook_secret: String,

    pub smtp_host: String,
    pub smtp_username: String,
    pub smtp_password: String,
    pub mail_from: String,

    /// Directory served at `/static` for uploaded profile images.
    pub upload_dir: String,

    pub super_admin_email: String,
    pub super_admin_password: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            token_ttl_days: env::var("TOKEN_TTL_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(7),
            payment_api_base: env::var("PAYMENT_API_BASE")
                .unwrap_or_else(|_| "https://api.stripe.com".to_string()),
            payment_secret_key: env::var("PAYMENT_SECRET_KEY")
                .expect("PAYMENT_SECRET_KEY must be set"),
            payment_webhook_secret: env::var("PAYMENT_WEBHOOK_SECRET")
                .expect("PAYMENT_WEBHOOK_SECRET must be set"),
            smtp_host: env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
            smtp_username: env::var("SMTP_USERNAME").unwrap_or_default(),
            smtp_password: env::var("SMTP_PASSWORD").unwrap_or_default(),
            mail_from: env::var("MAIL_FROM")
                .unwrap_or_else(|_| "LexMarket <no-reply@lexmarket.local>".to_string()),
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "./uploads".to_string()),
            super_admin_email: env::var("SUPER_ADMIN_EMAIL")
                .unwrap_or_else(|_| "super@lexmarket.local".to_string()),
            super_admin_password: env::var("SUPER_ADMIN_PASSWORD")
                .expect("SUPER_ADMIN_PASSWORD must be set"),
        }
    }
}
