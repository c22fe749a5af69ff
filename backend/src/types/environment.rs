//! Environment configuration for different deployment stages

use std::env;
use std::time::Duration;

use tracing::Level;

/// Default `WordPress` installation used when `WP_URL` is not set
const DEFAULT_WORDPRESS_URL: &str = "http://localhost/wordpress";

/// Default Stripe API host
const DEFAULT_STRIPE_API_URL: &str = "https://api.stripe.com";

/// Where the access guard sends visitors it turns away
const DEFAULT_LOGIN_PATH: &str = "/login";

/// Application environment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment (local `WordPress`, Stripe test keys)
    Development,
}

impl Environment {
    /// Creates an Environment from the `APP_ENV` environment variable
    ///
    /// # Panics
    ///
    /// Panics if `APP_ENV` contains an invalid value
    #[must_use]
    pub fn from_env() -> Self {
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Self::Production,
            "staging" => Self::Staging,
            "development" => Self::Development,
            _ => panic!("Invalid environment: {env}"),
        }
    }

    /// Base URL of the `WordPress` installation, without a trailing slash
    #[must_use]
    pub fn wordpress_url(&self) -> String {
        let url = env::var("WP_URL")
            .ok()
            .filter(|val| !val.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_WORDPRESS_URL.to_string());

        url.trim().trim_end_matches('/').to_string()
    }

    /// Stripe secret key
    ///
    /// # Panics
    ///
    /// Panics if `STRIPE_SECRET_KEY` is not set in production or staging
    #[must_use]
    pub fn stripe_secret_key(&self) -> Option<String> {
        match self {
            Self::Production | Self::Staging => Some(
                env::var("STRIPE_SECRET_KEY")
                    .expect("STRIPE_SECRET_KEY environment variable is not set"),
            ),
            Self::Development => env::var("STRIPE_SECRET_KEY").ok(),
        }
    }

    /// Stripe API host, overridable to point at a mock
    #[must_use]
    pub fn stripe_api_url(&self) -> String {
        env::var("STRIPE_API_URL")
            .unwrap_or_else(|_| DEFAULT_STRIPE_API_URL.to_string())
            .trim_end_matches('/')
            .to_string()
    }

    /// HMAC key used to verify session tokens
    ///
    /// # Panics
    ///
    /// Panics if `SESSION_SECRET` is not set in production or staging
    #[must_use]
    pub fn session_secret(&self) -> String {
        match self {
            Self::Production | Self::Staging => env::var("SESSION_SECRET")
                .expect("SESSION_SECRET environment variable is not set"),
            Self::Development => env::var("SESSION_SECRET")
                .unwrap_or_else(|_| "development-session-secret".to_string()),
        }
    }

    /// Redirect target for visitors without a matching role
    #[must_use]
    pub fn login_path(&self) -> String {
        env::var("LOGIN_PATH").unwrap_or_else(|_| DEFAULT_LOGIN_PATH.to_string())
    }

    /// Optional timeout for upstream calls. Unset means calls may wait forever.
    #[must_use]
    pub fn upstream_timeout(&self) -> Option<Duration> {
        env::var("UPSTREAM_TIMEOUT_SECS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Port the HTTP server binds to
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is set but is not a valid port number
    pub fn port(&self) -> Result<u16, std::num::ParseIntError> {
        env::var("PORT").map_or(Ok(8001), |p| p.parse())
    }

    /// Whether to show API docs
    #[must_use]
    pub const fn show_api_docs(&self) -> bool {
        matches!(self, Self::Development | Self::Staging)
    }

    /// Whether logs should be emitted as JSON
    #[must_use]
    pub const fn json_logs(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }

    #[must_use]
    pub fn tracing_level(&self) -> Level {
        env::var("TRACING_LEVEL")
            .ok()
            .and_then(|val| val.parse::<Level>().ok())
            .unwrap_or(match self {
                Self::Production | Self::Staging => Level::INFO,
                Self::Development => Level::DEBUG,
            })
    }
}
