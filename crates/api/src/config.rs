use chrono::Duration;
use knotbook_core::rate_limit::RateLimitPolicy;

/// Deployment environment, from `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Deployment environment (default: development).
    pub environment: AppEnv,
    /// Bearer token for the maintenance cleanup endpoint. When unset the
    /// endpoint refuses all callers.
    pub cleanup_secret: Option<String>,
    /// RSVP submissions allowed per client per project per window.
    pub rsvp_rate_limit_max: u32,
    /// RSVP rate-limit window in seconds (default: 900, 15 minutes).
    pub rsvp_rate_limit_window_secs: i64,
    /// Wish submissions allowed per client per project per window.
    pub wish_rate_limit_max: u32,
    /// Wish rate-limit window in seconds (default: 3600, 1 hour).
    pub wish_rate_limit_window_secs: i64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                          |
    /// |-------------------------------|----------------------------------|
    /// | `HOST`                        | `0.0.0.0`                        |
    /// | `PORT`                        | `3000`                           |
    /// | `CORS_ORIGINS`                | `http://localhost:5173`          |
    /// | `REQUEST_TIMEOUT_SECS`        | `30`                             |
    /// | `APP_ENV`                     | `development`                    |
    /// | `CLEANUP_SECRET`              | unset                            |
    /// | `RSVP_RATE_LIMIT_MAX`         | `100` (development), `5` (prod)  |
    /// | `RSVP_RATE_LIMIT_WINDOW_SECS` | `900`                            |
    /// | `WISH_RATE_LIMIT_MAX`         | `3`                              |
    /// | `WISH_RATE_LIMIT_WINDOW_SECS` | `3600`                           |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let environment = match std::env::var("APP_ENV").as_deref() {
            Ok("production") => AppEnv::Production,
            _ => AppEnv::Development,
        };

        let cleanup_secret = std::env::var("CLEANUP_SECRET")
            .ok()
            .filter(|s| !s.is_empty());

        // Development runs with a generous allowance so local testing is
        // not throttled; production stays tight.
        let default_rsvp_max = match environment {
            AppEnv::Development => 100,
            AppEnv::Production => 5,
        };
        let rsvp_rate_limit_max: u32 = env_or("RSVP_RATE_LIMIT_MAX", default_rsvp_max);
        let rsvp_rate_limit_window_secs: i64 = env_or("RSVP_RATE_LIMIT_WINDOW_SECS", 900);
        let wish_rate_limit_max: u32 = env_or("WISH_RATE_LIMIT_MAX", 3);
        let wish_rate_limit_window_secs: i64 = env_or("WISH_RATE_LIMIT_WINDOW_SECS", 3600);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            environment,
            cleanup_secret,
            rsvp_rate_limit_max,
            rsvp_rate_limit_window_secs,
            wish_rate_limit_max,
            wish_rate_limit_window_secs,
        }
    }

    /// Fixed-window policy for the RSVP pipeline.
    pub fn rsvp_policy(&self) -> RateLimitPolicy {
        RateLimitPolicy::new(
            self.rsvp_rate_limit_max,
            Duration::seconds(self.rsvp_rate_limit_window_secs),
        )
    }

    /// Fixed-window policy for the wishes pipeline.
    pub fn wish_policy(&self) -> RateLimitPolicy {
        RateLimitPolicy::new(
            self.wish_rate_limit_max,
            Duration::seconds(self.wish_rate_limit_window_secs),
        )
    }
}

fn env_or<T: std::str::FromStr>(var: &str, default: T) -> T {
    std::env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
