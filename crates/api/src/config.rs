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
    /// Idle lifetime of cached category listings in seconds (default: `60`).
    pub category_cache_ttl_secs: u64,
    /// Maximum number of cached category listings (default: `1000`).
    pub category_cache_max_entries: u64,
    /// Largest page size served by paged listings (default: `50`).
    pub max_page_size: i64,
    /// `max-age` advertised on product reads in seconds (default: `60`).
    pub product_cache_max_age_secs: u64,
    /// Insert demo categories and products at startup (default: `false`).
    pub seed_demo_data: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                 |
    /// |------------------------------|-------------------------|
    /// | `HOST`                       | `0.0.0.0`               |
    /// | `PORT`                       | `3000`                  |
    /// | `CORS_ORIGINS`               | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`       | `30`                    |
    /// | `CATEGORY_CACHE_TTL_SECS`    | `60`                    |
    /// | `CATEGORY_CACHE_MAX_ENTRIES` | `1000`                  |
    /// | `MAX_PAGE_SIZE`              | `50`                    |
    /// | `PRODUCT_CACHE_MAX_AGE_SECS` | `60`                    |
    /// | `SEED_DEMO_DATA`             | `false`                 |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            host,
            port: parse_env("PORT", 3000),
            cors_origins,
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", 30),
            category_cache_ttl_secs: parse_env("CATEGORY_CACHE_TTL_SECS", 60),
            category_cache_max_entries: parse_env("CATEGORY_CACHE_MAX_ENTRIES", 1000),
            max_page_size: parse_env(
                "MAX_PAGE_SIZE",
                catalog_core::pagination::DEFAULT_MAX_PAGE_SIZE,
            ),
            product_cache_max_age_secs: parse_env("PRODUCT_CACHE_MAX_AGE_SECS", 60),
            seed_demo_data: parse_env("SEED_DEMO_DATA", false),
        }
    }
}

/// Read `key` from the environment, falling back to `default` when unset.
///
/// Panics at startup if the variable is set but unparseable; misconfiguration
/// should fail fast.
fn parse_env<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} must be a valid value: {e}")),
        Err(_) => default,
    }
}
