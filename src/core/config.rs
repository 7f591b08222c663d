/// Server configuration.
///
/// # Environment variables
///
/// Every setting can be overridden through the environment:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | HTTP_PORT | 3000 | HTTP listen port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | LOG_LEVEL | info | tracing level filter |
/// | LOG_DIR | (unset) | daily-rolling log file directory |
/// | SEED_DEMO_DATA | false | seed the demo catalog at startup |
/// | DEFAULT_PAGE_LIMIT | 10 | default page size for listings |
/// | MAX_PAGE_LIMIT | 50 | page size ceiling for listings |
///
/// # Example
///
/// ```ignore
/// HTTP_PORT=8080 SEED_DEMO_DATA=true cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API listen port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Whether to seed the demo catalog at startup
    pub seed_demo_data: bool,
    /// Default page size for item listings
    pub default_page_limit: u32,
    /// Maximum page size a client may request
    pub max_page_limit: u32,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            seed_demo_data: std::env::var("SEED_DEMO_DATA")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            default_page_limit: std::env::var("DEFAULT_PAGE_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            max_page_limit: std::env::var("MAX_PAGE_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(50),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
