//! Server Configuration

/// Gateway configuration, sourced from the environment
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub http_port: u16,
    pub environment: String,

    /// Base URL of the third-party inventory API
    pub upstream_api_url: String,
    /// Token sent in the `Authorization` header upstream
    pub upstream_api_token: String,

    /// External tariff calculator; `None` disables the enrichment path
    pub tariff_api_url: Option<String>,
    /// Per-request timeout for the tariff calculator
    pub tariff_timeout_ms: u64,

    /// Seconds between reference refreshes; 0 disables the job
    pub reference_refresh_secs: u64,

    /// Overall timeout applied to every inbound request
    pub request_timeout_ms: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./work_dir".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),

            upstream_api_url: std::env::var("UPSTREAM_API_URL")
                .unwrap_or_else(|_| "https://api-centr.ru/che168".into()),
            upstream_api_token: std::env::var("UPSTREAM_API_TOKEN").unwrap_or_default(),

            tariff_api_url: std::env::var("TARIFF_API_URL").ok().filter(|u| !u.is_empty()),
            tariff_timeout_ms: std::env::var("TARIFF_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),

            reference_refresh_secs: std::env::var("REFERENCE_REFRESH_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(86_400),

            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(60_000),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
