//! API constants
//!
//! Centralized location for the fixed values of the Hotjar REST API.

/// Production API host.
pub const DEFAULT_BASE_URL: &str = "https://api.hotjar.io";

/// Version prefix prepended to every resource path.
pub const API_VERSION_PREFIX: &str = "/v1";

/// OAuth2 token endpoint, relative to the base URL.
pub const TOKEN_PATH: &str = "/v1/oauth/token";

/// Seconds before expiry at which a cached token stops being reused.
pub const TOKEN_EXPIRY_MARGIN_SECS: i64 = 60;

/// Page size sent on every paginated request.
pub const PAGE_SIZE: u32 = 100;

/// Documented request budget.
pub const RATE_LIMIT_PER_MINUTE: u32 = 3000;
pub const RATE_LIMIT_PER_SECOND: u32 = 50;

// HTTP client defaults
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("hotjar-client/", env!("CARGO_PKG_VERSION"));

/// Path the webhook receiver listens on.
pub const WEBHOOK_PATH: &str = "/webhook";
