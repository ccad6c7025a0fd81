//! Network URL constants for the dashboard SDK.

/// Default REST API base URL (the dashboard frontend proxies `/api/*` to the backend).
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
