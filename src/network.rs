//! Network URL constants for the Swapbook SDK.

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.swapbook.exchange";
