//! Test configuration helpers for mock-backed and live E2E tests

use efiling_client::{ClientConfig, EfilingClient, SubmissionRequest};
use std::time::Duration;

/// Error type for test configuration
#[derive(Debug)]
pub struct ConfigError(pub String);

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Config error: {}", self.0)
    }
}

impl std::error::Error for ConfigError {}

/// Client config pointed at a mock server, with a short poll interval so
/// scenario tests finish in milliseconds instead of tens of seconds
pub fn fast_config(base_url: impl Into<String>) -> ClientConfig {
    ClientConfig {
        status_check_interval: Duration::from_millis(20),
        ..ClientConfig::with_base_url(base_url)
    }
}

/// Client against a mock server root, with the short poll interval
pub fn fast_client(base_url: impl Into<String>) -> EfilingClient {
    EfilingClient::new(fast_config(base_url)).expect("mock server root must be a valid base URL")
}

/// Load the live service root and credentials from environment variables
///
/// Required environment variables:
/// - `EFILING_BASE_URL` - API root, e.g. `https://netfile.com/filer/vendor/api/v11/`
/// - `EFILING_VENDOR_ID` / `EFILING_VENDOR_PIN` - Vendor credentials
/// - `EFILING_FILER_ID` / `EFILING_FILER_PASSWORD` - Filer credentials
///
/// Optional environment variables:
/// - `EFILING_REPLY_TO` - Notification address (default: none)
pub fn load_live_request() -> Result<(String, SubmissionRequest), ConfigError> {
    dotenvy::dotenv().ok();

    let require = |key: &str| {
        std::env::var(key).map_err(|_| ConfigError(format!("{key} not set in environment")))
    };

    let base_url = require("EFILING_BASE_URL")?;
    let request = SubmissionRequest {
        vendor_id: require("EFILING_VENDOR_ID")?,
        vendor_pin: require("EFILING_VENDOR_PIN")?,
        filer_id: require("EFILING_FILER_ID")?,
        filer_password: require("EFILING_FILER_PASSWORD")?,
        reply_to: std::env::var("EFILING_REPLY_TO").unwrap_or_default(),
        ..Default::default()
    };

    Ok((base_url, request))
}

/// Check if live test credentials are available
pub fn has_live_credentials() -> bool {
    dotenvy::dotenv().ok();
    ["EFILING_BASE_URL", "EFILING_VENDOR_ID", "EFILING_VENDOR_PIN"]
        .iter()
        .all(|key| std::env::var(key).is_ok())
}
