//! Configuration types for efiling-client

use crate::types::ProtocolVersion;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Published v1.0 (form-encoded) service root
pub const DEFAULT_REMOTE_V10: &str = "https://netfile.com/filer/vendor/api/v10/";

/// Published v1.1 (JSON) service root
pub const DEFAULT_REMOTE_V11: &str = "https://netfile.com/filer/vendor/api/v11/";

/// Client configuration for the filing workflow
///
/// The polling fields deliberately default to the service contract values
/// (10 checks, 2 seconds apart); tests shrink the interval rather than the
/// semantics.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Service root the three method names are appended to
    /// (default: the published v1.1 root)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Maximum number of status checks per job (default: 10)
    #[serde(default = "default_max_status_checks")]
    pub max_status_checks: u32,

    /// Wait before every status check (default: 2 seconds)
    ///
    /// This is pacing, not backoff: the delay is fixed and applies to the
    /// first check as well.
    #[serde(default = "default_status_check_interval", with = "duration_serde")]
    pub status_check_interval: Duration,

    /// Timeout for individual HTTP requests (default: 30 seconds)
    #[serde(default = "default_request_timeout", with = "duration_serde")]
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            max_status_checks: default_max_status_checks(),
            status_check_interval: default_status_check_interval(),
            request_timeout: default_request_timeout(),
        }
    }
}

impl ClientConfig {
    /// Configuration pointed at the published root for a protocol version
    pub fn for_version(version: ProtocolVersion) -> Self {
        let base_url = match version {
            ProtocolVersion::V10 => DEFAULT_REMOTE_V10,
            ProtocolVersion::V11 => DEFAULT_REMOTE_V11,
        };
        Self {
            base_url: base_url.to_string(),
            ..Default::default()
        }
    }

    /// Configuration pointed at an arbitrary service root
    ///
    /// The URL is validated when the client is constructed, not here.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_REMOTE_V11.to_string()
}

fn default_max_status_checks() -> u32 {
    10
}

fn default_status_check_interval() -> Duration {
    Duration::from_secs(2)
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

// Duration serialization helper
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
