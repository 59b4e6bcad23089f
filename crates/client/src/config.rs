use std::{env, time::Duration};

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Address of the live-update socket, `host:port` (default: "127.0.0.1:5000")
    pub ws_url: String,
    /// User whose entries are read and written (default: "default")
    pub user_id: String,
    /// How long to wait for a response, in milliseconds (default: 5,000)
    pub request_timeout_ms: u64,
    /// Weeks shown before the anchor week (default: 1)
    pub previous_weeks: u32,
    /// Weeks shown after the anchor week (default: 2)
    pub upcoming_weeks: u32,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SITUPS_WS_URL` - Live-update socket address (default: "127.0.0.1:5000")
    /// - `SITUPS_USER_ID` - User ID (default: "default")
    /// - `SITUPS_REQUEST_TIMEOUT_MS` - Response timeout in ms (default: 5,000)
    /// - `SITUPS_PREVIOUS_WEEKS` - Weeks before the anchor week (default: 1)
    /// - `SITUPS_UPCOMING_WEEKS` - Weeks after the anchor week (default: 2)
    pub fn from_env() -> Self {
        Self {
            ws_url: env::var("SITUPS_WS_URL").unwrap_or_else(|_| "127.0.0.1:5000".to_string()),
            user_id: env::var("SITUPS_USER_ID").unwrap_or_else(|_| "default".to_string()),
            request_timeout_ms: env::var("SITUPS_REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5_000),
            previous_weeks: env::var("SITUPS_PREVIOUS_WEEKS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
            upcoming_weeks: env::var("SITUPS_UPCOMING_WEEKS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2),
        }
    }

    /// Sets the socket address.
    pub fn with_ws_url(mut self, ws_url: impl Into<String>) -> Self {
        self.ws_url = ws_url.into();
        self
    }

    /// Sets the user ID.
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Sets the response timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Get the response timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
