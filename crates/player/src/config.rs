//! Client configuration loaded from the environment

use std::env;
use std::io::IsTerminal;
use std::path::PathBuf;

/// Default origin the e-mail login link redirects back to
pub const DEFAULT_SITE_URL: &str = "http://localhost:3000";

/// Default HTTP request timeout
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Path of the admin view under the site origin
const ADMIN_REDIRECT_PATH: &str = "/dm";

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Endpoint URL or public key missing while a user is present
    #[error("Missing backend configuration: set {0}")]
    MissingEnv(String),
}

/// Where the client is running
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ExecutionContext {
    /// A user is present; misconfiguration is fatal
    #[default]
    Interactive,
    /// Scripted/CI run; misconfiguration degrades to "no client"
    Headless,
}

impl ExecutionContext {
    /// Headless when forced by flag or when stdin is not a terminal.
    pub fn detect(force_headless: bool) -> Self {
        if force_headless || !std::io::stdin().is_terminal() {
            Self::Headless
        } else {
            Self::Interactive
        }
    }
}

/// Backend configuration loaded from environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Hosted backend endpoint URL
    pub url: Option<String>,
    /// Public (non-secret) API key
    pub anon_key: Option<String>,
    /// Origin of this application, used to build the login redirect
    pub site_url: String,
    /// Where the auth session is persisted (platform config dir if unset)
    pub session_file: Option<PathBuf>,
    /// HTTP request timeout in seconds
    pub http_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: None,
            anon_key: None,
            site_url: DEFAULT_SITE_URL.to_string(),
            session_file: None,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl BackendConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup` (environment in production,
    /// a map in tests). Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            url: get("LOREBOOK_SUPABASE_URL").or_else(|| get("SUPABASE_URL")),
            anon_key: get("LOREBOOK_SUPABASE_ANON_KEY").or_else(|| get("SUPABASE_ANON_KEY")),
            site_url: get("LOREBOOK_SITE_URL").unwrap_or_else(|| DEFAULT_SITE_URL.to_string()),
            session_file: get("LOREBOOK_SESSION_FILE").map(PathBuf::from),
            http_timeout_secs: get("LOREBOOK_HTTP_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }

    /// Names of the required variables that are not set.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.url.is_none() {
            missing.push("LOREBOOK_SUPABASE_URL");
        }
        if self.anon_key.is_none() {
            missing.push("LOREBOOK_SUPABASE_ANON_KEY");
        }
        missing
    }

    /// URL the e-mailed login link sends the user back to.
    pub fn admin_redirect_url(&self) -> String {
        format!(
            "{}{}",
            self.site_url.trim_end_matches('/'),
            ADMIN_REDIRECT_PATH
        )
    }
}
