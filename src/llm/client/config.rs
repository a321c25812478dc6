//! Ollama client configuration.

use serde::{Deserialize, Serialize};

/// Port the Ollama server listens on unless told otherwise.
pub const DEFAULT_PORT: u16 = 11434;

/// Configuration for the Ollama backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Base URL of the Ollama server
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// TCP connect timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Check /api/version before every generation request
    #[serde(default = "default_health_check")]
    pub health_check: bool,
}

fn default_endpoint() -> String {
    format!("http://localhost:{}", DEFAULT_PORT)
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_health_check() -> bool {
    true
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            connect_timeout_secs: default_connect_timeout_secs(),
            health_check: default_health_check(),
        }
    }
}

impl OllamaConfig {
    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `VOCR_OLLAMA_URL`: server URL (wins over `OLLAMA_HOST`)
    /// - `OLLAMA_HOST`: server address as used by the ollama CLI
    /// - `VOCR_HEALTH_CHECK`: "true" or "false"
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup (environment in production).
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("VOCR_OLLAMA_URL").or_else(|| lookup("OLLAMA_HOST")) {
            if !url.trim().is_empty() {
                self = self.with_endpoint(&url);
            }
        }
        if let Some(val) = lookup("VOCR_HEALTH_CHECK") {
            self.health_check = val.eq_ignore_ascii_case("true") || val == "1";
        }
        self
    }

    /// Set the endpoint the way `OLLAMA_HOST` is interpreted.
    ///
    /// A bare `host[:port]` gets the `http` scheme and, without a port,
    /// [`DEFAULT_PORT`]. Endpoints with an explicit scheme are kept as given.
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        let endpoint = endpoint.trim().trim_end_matches('/');
        self.endpoint = if endpoint.contains("://") {
            endpoint.to_string()
        } else {
            let split = endpoint.find('/').unwrap_or(endpoint.len());
            let (authority, path) = endpoint.split_at(split);
            if has_port(authority) {
                format!("http://{}", endpoint)
            } else {
                format!("http://{}:{}{}", authority, DEFAULT_PORT, path)
            }
        };
        self
    }

    /// Full URL for an API path such as `/api/tags`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }
}

/// Whether `host[:port]` carries a port, allowing bracketed IPv6 hosts.
fn has_port(authority: &str) -> bool {
    match authority.strip_prefix('[') {
        Some(rest) => rest
            .split_once(']')
            .is_some_and(|(_, tail)| tail.starts_with(':')),
        None => authority.contains(':'),
    }
}
