//! Client configuration.
//!
//! The backend base URL comes from `CHAT_SERVER_URL`. On the server it is
//! read at runtime (call `dotenvy::dotenv()` first); the WASM bundle has no
//! process environment, so it falls back to the value captured at build time.

/// Environment variable holding the chat backend base URL
pub const SERVER_URL_VAR: &str = "CHAT_SERVER_URL";

/// Used when `CHAT_SERVER_URL` is set neither at runtime nor at build time
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

/// Path of the login endpoint
pub const LOGIN_PATH: &str = "/api/v1/user/login";

/// Path of the registration endpoint
pub const SIGN_UP_PATH: &str = "/api/v1/user/new";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backend base URL without a trailing slash
    /// Example: https://chat.example.com
    pub server_url: String,
}

impl Config {
    pub fn new(server_url: impl Into<String>) -> Self {
        let server_url: String = server_url.into();
        Self {
            server_url: server_url.trim_end_matches('/').to_string(),
        }
    }

    /// Load configuration from the environment.
    ///
    /// Blank values are ignored.
    pub fn from_env() -> Self {
        let runtime = std::env::var(SERVER_URL_VAR).ok();
        let build_time = option_env!("CHAT_SERVER_URL").map(str::to_string);
        Self::resolve(runtime, build_time)
    }

    fn resolve(runtime: Option<String>, build_time: Option<String>) -> Self {
        let url = runtime
            .filter(|v| !v.trim().is_empty())
            .or(build_time.filter(|v| !v.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
        Self::new(url.trim())
    }

    /// Absolute URL of a backend path
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.server_url, path.trim_start_matches('/'))
    }

    pub fn login_url(&self) -> String {
        self.endpoint(LOGIN_PATH)
    }

    pub fn sign_up_url(&self) -> String {
        self.endpoint(SIGN_UP_PATH)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slashes() {
        let config = Config::new("https://chat.example.com//");
        assert_eq!(config.server_url, "https://chat.example.com");
    }

    #[test]
    fn test_endpoints() {
        let config = Config::new("http://localhost:4000/");
        assert_eq!(config.login_url(), "http://localhost:4000/api/v1/user/login");
        assert_eq!(config.sign_up_url(), "http://localhost:4000/api/v1/user/new");
        assert_eq!(config.endpoint("health"), "http://localhost:4000/health");
    }

    #[test]
    fn test_resolve_prefers_runtime_value() {
        let config = Config::resolve(
            Some("http://runtime:1".to_string()),
            Some("http://build:2".to_string()),
        );
        assert_eq!(config.server_url, "http://runtime:1");
    }

    #[test]
    fn test_resolve_falls_back_to_build_time() {
        let config = Config::resolve(None, Some("http://build:2/".to_string()));
        assert_eq!(config.server_url, "http://build:2");

        let config = Config::resolve(Some("  ".to_string()), Some("http://build:2".to_string()));
        assert_eq!(config.server_url, "http://build:2");
    }

    #[test]
    fn test_resolve_default() {
        let config = Config::resolve(None, None);
        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
    }

    #[test]
    fn test_from_env_returns_config() {
        // Actual value depends on the environment
        let config = Config::from_env();
        assert!(!config.server_url.ends_with('/'));
    }
}
