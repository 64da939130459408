//! Configuration management for Calculatrice
//!
//! Loads settings from TOML file at ~/.calculatrice/config.toml

use crate::error::{CoreError, Result};
use crate::locale::Locale;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Session store configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Page rendering configuration
    #[serde(default)]
    pub display: DisplayConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server port (default: 8080)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Server host (default: 127.0.0.1 - localhost only)
    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 {
    8080
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: default_port(),
            host: default_host(),
        }
    }
}

/// Session store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session token
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Seconds of inactivity after which a session expires
    #[serde(default = "default_max_idle_secs")]
    pub max_idle_secs: u64,

    /// Upper bound on live sessions; the least recently used is evicted
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    /// Seconds between background sweeps of expired sessions (0 disables)
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

fn default_cookie_name() -> String {
    "CALCSESSIONID".to_string()
}

fn default_max_idle_secs() -> u64 {
    1800 // 30 minutes, same as a servlet container
}

fn default_max_sessions() -> usize {
    10_000
}

fn default_sweep_interval_secs() -> u64 {
    60
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            cookie_name: default_cookie_name(),
            max_idle_secs: default_max_idle_secs(),
            max_sessions: default_max_sessions(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

/// Page rendering configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Language of page labels and error messages ("en" or "fr")
    #[serde(default)]
    pub locale: Locale,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let expanded_path = expand_path(path.as_ref());

        if !expanded_path.exists() {
            return Err(CoreError::Config(format!(
                "Configuration file not found: {}",
                expanded_path.display()
            )));
        }

        let content = std::fs::read_to_string(&expanded_path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|p| p.join(".calculatrice").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".calculatrice/config.toml"))
    }

    /// Reject values the server cannot run with
    pub fn validate(&self) -> Result<()> {
        let name = &self.session.cookie_name;
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(CoreError::Config(format!(
                "Invalid session cookie name: {:?}",
                name
            )));
        }
        if self.session.max_sessions == 0 {
            return Err(CoreError::Config(
                "session.max_sessions must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the server socket address
    pub fn server_addr(&self) -> SocketAddr {
        use std::net::ToSocketAddrs;

        format!("{}:{}", self.server.host, self.server.port)
            .to_socket_addrs()
            .ok()
            .and_then(|mut addrs| addrs.next())
            .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], self.server.port)))
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("CALC_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("CALC_SERVER_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(locale) = std::env::var("CALC_LOCALE") {
            match locale.parse() {
                Ok(locale) => self.display.locale = locale,
                Err(e) => tracing::warn!("Ignoring CALC_LOCALE: {}", e),
            }
        }
    }

    /// Create a default configuration file at the given path
    pub fn create_default<P: AsRef<Path>>(path: P) -> Result<()> {
        let content = r#"# Calculatrice Configuration

[server]
# Port to listen on (default: 8080)
port = 8080

# Host to bind to
# "127.0.0.1" = localhost only
# "0.0.0.0" = all interfaces
host = "127.0.0.1"

[session]
# Cookie carrying the session token
cookie_name = "CALCSESSIONID"

# Sessions idle for longer than this many seconds expire
max_idle_secs = 1800

# Least recently used sessions are evicted past this count
max_sessions = 10000

# Background sweep of expired sessions, in seconds (0 disables)
sweep_interval_secs = 60

[display]
# Page language: "en" or "fr"
locale = "en"
"#;

        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;

        Ok(())
    }
}

/// Expand ~ to home directory in paths
pub fn expand_path(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.session.cookie_name, "CALCSESSIONID");
        assert_eq!(config.session.max_idle_secs, 1800);
        assert_eq!(config.display.locale, Locale::En);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[server]
port = 9000
host = "0.0.0.0"

[session]
max_idle_secs = 60

[display]
locale = "fr"
"#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.session.max_idle_secs, 60);
        assert_eq!(config.session.cookie_name, "CALCSESSIONID");
        assert_eq!(config.display.locale, Locale::Fr);
    }

    #[test]
    fn test_created_default_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        Config::create_default(&path).unwrap();
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.session.max_sessions, 10_000);
        assert_eq!(config.display.locale, Locale::En);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn test_rejects_bad_cookie_name() {
        let mut config = Config::default();
        config.session.cookie_name = "bad name;".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_path() {
        let path = Config::default_path();
        assert!(path.ends_with(".calculatrice/config.toml"));
    }

    #[test]
    fn test_server_addr() {
        let mut config = Config::default();
        config.server.port = 9123;
        assert_eq!(config.server_addr().port(), 9123);
        assert!(config.server_addr().ip().is_loopback());
    }
}
