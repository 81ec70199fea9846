//! Configuration management for the MCP server.
//!
//! Configuration is read from environment variables (a `.env` file is loaded
//! first if present). Command-line flags are applied on top by
//! [`Cli::apply`](super::cli::Cli::apply).

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Razorpay API key pair.
    pub credentials: CredentialsConfig,

    /// Razorpay API endpoint settings.
    pub api: ApiConfig,

    /// Which toolsets are exposed, and whether write tools are allowed.
    pub toolsets: ToolsetsConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Append logs to this file instead of stderr.
    pub file: Option<PathBuf>,
}

/// Razorpay API credentials.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    pub key_id: Option<String>,
    pub key_secret: Option<String>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("key_id", &self.key_id)
            .field("key_secret", &self.key_secret.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Razorpay API endpoint configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Override of the API host, mainly for testing.
    pub base_url: Option<String>,

    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Toolset selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolsetsConfig {
    /// Toolsets to enable. Empty means all of them.
    pub enabled: Vec<String>,

    /// Expose read tools only.
    pub read_only: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "razorpay-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file: None,
            },
            transport: TransportConfig::default(),
            credentials: CredentialsConfig::default(),
            api: ApiConfig::default(),
            toolsets: ToolsetsConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Server settings use the `MCP_` prefix (`MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`, `MCP_LOG_FILE`, `MCP_TOOLSETS`, `MCP_READ_ONLY`),
    /// Razorpay settings the `RAZORPAY_` prefix (`RAZORPAY_KEY_ID`,
    /// `RAZORPAY_KEY_SECRET`, `RAZORPAY_BASE_URL`, `RAZORPAY_TIMEOUT_SECS`).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(file) = non_empty_var("MCP_LOG_FILE") {
            config.logging.file = Some(PathBuf::from(file));
        }

        config.transport = TransportConfig::from_env();

        config.credentials.key_id = non_empty_var("RAZORPAY_KEY_ID");
        config.credentials.key_secret = non_empty_var("RAZORPAY_KEY_SECRET");

        config.api.base_url = non_empty_var("RAZORPAY_BASE_URL");

        if let Some(timeout) = non_empty_var("RAZORPAY_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) if secs > 0 => config.api.timeout_secs = Some(secs),
                _ => warn!(
                    "Ignoring invalid RAZORPAY_TIMEOUT_SECS value: {:?}",
                    timeout
                ),
            }
        }

        if let Ok(toolsets) = std::env::var("MCP_TOOLSETS") {
            config.toolsets.enabled = parse_list(&toolsets);
        }

        if let Ok(read_only) = std::env::var("MCP_READ_ONLY") {
            config.toolsets.read_only = parse_flag(&read_only);
        }

        config
    }

    /// Check that the configuration can start a server.
    pub fn validate(&self) -> Result<()> {
        if self.credentials.key_id.is_none() || self.credentials.key_secret.is_none() {
            return Err(Error::config(
                "Razorpay key and secret are required \
                 (set RAZORPAY_KEY_ID and RAZORPAY_KEY_SECRET, or pass --key and --secret)",
            ));
        }
        Ok(())
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Split a comma-separated list, dropping blanks.
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Interpret a boolean-ish environment value.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    const VARS: [&str; 8] = [
        "RAZORPAY_KEY_ID",
        "RAZORPAY_KEY_SECRET",
        "RAZORPAY_BASE_URL",
        "RAZORPAY_TIMEOUT_SECS",
        "MCP_TOOLSETS",
        "MCP_READ_ONLY",
        "MCP_LOG_FILE",
        "MCP_SERVER_NAME",
    ];

    fn clear_env() {
        for var in VARS {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_razorpay_settings_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var("RAZORPAY_KEY_ID", "rzp_test_123");
            std::env::set_var("RAZORPAY_KEY_SECRET", "secret_456");
            std::env::set_var("RAZORPAY_BASE_URL", "http://localhost:9000");
            std::env::set_var("RAZORPAY_TIMEOUT_SECS", "15");
        }
        let config = Config::from_env();
        clear_env();

        assert_eq!(config.credentials.key_id.as_deref(), Some("rzp_test_123"));
        assert_eq!(config.credentials.key_secret.as_deref(), Some("secret_456"));
        assert_eq!(config.api.base_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(config.api.timeout(), Some(Duration::from_secs(15)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toolsets_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var("MCP_TOOLSETS", "orders, refunds,,");
            std::env::set_var("MCP_READ_ONLY", "true");
        }
        let config = Config::from_env();
        clear_env();

        assert_eq!(config.toolsets.enabled, vec!["orders", "refunds"]);
        assert!(config.toolsets.read_only);
    }

    #[test]
    fn test_invalid_timeout_is_ignored() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var("RAZORPAY_TIMEOUT_SECS", "soon");
        }
        let config = Config::from_env();
        clear_env();

        assert_eq!(config.api.timeout_secs, None);
    }

    #[test]
    fn test_missing_credentials_fail_validation() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var("RAZORPAY_KEY_ID", "rzp_test_123");
            std::env::set_var("RAZORPAY_KEY_SECRET", "   ");
        }
        let config = Config::from_env();
        clear_env();

        assert!(config.credentials.key_secret.is_none());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("RAZORPAY_KEY_SECRET"));
    }

    #[test]
    fn test_credentials_redacted_in_debug() {
        let creds = CredentialsConfig {
            key_id: Some("rzp_test_123".to_string()),
            key_secret: Some("super_secret_key".to_string()),
        };
        let debug_str = format!("{:?}", creds);
        assert!(debug_str.contains("REDACTED"));
        assert!(debug_str.contains("rzp_test_123"));
        assert!(!debug_str.contains("super_secret_key"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.name, "razorpay-mcp-server");
        assert!(config.toolsets.enabled.is_empty());
        assert!(!config.toolsets.read_only);
        assert!(config.logging.file.is_none());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_list(" payments ,orders"), vec!["payments", "orders"]);
        assert!(parse_list("").is_empty());
        assert!(parse_flag("TRUE"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag("nope"));
    }
}
