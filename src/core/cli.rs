//! Command-line flags.
//!
//! Every flag is optional and overrides the matching environment setting.

use std::path::PathBuf;

use clap::Parser;

use super::config::Config;

#[derive(Debug, Default, Parser)]
#[command(name = "razorpay-mcp-server")]
#[command(about = "MCP server exposing Razorpay payments, orders, refunds and payment links")]
#[command(version)]
pub struct Cli {
    /// Razorpay API key id
    #[arg(long)]
    pub key: Option<String>,

    /// Razorpay API key secret
    #[arg(long)]
    pub secret: Option<String>,

    /// Append logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Comma-separated toolsets to enable (default: all)
    #[arg(long, value_delimiter = ',')]
    pub toolsets: Option<Vec<String>>,

    /// Expose read tools only
    #[arg(long)]
    pub read_only: bool,

    /// Razorpay API base URL
    #[arg(long)]
    pub base_url: Option<String>,
}

impl Cli {
    /// Overlay the flags that were given onto `config`.
    pub fn apply(self, config: &mut Config) {
        if let Some(key) = self.key {
            config.credentials.key_id = Some(key);
        }
        if let Some(secret) = self.secret {
            config.credentials.key_secret = Some(secret);
        }
        if let Some(file) = self.log_file {
            config.logging.file = Some(file);
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
        if let Some(toolsets) = self.toolsets {
            config.toolsets.enabled = toolsets
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect();
        }
        if self.read_only {
            config.toolsets.read_only = true;
        }
        if let Some(base_url) = self.base_url {
            config.api.base_url = Some(base_url);
        }
    }
}
