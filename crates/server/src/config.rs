//! Server configuration from command-line flags and the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use decant_core::{FetchConfig, SiteRules};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Extra time the HTTP layer allows on top of the upstream fetch timeout.
const REQUEST_TIMEOUT_SLACK: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Parser)]
#[command(name = "decant-server", version, about = "HTTP API for web page content extraction")]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "DECANT_LISTEN", default_value = "0.0.0.0:8000")]
    pub listen: SocketAddr,

    /// Upstream fetch timeout in seconds
    #[arg(long, env = "DECANT_TIMEOUT", default_value_t = 30)]
    pub timeout: u64,

    /// Custom User-Agent for upstream requests
    #[arg(long, env = "DECANT_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Site rules file (JSON). Defaults to the user config directory.
    #[arg(long, env = "DECANT_RULES")]
    pub rules: Option<PathBuf>,

    /// Log output format
    #[arg(long, env = "DECANT_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Allow cross-origin requests from any origin
    #[arg(long, env = "DECANT_CORS")]
    pub cors: bool,
}

impl ServerConfig {
    /// Fetch settings for the pipeline, loading site rules from disk.
    pub fn fetch_config(&self) -> anyhow::Result<FetchConfig> {
        let rules = SiteRules::load_or_default(self.rules.as_deref()).context("failed to load site rules")?;

        let mut config = FetchConfig { timeout: self.timeout, rules, ..Default::default() };
        if let Some(user_agent) = &self.user_agent {
            config.user_agent = user_agent.clone();
        }
        Ok(config)
    }

    /// Deadline for a whole HTTP request.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout) + REQUEST_TIMEOUT_SLACK
    }
}
