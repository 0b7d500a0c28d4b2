//! Configuration for the skills layer
//!
//! Layered precedence: built-in defaults, then an optional TOML file, then
//! environment variable overrides (a `.env` file is honored for local
//! development).

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{DisclosureLevel, TrendSource};

/// Top-level configuration for the skills layer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillsConfig {
    /// Trend analysis defaults
    pub trends: TrendsConfig,
    /// Publishing defaults
    pub publishing: PublishingConfig,
    /// External client transport settings
    pub mcp: McpConfig,
}

/// Defaults applied to trend analysis requests
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendsConfig {
    /// Sources consulted when a request does not name any
    pub default_sources: Vec<TrendSource>,
    /// Result cap applied when a request does not supply `max_results`
    pub default_max_results: usize,
}

impl Default for TrendsConfig {
    fn default() -> Self {
        TrendsConfig {
            default_sources: vec![TrendSource::News, TrendSource::Twitter],
            default_max_results: 25,
        }
    }
}

/// Defaults applied to publishing requests
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishingConfig {
    /// Disclosure level used when a request does not set one
    pub default_disclosure: DisclosureLevel,
}

impl Default for PublishingConfig {
    fn default() -> Self {
        PublishingConfig {
            default_disclosure: DisclosureLevel::Automated,
        }
    }
}

/// Stdio transport settings for the external MCP client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct McpConfig {
    /// Command to spawn the MCP server
    pub command: Option<String>,
    /// Arguments passed to the command
    pub args: Vec<String>,
    /// Per-request timeout
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl Default for McpConfig {
    fn default() -> Self {
        McpConfig {
            command: None,
            args: Vec::new(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Load configuration, starting from defaults or the given TOML file,
/// then applying environment variable overrides.
pub fn load_config(path: Option<&Path>) -> Result<SkillsConfig> {
    // .env is optional; absence is not an error
    dotenvy::dotenv().ok();

    let mut config = match path {
        Some(p) => load_config_from_path(p)?,
        None => SkillsConfig::default(),
    };

    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Load configuration from a TOML file
pub fn load_config_from_path(path: &Path) -> Result<SkillsConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("failed to read config file {}: {}", path.display(), e))
    })?;

    toml::from_str(&content).map_err(|e| Error::Config(format!("invalid TOML config: {}", e)))
}

/// Apply environment variable overrides to an existing config.
///
/// Env vars have the highest precedence in the layering:
/// defaults < file < env.
pub fn apply_env_overrides(config: &mut SkillsConfig) -> Result<()> {
    if let Ok(command) = std::env::var("CHIMERA_MCP_COMMAND") {
        if !command.trim().is_empty() {
            config.mcp.command = Some(command);
        }
    }

    if let Ok(timeout) = std::env::var("CHIMERA_MCP_TIMEOUT") {
        config.mcp.request_timeout = humantime_serde::re::humantime::parse_duration(&timeout)
            .map_err(|e| Error::Config(format!("CHIMERA_MCP_TIMEOUT: {}", e)))?;
    }

    if let Ok(cap) = std::env::var("CHIMERA_TREND_MAX_RESULTS") {
        config.trends.default_max_results = cap
            .parse::<usize>()
            .map_err(|e| Error::Config(format!("CHIMERA_TREND_MAX_RESULTS: {}", e)))?;
    }

    if let Ok(disclosure) = std::env::var("CHIMERA_DISCLOSURE") {
        config.publishing.default_disclosure = match disclosure.to_lowercase().as_str() {
            "automated" => DisclosureLevel::Automated,
            "assisted" => DisclosureLevel::Assisted,
            "none" => DisclosureLevel::None,
            other => {
                return Err(Error::Config(format!(
                    "CHIMERA_DISCLOSURE: unknown disclosure level '{}'",
                    other
                )))
            }
        };
    }

    Ok(())
}
