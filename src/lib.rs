//! # Chimera Skills
//!
//! Skills layer for the Chimera autonomous social-media agent.
//!
//! ## Features
//!
//! - **Uniform Skill Contract:** Validated input record in, output record
//!   with a success flag and confidence score out
//! - **Content Generation:** Draft posts, threads, stories, and reels
//! - **Social Publishing:** Platform publishing with dry-run fallback
//! - **Trend Analysis:** Scored, classified trend records for a niche set
//! - **MCP Native:** External tools and feeds reached through a single
//!   Model Context Protocol client capability

pub mod config;
pub mod error;
pub mod mcp;
pub mod skills;
pub mod trends;
pub mod types;

pub use config::{load_config, SkillsConfig};
pub use error::{Error, Result};
pub use mcp::{McpClient, StdioMcpClient};
pub use skills::{Skill, SkillRegistry};
pub use types::{
    ContentType, DisclosureLevel, Platform, Sentiment, TimeWindow, TrendRecord, TrendSource,
    Velocity,
};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const NAME: &str = env!("CARGO_PKG_NAME");
