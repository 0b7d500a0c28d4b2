//! Social publishing skill
//!
//! The only skill with an external side effect: with a client it causes a
//! post to be created on a remote platform through the `publish_post` tool.
//! Without a client it performs a dry-run publish that mints a local
//! receipt, so offline orchestration flows still complete.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};
use url::Url;
use uuid::Uuid;

use super::traits::{parse_input, Skill};
use crate::config::PublishingConfig;
use crate::error::{Error, Result};
use crate::mcp::McpClient;
use crate::types::{required_string, DisclosureLevel, Platform};

/// Name of the external publishing tool
const PUBLISH_TOOL: &str = "publish_post";

/// Assembled content ready for publishing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawPostContent")]
pub struct PostContent {
    pub text: String,
    pub media_urls: Vec<String>,
}

impl PostContent {
    /// Create validated content; the text body is mandatory
    pub fn new(text: impl Into<String>, media_urls: Vec<String>) -> Result<Self> {
        let text = required_string("content.text", Some(text.into()))?;
        Ok(PostContent { text, media_urls })
    }
}

#[derive(Deserialize)]
struct RawPostContent {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    media_urls: Vec<String>,
}

impl TryFrom<RawPostContent> for PostContent {
    type Error = Error;

    fn try_from(raw: RawPostContent) -> Result<Self> {
        PostContent::new(required_string("content.text", raw.text)?, raw.media_urls)
    }
}

/// Request to publish assembled content to a platform
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawSocialPublishingInput")]
pub struct SocialPublishingInput {
    pub agent_id: String,
    pub platform: Platform,
    pub content: PostContent,
    /// `None` defers to the configured default disclosure level
    pub disclosure: Option<DisclosureLevel>,
}

impl SocialPublishingInput {
    pub fn new(
        agent_id: impl Into<String>,
        platform: Platform,
        content: PostContent,
        disclosure: Option<DisclosureLevel>,
    ) -> Result<Self> {
        let agent_id = required_string("agent_id", Some(agent_id.into()))?;
        Ok(SocialPublishingInput {
            agent_id,
            platform,
            content,
            disclosure,
        })
    }
}

#[derive(Deserialize)]
struct RawSocialPublishingInput {
    #[serde(default)]
    agent_id: Option<String>,
    platform: Platform,
    content: PostContent,
    #[serde(default)]
    disclosure: Option<DisclosureLevel>,
}

impl TryFrom<RawSocialPublishingInput> for SocialPublishingInput {
    type Error = Error;

    fn try_from(raw: RawSocialPublishingInput) -> Result<Self> {
        SocialPublishingInput::new(
            required_string("agent_id", raw.agent_id)?,
            raw.platform,
            raw.content,
            raw.disclosure,
        )
    }
}

/// Result of a publishing request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialPublishingOutput {
    pub success: bool,
    pub post_id: Option<String>,
    pub post_url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub confidence_score: f64,
    pub error: Option<String>,
}

impl SocialPublishingOutput {
    /// Create a successful result
    pub fn ok(
        post_id: impl Into<String>,
        post_url: impl Into<String>,
        published_at: DateTime<Utc>,
    ) -> Self {
        SocialPublishingOutput {
            success: true,
            post_id: Some(post_id.into()),
            post_url: Some(post_url.into()),
            published_at: Some(published_at),
            confidence_score: 1.0,
            error: None,
        }
    }

    /// Create a failed result
    pub fn failed(error: impl Into<String>) -> Self {
        SocialPublishingOutput {
            success: false,
            post_id: None,
            post_url: None,
            published_at: None,
            confidence_score: 0.0,
            error: Some(error.into()),
        }
    }
}

/// Publish a validated request using the default publishing configuration
pub async fn execute(
    input: SocialPublishingInput,
    mcp: Option<&dyn McpClient>,
) -> SocialPublishingOutput {
    execute_with(input, mcp, &PublishingConfig::default()).await
}

/// Publish a validated request.
///
/// The external tool is invoked at most once per call, so a post is never
/// created twice. External-call errors come back as a failed output record.
pub async fn execute_with(
    input: SocialPublishingInput,
    mcp: Option<&dyn McpClient>,
    config: &PublishingConfig,
) -> SocialPublishingOutput {
    let disclosure = input.disclosure.unwrap_or(config.default_disclosure);

    match mcp {
        Some(client) => match publish_remote(&input, disclosure, client).await {
            Ok(output) => output,
            Err(e) => {
                if e.is_retryable() {
                    warn!("transient failure publishing post: {}", e);
                } else {
                    error!("publishing failed: {}", e);
                }
                SocialPublishingOutput::failed(e.to_string())
            }
        },
        None => match publish_dry_run(&input) {
            Ok(output) => output,
            Err(e) => SocialPublishingOutput::failed(e.to_string()),
        },
    }
}

/// Reply shape of the external publishing tool
#[derive(Deserialize)]
struct PublishReceipt {
    post_id: String,
    #[serde(default)]
    post_url: Option<String>,
    #[serde(default)]
    published_at: Option<DateTime<Utc>>,
}

async fn publish_remote(
    input: &SocialPublishingInput,
    disclosure: DisclosureLevel,
    client: &dyn McpClient,
) -> Result<SocialPublishingOutput> {
    let args = serde_json::json!({
        "agent_id": input.agent_id,
        "platform": input.platform,
        "text": input.content.text,
        "media_urls": input.content.media_urls,
        "disclosure": disclosure,
    });

    let result = client.call_tool(PUBLISH_TOOL, args).await?;
    if result.is_error {
        return Ok(SocialPublishingOutput::failed(format!(
            "platform rejected the post: {}",
            result.text()
        )));
    }

    let receipt: PublishReceipt = serde_json::from_str(&result.text())
        .map_err(|e| Error::Resource(format!("malformed publish receipt: {}", e)))?;

    let post_url = receipt
        .post_url
        .unwrap_or_else(|| post_url_for(input.platform, &input.agent_id, &receipt.post_id));

    debug!(
        "published post {} for {} on {}",
        receipt.post_id, input.agent_id, input.platform
    );

    Ok(SocialPublishingOutput::ok(
        receipt.post_id,
        post_url,
        receipt.published_at.unwrap_or_else(Utc::now),
    ))
}

/// Mint a local receipt without touching any platform
fn publish_dry_run(input: &SocialPublishingInput) -> Result<SocialPublishingOutput> {
    let post_id = Uuid::new_v4().simple().to_string();
    let post_url = post_url_for(input.platform, &input.agent_id, &post_id);
    Url::parse(&post_url)
        .map_err(|e| Error::Resource(format!("minted post url is invalid: {}", e)))?;

    debug!(
        "dry-run publish for {} on {} (no client configured)",
        input.agent_id, input.platform
    );

    Ok(SocialPublishingOutput::ok(post_id, post_url, Utc::now()))
}

fn post_url_for(platform: Platform, agent_id: &str, post_id: &str) -> String {
    format!("https://{}/{}/posts/{}", platform.host(), agent_id, post_id)
}

/// Registry wrapper for the social publishing skill
pub struct SocialPublishingSkill {
    config: PublishingConfig,
}

impl SocialPublishingSkill {
    pub fn new(config: PublishingConfig) -> Self {
        SocialPublishingSkill { config }
    }
}

impl Default for SocialPublishingSkill {
    fn default() -> Self {
        Self::new(PublishingConfig::default())
    }
}

#[async_trait]
impl Skill for SocialPublishingSkill {
    fn name(&self) -> &str {
        "social_publishing"
    }

    fn description(&self) -> &str {
        "Publish assembled content to a social platform and return the post receipt."
    }

    async fn execute_json(&self, input: Value, mcp: Option<&dyn McpClient>) -> Result<Value> {
        let input: SocialPublishingInput = parse_input(input)?;
        Ok(serde_json::to_value(
            execute_with(input, mcp, &self.config).await,
        )?)
    }
}
