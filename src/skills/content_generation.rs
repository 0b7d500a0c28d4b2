//! Content generation skill
//!
//! Produces draft post content for a topic/platform/content-type request.
//! With an external client the `generate_content` tool does the writing;
//! without one, a deterministic template path is used so the skill stays
//! usable offline.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};

use super::templates::{ContentTemplate, IMAGE_PROMPT_TEMPLATE};
use super::traits::{parse_input, Skill};
use crate::error::{Error, Result};
use crate::mcp::McpClient;
use crate::types::{required_string, ContentType, Platform};

/// Name of the external generation tool
const GENERATE_TOOL: &str = "generate_content";

/// Request for a piece of generated content
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawContentGenerationInput")]
pub struct ContentGenerationInput {
    pub agent_id: String,
    pub content_type: ContentType,
    pub topic: String,
    pub platform: Platform,
    pub include_image: bool,
}

impl ContentGenerationInput {
    /// Create a validated request. Fails closed on a blank agent id or
    /// topic, or a content type the platform cannot carry.
    pub fn new(
        agent_id: impl Into<String>,
        content_type: ContentType,
        topic: impl Into<String>,
        platform: Platform,
        include_image: bool,
    ) -> Result<Self> {
        let agent_id = required_string("agent_id", Some(agent_id.into()))?;
        let topic = required_string("topic", Some(topic.into()))?;
        if !content_type.supported_on(platform) {
            return Err(Error::validation(
                "content_type",
                format!("{} content is not supported on {}", content_type, platform),
            ));
        }

        Ok(ContentGenerationInput {
            agent_id,
            content_type,
            topic,
            platform,
            include_image,
        })
    }
}

#[derive(Deserialize)]
struct RawContentGenerationInput {
    #[serde(default)]
    agent_id: Option<String>,
    content_type: ContentType,
    #[serde(default)]
    topic: Option<String>,
    platform: Platform,
    #[serde(default)]
    include_image: bool,
}

impl TryFrom<RawContentGenerationInput> for ContentGenerationInput {
    type Error = Error;

    fn try_from(raw: RawContentGenerationInput) -> Result<Self> {
        ContentGenerationInput::new(
            required_string("agent_id", raw.agent_id)?,
            raw.content_type,
            required_string("topic", raw.topic)?,
            raw.platform,
            raw.include_image,
        )
    }
}

/// A generated content payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedContent {
    /// Post body
    pub text: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    /// Prompt for the image backend, when an image was requested
    #[serde(default)]
    pub image_prompt: Option<String>,
}

/// Result of a content generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentGenerationOutput {
    pub success: bool,
    pub content: Option<GeneratedContent>,
    pub confidence_score: f64,
    pub reasoning: String,
    pub error: Option<String>,
}

impl ContentGenerationOutput {
    /// Create a successful result
    pub fn ok(
        content: GeneratedContent,
        confidence_score: f64,
        reasoning: impl Into<String>,
    ) -> Self {
        ContentGenerationOutput {
            success: true,
            content: Some(content),
            confidence_score: confidence_score.clamp(0.0, 1.0),
            reasoning: reasoning.into(),
            error: None,
        }
    }

    /// Create a failed result
    pub fn failed(error: impl Into<String>) -> Self {
        ContentGenerationOutput {
            success: false,
            content: None,
            confidence_score: 0.0,
            reasoning: "generation did not complete".to_string(),
            error: Some(error.into()),
        }
    }
}

/// Generate content for a validated request.
///
/// Never raises for expected failures: external-call errors come back as a
/// failed output record.
pub async fn execute(
    input: ContentGenerationInput,
    mcp: Option<&dyn McpClient>,
) -> ContentGenerationOutput {
    match mcp {
        Some(client) => match generate_remote(&input, client).await {
            Ok(output) => output,
            Err(e) => {
                if e.is_retryable() {
                    warn!("transient failure generating content: {}", e);
                } else {
                    error!("content generation failed: {}", e);
                }
                ContentGenerationOutput::failed(e.to_string())
            }
        },
        None => match generate_local(&input) {
            Ok(output) => output,
            Err(e) => {
                error!("local content generation failed: {}", e);
                ContentGenerationOutput::failed(e.to_string())
            }
        },
    }
}

/// Reply shape of the external generation tool
#[derive(Deserialize)]
struct RemoteGeneration {
    text: String,
    #[serde(default)]
    hashtags: Vec<String>,
    #[serde(default)]
    image_prompt: Option<String>,
    #[serde(default)]
    confidence_score: Option<f64>,
}

async fn generate_remote(
    input: &ContentGenerationInput,
    client: &dyn McpClient,
) -> Result<ContentGenerationOutput> {
    let args = serde_json::json!({
        "agent_id": input.agent_id,
        "content_type": input.content_type,
        "topic": input.topic,
        "platform": input.platform,
        "include_image": input.include_image,
    });

    let result = client.call_tool(GENERATE_TOOL, args).await?;
    if result.is_error {
        return Ok(ContentGenerationOutput::failed(format!(
            "generation backend rejected the request: {}",
            result.text()
        )));
    }

    let text = result.text();
    if text.trim().is_empty() {
        return Ok(ContentGenerationOutput::failed(
            "generation backend returned no content",
        ));
    }

    // Structured replies carry their own confidence; plain text gets a
    // slightly lower one
    let (content, confidence) = match serde_json::from_str::<RemoteGeneration>(&text) {
        Ok(remote) => (
            GeneratedContent {
                text: remote.text,
                hashtags: remote.hashtags,
                image_prompt: remote.image_prompt,
            },
            remote.confidence_score.unwrap_or(0.9),
        ),
        Err(_) => (
            GeneratedContent {
                text,
                hashtags: derive_hashtags(&input.topic),
                image_prompt: None,
            },
            0.8,
        ),
    };

    Ok(ContentGenerationOutput::ok(
        content,
        confidence,
        "generated by the external content backend",
    ))
}

fn generate_local(input: &ContentGenerationInput) -> Result<ContentGenerationOutput> {
    let hashtags = derive_hashtags(&input.topic);
    let data = serde_json::json!({
        "topic": input.topic,
        "platform": input.platform.to_string(),
        "hashtags": hashtags.join(" "),
    });

    let text = ContentTemplate::for_content_type(input.content_type)?.render(&data)?;
    let image_prompt = if input.include_image {
        Some(ContentTemplate::new("image_prompt", IMAGE_PROMPT_TEMPLATE)?.render(&data)?)
    } else {
        None
    };

    debug!(
        "rendered {} draft for {} on {}",
        input.content_type, input.agent_id, input.platform
    );

    Ok(ContentGenerationOutput::ok(
        GeneratedContent {
            text,
            hashtags,
            image_prompt,
        },
        local_confidence(input),
        format!("rendered from the built-in {} template", input.content_type),
    ))
}

/// Turn topic words into capitalized hashtags
fn derive_hashtags(topic: &str) -> Vec<String> {
    topic
        .split_whitespace()
        .filter(|w| w.len() > 3 && w.chars().all(|c| c.is_alphanumeric()))
        .take(4)
        .filter_map(|w| {
            let mut chars = w.chars();
            chars
                .next()
                .map(|first| format!("#{}{}", first.to_uppercase(), chars.as_str().to_lowercase()))
        })
        .collect()
}

/// Template output tracks topic specificity: multi-word topics fill the
/// templates better than one-word prompts
fn local_confidence(input: &ContentGenerationInput) -> f64 {
    let words = input.topic.split_whitespace().count();
    let mut score: f64 = 0.6;
    if words >= 2 {
        score += 0.15;
    }
    if words >= 4 {
        score += 0.05;
    }
    if input.content_type == ContentType::Post {
        score += 0.05;
    }
    score.min(0.9)
}

/// Registry wrapper for the content generation skill
pub struct ContentGenerationSkill;

#[async_trait]
impl Skill for ContentGenerationSkill {
    fn name(&self) -> &str {
        "content_generation"
    }

    fn description(&self) -> &str {
        "Generate draft social content for a topic, platform, and content type."
    }

    async fn execute_json(&self, input: Value, mcp: Option<&dyn McpClient>) -> Result<Value> {
        let input: ContentGenerationInput = parse_input(input)?;
        Ok(serde_json::to_value(execute(input, mcp).await)?)
    }
}
