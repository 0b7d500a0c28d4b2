//! Content templates
//!
//! Handlebars templates backing the deterministic local generation path
//! used when no external client is supplied.

use handlebars::Handlebars;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::types::ContentType;

const POST_TEMPLATE: &str = "What's moving in {{topic}} right now, and why it matters on {{platform}}.{{#if hashtags}}\n\n{{hashtags}}{{/if}}";

const THREAD_TEMPLATE: &str = "1/ {{topic}} — a thread.\n\n2/ The conversation around {{topic}} has picked up fast. Here's the short version.\n\n3/ What to watch next, and who is worth following.{{#if hashtags}}\n\n{{hashtags}}{{/if}}";

const STORY_TEMPLATE: &str = "Behind the scenes: {{topic}}. Tap through for the full picture.";

const REEL_TEMPLATE: &str = "POV: {{topic}} is taking over {{platform}}.{{#if hashtags}}\n\n{{hashtags}}{{/if}}";

/// Prompt handed to an image backend alongside generated text
pub(crate) const IMAGE_PROMPT_TEMPLATE: &str =
    "Editorial photograph illustrating {{topic}}, natural light, composed for {{platform}}";

/// A content template using Handlebars syntax
#[derive(Debug)]
pub(crate) struct ContentTemplate {
    name: String,
    registry: Handlebars<'static>,
}

impl ContentTemplate {
    /// Create a new content template
    pub fn new(name: impl Into<String>, template: &str) -> Result<Self> {
        let name = name.into();
        let mut registry = Handlebars::new();

        registry
            .register_template_string(&name, template)
            .map_err(|e| Error::Template(format!("invalid template '{}': {}", name, e)))?;

        Ok(ContentTemplate { name, registry })
    }

    /// The built-in template for a content type
    pub fn for_content_type(content_type: ContentType) -> Result<Self> {
        let template = match content_type {
            ContentType::Post => POST_TEMPLATE,
            ContentType::Thread => THREAD_TEMPLATE,
            ContentType::Story => STORY_TEMPLATE,
            ContentType::Reel => REEL_TEMPLATE,
        };
        Self::new(content_type.to_string(), template)
    }

    /// Render the template with given data
    pub fn render<T: Serialize>(&self, data: &T) -> Result<String> {
        self.registry
            .render(&self.name, data)
            .map_err(|e| Error::Template(format!("render error in '{}': {}", self.name, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_post_template_renders_topic() {
        let template = ContentTemplate::for_content_type(ContentType::Post).unwrap();
        let text = template
            .render(&json!({
                "topic": "Ethiopian coffee culture",
                "platform": "instagram",
                "hashtags": "#Ethiopian #Coffee"
            }))
            .unwrap();

        assert!(text.contains("Ethiopian coffee culture"));
        assert!(text.contains("#Ethiopian #Coffee"));
    }

    #[test]
    fn test_hashtag_block_is_optional() {
        let template = ContentTemplate::for_content_type(ContentType::Post).unwrap();
        let text = template
            .render(&json!({"topic": "ai", "platform": "twitter", "hashtags": ""}))
            .unwrap();
        assert!(!text.contains('#'));
    }

    #[test]
    fn test_invalid_template_is_rejected() {
        let err = ContentTemplate::new("broken", "{{#if}}").unwrap_err();
        assert!(matches!(err, Error::Template(_)));
    }
}
