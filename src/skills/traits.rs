//! Skill contract and registry
//!
//! A skill is a uniformly shaped request/response capability: a validated
//! input record in, an optional external client, a validated output record
//! out. The typed entry points live in each skill module; this trait is the
//! object-safe wrapper an orchestrator dispatches by name with JSON records.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::SkillsConfig;
use crate::error::{Error, Result};
use crate::mcp::McpClient;

/// A uniformly shaped agent capability
#[async_trait]
pub trait Skill: Send + Sync {
    /// Skill name (used for identification and invocation)
    fn name(&self) -> &str;

    /// Human-readable description
    fn description(&self) -> &str;

    /// Execute the skill against a JSON input record.
    ///
    /// `Err` is reserved for construction-time validation failures; runtime
    /// failures come back inside the output record with `success = false`.
    async fn execute_json(&self, input: Value, mcp: Option<&dyn McpClient>) -> Result<Value>;
}

/// Deserialize a JSON input record, surfacing failures as validation errors
pub(crate) fn parse_input<T: DeserializeOwned>(input: Value) -> Result<T> {
    serde_json::from_value(input).map_err(|e| Error::validation("input", e.to_string()))
}

/// Registry of available skills
pub struct SkillRegistry {
    skills: HashMap<String, Box<dyn Skill>>,
}

impl Default for SkillRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        SkillRegistry {
            skills: HashMap::new(),
        }
    }

    /// Create a registry holding the three built-in skills
    pub fn with_defaults(config: &SkillsConfig) -> Self {
        let mut registry = SkillRegistry::new();
        registry.register(super::content_generation::ContentGenerationSkill);
        registry.register(super::social_publishing::SocialPublishingSkill::new(
            config.publishing.clone(),
        ));
        registry.register(super::trend_analysis::TrendAnalysisSkill::new(
            config.trends.clone(),
        ));
        registry
    }

    /// Register a skill
    pub fn register<S: Skill + 'static>(&mut self, skill: S) {
        self.skills.insert(skill.name().to_string(), Box::new(skill));
    }

    /// Get a skill by name
    pub fn get(&self, name: &str) -> Option<&dyn Skill> {
        self.skills.get(name).map(|s| s.as_ref())
    }

    /// Execute a skill by name
    pub async fn execute(
        &self,
        name: &str,
        input: Value,
        mcp: Option<&dyn McpClient>,
    ) -> Result<Value> {
        match self.get(name) {
            Some(skill) => skill.execute_json(input, mcp).await,
            None => Err(Error::validation(
                "skill",
                format!("unknown skill '{}'", name),
            )),
        }
    }

    /// List all skill names
    pub fn names(&self) -> Vec<&str> {
        self.skills.keys().map(|s| s.as_str()).collect()
    }

    /// Get skill count
    pub fn count(&self) -> usize {
        self.skills.len()
    }
}
