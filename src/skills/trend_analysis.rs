//! Trend analysis skill
//!
//! Wraps the trend fetcher in the uniform skill shape: with an external
//! client it sources live feeds through the async fetcher, without one it
//! scores the seeded snapshot. Side-effect free.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, warn};

use super::traits::{parse_input, Skill};
use crate::config::TrendsConfig;
use crate::error::{Error, Result};
use crate::mcp::McpClient;
use crate::trends::{fetch_trends, fetch_trends_async_with};
use crate::types::{required_string, unit_interval, TimeWindow, TrendRecord, TrendSource};

/// Request for scored trend candidates
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawTrendAnalysisInput")]
pub struct TrendAnalysisInput {
    pub agent_id: String,
    /// Topic phrases to match against
    pub niche: Vec<String>,
    /// Providers to consult; empty means "use the configured defaults"
    pub sources: Vec<TrendSource>,
    pub time_window: TimeWindow,
    pub min_relevance_score: f64,
    pub max_results: Option<usize>,
}

impl TrendAnalysisInput {
    pub fn new(
        agent_id: impl Into<String>,
        niche: Vec<String>,
        sources: Vec<TrendSource>,
        time_window: TimeWindow,
        min_relevance_score: f64,
        max_results: Option<usize>,
    ) -> Result<Self> {
        let agent_id = required_string("agent_id", Some(agent_id.into()))?;
        let min_relevance_score = unit_interval("min_relevance_score", min_relevance_score)?;
        if max_results == Some(0) {
            return Err(Error::validation("max_results", "must be at least 1"));
        }

        Ok(TrendAnalysisInput {
            agent_id,
            niche,
            sources,
            time_window,
            min_relevance_score,
            max_results,
        })
    }
}

#[derive(Deserialize)]
struct RawTrendAnalysisInput {
    #[serde(default)]
    agent_id: Option<String>,
    #[serde(default)]
    niche: Vec<String>,
    #[serde(default)]
    sources: Vec<TrendSource>,
    time_window: TimeWindow,
    min_relevance_score: f64,
    #[serde(default)]
    max_results: Option<usize>,
}

impl TryFrom<RawTrendAnalysisInput> for TrendAnalysisInput {
    type Error = Error;

    fn try_from(raw: RawTrendAnalysisInput) -> Result<Self> {
        TrendAnalysisInput::new(
            required_string("agent_id", raw.agent_id)?,
            raw.niche,
            raw.sources,
            raw.time_window,
            raw.min_relevance_score,
            raw.max_results,
        )
    }
}

/// Result of a trend analysis request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendAnalysisOutput {
    pub success: bool,
    pub trends: Vec<TrendRecord>,
    pub confidence_score: f64,
    pub error: Option<String>,
}

impl TrendAnalysisOutput {
    /// Create a successful result; confidence tracks the mean relevance of
    /// what was found. An empty list is still success.
    pub fn ok(trends: Vec<TrendRecord>) -> Self {
        let confidence_score = if trends.is_empty() {
            0.0
        } else {
            let sum: f64 = trends.iter().map(|t| t.relevance_score).sum();
            (sum / trends.len() as f64).clamp(0.0, 1.0)
        };

        TrendAnalysisOutput {
            success: true,
            trends,
            confidence_score,
            error: None,
        }
    }

    /// Create a failed result
    pub fn failed(error: impl Into<String>) -> Self {
        TrendAnalysisOutput {
            success: false,
            trends: Vec::new(),
            confidence_score: 0.0,
            error: Some(error.into()),
        }
    }
}

/// Analyze trends for a validated request using default trend configuration
pub async fn execute(
    input: TrendAnalysisInput,
    mcp: Option<&dyn McpClient>,
) -> TrendAnalysisOutput {
    execute_with(input, mcp, &TrendsConfig::default()).await
}

/// Analyze trends for a validated request.
///
/// External-call errors come back as a failed output record; a niche that
/// matches nothing yields an empty, successful result.
pub async fn execute_with(
    input: TrendAnalysisInput,
    mcp: Option<&dyn McpClient>,
    config: &TrendsConfig,
) -> TrendAnalysisOutput {
    let sources = if input.sources.is_empty() {
        config.default_sources.clone()
    } else {
        input.sources.clone()
    };
    let max_results = input.max_results.or(Some(config.default_max_results));

    match mcp {
        Some(client) => {
            match fetch_trends_async_with(
                &input.niche,
                input.time_window,
                &sources,
                input.min_relevance_score,
                max_results,
                client,
            )
            .await
            {
                Ok(trends) => TrendAnalysisOutput::ok(trends),
                Err(e) => {
                    if e.is_retryable() {
                        warn!("transient failure fetching trends: {}", e);
                    } else {
                        error!("trend analysis failed: {}", e);
                    }
                    TrendAnalysisOutput::failed(e.to_string())
                }
            }
        }
        None => TrendAnalysisOutput::ok(fetch_trends(
            &input.niche,
            input.time_window,
            input.min_relevance_score,
            max_results,
        )),
    }
}

/// Registry wrapper for the trend analysis skill
pub struct TrendAnalysisSkill {
    config: TrendsConfig,
}

impl TrendAnalysisSkill {
    pub fn new(config: TrendsConfig) -> Self {
        TrendAnalysisSkill { config }
    }
}

impl Default for TrendAnalysisSkill {
    fn default() -> Self {
        Self::new(TrendsConfig::default())
    }
}

#[async_trait]
impl Skill for TrendAnalysisSkill {
    fn name(&self) -> &str {
        "trend_analysis"
    }

    fn description(&self) -> &str {
        "Gather and score trending topics for a set of niches."
    }

    async fn execute_json(&self, input: Value, mcp: Option<&dyn McpClient>) -> Result<Value> {
        let input: TrendAnalysisInput = parse_input(input)?;
        Ok(serde_json::to_value(
            execute_with(input, mcp, &self.config).await,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::testing::{FailureMode, StubClient};

    fn fashion_input() -> TrendAnalysisInput {
        TrendAnalysisInput::new(
            "test_agent_123",
            vec!["fashion".to_string(), "ethiopian culture".to_string()],
            vec![TrendSource::News, TrendSource::Twitter],
            "24h".parse().unwrap(),
            0.75,
            None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_execute_without_client_succeeds() {
        let result = execute(fashion_input(), None).await;

        assert!(result.success);
        assert!(!result.trends.is_empty());
        assert!((0.0..=1.0).contains(&result.confidence_score));
        for trend in &result.trends {
            assert!(trend.relevance_score >= 0.75);
        }
    }

    #[tokio::test]
    async fn test_execute_applies_max_results() {
        let input = TrendAnalysisInput::new(
            "test_agent_123",
            vec!["fashion".to_string()],
            vec![],
            "24h".parse().unwrap(),
            0.0,
            Some(1),
        )
        .unwrap();

        let result = execute(input, None).await;
        assert!(result.success);
        assert_eq!(result.trends.len(), 1);
    }

    #[tokio::test]
    async fn test_execute_with_client_fetches_each_source() {
        let mut stub = StubClient::with_resource(
            "news://latest",
            serde_json::json!({"articles": [{"title": "Fashion week opens"}]}),
        );
        stub.resources.insert(
            "twitter://trending".to_string(),
            serde_json::json!({"posts": [{"title": "fashion discourse"}]}),
        );

        let result = execute(fashion_input(), Some(&stub)).await;

        assert!(result.success);
        let requests = stub.resource_requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_sources_fall_back_to_config() {
        let stub = StubClient::new();
        let input = TrendAnalysisInput::new(
            "test_agent_123",
            vec!["fashion".to_string()],
            vec![],
            "24h".parse().unwrap(),
            0.5,
            None,
        )
        .unwrap();

        let config = TrendsConfig {
            default_sources: vec![TrendSource::Reddit],
            default_max_results: 10,
        };
        let result = execute_with(input, Some(&stub), &config).await;

        assert!(result.success);
        let requests = stub.resource_requests.lock().unwrap();
        assert_eq!(requests.as_slice(), ["reddit://hot"]);
    }

    #[tokio::test]
    async fn test_timeout_becomes_failed_result() {
        let stub = StubClient::failing(FailureMode::Timeout);
        let result = execute(fashion_input(), Some(&stub)).await;

        assert!(!result.success);
        assert!(result.trends.is_empty());
        assert!(result.error.unwrap().to_lowercase().contains("timeout"));
    }

    #[tokio::test]
    async fn test_unmatched_niche_is_success() {
        let input = TrendAnalysisInput::new(
            "test_agent_123",
            vec!["underwater basket weaving".to_string()],
            vec![],
            "24h".parse().unwrap(),
            0.95,
            None,
        )
        .unwrap();

        let result = execute(input, None).await;
        assert!(result.success);
        assert!(result.trends.is_empty());
        assert_eq!(result.confidence_score, 0.0);
    }

    #[test]
    fn test_relevance_floor_must_be_unit_interval() {
        let err = TrendAnalysisInput::new(
            "test_agent_123",
            vec!["fashion".to_string()],
            vec![],
            "24h".parse().unwrap(),
            1.5,
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("min_relevance_score"));
    }

    #[test]
    fn test_zero_max_results_is_rejected() {
        let err = TrendAnalysisInput::new(
            "test_agent_123",
            vec!["fashion".to_string()],
            vec![],
            "24h".parse().unwrap(),
            0.5,
            Some(0),
        )
        .unwrap_err();
        assert!(err.to_string().contains("max_results"));
    }

    #[test]
    fn test_missing_agent_id_fails_construction() {
        let err = serde_json::from_value::<TrendAnalysisInput>(serde_json::json!({
            "niche": ["fashion"],
            "time_window": "24h",
            "min_relevance_score": 0.75
        }))
        .unwrap_err();
        assert!(err.to_string().contains("agent_id"));
    }

    #[test]
    fn test_input_parses_from_wire_shape() {
        let input: TrendAnalysisInput = serde_json::from_value(serde_json::json!({
            "agent_id": "test_agent_123",
            "niche": ["fashion", "ethiopian culture"],
            "sources": ["news", "twitter"],
            "time_window": "24h",
            "min_relevance_score": 0.75
        }))
        .unwrap();

        assert_eq!(input.time_window.hours(), 24.0);
        assert_eq!(
            input.sources,
            vec![TrendSource::News, TrendSource::Twitter]
        );
        assert!(input.max_results.is_none());
    }
}
