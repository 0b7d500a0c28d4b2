//! Trend fetching
//!
//! Two forms with the same semantics: `fetch_trends` scores the seeded
//! in-process snapshot and performs no I/O; `fetch_trends_async` sources
//! articles through the external client's resource-fetch capability, one
//! fetch per requested source. Both filter by the relevance floor, sort by
//! relevance descending, and truncate to the caller's result cap.

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde_json::Value;
use tracing::debug;

use super::dataset;
use super::scoring;
use crate::error::Result;
use crate::mcp::McpClient;
use crate::types::{TimeWindow, TrendRecord, TrendSource, Velocity};

/// Gather and score trends for a set of niches from the seeded snapshot.
///
/// Suitable for offline and deterministic use: no external client, no
/// blocking I/O. A niche matching nothing yields an empty vec, which is
/// success rather than failure.
pub fn fetch_trends(
    niche: &[String],
    window: TimeWindow,
    min_relevance_score: f64,
    max_results: Option<usize>,
) -> Vec<TrendRecord> {
    let niche_tokens: Vec<Vec<String>> = niche.iter().map(|p| scoring::tokenize(p)).collect();

    let mut records = Vec::new();
    for signal in dataset::SNAPSHOT {
        if f64::from(signal.freshness_hours) > window.hours() {
            continue;
        }

        let score = niche_tokens
            .iter()
            .map(|tokens| {
                scoring::relevance(
                    scoring::coverage(tokens, signal.keywords),
                    scoring::max_authority(signal.sources),
                    signal.mentions,
                )
            })
            .fold(0.0, f64::max);
        if score <= 0.0 {
            continue;
        }

        records.push(TrendRecord::new(
            signal.topic,
            score,
            signal.sources.to_vec(),
            scoring::classify_sentiment(signal.positive_hits, signal.negative_hits),
            scoring::classify_velocity(signal.mentions, signal.prev_mentions),
        ));
    }

    finalize(records, min_relevance_score, max_results)
}

/// Asynchronous form of `fetch_trends`, sourcing data through the external
/// client from the default news feed.
pub async fn fetch_trends_async(
    niche: &[String],
    window: TimeWindow,
    mcp: &dyn McpClient,
) -> Result<Vec<TrendRecord>> {
    fetch_trends_async_with(niche, window, &[TrendSource::News], 0.0, None, mcp).await
}

/// Fully parameterized asynchronous fetch.
///
/// Issues exactly one resource fetch per requested source. A payload with
/// no matching articles reduces the result, it does not fail; transport and
/// timeout errors propagate for the skill layer to translate.
pub async fn fetch_trends_async_with(
    niche: &[String],
    window: TimeWindow,
    sources: &[TrendSource],
    min_relevance_score: f64,
    max_results: Option<usize>,
    mcp: &dyn McpClient,
) -> Result<Vec<TrendRecord>> {
    let niche_tokens: Vec<Vec<String>> = niche.iter().map(|p| scoring::tokenize(p)).collect();

    let fetches = sources.iter().map(|source| async move {
        let payload = mcp.get_resource(source.resource_uri()).await;
        (*source, payload)
    });

    let mut records: Vec<TrendRecord> = Vec::new();
    for (source, payload) in join_all(fetches).await {
        let payload = payload?;
        for record in records_from_payload(source, &payload, &niche_tokens, window) {
            merge_record(&mut records, record);
        }
    }

    debug!(
        "fetched {} candidate trends from {} source(s)",
        records.len(),
        sources.len()
    );

    Ok(finalize(records, min_relevance_score, max_results))
}

/// Turn one source's payload into candidate trend records.
///
/// Accepts `articles`, `items`, or `posts` as the item key; anything else
/// is treated as an empty feed.
fn records_from_payload(
    source: TrendSource,
    payload: &Value,
    niche_tokens: &[Vec<String>],
    window: TimeWindow,
) -> Vec<TrendRecord> {
    let items = payload
        .get("articles")
        .or_else(|| payload.get("items"))
        .or_else(|| payload.get("posts"))
        .and_then(Value::as_array);
    let Some(items) = items else {
        return Vec::new();
    };

    let cutoff = chrono::Duration::from_std(window.as_duration())
        .ok()
        .map(|d| Utc::now() - d);

    let mut records = Vec::new();
    for item in items {
        let Some(title) = item.get("title").and_then(Value::as_str) else {
            continue;
        };

        if let (Some(cutoff), Some(ts)) = (cutoff, item.get("published_at").and_then(Value::as_str))
        {
            if let Ok(when) = DateTime::parse_from_rfc3339(ts) {
                if when.with_timezone(&Utc) < cutoff {
                    continue;
                }
            }
        }

        let title_tokens = scoring::tokenize(title);
        let keyword_refs: Vec<&str> = title_tokens.iter().map(String::as_str).collect();
        let cov = niche_tokens
            .iter()
            .map(|tokens| scoring::coverage(tokens, &keyword_refs))
            .fold(0.0, f64::max);
        if cov <= 0.0 {
            continue;
        }

        let (positive, negative) = scoring::lexicon_hits(&title_tokens);
        records.push(TrendRecord::new(
            title,
            scoring::article_relevance(cov, scoring::source_authority(source)),
            vec![source],
            scoring::classify_sentiment(positive, negative),
            // one snapshot carries no prior window to compare against
            Velocity::Stable,
        ));
    }

    records
}

/// Merge a candidate into the running list, combining same-topic records
/// across sources
fn merge_record(records: &mut Vec<TrendRecord>, record: TrendRecord) {
    if let Some(existing) = records
        .iter_mut()
        .find(|r| r.topic.eq_ignore_ascii_case(&record.topic))
    {
        existing.relevance_score = existing.relevance_score.max(record.relevance_score);
        for source in record.sources {
            if !existing.sources.contains(&source) {
                existing.sources.push(source);
            }
        }
    } else {
        records.push(record);
    }
}

/// Apply the relevance floor, ordering, and result cap
fn finalize(
    mut records: Vec<TrendRecord>,
    min_relevance_score: f64,
    max_results: Option<usize>,
) -> Vec<TrendRecord> {
    records.retain(|r| r.relevance_score >= min_relevance_score);
    // stable sort: equal scores keep their insertion order
    records.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
    if let Some(cap) = max_results {
        records.truncate(cap);
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::testing::{FailureMode, StubClient};
    use crate::types::Sentiment;

    fn window(s: &str) -> TimeWindow {
        s.parse().unwrap()
    }

    fn niche(terms: &[&str]) -> Vec<String> {
        terms.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_fetch_trends_returns_valid_structure() {
        let result = fetch_trends(&niche(&["ethiopian fashion"]), window("24h"), 0.75, None);

        assert!(!result.is_empty());
        for trend in &result {
            assert!(!trend.topic.is_empty());
            assert!((0.0..=1.0).contains(&trend.relevance_score));
            assert!(!trend.sources.is_empty());
            assert!(matches!(
                trend.sentiment,
                Sentiment::Positive | Sentiment::Neutral | Sentiment::Negative
            ));
            assert!(matches!(
                trend.velocity,
                Velocity::Rising | Velocity::Stable | Velocity::Declining
            ));
        }
    }

    #[test]
    fn test_fetch_trends_filters_by_relevance() {
        let result = fetch_trends(&niche(&["fashion"]), window("24h"), 0.80, None);

        assert!(!result.is_empty());
        for trend in &result {
            assert!(
                trend.relevance_score >= 0.80,
                "'{}' has score {} < 0.80",
                trend.topic,
                trend.relevance_score
            );
        }
    }

    #[test]
    fn test_fetch_trends_handles_no_results() {
        let result = fetch_trends(
            &niche(&["very_obscure_nonexistent_topic_12345"]),
            window("1h"),
            0.95,
            None,
        );
        assert!(result.is_empty());
    }

    #[test]
    fn test_fetch_trends_enforces_max_results() {
        let result = fetch_trends(&niche(&["technology"]), window("7d"), 0.50, Some(5));
        assert!(result.len() <= 5);
        assert!(!result.is_empty());
    }

    #[test]
    fn test_fetch_trends_orders_by_relevance() {
        let result = fetch_trends(&niche(&["fashion"]), window("24h"), 0.0, None);
        for pair in result.windows(2) {
            assert!(pair[0].relevance_score >= pair[1].relevance_score);
        }
    }

    #[test]
    fn test_short_window_drops_stale_signals() {
        let wide = fetch_trends(&niche(&["technology"]), window("7d"), 0.0, None);
        let narrow = fetch_trends(&niche(&["technology"]), window("2h"), 0.0, None);
        assert!(narrow.len() < wide.len());
    }

    #[tokio::test]
    async fn test_async_fetch_uses_single_resource_fetch() {
        let stub = StubClient::with_resource(
            "news://latest",
            serde_json::json!({
                "articles": [
                    {"title": "Ethiopian Fashion Week 2026", "url": "https://example.com"}
                ]
            }),
        );

        let result = fetch_trends_async(&niche(&["fashion"]), window("24h"), &stub)
            .await
            .unwrap();

        let requests = stub.resource_requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].starts_with("news://"));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].topic, "Ethiopian Fashion Week 2026");
    }

    #[tokio::test]
    async fn test_async_fetch_one_request_per_source() {
        let stub = StubClient::new();
        fetch_trends_async_with(
            &niche(&["fashion"]),
            window("24h"),
            &[TrendSource::News, TrendSource::Twitter],
            0.0,
            None,
            &stub,
        )
        .await
        .unwrap();

        let requests = stub.resource_requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert!(requests.contains(&"news://latest".to_string()));
        assert!(requests.contains(&"twitter://trending".to_string()));
    }

    #[tokio::test]
    async fn test_async_fetch_tolerates_empty_feed() {
        let stub = StubClient::with_resource("news://latest", serde_json::json!({"articles": []}));
        let result = fetch_trends_async(&niche(&["fashion"]), window("24h"), &stub)
            .await
            .unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_async_fetch_tolerates_shapeless_payload() {
        let stub = StubClient::with_resource("news://latest", serde_json::json!({"status": "ok"}));
        let result = fetch_trends_async(&niche(&["fashion"]), window("24h"), &stub)
            .await
            .unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_async_fetch_propagates_client_errors() {
        let stub = StubClient::failing(FailureMode::Timeout);
        let err = fetch_trends_async(&niche(&["fashion"]), window("24h"), &stub)
            .await
            .unwrap_err();
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_async_fetch_merges_same_topic_across_sources() {
        let article = serde_json::json!({
            "articles": [{"title": "Fashion week recap"}]
        });
        let mut stub = StubClient::with_resource("news://latest", article.clone());
        stub.resources
            .insert("twitter://trending".to_string(), article);

        let result = fetch_trends_async_with(
            &niche(&["fashion"]),
            window("24h"),
            &[TrendSource::News, TrendSource::Twitter],
            0.0,
            None,
            &stub,
        )
        .await
        .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].sources.len(), 2);
    }
}
