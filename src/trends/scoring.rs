//! Relevance scoring and sentiment/velocity classification
//!
//! All functions here are pure so identical input data always scores and
//! classifies identically.

use crate::types::{Sentiment, TrendSource, Velocity};

/// Mention volume at which the volume factor reaches 0.5
const VOLUME_MIDPOINT: f64 = 250.0;

/// Current/previous volume ratio at or above which a trend counts as rising
const RISING_RATIO: f64 = 1.25;

/// Current/previous volume ratio at or below which a trend counts as declining
const DECLINING_RATIO: f64 = 0.75;

const POSITIVE_MARKERS: &[&str] = &[
    "launch", "launches", "win", "wins", "growth", "record", "celebrates", "revival",
    "breakthrough", "milestone", "soars", "surge", "debut", "award",
];

const NEGATIVE_MARKERS: &[&str] = &[
    "backlash", "scandal", "crisis", "decline", "ban", "layoffs", "protest", "falls",
    "shortage", "lawsuit", "boycott", "outage",
];

/// Split a phrase into lowercase alphanumeric tokens
pub(crate) fn tokenize(phrase: &str) -> Vec<String> {
    phrase
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

/// Fraction of niche tokens present in the candidate's keywords
pub(crate) fn coverage(niche_tokens: &[String], keywords: &[&str]) -> f64 {
    if niche_tokens.is_empty() {
        return 0.0;
    }
    let matched = niche_tokens
        .iter()
        .filter(|t| keywords.contains(&t.as_str()))
        .count();
    matched as f64 / niche_tokens.len() as f64
}

/// Highest authority among the sources a signal was observed on
pub(crate) fn max_authority(sources: &[TrendSource]) -> f64 {
    sources
        .iter()
        .map(|s| source_authority(*s))
        .fold(0.0, f64::max)
}

/// Editorial authority of a provider
pub(crate) fn source_authority(source: TrendSource) -> f64 {
    match source {
        TrendSource::News => 0.9,
        TrendSource::Twitter => 0.75,
        TrendSource::Reddit => 0.6,
    }
}

/// Relevance of a snapshot signal: a weighted blend of niche coverage,
/// source authority, and a saturating mention-volume factor
pub(crate) fn relevance(coverage: f64, authority: f64, mentions: u32) -> f64 {
    if coverage <= 0.0 {
        return 0.0;
    }
    let volume = mentions as f64 / (mentions as f64 + VOLUME_MIDPOINT);
    (0.6 * coverage + 0.25 * authority + 0.15 * volume).clamp(0.0, 1.0)
}

/// Relevance of a single fetched article, which carries no volume signal
pub(crate) fn article_relevance(coverage: f64, authority: f64) -> f64 {
    if coverage <= 0.0 {
        return 0.0;
    }
    (0.75 * coverage + 0.25 * authority).clamp(0.0, 1.0)
}

/// Count positive and negative lexicon markers among tokens
pub(crate) fn lexicon_hits(tokens: &[String]) -> (u32, u32) {
    let positive = tokens
        .iter()
        .filter(|t| POSITIVE_MARKERS.contains(&t.as_str()))
        .count() as u32;
    let negative = tokens
        .iter()
        .filter(|t| NEGATIVE_MARKERS.contains(&t.as_str()))
        .count() as u32;
    (positive, negative)
}

/// Classify tone from lexicon hit counts.
///
/// A side wins only when it leads by more than a quarter of the total hit
/// volume; anything closer is neutral.
pub(crate) fn classify_sentiment(positive: u32, negative: u32) -> Sentiment {
    let total = positive + negative;
    if total == 0 {
        return Sentiment::Neutral;
    }
    let diff = i64::from(positive) - i64::from(negative);
    let margin = i64::from(total / 4).max(1);
    if diff > margin {
        Sentiment::Positive
    } else if diff < -margin {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

/// Classify volume direction from current vs previous window mentions
pub(crate) fn classify_velocity(current: u32, previous: u32) -> Velocity {
    if previous == 0 {
        return if current > 0 {
            Velocity::Rising
        } else {
            Velocity::Stable
        };
    }
    let ratio = f64::from(current) / f64::from(previous);
    if ratio >= RISING_RATIO {
        Velocity::Rising
    } else if ratio <= DECLINING_RATIO {
        Velocity::Declining
    } else {
        Velocity::Stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_strips_punctuation_and_case() {
        assert_eq!(
            tokenize("Ethiopian Fashion-Week 2026!"),
            vec!["ethiopian", "fashion", "week", "2026"]
        );
    }

    #[test]
    fn test_coverage_is_fraction_of_niche_tokens() {
        let niche = tokenize("ethiopian fashion");
        assert_eq!(coverage(&niche, &["ethiopian", "fashion", "week"]), 1.0);
        assert_eq!(coverage(&niche, &["fashion", "retail"]), 0.5);
        assert_eq!(coverage(&niche, &["quantum"]), 0.0);
    }

    #[test]
    fn test_relevance_stays_in_unit_interval() {
        for mentions in [0, 10, 250, 100_000] {
            let score = relevance(1.0, 0.9, mentions);
            assert!((0.0..=1.0).contains(&score));
        }
        assert_eq!(relevance(0.0, 0.9, 1000), 0.0);
    }

    #[test]
    fn test_relevance_grows_with_volume() {
        let quiet = relevance(1.0, 0.9, 50);
        let loud = relevance(1.0, 0.9, 900);
        assert!(loud > quiet);
    }

    #[test]
    fn test_sentiment_needs_a_clear_margin() {
        assert_eq!(classify_sentiment(48, 6), Sentiment::Positive);
        assert_eq!(classify_sentiment(8, 22), Sentiment::Negative);
        assert_eq!(classify_sentiment(10, 12), Sentiment::Neutral);
        assert_eq!(classify_sentiment(0, 0), Sentiment::Neutral);
    }

    #[test]
    fn test_velocity_thresholds() {
        assert_eq!(classify_velocity(620, 310), Velocity::Rising);
        assert_eq!(classify_velocity(480, 640), Velocity::Declining);
        assert_eq!(classify_velocity(340, 330), Velocity::Stable);
        assert_eq!(classify_velocity(5, 0), Velocity::Rising);
        assert_eq!(classify_velocity(0, 0), Velocity::Stable);
    }

    #[test]
    fn test_lexicon_hits() {
        let tokens = tokenize("Streetwear launch celebrates record growth amid backlash");
        let (positive, negative) = lexicon_hits(&tokens);
        assert_eq!(positive, 4);
        assert_eq!(negative, 1);
    }
}
