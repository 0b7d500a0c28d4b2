//! Shared record and enum types for the skills layer
//!
//! Fields that look like free strings in the wire format (platforms,
//! sentiment, velocity, disclosure) are closed enumerations here so that
//! match sites stay exhaustive.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Social platform a piece of content targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Twitter,
    Instagram,
    Tiktok,
    Facebook,
    Linkedin,
}

impl Platform {
    /// Hostname used when constructing post URLs
    pub fn host(&self) -> &'static str {
        match self {
            Platform::Twitter => "twitter.com",
            Platform::Instagram => "instagram.com",
            Platform::Tiktok => "tiktok.com",
            Platform::Facebook => "facebook.com",
            Platform::Linkedin => "linkedin.com",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Twitter => "twitter",
            Platform::Instagram => "instagram",
            Platform::Tiktok => "tiktok",
            Platform::Facebook => "facebook",
            Platform::Linkedin => "linkedin",
        };
        write!(f, "{}", name)
    }
}

/// Shape of content a generation request asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Post,
    Thread,
    Story,
    Reel,
}

impl ContentType {
    /// Whether this content type can be published on the given platform.
    ///
    /// Threads only exist on twitter; stories and reels exist everywhere
    /// except twitter and linkedin.
    pub fn supported_on(&self, platform: Platform) -> bool {
        match self {
            ContentType::Post => true,
            ContentType::Thread => platform == Platform::Twitter,
            ContentType::Story | ContentType::Reel => {
                !matches!(platform, Platform::Twitter | Platform::Linkedin)
            }
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContentType::Post => "post",
            ContentType::Thread => "thread",
            ContentType::Story => "story",
            ContentType::Reel => "reel",
        };
        write!(f, "{}", name)
    }
}

/// How a published post discloses its automated origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisclosureLevel {
    /// Post is labelled as fully machine-generated
    Automated,
    /// Post is labelled as machine-assisted
    Assisted,
    /// No disclosure label
    None,
}

impl Default for DisclosureLevel {
    fn default() -> Self {
        DisclosureLevel::Automated
    }
}

impl fmt::Display for DisclosureLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DisclosureLevel::Automated => "automated",
            DisclosureLevel::Assisted => "assisted",
            DisclosureLevel::None => "none",
        };
        write!(f, "{}", name)
    }
}

/// Provider a trend record was sourced from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendSource {
    News,
    Twitter,
    Reddit,
}

impl TrendSource {
    /// Scheme-qualified resource URI this source is fetched from
    pub fn resource_uri(&self) -> &'static str {
        match self {
            TrendSource::News => "news://latest",
            TrendSource::Twitter => "twitter://trending",
            TrendSource::Reddit => "reddit://hot",
        }
    }
}

impl fmt::Display for TrendSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TrendSource::News => "news",
            TrendSource::Twitter => "twitter",
            TrendSource::Reddit => "reddit",
        };
        write!(f, "{}", name)
    }
}

/// Overall tone of the conversation around a trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

/// Direction a trend's mention volume is moving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Velocity {
    Rising,
    Stable,
    Declining,
}

/// A scored, classified candidate topic returned by trend analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendRecord {
    /// Topic label
    pub topic: String,
    /// Relevance to the requested niche, in [0.0, 1.0]
    pub relevance_score: f64,
    /// Providers the signal was observed on
    pub sources: Vec<TrendSource>,
    /// Conversation tone
    pub sentiment: Sentiment,
    /// Volume direction
    pub velocity: Velocity,
}

impl TrendRecord {
    /// Create a record, clamping the relevance score into [0.0, 1.0]
    pub fn new(
        topic: impl Into<String>,
        relevance_score: f64,
        sources: Vec<TrendSource>,
        sentiment: Sentiment,
        velocity: Velocity,
    ) -> Self {
        TrendRecord {
            topic: topic.into(),
            relevance_score: relevance_score.clamp(0.0, 1.0),
            sources,
            sentiment,
            velocity,
        }
    }
}

/// A lookback window such as `24h` or `7d`, parsed from humantime syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow(Duration);

impl TimeWindow {
    /// Create from a raw duration. Zero-length windows are rejected.
    pub fn new(duration: Duration) -> Result<Self> {
        if duration.is_zero() {
            return Err(Error::validation("time_window", "must be a non-zero duration"));
        }
        Ok(TimeWindow(duration))
    }

    /// The window as a raw duration
    pub fn as_duration(&self) -> Duration {
        self.0
    }

    /// The window length in fractional hours
    pub fn hours(&self) -> f64 {
        self.0.as_secs_f64() / 3600.0
    }
}

impl FromStr for TimeWindow {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let duration = humantime_serde::re::humantime::parse_duration(s.trim())
            .map_err(|e| Error::validation("time_window", format!("not a valid duration: {}", e)))?;
        TimeWindow::new(duration)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            humantime_serde::re::humantime::format_duration(self.0)
        )
    }
}

impl Serialize for TimeWindow {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        humantime_serde::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for TimeWindow {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let duration: Duration = humantime_serde::deserialize(deserializer)?;
        TimeWindow::new(duration).map_err(serde::de::Error::custom)
    }
}

/// Require a present, non-blank string field
pub(crate) fn required_string(field: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s),
        Some(_) => Err(Error::validation(field, "must not be empty")),
        None => Err(Error::validation(field, "required field is missing")),
    }
}

/// Require a score inside [0.0, 1.0]
pub(crate) fn unit_interval(field: &str, value: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(Error::validation(
            field,
            format!("{} is outside the range 0.0..=1.0", value),
        ))
    }
}
