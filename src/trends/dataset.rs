//! Seeded trend snapshot
//!
//! Backing data for the synchronous fetcher form, which must not perform
//! network I/O. The snapshot is a fixed table of observed topic signals:
//! mention volumes for the current and previous window, lexicon hit counts,
//! and hours since the signal was last active. Scoring over this table is
//! fully deterministic.

use crate::types::TrendSource;

/// One observed topic signal
pub(crate) struct TrendSignal {
    pub topic: &'static str,
    /// Lowercase match terms for niche coverage
    pub keywords: &'static [&'static str],
    pub sources: &'static [TrendSource],
    /// Mention volume in the current window
    pub mentions: u32,
    /// Mention volume in the previous window of equal length
    pub prev_mentions: u32,
    pub positive_hits: u32,
    pub negative_hits: u32,
    /// Hours since the signal was last active
    pub freshness_hours: f32,
}

pub(crate) const SNAPSHOT: &[TrendSignal] = &[
    TrendSignal {
        topic: "Ethiopian Fashion Week",
        keywords: &["ethiopian", "fashion", "week", "addis", "designers"],
        sources: &[TrendSource::News, TrendSource::Twitter],
        mentions: 620,
        prev_mentions: 310,
        positive_hits: 48,
        negative_hits: 6,
        freshness_hours: 2.0,
    },
    TrendSignal {
        topic: "Habesha kemis street styling",
        keywords: &["habesha", "kemis", "ethiopian", "fashion", "styling"],
        sources: &[TrendSource::Twitter],
        mentions: 340,
        prev_mentions: 330,
        positive_hits: 22,
        negative_hits: 5,
        freshness_hours: 4.0,
    },
    TrendSignal {
        topic: "Fast fashion backlash",
        keywords: &["fast", "fashion", "retail", "backlash"],
        sources: &[TrendSource::News],
        mentions: 480,
        prev_mentions: 640,
        positive_hits: 8,
        negative_hits: 22,
        freshness_hours: 6.0,
    },
    TrendSignal {
        topic: "Streetwear collab drops",
        keywords: &["fashion", "streetwear", "sneakers", "collab"],
        sources: &[TrendSource::Twitter],
        mentions: 520,
        prev_mentions: 260,
        positive_hits: 18,
        negative_hits: 9,
        freshness_hours: 3.0,
    },
    TrendSignal {
        topic: "Sustainable cotton sourcing",
        keywords: &["sustainable", "cotton", "fashion", "supply"],
        sources: &[TrendSource::News],
        mentions: 210,
        prev_mentions: 230,
        positive_hits: 10,
        negative_hits: 12,
        freshness_hours: 9.0,
    },
    TrendSignal {
        topic: "Ethiopian coffee ceremony revival",
        keywords: &["ethiopian", "coffee", "ceremony", "culture", "revival"],
        sources: &[TrendSource::News, TrendSource::Twitter],
        mentions: 410,
        prev_mentions: 205,
        positive_hits: 30,
        negative_hits: 4,
        freshness_hours: 5.0,
    },
    TrendSignal {
        topic: "Addis Ababa design collective",
        keywords: &["addis", "ababa", "design", "ethiopian", "culture", "collective"],
        sources: &[TrendSource::News],
        mentions: 180,
        prev_mentions: 150,
        positive_hits: 14,
        negative_hits: 6,
        freshness_hours: 7.0,
    },
    TrendSignal {
        topic: "Ethiopian culture festival diaspora",
        keywords: &["ethiopian", "culture", "festival", "diaspora"],
        sources: &[TrendSource::Twitter, TrendSource::Reddit],
        mentions: 290,
        prev_mentions: 360,
        positive_hits: 16,
        negative_hits: 12,
        freshness_hours: 6.0,
    },
    TrendSignal {
        topic: "On-device AI assistants",
        keywords: &["technology", "ai", "assistants", "devices", "chips"],
        sources: &[TrendSource::News, TrendSource::Twitter],
        mentions: 900,
        prev_mentions: 560,
        positive_hits: 40,
        negative_hits: 15,
        freshness_hours: 1.0,
    },
    TrendSignal {
        topic: "Quantum error correction milestone",
        keywords: &["technology", "quantum", "computing", "research"],
        sources: &[TrendSource::News],
        mentions: 330,
        prev_mentions: 200,
        positive_hits: 20,
        negative_hits: 3,
        freshness_hours: 12.0,
    },
    TrendSignal {
        topic: "Open-source silicon startups",
        keywords: &["technology", "silicon", "hardware", "startups"],
        sources: &[TrendSource::News, TrendSource::Reddit],
        mentions: 240,
        prev_mentions: 250,
        positive_hits: 12,
        negative_hits: 8,
        freshness_hours: 20.0,
    },
    TrendSignal {
        topic: "Rust in the Linux kernel",
        keywords: &["technology", "rust", "linux", "kernel"],
        sources: &[TrendSource::Reddit],
        mentions: 410,
        prev_mentions: 380,
        positive_hits: 25,
        negative_hits: 10,
        freshness_hours: 10.0,
    },
    TrendSignal {
        topic: "GPU supply crunch",
        keywords: &["technology", "gpu", "supply", "shortage"],
        sources: &[TrendSource::News, TrendSource::Twitter],
        mentions: 510,
        prev_mentions: 690,
        positive_hits: 6,
        negative_hits: 30,
        freshness_hours: 8.0,
    },
    TrendSignal {
        topic: "Creator economy monetization",
        keywords: &["creator", "economy", "monetization", "social"],
        sources: &[TrendSource::Twitter],
        mentions: 270,
        prev_mentions: 240,
        positive_hits: 14,
        negative_hits: 10,
        freshness_hours: 14.0,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_topics_are_unique() {
        let mut topics: Vec<_> = SNAPSHOT.iter().map(|s| s.topic).collect();
        topics.sort_unstable();
        topics.dedup();
        assert_eq!(topics.len(), SNAPSHOT.len());
    }

    #[test]
    fn test_snapshot_signals_are_well_formed() {
        for signal in SNAPSHOT {
            assert!(!signal.keywords.is_empty(), "{} has no keywords", signal.topic);
            assert!(!signal.sources.is_empty(), "{} has no sources", signal.topic);
            assert!(signal.mentions > 0, "{} has no mentions", signal.topic);
        }
    }
}
