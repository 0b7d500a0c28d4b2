//! Trend gathering and scoring
//!
//! The fetcher gathers candidate topics for a set of niches, scores their
//! relevance, and classifies sentiment and velocity. It is independent of
//! the skill wrapping layer: the synchronous form runs against a seeded
//! in-process snapshot, the asynchronous form against feeds reached through
//! the external client.

mod dataset;
mod fetcher;
mod scoring;

pub use fetcher::{fetch_trends, fetch_trends_async, fetch_trends_async_with};
