//! Skills module - uniformly shaped agent capabilities
//!
//! Every skill takes a validated input record and an optional external
//! client, and returns an output record carrying a success flag and a
//! confidence score. Expected runtime failures never surface as errors;
//! only construction-time validation does.
//!
//! ## Built-in Skills
//!
//! - **content_generation**: Draft post content for a topic and platform
//! - **social_publishing**: Publish assembled content (the only skill with
//!   an external side effect)
//! - **trend_analysis**: Gather and score trending topics for a niche set
//!
//! ## Adding a New Skill
//!
//! 1. Create a new file in `src/skills/` (e.g., `my_skill.rs`)
//! 2. Define the input/output records and a typed `execute` function
//! 3. Implement the `Skill` trait on a registry wrapper struct
//! 4. Add `pub mod my_skill;` here and register it in
//!    `SkillRegistry::with_defaults`

pub mod content_generation;
pub mod social_publishing;
mod templates;
mod traits;
pub mod trend_analysis;

// Core trait and registry
pub use traits::{Skill, SkillRegistry};

// Record types
pub use content_generation::{
    ContentGenerationInput, ContentGenerationOutput, ContentGenerationSkill, GeneratedContent,
};
pub use social_publishing::{
    PostContent, SocialPublishingInput, SocialPublishingOutput, SocialPublishingSkill,
};
pub use trend_analysis::{
    TrendAnalysisInput, TrendAnalysisOutput, TrendAnalysisSkill,
};
