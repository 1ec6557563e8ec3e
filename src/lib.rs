//! Circle Algo - introduction matching service for the Inner Circle membership club
//!
//! This library implements the affinity matching engine behind monthly member
//! introductions: it scores every admissible pair of eligible members, ranks
//! the candidates, and persists the batch as `suggested` introduction records
//! for admin review.

pub mod config;
pub mod core;
pub mod engine;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{score_pair, Matcher, PairHistory, PairKey, ProfileSet, SuggestionBatch};
pub use engine::{EngineError, SuggestionEngine};
pub use models::{
    BatchSummary, IntroStatus, IntroductionRecord, MatchCandidate, MemberProfile, MembershipTier,
    PeriodKey, ScoringWeights,
};
