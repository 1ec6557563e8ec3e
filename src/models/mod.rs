// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BatchSummary, IntroStatus, IntroductionRecord, MatchCandidate, MemberProfile, MemberRow,
    MembershipTier, NewIntroduction, PeriodKey, ProfileRow, ScoringWeights, SubscriptionRow,
};
pub use requests::{
    GenerateSuggestionsRequest, ListIntroductionsQuery, PeriodStatsQuery, UpdateMessageRequest,
};
pub use responses::{
    ErrorResponse, GenerateSuggestionsResponse, HealthResponse, ListIntroductionsResponse,
    TransitionResponse,
};
