use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Membership tier, sourced from the member's subscription.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipTier {
    #[default]
    Basic,
    Prestige,
}

impl MembershipTier {
    pub fn is_prestige(&self) -> bool {
        matches!(self, MembershipTier::Prestige)
    }
}

/// Normalized member profile used by the matching engine.
///
/// Immutable for the duration of one run; rebuilt from the directory
/// on every invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberProfile {
    #[serde(rename = "memberId")]
    pub member_id: String,
    pub name: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(rename = "expertiseAreas", default)]
    pub expertise_areas: Vec<String>,
    #[serde(rename = "lookingFor", default)]
    pub looking_for: Option<String>,
    #[serde(default)]
    pub tier: MembershipTier,
}

/// Raw member row as returned by the directory join.
///
/// Everything is optional: the directory emits nullable nested arrays and
/// normalization decides what survives. See `ProfileSet::normalize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberRow {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "member_profiles")]
    pub profiles: Vec<ProfileRow>,
    #[serde(default)]
    pub subscriptions: Vec<SubscriptionRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRow {
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub expertise_areas: Vec<String>,
    #[serde(default)]
    pub looking_for: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionRow {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub tier: Option<MembershipTier>,
}

/// A scored, admissible pair of members.
///
/// Invariant: `score` is the sum of the fired component weights (or the
/// fallback constant) and `reasoning` is never empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchCandidate {
    #[serde(rename = "memberA")]
    pub member_a: MemberProfile,
    #[serde(rename = "memberB")]
    pub member_b: MemberProfile,
    pub score: u32,
    pub reasoning: Vec<String>,
}

/// Introduction lifecycle status.
///
/// The engine only ever creates records in `Suggested`; everything after
/// that belongs to the admin workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "intro_status", rename_all = "lowercase")]
pub enum IntroStatus {
    Suggested,
    Approved,
    Sent,
    Completed,
    Declined,
}

impl IntroStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntroStatus::Suggested => "suggested",
            IntroStatus::Approved => "approved",
            IntroStatus::Sent => "sent",
            IntroStatus::Completed => "completed",
            IntroStatus::Declined => "declined",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "suggested" => Some(IntroStatus::Suggested),
            "approved" => Some(IntroStatus::Approved),
            "sent" => Some(IntroStatus::Sent),
            "completed" => Some(IntroStatus::Completed),
            "declined" => Some(IntroStatus::Declined),
            _ => None,
        }
    }

    /// Whether the status machine allows moving from `self` to `to`.
    ///
    /// `Approved -> Suggested` and `Declined -> Suggested` are the operator
    /// reset transitions used to undo a premature decision.
    pub fn can_transition(&self, to: IntroStatus) -> bool {
        use IntroStatus::*;
        matches!(
            (self, to),
            (Suggested, Approved)
                | (Suggested, Declined)
                | (Approved, Sent)
                | (Approved, Declined)
                | (Approved, Suggested)
                | (Declined, Suggested)
                | (Sent, Completed)
        )
    }
}

impl std::fmt::Display for IntroStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted introduction record from the ledger.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct IntroductionRecord {
    pub id: Uuid,
    #[serde(rename = "memberAId")]
    pub member_a_id: String,
    #[serde(rename = "memberBId")]
    pub member_b_id: String,
    #[serde(rename = "pairKey")]
    pub pair_key: String,
    #[serde(rename = "matchedBy")]
    pub matched_by: Option<String>,
    pub status: IntroStatus,
    #[serde(rename = "monthYear")]
    pub month_year: String,
    #[serde(rename = "introMessage")]
    pub intro_message: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Insert-ready introduction row produced from a suggestion batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewIntroduction {
    pub member_a_id: String,
    pub member_b_id: String,
    pub pair_key: String,
    pub matched_by: Option<String>,
    pub status: IntroStatus,
    pub month_year: String,
    pub intro_message: String,
}

/// Year-month batch identifier, e.g. `2026-08`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeriodKey(String);

impl PeriodKey {
    /// Parse and validate a `YYYY-MM` period key.
    pub fn parse(value: &str) -> Option<Self> {
        if value.len() != 7 {
            return None;
        }
        let probe = format!("{}-01", value);
        chrono::NaiveDate::parse_from_str(&probe, "%Y-%m-%d").ok()?;
        Some(PeriodKey(value.to_string()))
    }

    /// The current calendar month in UTC.
    pub fn current() -> Self {
        PeriodKey(Utc::now().format("%Y-%m").to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of a successful generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    #[serde(rename = "createdCount")]
    pub created_count: usize,
    pub period: PeriodKey,
}

/// Scoring component weights
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    /// One direction of complementary expertise (both may fire).
    pub expertise: u32,
    /// Case-insensitive industry match.
    pub industry: u32,
    /// Both members on the prestige tier.
    pub prestige_pair: u32,
    /// Exactly one member on the prestige tier.
    pub prestige_single: u32,
    /// Score assigned when no other component fires.
    pub fallback: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            expertise: 40,
            industry: 20,
            prestige_pair: 20,
            prestige_single: 10,
            fallback: 5,
        }
    }
}
