use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to generate a suggestion batch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateSuggestionsRequest {
    /// `YYYY-MM` period key; defaults to the current month.
    #[serde(default)]
    #[serde(alias = "month_year", rename = "period")]
    pub period: Option<String>,
    /// Operator id recorded as `matched_by` on the created rows.
    #[serde(default)]
    #[serde(alias = "matched_by", rename = "matchedBy")]
    pub matched_by: Option<String>,
}

/// Request to overwrite an introduction's editable message
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateMessageRequest {
    #[validate(length(min = 1))]
    pub message: String,
}

/// Query parameters for the admin introduction listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListIntroductionsQuery {
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Query parameters for period statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PeriodStatsQuery {
    #[serde(default)]
    pub period: Option<String>,
}
