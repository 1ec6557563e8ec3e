use crate::models::domain::IntroductionRecord;
use serde::{Deserialize, Serialize};

/// Response for the generate suggestions endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateSuggestionsResponse {
    #[serde(rename = "createdCount")]
    pub created_count: usize,
    pub period: String,
}

/// Response for the introduction listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListIntroductionsResponse {
    pub introductions: Vec<IntroductionRecord>,
    pub count: usize,
}

/// Response for introduction status transitions and message updates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionResponse {
    pub success: bool,
    pub status: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
