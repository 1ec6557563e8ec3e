use crate::models::MemberRow;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the member directory
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Unauthorized: invalid service key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Member directory API client
///
/// Fetches the eligible member pool for a run: members with an active
/// subscription, joined with their profile and subscription records. The
/// directory speaks a PostgREST-style API with embedded resource selects.
pub struct DirectoryClient {
    base_url: String,
    service_key: String,
    client: Client,
}

impl DirectoryClient {
    pub fn new(base_url: String, service_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            service_key,
            client,
        }
    }

    /// Fetch the full eligible member pool.
    ///
    /// Rows come back loosely typed; `ProfileSet::normalize` decides which
    /// survive. The active-subscription filter is pushed to the directory,
    /// and normalization re-checks it on the embedded rows the inner join
    /// leaves populated.
    pub async fn get_eligible_members(&self) -> Result<Vec<MemberRow>, DirectoryError> {
        let select = "id,name,member_profiles(industry,expertise_areas,looking_for),subscriptions(status,tier)";
        let url = format!(
            "{}/rest/v1/members?select={}&subscriptions.status=eq.active",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(select),
        );

        tracing::debug!("Fetching eligible members from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", self.service_key))
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(DirectoryError::Unauthorized);
        }
        if !status.is_success() {
            return Err(DirectoryError::ApiError(format!(
                "Failed to fetch members: {}",
                status
            )));
        }

        let json: Value = response.json().await?;
        let rows: Vec<MemberRow> = serde_json::from_value(json)
            .map_err(|e| DirectoryError::InvalidResponse(format!("Failed to parse members: {}", e)))?;

        tracing::debug!("Directory returned {} member rows", rows.len());

        Ok(rows)
    }
}
