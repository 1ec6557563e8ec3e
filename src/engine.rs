use crate::core::{Matcher, ProfileSet};
use crate::models::{BatchSummary, IntroStatus, IntroductionRecord, PeriodKey};
use crate::services::{
    DirectoryClient, DirectoryError, IntroLedger, LedgerError, PeriodStats, TransitionOutcome,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

/// Errors surfaced by the suggestion engine and its pass-through operations
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("caller is not authorized to trigger generation")]
    Unauthorized,

    #[error("member directory unavailable: {0}")]
    DirectoryUnavailable(#[from] DirectoryError),

    #[error("failed to persist suggestion batch: {0}")]
    LedgerWriteFailed(#[source] LedgerError),

    #[error("introduction ledger error: {0}")]
    Ledger(#[source] LedgerError),

    #[error("introduction {0} not found")]
    NotFound(Uuid),

    #[error("cannot move introduction from {current} to {requested}")]
    InvalidTransition {
        current: IntroStatus,
        requested: IntroStatus,
    },
}

/// Suggestion engine: one synchronous generation run per invocation.
///
/// Reads a fresh snapshot of the eligible pool and the full pairing
/// history, computes the ranked batch in memory, and persists it in one
/// atomic write. Nothing is persisted if any read fails, so a retry simply
/// recomputes. Companion operations are thin pass-throughs to the ledger's
/// status machine.
pub struct SuggestionEngine {
    directory: Arc<DirectoryClient>,
    ledger: Arc<IntroLedger>,
    matcher: Matcher,
}

impl SuggestionEngine {
    pub fn new(directory: Arc<DirectoryClient>, ledger: Arc<IntroLedger>, matcher: Matcher) -> Self {
        Self {
            directory,
            ledger,
            matcher,
        }
    }

    /// Generate and persist the suggestion batch for one period.
    pub async fn generate_suggestions(
        &self,
        period: PeriodKey,
        matched_by: Option<&str>,
    ) -> Result<BatchSummary, EngineError> {
        let rows = self.directory.get_eligible_members().await?;
        let history = self
            .ledger
            .fetch_pair_history()
            .await
            .map_err(EngineError::Ledger)?;

        let profiles = ProfileSet::normalize(rows);
        info!(
            "Generating suggestions for {}: {} eligible members, {} historical pairs",
            period,
            profiles.len(),
            history.len()
        );

        let batch = self.matcher.build_batch(period.clone(), &profiles, &history);
        let created_count = batch.len();

        if created_count > 0 {
            let records = batch.into_records(matched_by);
            self.ledger
                .insert_batch(&records)
                .await
                .map_err(EngineError::LedgerWriteFailed)?;
        }

        info!("Created {} suggestions for {}", created_count, period);

        Ok(BatchSummary {
            created_count,
            period,
        })
    }

    /// Approve a suggested introduction.
    pub async fn approve(&self, id: Uuid) -> Result<(), EngineError> {
        self.apply_transition(id, &[IntroStatus::Suggested], IntroStatus::Approved)
            .await
    }

    /// Decline an introduction that has not been sent yet.
    ///
    /// The row is kept (not deleted): its pair stays excluded from every
    /// future run.
    pub async fn decline(&self, id: Uuid) -> Result<(), EngineError> {
        self.apply_transition(
            id,
            &[IntroStatus::Suggested, IntroStatus::Approved],
            IntroStatus::Declined,
        )
        .await
    }

    /// Undo a premature approve or decline, returning the row to `suggested`.
    pub async fn reset(&self, id: Uuid) -> Result<(), EngineError> {
        self.apply_transition(
            id,
            &[IntroStatus::Approved, IntroStatus::Declined],
            IntroStatus::Suggested,
        )
        .await
    }

    /// Overwrite the editable introduction message.
    pub async fn update_message(&self, id: Uuid, message: &str) -> Result<(), EngineError> {
        let updated = self
            .ledger
            .update_message(id, message)
            .await
            .map_err(EngineError::Ledger)?;

        if updated {
            Ok(())
        } else {
            Err(EngineError::NotFound(id))
        }
    }

    /// List introductions for the admin review screen.
    pub async fn list(
        &self,
        period: Option<&PeriodKey>,
        status: Option<IntroStatus>,
    ) -> Result<Vec<IntroductionRecord>, EngineError> {
        self.ledger
            .list(period.map(PeriodKey::as_str), status)
            .await
            .map_err(EngineError::Ledger)
    }

    /// Aggregate status counts for one period.
    pub async fn period_stats(&self, period: &PeriodKey) -> Result<PeriodStats, EngineError> {
        self.ledger
            .period_stats(period.as_str())
            .await
            .map_err(EngineError::Ledger)
    }

    async fn apply_transition(
        &self,
        id: Uuid,
        allowed_from: &[IntroStatus],
        to: IntroStatus,
    ) -> Result<(), EngineError> {
        let outcome = self
            .ledger
            .transition(id, allowed_from, to)
            .await
            .map_err(EngineError::Ledger)?;

        match outcome {
            TransitionOutcome::Applied => Ok(()),
            TransitionOutcome::NotFound => Err(EngineError::NotFound(id)),
            TransitionOutcome::InvalidState(current) => Err(EngineError::InvalidTransition {
                current,
                requested: to,
            }),
        }
    }
}
