use crate::core::PairHistory;
use crate::models::{IntroStatus, IntroductionRecord, NewIntroduction};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur when interacting with the introduction ledger
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Outcome of a guarded status transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    Applied,
    NotFound,
    /// The row exists but its current status does not allow the transition.
    InvalidState(IntroStatus),
}

/// Per-period counts for the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodStats {
    pub period: String,
    pub total: i64,
    pub suggested: i64,
    pub approved: i64,
    pub sent: i64,
    pub declined: i64,
    pub completed: i64,
}

/// PostgreSQL-backed introduction ledger
///
/// The ledger is the engine's write target and its only source of pairing
/// history. History is every row ever created, regardless of status, which
/// is what makes past pairs permanently excluded from later runs.
pub struct IntroLedger {
    pool: PgPool,
}

impl IntroLedger {
    /// Create a new ledger client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, LedgerError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Rebuild the full pairing history snapshot for a run.
    ///
    /// Deliberately unfiltered by status: declined and completed rows
    /// exclude their pair exactly like active ones.
    pub async fn fetch_pair_history(&self) -> Result<PairHistory, LedgerError> {
        let query = r#"
            SELECT member_a_id, member_b_id
            FROM introductions
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        let history = PairHistory::from_pairs(rows.iter().map(|row| {
            (
                row.get::<String, _>("member_a_id"),
                row.get::<String, _>("member_b_id"),
            )
        }));

        tracing::debug!("Loaded {} historical pairs", history.len());

        Ok(history)
    }

    /// Persist a suggestion batch as a single transaction.
    ///
    /// All-or-nothing: any failure rolls the whole batch back, so a retry
    /// recomputes and re-inserts without risking partial duplicates. The
    /// unique index on `pair_key` backs the no-repeat guarantee even if two
    /// runs race.
    pub async fn insert_batch(&self, records: &[NewIntroduction]) -> Result<u64, LedgerError> {
        let mut tx = self.pool.begin().await?;

        for record in records {
            sqlx::query(
                r#"
                INSERT INTO introductions
                    (id, member_a_id, member_b_id, pair_key, matched_by, status, month_year, intro_message)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(&record.member_a_id)
            .bind(&record.member_b_id)
            .bind(&record.pair_key)
            .bind(&record.matched_by)
            .bind(record.status)
            .bind(&record.month_year)
            .bind(&record.intro_message)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!("Inserted {} introduction records", records.len());

        Ok(records.len() as u64)
    }

    /// Apply a status transition guarded by the allowed source states.
    pub async fn transition(
        &self,
        id: Uuid,
        allowed_from: &[IntroStatus],
        to: IntroStatus,
    ) -> Result<TransitionOutcome, LedgerError> {
        let query = r#"
            UPDATE introductions
            SET status = $2, updated_at = NOW()
            WHERE id = $1 AND status = ANY($3)
        "#;

        let result = sqlx::query(query)
            .bind(id)
            .bind(to)
            .bind(allowed_from)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            tracing::debug!("Introduction {} moved to {}", id, to);
            return Ok(TransitionOutcome::Applied);
        }

        // Distinguish a missing row from a disallowed transition
        let current: Option<IntroStatus> =
            sqlx::query_scalar("SELECT status FROM introductions WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        match current {
            Some(status) => Ok(TransitionOutcome::InvalidState(status)),
            None => Ok(TransitionOutcome::NotFound),
        }
    }

    /// Overwrite the human-editable introduction message.
    pub async fn update_message(&self, id: Uuid, message: &str) -> Result<bool, LedgerError> {
        let query = r#"
            UPDATE introductions
            SET intro_message = $2, updated_at = NOW()
            WHERE id = $1
        "#;

        let result = sqlx::query(query)
            .bind(id)
            .bind(message)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List introductions, optionally filtered by period and status.
    pub async fn list(
        &self,
        period: Option<&str>,
        status: Option<IntroStatus>,
    ) -> Result<Vec<IntroductionRecord>, LedgerError> {
        let query = r#"
            SELECT id, member_a_id, member_b_id, pair_key, matched_by,
                   status, month_year, intro_message, created_at, updated_at
            FROM introductions
            WHERE ($1::text IS NULL OR month_year = $1)
              AND ($2::intro_status IS NULL OR status = $2)
            ORDER BY created_at DESC, id
        "#;

        let records = sqlx::query_as::<_, IntroductionRecord>(query)
            .bind(period)
            .bind(status)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    /// Aggregate status counts for one period.
    pub async fn period_stats(&self, period: &str) -> Result<PeriodStats, LedgerError> {
        let query = r#"
            SELECT
                COUNT(*) as total,
                COUNT(*) FILTER (WHERE status = 'suggested') as suggested,
                COUNT(*) FILTER (WHERE status = 'approved') as approved,
                COUNT(*) FILTER (WHERE status = 'sent') as sent,
                COUNT(*) FILTER (WHERE status = 'declined') as declined,
                COUNT(*) FILTER (WHERE status = 'completed') as completed
            FROM introductions
            WHERE month_year = $1
        "#;

        let row = sqlx::query(query).bind(period).fetch_one(&self.pool).await?;

        Ok(PeriodStats {
            period: period.to_string(),
            total: row.get("total"),
            suggested: row.get("suggested"),
            approved: row.get("approved"),
            sent: row.get("sent"),
            declined: row.get("declined"),
            completed: row.get("completed"),
        })
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, LedgerError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
