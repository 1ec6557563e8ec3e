use crate::core::pairs::{PairHistory, PairKey, UnorderedPairs};
use crate::core::profiles::ProfileSet;
use crate::core::scoring::score_pair;
use crate::models::{IntroStatus, MatchCandidate, NewIntroduction, PeriodKey, ScoringWeights};

/// Ordered output of one generation run, ready for atomic persistence.
#[derive(Debug, Clone)]
pub struct SuggestionBatch {
    pub period: PeriodKey,
    pub candidates: Vec<MatchCandidate>,
}

impl SuggestionBatch {
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Convert the batch into insert-ready ledger rows.
    ///
    /// Every row starts in `suggested` with the editable message seeded
    /// from the joined reasoning lines.
    pub fn into_records(self, matched_by: Option<&str>) -> Vec<NewIntroduction> {
        let period = self.period;
        self.candidates
            .into_iter()
            .map(|candidate| NewIntroduction {
                pair_key: PairKey::new(
                    &candidate.member_a.member_id,
                    &candidate.member_b.member_id,
                )
                .into_string(),
                member_a_id: candidate.member_a.member_id,
                member_b_id: candidate.member_b.member_id,
                matched_by: matched_by.map(str::to_string),
                status: IntroStatus::Suggested,
                month_year: period.as_str().to_string(),
                intro_message: candidate.reasoning.join(" "),
            })
            .collect()
    }
}

/// Main matching orchestrator for one period run.
///
/// Enumerates every unordered pair of the pool exactly once, scores each
/// through the pure scoring function, and ranks the survivors by score
/// descending. The sort is stable, so ties keep enumeration order and
/// identical snapshots produce identical batches.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    /// Produce all admissible candidates, ranked by score descending.
    pub fn rank_candidates(
        &self,
        profiles: &ProfileSet,
        history: &PairHistory,
    ) -> Vec<MatchCandidate> {
        let mut candidates: Vec<MatchCandidate> = UnorderedPairs::new(profiles.len())
            .filter_map(|(i, j)| score_pair(profiles.get(i), profiles.get(j), history, &self.weights))
            .collect();

        candidates.sort_by(|a, b| b.score.cmp(&a.score));
        candidates
    }

    /// Run a full generation pass for one period.
    pub fn build_batch(
        &self,
        period: PeriodKey,
        profiles: &ProfileSet,
        history: &PairHistory,
    ) -> SuggestionBatch {
        let candidates = self.rank_candidates(profiles, history);
        SuggestionBatch { period, candidates }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
