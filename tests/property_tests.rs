// Property tests for the scoring and ranking invariants

use circle_algo::core::{score_pair, Matcher, PairHistory, PairKey, ProfileSet};
use circle_algo::models::{MemberProfile, MembershipTier, ScoringWeights};
use proptest::prelude::*;

fn arb_tier() -> impl Strategy<Value = MembershipTier> {
    prop_oneof![Just(MembershipTier::Basic), Just(MembershipTier::Prestige)]
}

fn arb_profile(id_range: std::ops::Range<u32>) -> impl Strategy<Value = MemberProfile> {
    (
        id_range,
        "[A-Za-z]{1,12}",
        proptest::option::of(prop_oneof![
            Just("SaaS".to_string()),
            Just("Fintech".to_string()),
            Just("Media".to_string()),
        ]),
        proptest::collection::vec("[A-Za-z]{1,10}", 0..4),
        proptest::option::of("[A-Za-z ]{0,40}"),
        arb_tier(),
    )
        .prop_map(|(id, name, industry, expertise, looking_for, tier)| MemberProfile {
            member_id: format!("member-{}", id),
            name,
            industry,
            expertise_areas: expertise,
            looking_for,
            tier,
        })
}

proptest! {
    #[test]
    fn score_is_symmetric(
        a in arb_profile(0..50),
        b in arb_profile(50..100),
    ) {
        let history = PairHistory::new();
        let weights = ScoringWeights::default();

        let ab = score_pair(&a, &b, &history, &weights);
        let ba = score_pair(&b, &a, &history, &weights);

        let ab = ab.unwrap();
        let ba = ba.unwrap();
        prop_assert_eq!(ab.score, ba.score);
        prop_assert_eq!(ab.reasoning.len(), ba.reasoning.len());
    }

    #[test]
    fn self_pair_is_never_admissible(a in arb_profile(0..100)) {
        let result = score_pair(&a, &a, &PairHistory::new(), &ScoringWeights::default());
        prop_assert!(result.is_none());
    }

    #[test]
    fn historical_pair_is_never_emitted(
        a in arb_profile(0..50),
        b in arb_profile(50..100),
    ) {
        let history = PairHistory::from_pairs(vec![(
            b.member_id.clone(),
            a.member_id.clone(),
        )]);
        let result = score_pair(&a, &b, &history, &ScoringWeights::default());
        prop_assert!(result.is_none());
    }

    #[test]
    fn score_is_fallback_or_component_sum(
        a in arb_profile(0..50),
        b in arb_profile(50..100),
    ) {
        let candidate = score_pair(&a, &b, &PairHistory::new(), &ScoringWeights::default())
            .unwrap();

        // Either the fallback fires alone, or at least one weighted
        // component did, so the score is >= 10 and <= 40+40+20+20
        if candidate.score == 5 {
            prop_assert_eq!(candidate.reasoning.len(), 1);
        } else {
            prop_assert!(candidate.score >= 10);
            prop_assert!(candidate.score <= 120);
        }
        prop_assert!(!candidate.reasoning.is_empty());
    }

    #[test]
    fn ranking_is_deterministic_and_descending(
        profiles in proptest::collection::vec(arb_profile(0..200), 0..12),
    ) {
        // Duplicate ids collapse to self-pairs that never surface; keep
        // the pool unique so pair counting stays exact
        let mut seen = std::collections::HashSet::new();
        let profiles: Vec<MemberProfile> = profiles
            .into_iter()
            .filter(|p| seen.insert(p.member_id.clone()))
            .collect();
        let n = profiles.len();
        let pool = ProfileSet::from_profiles(profiles);
        let history = PairHistory::new();
        let matcher = Matcher::with_default_weights();

        let first = matcher.rank_candidates(&pool, &history);
        let second = matcher.rank_candidates(&pool, &history);

        prop_assert_eq!(first.len(), n * n.saturating_sub(1) / 2);
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );

        for window in first.windows(2) {
            prop_assert!(window[0].score >= window[1].score);
        }
    }

    #[test]
    fn growing_history_shrinks_candidates_monotonically(
        profiles in proptest::collection::vec(arb_profile(0..40), 2..8),
    ) {
        let mut seen = std::collections::HashSet::new();
        let profiles: Vec<MemberProfile> = profiles
            .into_iter()
            .filter(|p| seen.insert(p.member_id.clone()))
            .collect();
        let pool = ProfileSet::from_profiles(profiles);
        let matcher = Matcher::with_default_weights();

        let mut history = PairHistory::new();
        let initial = matcher.rank_candidates(&pool, &history);

        // Persist the whole batch, then re-run: everything is excluded
        for candidate in &initial {
            history.insert(PairKey::new(
                &candidate.member_a.member_id,
                &candidate.member_b.member_id,
            ));
        }
        let rerun = matcher.rank_candidates(&pool, &history);
        prop_assert!(rerun.is_empty());
    }
}
