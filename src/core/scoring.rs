use crate::core::pairs::{PairHistory, PairKey};
use crate::models::{MatchCandidate, MemberProfile, ScoringWeights};

/// Score one unordered pair of members.
///
/// Returns `None` for inadmissible pairs: a member paired with themselves,
/// or a pair that already has an introduction record in the history. For
/// admissible pairs, each component check is independent and appends one
/// reasoning line in evaluation order:
///
/// 1. A's expertise appears in B's looking-for text (+40)
/// 2. B's expertise appears in A's looking-for text (+40)
/// 3. Same industry, case-insensitive (+20)
/// 4. Both prestige (+20) or exactly one prestige (+10)
/// 5. Nothing fired: fixed fallback score (5) with a generic line
///
/// Pure and total over well-formed profiles; no side effects.
pub fn score_pair(
    a: &MemberProfile,
    b: &MemberProfile,
    history: &PairHistory,
    weights: &ScoringWeights,
) -> Option<MatchCandidate> {
    // Never match a member with themselves
    if a.member_id == b.member_id {
        return None;
    }

    // Never suggest a pair that has already been introduced
    if history.contains(&PairKey::new(&a.member_id, &b.member_id)) {
        return None;
    }

    let mut score = 0u32;
    let mut reasoning = Vec::new();

    if expertise_overlaps_looking_for(&a.expertise_areas, b.looking_for.as_deref()) {
        score += weights.expertise;
        reasoning.push(format!(
            "{} has expertise in areas {} is looking for.",
            a.name, b.name
        ));
    }

    if expertise_overlaps_looking_for(&b.expertise_areas, a.looking_for.as_deref()) {
        score += weights.expertise;
        reasoning.push(format!(
            "{} has expertise in areas {} is looking for.",
            b.name, a.name
        ));
    }

    match (a.industry.as_deref(), b.industry.as_deref()) {
        (Some(ia), Some(ib)) if ia.to_lowercase() == ib.to_lowercase() => {
            score += weights.industry;
            reasoning.push(format!("Both are in the {} industry.", ia));
        }
        _ => {}
    }

    if a.tier.is_prestige() && b.tier.is_prestige() {
        score += weights.prestige_pair;
        reasoning.push("Both are Prestige members.".to_string());
    } else if a.tier.is_prestige() || b.tier.is_prestige() {
        score += weights.prestige_single;
        let prestige_member = if a.tier.is_prestige() { &a.name } else { &b.name };
        reasoning.push(format!("Includes Prestige member {}.", prestige_member));
    }

    // Every admissible pair is still rankable, just at low priority
    if reasoning.is_empty() {
        score = weights.fallback;
        reasoning.push("Potential networking match based on general profiles.".to_string());
    }

    Some(MatchCandidate {
        member_a: a.clone(),
        member_b: b.clone(),
        score,
        reasoning,
    })
}

/// True if any expertise tag is a case-insensitive substring of the
/// looking-for text.
fn expertise_overlaps_looking_for(expertise: &[String], looking_for: Option<&str>) -> bool {
    let Some(text) = looking_for else {
        return false;
    };
    let text = text.to_lowercase();
    expertise.iter().any(|tag| text.contains(&tag.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MembershipTier;

    fn member(
        id: &str,
        name: &str,
        industry: Option<&str>,
        expertise: &[&str],
        looking_for: Option<&str>,
        tier: MembershipTier,
    ) -> MemberProfile {
        MemberProfile {
            member_id: id.to_string(),
            name: name.to_string(),
            industry: industry.map(str::to_string),
            expertise_areas: expertise.iter().map(|s| s.to_string()).collect(),
            looking_for: looking_for.map(str::to_string),
            tier,
        }
    }

    fn alice() -> MemberProfile {
        member(
            "alice",
            "Alice",
            Some("SaaS"),
            &["Product Design", "UI/UX"],
            Some("Growth strategies and networking with founders"),
            MembershipTier::Basic,
        )
    }

    fn charlie() -> MemberProfile {
        member(
            "charlie",
            "Charlie",
            Some("Fintech"),
            &["Growth", "Marketing"],
            Some("Networking with AI engineers"),
            MembershipTier::Basic,
        )
    }

    #[test]
    fn test_one_directional_expertise_match() {
        // Charlie's "Growth" appears in Alice's looking_for; nothing else fires
        let candidate = score_pair(
            &alice(),
            &charlie(),
            &PairHistory::new(),
            &ScoringWeights::default(),
        )
        .unwrap();

        assert_eq!(candidate.score, 40);
        assert_eq!(candidate.reasoning.len(), 1);
        assert!(candidate.reasoning[0].contains("Charlie has expertise"));
    }

    #[test]
    fn test_prestige_pair_only() {
        let dave = member("dave", "Dave", Some("SaaS"), &[], None, MembershipTier::Prestige);
        let frank = member(
            "frank",
            "Frank",
            Some("Fintech"),
            &[],
            None,
            MembershipTier::Prestige,
        );

        let candidate =
            score_pair(&dave, &frank, &PairHistory::new(), &ScoringWeights::default()).unwrap();

        assert_eq!(candidate.score, 20);
        assert_eq!(candidate.reasoning, vec!["Both are Prestige members."]);
    }

    #[test]
    fn test_single_prestige_names_the_member() {
        let dave = member("dave", "Dave", None, &[], None, MembershipTier::Prestige);
        let bob = member("bob", "Bob", None, &[], None, MembershipTier::Basic);

        let candidate =
            score_pair(&dave, &bob, &PairHistory::new(), &ScoringWeights::default()).unwrap();

        assert_eq!(candidate.score, 10);
        assert_eq!(candidate.reasoning, vec!["Includes Prestige member Dave."]);
    }

    #[test]
    fn test_fallback_score() {
        let alice = member("alice", "Alice", Some("SaaS"), &[], None, MembershipTier::Basic);
        let bob = member("bob", "Bob", Some("Fintech"), &[], None, MembershipTier::Basic);

        let candidate =
            score_pair(&alice, &bob, &PairHistory::new(), &ScoringWeights::default()).unwrap();

        assert_eq!(candidate.score, 5);
        assert_eq!(
            candidate.reasoning,
            vec!["Potential networking match based on general profiles."]
        );
    }

    #[test]
    fn test_all_components_stack() {
        let a = member(
            "a",
            "Ada",
            Some("SaaS"),
            &["Growth"],
            Some("Marketing advice"),
            MembershipTier::Prestige,
        );
        let b = member(
            "b",
            "Ben",
            Some("saas"),
            &["Marketing"],
            Some("Growth strategies"),
            MembershipTier::Prestige,
        );

        let candidate = score_pair(&a, &b, &PairHistory::new(), &ScoringWeights::default()).unwrap();

        // 40 + 40 + 20 + 20
        assert_eq!(candidate.score, 120);
        assert_eq!(candidate.reasoning.len(), 4);
    }

    #[test]
    fn test_industry_match_is_case_insensitive() {
        let a = member("a", "Ada", Some("FinTech"), &[], None, MembershipTier::Basic);
        let b = member("b", "Ben", Some("fintech"), &[], None, MembershipTier::Basic);

        let candidate = score_pair(&a, &b, &PairHistory::new(), &ScoringWeights::default()).unwrap();

        assert_eq!(candidate.score, 20);
        assert!(candidate.reasoning[0].contains("FinTech industry"));
    }

    #[test]
    fn test_self_pair_is_inadmissible() {
        let result = score_pair(
            &alice(),
            &alice(),
            &PairHistory::new(),
            &ScoringWeights::default(),
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_history_excludes_pair_in_either_order() {
        let history = PairHistory::from_pairs(vec![("charlie", "alice")]);
        let weights = ScoringWeights::default();

        assert!(score_pair(&alice(), &charlie(), &history, &weights).is_none());
        assert!(score_pair(&charlie(), &alice(), &history, &weights).is_none());
    }

    #[test]
    fn test_score_is_symmetric() {
        let weights = ScoringWeights::default();
        let history = PairHistory::new();

        let ab = score_pair(&alice(), &charlie(), &history, &weights).unwrap();
        let ba = score_pair(&charlie(), &alice(), &history, &weights).unwrap();

        assert_eq!(ab.score, ba.score);
        assert_eq!(ab.reasoning.len(), ba.reasoning.len());
    }
}
