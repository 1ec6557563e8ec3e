use crate::models::{MemberProfile, MemberRow};

/// Normalized per-run snapshot of the eligible member pool.
///
/// Normalization fails closed: a row missing its member id, display name,
/// profile sub-record, or an active subscription is excluded from the run
/// rather than patched with guessed defaults.
#[derive(Debug, Clone, Default)]
pub struct ProfileSet {
    profiles: Vec<MemberProfile>,
}

impl ProfileSet {
    /// Normalize loosely-typed directory rows into a typed pool.
    ///
    /// The directory join returns nullable nested arrays; only the first
    /// profile and subscription entries are consulted, matching the
    /// directory's one-row-per-member contract. A missing tier defaults to
    /// `basic`; everything else required is grounds for exclusion.
    pub fn normalize(rows: Vec<MemberRow>) -> Self {
        let mut profiles = Vec::with_capacity(rows.len());

        for row in rows {
            let Some(member_id) = row.id.filter(|id| !id.is_empty()) else {
                tracing::warn!("Excluding directory row without a member id");
                continue;
            };
            let Some(name) = row.name.filter(|n| !n.trim().is_empty()) else {
                tracing::warn!("Excluding member {} without a display name", member_id);
                continue;
            };
            let Some(profile) = row.profiles.into_iter().next() else {
                tracing::warn!("Excluding member {} without a completed profile", member_id);
                continue;
            };
            let Some(subscription) = row.subscriptions.into_iter().next() else {
                tracing::warn!("Excluding member {} without a subscription", member_id);
                continue;
            };
            if subscription.status.as_deref() != Some("active") {
                tracing::warn!("Excluding member {} without an active subscription", member_id);
                continue;
            }

            // Blank tags would substring-match any looking_for text.
            let expertise_areas: Vec<String> = profile
                .expertise_areas
                .into_iter()
                .map(|tag| tag.trim().to_string())
                .filter(|tag| !tag.is_empty())
                .collect();

            profiles.push(MemberProfile {
                member_id,
                name,
                industry: profile.industry.filter(|i| !i.trim().is_empty()),
                expertise_areas,
                looking_for: profile.looking_for.filter(|l| !l.trim().is_empty()),
                tier: subscription.tier.unwrap_or_default(),
            });
        }

        Self { profiles }
    }

    pub fn from_profiles(profiles: Vec<MemberProfile>) -> Self {
        Self { profiles }
    }

    pub fn get(&self, index: usize) -> &MemberProfile {
        &self.profiles[index]
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MemberProfile> {
        self.profiles.iter()
    }
}
