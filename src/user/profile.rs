//! User profile model and tier-gated access rules.

use serde::{Deserialize, Serialize};

/// Seconds of simulated pre-roll ad shown before free-tier playback.
pub const PRE_ROLL_AD_SECS: u64 = 3;

/// Subscription plan of the viewing user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    Free,
    Premium,
}

impl Default for SubscriptionTier {
    fn default() -> Self {
        Self::Free
    }
}

impl SubscriptionTier {
    /// The other tier, for the subscribe/unsubscribe toggle.
    pub fn toggled(&self) -> Self {
        match self {
            SubscriptionTier::Free => SubscriptionTier::Premium,
            SubscriptionTier::Premium => SubscriptionTier::Free,
        }
    }
}

/// The single per-state-directory user profile.
///
/// An absent profile means logged out on the free plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct UserProfile {
    pub logged_in: bool,
    pub subscription_tier: SubscriptionTier,
}

impl UserProfile {
    /// Free-tier playback gets ads; premium removes them.
    pub fn shows_ads(&self) -> bool {
        self.subscription_tier == SubscriptionTier::Free
    }

    /// Live streams are available to premium subscribers only.
    pub fn can_access_live(&self) -> bool {
        self.subscription_tier == SubscriptionTier::Premium
    }
}
