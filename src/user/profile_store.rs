//! Storage-backed profile store.
//!
//! Login, registration and subscription changes are simulations persisted to
//! the user key, exactly like the rest of the demo state. A profile that is
//! absent or unreadable decodes to the logged-out free default.

use super::profile::{SubscriptionTier, UserProfile};
use crate::storage::{Storage, StorageKey};
use anyhow::Result;
use std::sync::Arc;
use tracing::warn;

pub struct ProfileStore {
    storage: Arc<dyn Storage>,
}

impl ProfileStore {
    pub fn new(storage: Arc<dyn Storage>) -> ProfileStore {
        ProfileStore { storage }
    }

    /// The current profile, or the default when absent or malformed.
    pub fn profile(&self) -> Result<UserProfile> {
        match self.storage.get(StorageKey::Profile)? {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(profile) => Ok(profile),
                Err(err) => {
                    warn!("Discarding malformed profile state: {}", err);
                    Ok(UserProfile::default())
                }
            },
            None => Ok(UserProfile::default()),
        }
    }

    /// Marks the user as logged in. Returns the updated profile.
    pub fn log_in(&self) -> Result<UserProfile> {
        let mut profile = self.profile()?;
        profile.logged_in = true;
        self.save(&profile)?;
        Ok(profile)
    }

    /// Marks the user as logged out. The subscription tier is kept.
    pub fn log_out(&self) -> Result<UserProfile> {
        let mut profile = self.profile()?;
        profile.logged_in = false;
        self.save(&profile)?;
        Ok(profile)
    }

    /// Switches to the given plan. Returns the updated profile.
    pub fn set_subscription_tier(&self, tier: SubscriptionTier) -> Result<UserProfile> {
        let mut profile = self.profile()?;
        profile.subscription_tier = tier;
        self.save(&profile)?;
        Ok(profile)
    }

    /// Flips between the free and premium plans.
    pub fn toggle_subscription_tier(&self) -> Result<UserProfile> {
        let tier = self.profile()?.subscription_tier.toggled();
        self.set_subscription_tier(tier)
    }

    fn save(&self, profile: &UserProfile) -> Result<()> {
        self.storage
            .set(StorageKey::Profile, &serde_json::to_string(profile)?)
    }
}
