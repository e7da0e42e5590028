//! Registry mapping channels to their generated variant sets.

use super::model::{ChannelId, RetentionPolicy};
use crate::error::{MuseError, Result};
use crate::variant::VariantSet;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Maps the enabled channel set to per-channel variant sets.
///
/// Membership in the active set and content ownership are deliberately
/// separate: under [`RetentionPolicy::Retain`] disabling a channel keeps its
/// variant set (and cursor), so toggling a platform off and on shows the
/// previously generated content instead of forcing regeneration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelRegistry {
    active: BTreeSet<ChannelId>,
    generated: HashMap<ChannelId, VariantSet>,
    #[serde(default)]
    retention: RetentionPolicy,
}

impl ChannelRegistry {
    /// Creates an empty registry with the given retention policy.
    pub fn new(retention: RetentionPolicy) -> Self {
        Self {
            active: BTreeSet::new(),
            generated: HashMap::new(),
            retention,
        }
    }

    /// Adds a channel to the active set.
    pub fn enable(&mut self, channel: impl Into<ChannelId>) {
        self.active.insert(channel.into());
    }

    /// Removes a channel from the active set.
    ///
    /// Under `Retain` the generated variant set survives; under `Purge`
    /// it is dropped together with the channel.
    pub fn disable(&mut self, channel: &str) {
        self.active.remove(channel);
        if self.retention == RetentionPolicy::Purge {
            self.generated.remove(channel);
        }
    }

    /// Whether the channel is currently in the active set.
    pub fn is_active(&self, channel: &str) -> bool {
        self.active.contains(channel)
    }

    /// Sorted snapshot of the active channel set.
    ///
    /// Drives which channels participate in the next generation job.
    pub fn active_channels(&self) -> Vec<ChannelId> {
        self.active.iter().cloned().collect()
    }

    /// Returns the variant set for a channel.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the channel was never generated (or was purged).
    pub fn variant_set(&self, channel: &str) -> Result<&VariantSet> {
        self.generated
            .get(channel)
            .ok_or_else(|| MuseError::not_found("channel", channel))
    }

    /// Mutable access to a channel's variant set.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the channel was never generated (or was purged).
    pub fn variant_set_mut(&mut self, channel: &str) -> Result<&mut VariantSet> {
        self.generated
            .get_mut(channel)
            .ok_or_else(|| MuseError::not_found("channel", channel))
    }

    /// Installs a freshly generated variant set for a channel.
    ///
    /// Called on generation fulfillment; replaces any previous set. The
    /// cursor starts at 0 by construction of the new set.
    pub fn install(&mut self, channel: impl Into<ChannelId>, set: VariantSet) {
        self.generated.insert(channel.into(), set);
    }

    /// Whether the channel has generated content available.
    pub fn has_variants(&self, channel: &str) -> bool {
        self.generated.contains_key(channel)
    }

    /// The configured retention policy.
    pub fn retention(&self) -> RetentionPolicy {
        self.retention
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::Direction;

    fn two_variants() -> VariantSet {
        VariantSet::new(vec!["v0".to_string(), "v1".to_string()]).unwrap()
    }

    #[test]
    fn test_enable_disable_membership() {
        let mut registry = ChannelRegistry::default();
        registry.enable("instagram");
        registry.enable("linkedin");
        assert!(registry.is_active("instagram"));

        registry.disable("instagram");
        assert!(!registry.is_active("instagram"));
        assert_eq!(registry.active_channels(), vec!["linkedin".to_string()]);
    }

    #[test]
    fn test_variant_set_not_found_before_generation() {
        let mut registry = ChannelRegistry::default();
        registry.enable("instagram");
        let err = registry.variant_set("instagram").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_retain_on_disable_preserves_set_and_cursor() {
        let mut registry = ChannelRegistry::new(RetentionPolicy::Retain);
        registry.enable("instagram");
        registry.install("instagram", two_variants());
        registry
            .variant_set_mut("instagram")
            .unwrap()
            .advance(Direction::Next);

        registry.disable("instagram");
        registry.enable("instagram");

        let set = registry.variant_set("instagram").unwrap();
        assert_eq!(set.cursor_index(), 1);
        assert_eq!(set.current(), "v1");
    }

    #[test]
    fn test_purge_on_disable_drops_set() {
        let mut registry = ChannelRegistry::new(RetentionPolicy::Purge);
        registry.enable("instagram");
        registry.install("instagram", two_variants());

        registry.disable("instagram");
        registry.enable("instagram");

        assert!(!registry.has_variants("instagram"));
        assert!(registry.variant_set("instagram").unwrap_err().is_not_found());
    }

    #[test]
    fn test_install_replaces_previous_set() {
        let mut registry = ChannelRegistry::default();
        registry.enable("instagram");
        registry.install("instagram", two_variants());
        registry
            .variant_set_mut("instagram")
            .unwrap()
            .advance(Direction::Next);

        let fresh = VariantSet::new(vec!["new0".to_string(), "new1".to_string()]).unwrap();
        registry.install("instagram", fresh);

        let set = registry.variant_set("instagram").unwrap();
        assert_eq!(set.cursor_index(), 0);
        assert_eq!(set.current(), "new0");
    }
}
