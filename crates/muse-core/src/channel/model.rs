//! Channel domain models.

use serde::{Deserialize, Serialize};

/// Identifier of an independent content target: a social platform
/// ("instagram"), a document type ("proposal"), a logo candidate slot.
///
/// Display metadata (labels, icons) is owned by the host UI, not the core.
pub type ChannelId = String;

/// What happens to a channel's generated content when it is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetentionPolicy {
    /// Keep the variant set so re-enabling restores prior content.
    Retain,
    /// Drop the variant set; re-enabling requires regeneration.
    Purge,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        RetentionPolicy::Retain
    }
}
