//! Optimistic per-channel edit sessions over generated variants.

use crate::channel::{ChannelId, ChannelRegistry};
use crate::error::{MuseError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How many edit sessions may be active at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditPolicy {
    /// Independent sessions per channel (default): editing instagram does
    /// not affect a concurrent linkedin session.
    PerChannel,
    /// A single session across all channels; `begin` on a second channel
    /// fails with `Conflict` until the first commits or discards.
    SingleGlobal,
}

impl Default for EditPolicy {
    fn default() -> Self {
        EditPolicy::PerChannel
    }
}

/// An in-flight draft for one channel.
///
/// The draft diverges from the generated variant set until commit; readers
/// of the registry never observe it. `anchor_index` pins the variant slot
/// the session was opened on, so navigating to another variant while
/// editing does not retarget the eventual commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditSession {
    pub channel: ChannelId,
    pub draft: String,
    pub anchor_index: usize,
}

/// Coordinates edit sessions across channels.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditCoordinator {
    sessions: HashMap<ChannelId, EditSession>,
    #[serde(default)]
    policy: EditPolicy,
}

impl EditCoordinator {
    /// Creates a coordinator with the given policy and no active sessions.
    pub fn new(policy: EditPolicy) -> Self {
        Self {
            sessions: HashMap::new(),
            policy,
        }
    }

    /// Opens an edit session on `channel`, seeding the draft from the
    /// variant under the cursor. Re-opening a channel restarts its session.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the channel has no generated variants
    /// - `Conflict` under `SingleGlobal` while a session is active on a
    ///   different channel
    pub fn begin(&mut self, channel: &str, registry: &ChannelRegistry) -> Result<()> {
        if self.policy == EditPolicy::SingleGlobal {
            if let Some(active) = self.sessions.keys().find(|c| c.as_str() != channel) {
                return Err(MuseError::conflict(format!(
                    "edit session already active on channel '{}'",
                    active
                )));
            }
        }

        let set = registry.variant_set(channel)?;
        self.sessions.insert(
            channel.to_string(),
            EditSession {
                channel: channel.to_string(),
                draft: set.current().to_string(),
                anchor_index: set.cursor_index(),
            },
        );
        Ok(())
    }

    /// Replaces the draft content for an active session.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no session is active on the channel.
    pub fn update_draft(&mut self, channel: &str, content: impl Into<String>) -> Result<()> {
        let session = self
            .sessions
            .get_mut(channel)
            .ok_or_else(|| MuseError::not_found("edit session", channel))?;
        session.draft = content.into();
        Ok(())
    }

    /// Commits the draft into the variant slot captured at `begin` time
    /// and clears the session.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no session is active on the channel
    /// - `IndexOutOfRange` if the variant set shrank under the session
    ///   (possible when a regeneration landed mid-edit)
    pub fn commit(&mut self, channel: &str, registry: &mut ChannelRegistry) -> Result<String> {
        let session = self
            .sessions
            .get(channel)
            .ok_or_else(|| MuseError::not_found("edit session", channel))?;

        // The session survives a failed write so the draft stays recoverable
        let set = registry.variant_set_mut(channel)?;
        set.replace_at(session.anchor_index, session.draft.clone())?;

        let session = self.sessions.remove(channel).expect("session checked above");
        Ok(session.draft)
    }

    /// Drops the session without touching the variant set.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no session is active on the channel.
    pub fn discard(&mut self, channel: &str) -> Result<()> {
        self.sessions
            .remove(channel)
            .map(|_| ())
            .ok_or_else(|| MuseError::not_found("edit session", channel))
    }

    /// The active session for a channel, if any.
    pub fn session(&self, channel: &str) -> Option<&EditSession> {
        self.sessions.get(channel)
    }

    /// Whether any session is active on the channel.
    pub fn is_editing(&self, channel: &str) -> bool {
        self.sessions.contains_key(channel)
    }

    /// Drops a session silently if one exists (purge-on-disable path).
    pub fn clear(&mut self, channel: &str) {
        self.sessions.remove(channel);
    }
}
