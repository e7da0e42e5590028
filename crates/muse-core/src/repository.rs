//! Draft persistence hook.
//!
//! Defines the interface the studio may call to persist committed drafts.
//! The core ships no implementation; hosts wire in storage if they want it.

use crate::channel::ChannelId;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract store for per-channel committed content.
///
/// This trait decouples the studio from the specific storage mechanism
/// (files, database, remote API). Saving is best-effort from the studio's
/// point of view: a failed save never rolls back an in-memory commit.
#[async_trait]
pub trait DraftRepository: Send + Sync {
    /// Persists the committed content for a channel.
    async fn save(&self, channel: &ChannelId, content: &str) -> Result<()>;

    /// Loads previously persisted content for a channel.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(content))`: content found
    /// - `Ok(None)`: nothing persisted for this channel
    /// - `Err(_)`: storage access failed
    async fn load(&self, channel: &ChannelId) -> Result<Option<String>>;
}
