//! Content generation capability trait.

use crate::channel::ChannelId;
use crate::error::Result;
use crate::job::GenerationConfig;
use async_trait::async_trait;
use std::collections::HashMap;

/// An abstract, possibly slow, fallible content generation backend.
///
/// The studio core never talks to a network or model directly; it awaits
/// this capability and applies the result to the channel registry. Real
/// implementations call an actual backend; tests substitute mocks.
///
/// # Contract
///
/// On success the returned map must contain a non-empty candidate list for
/// every requested channel. Failures are reported as
/// [`MuseError::Generation`](crate::MuseError::Generation) and surface as a
/// `Failed` job, never as a panic.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generates candidate contents for each requested channel.
    ///
    /// # Arguments
    ///
    /// * `prompt` - The user's free-text prompt
    /// * `channels` - Channels to generate for
    /// * `config` - Opaque per-run options (tone, length, ...)
    async fn generate(
        &self,
        prompt: &str,
        channels: &[ChannelId],
        config: &GenerationConfig,
    ) -> Result<HashMap<ChannelId, Vec<String>>>;
}
