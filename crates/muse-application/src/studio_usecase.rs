//! Studio use case implementation.
//!
//! This module provides the `StudioUseCase` which orchestrates the channel
//! registry, edit sessions and the generation-job state machine on top of
//! an injected `ContentGenerator`, keeping the registry consistent across
//! concurrent navigation, edits and in-flight generation.

use muse_core::carousel::Direction;
use muse_core::channel::{ChannelId, ChannelRegistry, RetentionPolicy};
use muse_core::config::StudioConfig;
use muse_core::edit::EditCoordinator;
use muse_core::error::{MuseError, Result};
use muse_core::event::{EventSink, StudioEvent};
use muse_core::generator::ContentGenerator;
use muse_core::job::{GenerationConfig, GenerationJob, JobStatus};
use muse_core::repository::DraftRepository;
use muse_core::variant::VariantSet;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Notify, RwLock};

/// Use case for driving a multi-channel content studio.
///
/// `StudioUseCase` coordinates between the `ChannelRegistry`,
/// `EditCoordinator` and `GenerationJob` state machine while treating
/// content generation as an opaque async capability.
///
/// # Responsibilities
///
/// - Submitting generation jobs and applying their results to the registry
/// - Navigating per-channel variant sets
/// - Running the optimistic edit lifecycle (begin/update/commit/discard)
/// - Toggling channel membership under the configured retention policy
/// - Emitting presentation events for every observable change
///
/// # Submission policy
///
/// A new submission while a job is `Pending` is rejected with `Conflict`
/// (the disabled-submit-button behavior). Because at most one job is ever
/// in flight, a stale job's fulfillment can never race a newer one.
///
/// # Thread Safety
///
/// All internal state is wrapped in `Arc` and uses `RwLock` for concurrent
/// access from the host event loop and the job task.
pub struct StudioUseCase {
    /// Channel membership and generated variant sets
    registry: Arc<RwLock<ChannelRegistry>>,
    /// Per-channel optimistic edit sessions
    edits: Arc<RwLock<EditCoordinator>>,
    /// Injected generation backend
    generator: Arc<dyn ContentGenerator>,
    /// Presentation event sink
    events: Arc<dyn EventSink>,
    /// Optional persistence hook for committed drafts
    draft_repository: Option<Arc<dyn DraftRepository>>,
    /// The most recently submitted job (at most one is ever `Pending`)
    current_job: Arc<RwLock<Option<GenerationJob>>>,
    /// Signalled whenever a job settles
    settled: Arc<Notify>,
    config: StudioConfig,
}

impl StudioUseCase {
    /// Creates a new `StudioUseCase` instance.
    ///
    /// # Arguments
    ///
    /// * `generator` - The content generation capability
    /// * `events` - Sink for presentation events
    /// * `config` - Studio policies (retention, edit policy, delays)
    pub fn new(
        generator: Arc<dyn ContentGenerator>,
        events: Arc<dyn EventSink>,
        config: StudioConfig,
    ) -> Self {
        Self {
            registry: Arc::new(RwLock::new(ChannelRegistry::new(config.retention))),
            edits: Arc::new(RwLock::new(EditCoordinator::new(config.edit_policy))),
            generator,
            events,
            draft_repository: None,
            current_job: Arc::new(RwLock::new(None)),
            settled: Arc::new(Notify::new()),
            config,
        }
    }

    /// Wires in a persistence hook for committed drafts.
    ///
    /// Saving is best-effort: a failed save is logged and never rolls back
    /// the in-memory commit.
    pub fn with_draft_repository(mut self, repository: Arc<dyn DraftRepository>) -> Self {
        self.draft_repository = Some(repository);
        self
    }

    // ============================================================================
    // Channel membership
    // ============================================================================

    /// Adds a channel to the active set.
    pub async fn enable_channel(&self, channel: &str) {
        self.registry.write().await.enable(channel);
        tracing::debug!(channel, "Channel enabled");
    }

    /// Removes a channel from the active set.
    ///
    /// Under `Purge` retention this also drops the channel's variant set
    /// and any in-flight edit session.
    pub async fn disable_channel(&self, channel: &str) {
        let mut registry = self.registry.write().await;
        registry.disable(channel);
        if registry.retention() == RetentionPolicy::Purge {
            self.edits.write().await.clear(channel);
        }
        tracing::debug!(channel, "Channel disabled");
    }

    /// Sorted snapshot of the active channel set.
    pub async fn active_channels(&self) -> Vec<ChannelId> {
        self.registry.read().await.active_channels()
    }

    // ============================================================================
    // Generation jobs
    // ============================================================================

    /// Submits a generation job for all currently active channels.
    ///
    /// Validation happens synchronously: a blank prompt or an empty active
    /// set is rejected with `InvalidInput` before any job exists. The job
    /// then transitions to `Pending` and the generator is awaited on a
    /// background task; its result is applied to the registry exactly once.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for a blank prompt or no active channels
    /// - `Conflict` while another job is still `Pending`
    pub async fn submit_generation(
        self: &Arc<Self>,
        prompt: &str,
        config: GenerationConfig,
    ) -> Result<String> {
        let channels = self.registry.read().await.active_channels();
        let mut config = config;
        config
            .entry("variants_per_channel".to_string())
            .or_insert_with(|| serde_json::json!(self.config.variants_per_channel));

        let mut job = GenerationJob::new(prompt, channels, config)?;

        {
            let mut slot = self.current_job.write().await;
            if let Some(active) = slot.as_ref() {
                if active.status == JobStatus::Pending {
                    return Err(MuseError::conflict(format!(
                        "generation job {} is still pending",
                        active.id
                    )));
                }
            }
            job.mark_pending()?;
            *slot = Some(job.clone());
        }

        tracing::info!(job_id = %job.id, channels = job.channels.len(), "Generation submitted");
        self.events.emit(StudioEvent::JobStateChanged { job: job.clone() });

        let usecase = Arc::clone(self);
        let job_id = job.id.clone();
        tokio::spawn(async move {
            usecase.run_generation(job).await;
        });

        Ok(job_id)
    }

    /// Clone of the most recently submitted job, if any.
    pub async fn job_snapshot(&self) -> Option<GenerationJob> {
        self.current_job.read().await.clone()
    }

    /// Waits until the current job settles and returns its terminal state.
    ///
    /// Returns immediately with `None` if nothing was ever submitted.
    pub async fn wait_until_settled(&self) -> Option<GenerationJob> {
        loop {
            {
                let slot = self.current_job.read().await;
                match slot.as_ref() {
                    None => return None,
                    Some(job) if job.is_terminal() => return Some(job.clone()),
                    Some(_) => {}
                }
            }
            self.settled.notified().await;
        }
    }

    /// Awaits the generator and applies the outcome to the registry.
    async fn run_generation(&self, job: GenerationJob) {
        let result = self
            .generator
            .generate(&job.prompt, &job.channels, &job.config)
            .await;

        match result.and_then(|map| Self::collect_variant_sets(&job.channels, map)) {
            Ok(sets) => {
                let mut changed = Vec::with_capacity(sets.len());
                {
                    let mut registry = self.registry.write().await;
                    for (channel, set) in sets {
                        changed.push((channel.clone(), set.current().to_string()));
                        registry.install(channel, set);
                    }
                }
                for (channel, content) in changed {
                    self.events
                        .emit(StudioEvent::VariantChanged { channel, content });
                }
                self.settle_job(&job.id, None).await;
            }
            Err(e) => {
                tracing::warn!(job_id = %job.id, error = %e, "Generation failed");
                self.settle_job(&job.id, Some(e.to_string())).await;
            }
        }
    }

    /// Validates the generator's response against the requested channels.
    fn collect_variant_sets(
        channels: &[ChannelId],
        mut map: HashMap<ChannelId, Vec<String>>,
    ) -> Result<Vec<(ChannelId, VariantSet)>> {
        let mut sets = Vec::with_capacity(channels.len());
        for channel in channels {
            let variants = map.remove(channel).ok_or_else(|| {
                MuseError::generation(format!("generator returned no content for '{}'", channel))
            })?;
            let set = VariantSet::new(variants).map_err(|_| {
                MuseError::generation(format!("generator returned no content for '{}'", channel))
            })?;
            sets.push((channel.clone(), set));
        }
        Ok(sets)
    }

    /// Moves the job to its terminal state and notifies waiters.
    async fn settle_job(&self, job_id: &str, error: Option<String>) {
        let settled = {
            let mut slot = self.current_job.write().await;
            match slot.as_mut() {
                Some(job) if job.id == job_id => {
                    let outcome = match error {
                        None => job.fulfill(),
                        Some(message) => job.fail(message),
                    };
                    if let Err(e) = outcome {
                        tracing::error!(job_id, error = %e, "Illegal job transition");
                        return;
                    }
                    Some(job.clone())
                }
                _ => None,
            }
        };
        if let Some(job) = settled {
            tracing::info!(job_id = %job.id, status = ?job.status, "Generation settled");
            self.events.emit(StudioEvent::JobStateChanged { job });
        }
        self.settled.notify_one();
    }

    // ============================================================================
    // Variant navigation
    // ============================================================================

    /// Returns the visible variant for a channel.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the channel was never generated.
    pub async fn current_variant(&self, channel: &str) -> Result<String> {
        Ok(self
            .registry
            .read()
            .await
            .variant_set(channel)?
            .current()
            .to_string())
    }

    /// Cycles a channel's cursor and returns the newly visible variant.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the channel was never generated.
    pub async fn advance_variant(&self, channel: &str, direction: Direction) -> Result<String> {
        let content = {
            let mut registry = self.registry.write().await;
            let set = registry.variant_set_mut(channel)?;
            set.advance(direction);
            set.current().to_string()
        };
        self.events.emit(StudioEvent::VariantChanged {
            channel: channel.to_string(),
            content: content.clone(),
        });
        Ok(content)
    }

    /// Jumps a channel's cursor to `index` and returns the visible variant.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the channel was never generated
    /// - `IndexOutOfRange` if `index` is outside the variant set
    pub async fn select_variant(&self, channel: &str, index: usize) -> Result<String> {
        let content = {
            let mut registry = self.registry.write().await;
            let set = registry.variant_set_mut(channel)?;
            set.select(index)?;
            set.current().to_string()
        };
        self.events.emit(StudioEvent::VariantChanged {
            channel: channel.to_string(),
            content: content.clone(),
        });
        Ok(content)
    }

    // ============================================================================
    // Edit lifecycle
    // ============================================================================

    /// Opens an edit session on the channel's visible variant.
    pub async fn begin_edit(&self, channel: &str) -> Result<()> {
        let registry = self.registry.read().await;
        self.edits.write().await.begin(channel, &registry)
    }

    /// Updates the draft for an active edit session.
    pub async fn update_draft(&self, channel: &str, content: &str) -> Result<()> {
        self.edits.write().await.update_draft(channel, content)
    }

    /// Commits the draft into the variant slot captured at `begin` time.
    ///
    /// Emits `VariantChanged` with the now-visible content and, when a
    /// draft repository is configured, persists the committed text.
    pub async fn commit_edit(&self, channel: &str) -> Result<String> {
        let (committed, visible) = {
            let mut registry = self.registry.write().await;
            let committed = self.edits.write().await.commit(channel, &mut registry)?;
            let visible = registry.variant_set(channel)?.current().to_string();
            (committed, visible)
        };
        self.events.emit(StudioEvent::VariantChanged {
            channel: channel.to_string(),
            content: visible,
        });

        if let Some(repository) = &self.draft_repository {
            let channel_id = channel.to_string();
            if let Err(e) = repository.save(&channel_id, &committed).await {
                tracing::warn!(channel, error = %e, "Draft save failed, keeping in-memory commit");
            }
        }
        Ok(committed)
    }

    /// Drops the edit session without touching the variant set.
    pub async fn discard_edit(&self, channel: &str) -> Result<()> {
        self.edits.write().await.discard(channel)
    }

    /// Whether an edit session is active on the channel.
    pub async fn is_editing(&self, channel: &str) -> bool {
        self.edits.read().await.is_editing(channel)
    }
}
