//! Generation job domain model.

use crate::channel::ChannelId;
use crate::error::{MuseError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Per-run generation options, forwarded opaquely to the generator
/// (tone, length, campaign preset, ...).
pub type GenerationConfig = HashMap<String, serde_json::Value>;

/// Represents the current status of a generation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// The job has been created but not yet dispatched.
    Idle,
    /// The job is awaiting the generator's response.
    Pending,
    /// The generator responded and the registry was updated.
    Fulfilled,
    /// The generator failed; the registry was left unmodified.
    Failed,
}

/// One "generate" invocation: captured input plus lifecycle state.
///
/// Owned exclusively by the submitter. Terminal jobs (`Fulfilled`/`Failed`)
/// are immutable; superseding happens by submitting a new job, never by
/// mutating an old one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationJob {
    /// A unique identifier for the job.
    pub id: String,
    /// The user's free-text prompt.
    pub prompt: String,
    /// Channels that will receive fresh variant sets on fulfillment.
    pub channels: Vec<ChannelId>,
    /// Opaque per-run configuration.
    pub config: GenerationConfig,
    /// The current lifecycle state.
    pub status: JobStatus,
    /// RFC 3339 creation timestamp.
    pub started_at: String,
    /// RFC 3339 settlement timestamp, set on fulfillment or failure.
    pub completed_at: Option<String>,
    /// Failure message when `status == Failed`.
    pub error: Option<String>,
}

impl GenerationJob {
    /// Creates a new `Idle` job.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the prompt is blank or the channel set is
    /// empty; such a job never exists, let alone transitions to `Pending`.
    pub fn new(
        prompt: impl Into<String>,
        channels: Vec<ChannelId>,
        config: GenerationConfig,
    ) -> Result<Self> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(MuseError::invalid_input("prompt must not be blank"));
        }
        if channels.is_empty() {
            return Err(MuseError::invalid_input(
                "at least one channel must be selected",
            ));
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            prompt,
            channels,
            config,
            status: JobStatus::Idle,
            started_at: chrono::Utc::now().to_rfc3339(),
            completed_at: None,
            error: None,
        })
    }

    /// Transitions `Idle -> Pending`.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the job is not `Idle`.
    pub fn mark_pending(&mut self) -> Result<()> {
        if self.status != JobStatus::Idle {
            return Err(MuseError::internal(format!(
                "cannot dispatch job {} from status {:?}",
                self.id, self.status
            )));
        }
        self.status = JobStatus::Pending;
        Ok(())
    }

    /// Transitions `Pending -> Fulfilled`.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the job is not `Pending`.
    pub fn fulfill(&mut self) -> Result<()> {
        if self.status != JobStatus::Pending {
            return Err(MuseError::internal(format!(
                "cannot fulfill job {} from status {:?}",
                self.id, self.status
            )));
        }
        self.status = JobStatus::Fulfilled;
        self.completed_at = Some(chrono::Utc::now().to_rfc3339());
        Ok(())
    }

    /// Transitions `Pending -> Failed`, recording the generator's message.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the job is not `Pending`.
    pub fn fail(&mut self, message: impl Into<String>) -> Result<()> {
        if self.status != JobStatus::Pending {
            return Err(MuseError::internal(format!(
                "cannot fail job {} from status {:?}",
                self.id, self.status
            )));
        }
        self.status = JobStatus::Failed;
        self.error = Some(message.into());
        self.completed_at = Some(chrono::Utc::now().to_rfc3339());
        Ok(())
    }

    /// Whether the job has settled (`Fulfilled` or `Failed`).
    pub fn is_terminal(&self) -> bool {
        matches!(self.status, JobStatus::Fulfilled | JobStatus::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_blank_prompt() {
        let err = GenerationJob::new("   ", vec!["instagram".to_string()], GenerationConfig::new())
            .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_new_rejects_empty_channels() {
        let err =
            GenerationJob::new("launch", Vec::new(), GenerationConfig::new()).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_lifecycle_happy_path() {
        let mut job = GenerationJob::new(
            "launch",
            vec!["instagram".to_string()],
            GenerationConfig::new(),
        )
        .unwrap();
        assert_eq!(job.status, JobStatus::Idle);
        assert!(job.completed_at.is_none());

        job.mark_pending().unwrap();
        assert_eq!(job.status, JobStatus::Pending);

        job.fulfill().unwrap();
        assert_eq!(job.status, JobStatus::Fulfilled);
        assert!(job.is_terminal());
        assert!(job.completed_at.is_some());
    }

    #[test]
    fn test_failure_records_message() {
        let mut job = GenerationJob::new(
            "launch",
            vec!["instagram".to_string()],
            GenerationConfig::new(),
        )
        .unwrap();
        job.mark_pending().unwrap();
        job.fail("backend unavailable").unwrap();

        assert_eq!(job.status, JobStatus::Failed);
        assert_eq!(job.error.as_deref(), Some("backend unavailable"));
    }

    #[test]
    fn test_terminal_jobs_reject_transitions() {
        let mut job = GenerationJob::new(
            "launch",
            vec!["instagram".to_string()],
            GenerationConfig::new(),
        )
        .unwrap();
        job.mark_pending().unwrap();
        job.fulfill().unwrap();

        assert!(job.fulfill().is_err());
        assert!(job.fail("late").is_err());
        assert!(job.mark_pending().is_err());
    }
}
