//! Generation job domain module.
//!
//! Contains the job state machine (`Idle -> Pending -> Fulfilled | Failed`)
//! that represents one "generate" invocation across a set of channels.

mod model;

pub use model::{GenerationConfig, GenerationJob, JobStatus};
