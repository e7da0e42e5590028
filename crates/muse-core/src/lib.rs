//! Domain core of the Muse studio engine.
//!
//! Holds the multi-channel content-variation state: variant sets with
//! circular cursors, the channel registry with its retention policy,
//! optimistic edit sessions, the generation-job state machine, the hover
//! tray model, and the capability traits the application layer is wired
//! with. Everything here is pure state; async orchestration lives in
//! `muse-application`.

pub mod carousel;
pub mod channel;
pub mod config;
pub mod edit;
pub mod error;
pub mod event;
pub mod generator;
pub mod job;
pub mod menu;
pub mod repository;
pub mod variant;

// Re-export common error type
pub use error::MuseError;

pub use carousel::{CarouselCursor, Direction};
pub use channel::{ChannelId, ChannelRegistry, RetentionPolicy};
pub use config::StudioConfig;
pub use edit::{EditCoordinator, EditPolicy, EditSession};
pub use event::{EventSink, NoopEventSink, StudioEvent};
pub use generator::ContentGenerator;
pub use job::{GenerationConfig, GenerationJob, JobStatus};
pub use menu::{HoverMenuState, MenuPhase, TrayPosition};
pub use repository::DraftRepository;
pub use variant::VariantSet;
