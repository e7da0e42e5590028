//! Presentation events emitted by the studio core.

use crate::channel::ChannelId;
use crate::job::GenerationJob;
use crate::menu::HoverMenuState;
use serde::{Deserialize, Serialize};

/// High-level events the rendering layer subscribes to.
///
/// The core never renders anything; hosts receive these through an
/// [`EventSink`] and update their views accordingly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StudioEvent {
    /// The visible variant of a channel changed (navigation, fulfillment
    /// or edit commit).
    VariantChanged {
        channel: ChannelId,
        content: String,
    },
    /// A generation job transitioned state.
    JobStateChanged {
        job: GenerationJob,
    },
    /// The hover tray opened, entered its close delay, or closed.
    MenuStateChanged {
        state: HoverMenuState,
    },
}

/// Consumer of studio events, implemented by the host presentation layer.
///
/// Emission is synchronous and infallible: a sink that needs to do real
/// work should hand the event off to its own channel or queue.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: StudioEvent);
}

/// A sink that drops every event, for headless use and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn emit(&self, _event: StudioEvent) {}
}
