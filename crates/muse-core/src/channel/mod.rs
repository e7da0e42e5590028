//! Channel domain: identifiers, retention policy and the channel registry.

pub mod model;
pub mod registry;

pub use model::{ChannelId, RetentionPolicy};
pub use registry::ChannelRegistry;
