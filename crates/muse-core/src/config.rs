//! Studio configuration.

use crate::channel::RetentionPolicy;
use crate::edit::EditPolicy;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Tunable policies for a studio instance.
///
/// All fields default to the observed stock behavior: variant sets survive
/// channel toggles, edit sessions are independent per channel, the hover
/// tray closes after 300ms, and generation produces two candidates per
/// channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudioConfig {
    /// What happens to generated content when a channel is disabled.
    #[serde(default)]
    pub retention: RetentionPolicy,
    /// Whether edit sessions are per-channel or single-global.
    #[serde(default)]
    pub edit_policy: EditPolicy,
    /// Debounce window before the hover tray closes, in milliseconds.
    #[serde(default = "default_menu_close_delay_ms")]
    pub menu_close_delay_ms: u64,
    /// How many candidates the generator is asked for per channel.
    #[serde(default = "default_variants_per_channel")]
    pub variants_per_channel: usize,
}

fn default_menu_close_delay_ms() -> u64 {
    300
}

fn default_variants_per_channel() -> usize {
    2
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            retention: RetentionPolicy::default(),
            edit_policy: EditPolicy::default(),
            menu_close_delay_ms: default_menu_close_delay_ms(),
            variants_per_channel: default_variants_per_channel(),
        }
    }
}

impl StudioConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns a `Serialization` error if the document does not parse.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StudioConfig::default();
        assert_eq!(config.retention, RetentionPolicy::Retain);
        assert_eq!(config.edit_policy, EditPolicy::PerChannel);
        assert_eq!(config.menu_close_delay_ms, 300);
        assert_eq!(config.variants_per_channel, 2);
    }

    #[test]
    fn test_from_toml_partial_document() {
        let config = StudioConfig::from_toml_str(
            r#"
            retention = "purge"
            menu_close_delay_ms = 500
            "#,
        )
        .unwrap();
        assert_eq!(config.retention, RetentionPolicy::Purge);
        assert_eq!(config.menu_close_delay_ms, 500);
        // Unspecified fields fall back to defaults
        assert_eq!(config.variants_per_channel, 2);
    }

    #[test]
    fn test_from_toml_rejects_garbage() {
        let err = StudioConfig::from_toml_str("retention = 42").unwrap_err();
        assert!(matches!(
            err,
            crate::MuseError::Serialization { .. }
        ));
    }
}
