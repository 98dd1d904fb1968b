//! Engine configuration.
//!
//! Configuration is plain data handed to the [`Aggregator`](crate::aggregator::Aggregator)
//! at construction. It can be deserialized from the editor's settings file
//! (JSON); every field has a default so partial documents are accepted.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Tunables for the synchronization engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Run the validator over every writable visual model after each
    /// non-empty aggregator delta, before subscribers are notified.
    pub validate_on_change: bool,
    /// Upgrade visual models loaded from an older schema once the package
    /// finished loading.
    pub run_migrations: bool,
    /// Language tags tried, in order, when picking display labels.
    pub preferred_languages: Vec<SmolStr>,
    /// Color used for a source model that has no color in the active view.
    pub default_model_color: SmolStr,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            validate_on_change: true,
            run_migrations: true,
            preferred_languages: vec![SmolStr::new_static("en")],
            default_model_color: SmolStr::new_static("#ffffff"),
        }
    }
}

impl EngineConfig {
    /// Parse configuration from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
