//! Codec configuration.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, EnvelopeMode, UnknownPolicy};

/// Runtime choices for decoding and parameter handling.
///
/// Every field has a default, so an empty JSON object is a valid config:
///
/// ```json
/// {
///   "default_policy": "fallback_to_base",
///   "policies": { "transaction": "strict" },
///   "envelope_mode": "strict"
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Policy for families without an entry in `policies`.
    pub default_policy: UnknownPolicy,
    /// Per-family overrides, keyed by `Family::NAME`.
    pub policies: BTreeMap<String, UnknownPolicy>,
    pub envelope_mode: EnvelopeMode,
}

impl CodecConfig {
    /// The unknown-discriminator policy for `family`.
    pub fn policy_for(&self, family: &str) -> UnknownPolicy {
        self.policies
            .get(family)
            .copied()
            .unwrap_or(self.default_policy)
    }

    pub fn with_policy(mut self, family: impl Into<String>, policy: UnknownPolicy) -> Self {
        self.policies.insert(family.into(), policy);
        self
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}
