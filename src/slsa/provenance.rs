//! SLSA v0.2 provenance predicate.
//!
//! See: <https://slsa.dev/provenance/v0.2>

use crate::in_toto::DigestSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// The provenance predicate carried by a statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    /// Identifies the build platform.
    pub builder: Builder,
    /// Template that `invocation` follows.
    pub build_type: String,
    /// What triggered the build.
    pub invocation: Invocation,
    /// Timing, completeness and reproducibility claims.
    pub metadata: BuildMetadata,
    /// Inputs consumed by the build, in the order they were recorded.
    pub materials: Vec<Material>,
}

/// Identifies the build platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Builder {
    /// Builder identity URI.
    pub id: String,
}

/// What triggered the build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invocation {
    pub config_source: ConfigSource,
    /// User-controlled inputs of the triggering event.
    pub parameters: BTreeMap<String, Value>,
    /// Platform-provided values describing the run.
    pub environment: BTreeMap<String, Value>,
}

/// The source and file holding the build definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSource {
    pub uri: String,
    pub digest: DigestSet,
    pub entry_point: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildMetadata {
    #[serde(rename = "buildInvocationID")]
    pub build_invocation_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_started_on: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_finished_on: Option<DateTime<Utc>>,
    pub completeness: Completeness,
    pub reproducible: bool,
}

/// Which parts of the predicate are claimed to be complete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completeness {
    pub parameters: bool,
    pub environment: bool,
    pub materials: bool,
}

/// An input consumed during the build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub uri: String,
    pub digest: DigestSet,
}

impl Material {
    pub fn new(uri: impl Into<String>, digest: DigestSet) -> Self {
        Self {
            uri: uri.into(),
            digest,
        }
    }

    /// Returns the reason the material is unusable, if any.
    pub fn check(&self) -> Result<(), String> {
        if self.uri.trim().is_empty() {
            return Err("uri is empty".to_string());
        }
        self.digest.validate().map_err(|e| e.to_string())
    }
}
