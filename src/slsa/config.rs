use crate::github::{GitHubContext, RunnerContext};

use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Inputs shared by every provenance generation run.
#[derive(Debug, Clone)]
pub struct ProvenanceConfig {
    pub github_context: GitHubContext,
    pub runner_context: RunnerContext,
    pub output_path: PathBuf,
    /// JSON files holding extra materials, appended in order.
    pub extra_materials: Vec<PathBuf>,
    /// Record the checked out repository as the first material.
    pub include_source_material: bool,
    pub started_on: Option<DateTime<Utc>>,
    pub finished_on: Option<DateTime<Utc>>,
}

impl Default for ProvenanceConfig {
    fn default() -> Self {
        Self {
            github_context: GitHubContext::default(),
            runner_context: RunnerContext::default(),
            output_path: PathBuf::from("provenance.json"),
            extra_materials: Vec::new(),
            include_source_material: true,
            started_on: None,
            finished_on: None,
        }
    }
}

/// Identifies the container image being attested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerSubjectConfig {
    pub repository: String,
    /// Known digest (`sha256:<hex>`); skips the registry lookup.
    pub digest: Option<String>,
    pub tags: Vec<String>,
}
