//! # GitHub Actions Build Context
//!
//! Maps the `github` and `runner` contexts of a workflow run (as produced by
//! `${{ toJSON(github) }}` and `${{ toJSON(runner) }}`) onto the builder,
//! invocation and metadata of a provenance predicate. Nothing here reads the
//! process environment; callers hand the contexts in as values.

use crate::error::{Error, Result};
use crate::hash::DigestAlgorithm;
use crate::in_toto::DigestSet;
use crate::slsa::generators::{
    GITHUB_HOSTED_BUILDER_ID, SELF_HOSTED_BUILDER_ID, make_build_metadata_v02, make_builder_v02,
    make_config_source_v02, make_invocation_v02,
};
use crate::slsa::provenance::{BuildMetadata, Builder, Invocation, Material};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

const DEFAULT_SERVER_URL: &str = "https://github.com";
const GITHUB_HOSTED_ENVIRONMENT: &str = "github-hosted";

/// The subset of the workflow `github` context used for provenance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GitHubContext {
    pub repository: Option<String>,
    pub repository_owner: Option<String>,
    pub sha: Option<String>,
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
    pub workflow: Option<String>,
    pub job: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub run_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub run_number: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub run_attempt: Option<String>,
    pub actor: Option<String>,
    pub event_name: Option<String>,
    pub server_url: Option<String>,
    /// Payload of the triggering event.
    #[serde(default)]
    pub event: Value,
}

/// The subset of the workflow `runner` context used for provenance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerContext {
    pub os: Option<String>,
    pub arch: Option<String>,
    pub name: Option<String>,
    /// `github-hosted` or `self-hosted`.
    pub environment: Option<String>,
}

/// Everything a statement needs from the run, besides its subjects.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildContext {
    pub builder: Builder,
    pub invocation: Invocation,
    pub metadata: BuildMetadata,
    /// The checked out source repository at the built commit.
    pub source: Material,
}

/// Derive builder, invocation and metadata from the workflow contexts.
///
/// # Errors
///
/// `Context` naming the field when the repository, commit, ref, workflow,
/// run id or actor is missing or blank; `Validation` when the commit is not
/// a SHA-1 hex digest.
pub fn build_context(github: &GitHubContext, runner: &RunnerContext) -> Result<BuildContext> {
    let repository = required("github.repository", &github.repository)?;
    let sha = required("github.sha", &github.sha)?;
    let git_ref = required("github.ref", &github.git_ref)?;
    let workflow = required("github.workflow", &github.workflow)?;
    let run_id = required("github.run_id", &github.run_id)?;
    let actor = required("github.actor", &github.actor)?;

    let server_url = github
        .server_url
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SERVER_URL)
        .trim_end_matches('/');
    let source_uri = format!("git+{server_url}/{repository}");

    let commit = DigestSet::from_hex(DigestAlgorithm::Sha1, sha)
        .map_err(|e| Error::Validation(format!("github.sha: {e}")))?;

    let builder_id = match runner.environment.as_deref() {
        None | Some(GITHUB_HOSTED_ENVIRONMENT) => GITHUB_HOSTED_BUILDER_ID,
        Some(_) => SELF_HOSTED_BUILDER_ID,
    };

    let mut environment = BTreeMap::new();
    let mut put = |key: &str, value: Option<&str>| {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            environment.insert(key.to_string(), Value::String(value.to_string()));
        }
    };
    put("arch", runner.arch.as_deref());
    put("os", runner.os.as_deref());
    put("github_actor", Some(actor));
    put("github_event_name", github.event_name.as_deref());
    put("github_ref", Some(git_ref));
    put("github_repository_owner", github.repository_owner.as_deref());
    put("github_run_attempt", github.run_attempt.as_deref());
    put("github_run_id", Some(run_id));
    put("github_run_number", github.run_number.as_deref());
    put("github_sha1", Some(sha));

    let invocation = make_invocation_v02(
        make_config_source_v02(&source_uri, commit.clone(), workflow),
        Some(event_inputs(&github.event)),
        Some(environment),
    );

    let invocation_id = match github.run_attempt.as_deref().filter(|a| !a.is_empty()) {
        Some(attempt) => format!("{run_id}-{attempt}"),
        None => run_id.to_string(),
    };

    Ok(BuildContext {
        builder: make_builder_v02(builder_id),
        invocation,
        metadata: make_build_metadata_v02(&invocation_id),
        source: Material::new(source_uri, commit),
    })
}

fn required<'a>(field: &'static str, value: &'a Option<String>) -> Result<&'a str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(Error::Context { field })
}

/// `inputs` of a `workflow_dispatch` (or `workflow_call`) event.
fn event_inputs(event: &Value) -> BTreeMap<String, Value> {
    match event.get("inputs") {
        Some(Value::Object(inputs)) => inputs
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
        _ => BTreeMap::new(),
    }
}

// Run identifiers are strings in `toJSON(github)` but numbers in some event
// payload dumps.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}
