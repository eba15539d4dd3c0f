use crate::in_toto::DigestSet;
use crate::slsa::provenance::{
    BuildMetadata, Builder, Completeness, ConfigSource, Invocation, Provenance,
};

use serde_json::Value;
use std::collections::BTreeMap;

/// Build type for provenance generated inside GitHub Actions workflows.
pub const GITHUB_ACTIONS_BUILD_TYPE: &str =
    "https://github.com/Attestations/GitHubActionsWorkflow@v1";

/// Builder id for runs on GitHub-hosted runners.
pub const GITHUB_HOSTED_BUILDER_ID: &str =
    "https://github.com/Attestations/GitHubHostedActions@v1";

/// Builder id for runs on self-hosted runners.
pub const SELF_HOSTED_BUILDER_ID: &str = "https://github.com/Attestations/SelfHostedActions@v1";

pub fn make_builder_v02(id: &str) -> Builder {
    Builder { id: id.to_string() }
}

pub fn make_config_source_v02(uri: &str, digest: DigestSet, entry_point: &str) -> ConfigSource {
    ConfigSource {
        uri: uri.to_string(),
        digest,
        entry_point: entry_point.to_string(),
    }
}

pub fn make_invocation_v02(
    config_source: ConfigSource,
    parameters: Option<BTreeMap<String, Value>>,
    environment: Option<BTreeMap<String, Value>>,
) -> Invocation {
    Invocation {
        config_source,
        parameters: parameters.unwrap_or_default(),
        environment: environment.unwrap_or_default(),
    }
}

/// Metadata for a hosted run: parameters are captured in full, the
/// environment and materials are not, and the build is not reproducible.
pub fn make_build_metadata_v02(invocation_id: &str) -> BuildMetadata {
    BuildMetadata {
        build_invocation_id: invocation_id.to_string(),
        build_started_on: None,
        build_finished_on: None,
        completeness: Completeness {
            parameters: true,
            environment: false,
            materials: false,
        },
        reproducible: false,
    }
}

/// A predicate with no materials recorded yet.
pub fn generate_build_provenance_v02(
    builder: Builder,
    build_type: &str,
    invocation: Invocation,
    metadata: BuildMetadata,
) -> Provenance {
    Provenance {
        builder,
        build_type: build_type.to_string(),
        invocation,
        metadata,
        materials: Vec::new(),
    }
}
