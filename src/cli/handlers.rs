use crate::error::{Error, Result};

use super::commands::{CommonArgs, GenerateCommands};
use crate::github::{GitHubContext, RunnerContext};
use crate::registry::{Auth, OciRegistryClient, Platform, RegistryConfig};
use crate::slsa::config::{ContainerSubjectConfig, ProvenanceConfig};
use crate::slsa::pipeline::{generate_container_provenance, generate_file_provenance};
use crate::storage::FilesystemStorage;

use chrono::Utc;
use log::debug;
use serde::de::DeserializeOwned;
use std::fs;
use std::sync::Arc;

pub async fn handle_generate_command(cmd: GenerateCommands) -> Result<()> {
    match cmd {
        GenerateCommands::Container {
            common,
            repository,
            digest,
            tags,
            platform,
            insecure_registry,
            registry_username,
            registry_password,
        } => {
            let config = provenance_config(&common)?;
            let registry = RegistryConfig {
                auth: registry_auth(registry_username, registry_password)?,
                platform: platform
                    .as_deref()
                    .map(str::parse::<Platform>)
                    .transpose()
                    .map_err(Error::Validation)?,
                ..Default::default()
            }
            .with_insecure_registries(insecure_registry);

            let image = ContainerSubjectConfig {
                repository,
                digest,
                tags,
            };
            let client = OciRegistryClient::new(registry);
            let store = Arc::new(FilesystemStorage::new(&config.output_path));

            generate_container_provenance(&config, &image, &client, store).await?;
            Ok(())
        }
        GenerateCommands::Files {
            common,
            artifact_path,
        } => {
            let config = provenance_config(&common)?;
            let store = Arc::new(FilesystemStorage::new(&config.output_path));

            generate_file_provenance(&config, &artifact_path, store).await?;
            Ok(())
        }
    }
}

fn provenance_config(common: &CommonArgs) -> Result<ProvenanceConfig> {
    let github_context: GitHubContext = parse_context("github-context", &common.github_context)?;
    let runner_context: RunnerContext = parse_context("runner-context", &common.runner_context)?;

    Ok(ProvenanceConfig {
        github_context,
        runner_context,
        output_path: common.output_path.clone(),
        extra_materials: common.extra_materials.clone(),
        finished_on: Some(Utc::now()),
        ..Default::default()
    })
}

/// Parse a context given inline or as `@path`.
fn parse_context<T: DeserializeOwned>(flag: &str, value: &str) -> Result<T> {
    let raw = match value.strip_prefix('@') {
        Some(path) => {
            debug!("Reading --{flag} from {path}");
            fs::read_to_string(path)?
        }
        None => value.to_string(),
    };

    serde_json::from_str(&raw)
        .map_err(|e| Error::Serialization(format!("invalid --{flag} JSON: {e}")))
}

fn registry_auth(username: Option<String>, password: Option<String>) -> Result<Auth> {
    match (username, password) {
        (Some(username), Some(password)) => Ok(Auth::Basic(username, password)),
        (None, None) => Ok(Auth::Anonymous),
        _ => Err(Error::Validation(
            "registry username and password must be given together".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_context_inline_and_from_file() {
        let inline: RunnerContext = parse_context("runner-context", r#"{"os":"Linux"}"#).unwrap();
        assert_eq!(inline.os.as_deref(), Some("Linux"));

        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), r#"{"repository":"acme/app","run_id":17}"#).unwrap();
        let from_file: GitHubContext =
            parse_context("github-context", &format!("@{}", file.path().display())).unwrap();
        assert_eq!(from_file.repository.as_deref(), Some("acme/app"));
        assert_eq!(from_file.run_id.as_deref(), Some("17"));
    }

    #[test]
    fn test_parse_context_rejects_bad_json() {
        let err = parse_context::<RunnerContext>("runner-context", "{not json").unwrap_err();
        assert!(matches!(err, Error::Serialization(msg) if msg.contains("--runner-context")));
    }

    #[test]
    fn test_registry_auth_requires_both_credentials() {
        assert_eq!(registry_auth(None, None).unwrap(), Auth::Anonymous);
        assert_eq!(
            registry_auth(Some("u".to_string()), Some("p".to_string())).unwrap(),
            Auth::Basic("u".to_string(), "p".to_string())
        );
        assert!(matches!(
            registry_auth(Some("u".to_string()), None),
            Err(Error::Validation(_))
        ));
    }
}
