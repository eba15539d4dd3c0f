use crate::error::ResolutionFailure;
use crate::in_toto::DigestSet;
use crate::registry::{DigestResolver, Platform, RegistryConfig};

use async_trait::async_trait;
use log::{debug, info};
use oci_client::client::ClientConfig;
use oci_client::errors::{OciDistributionError, OciErrorCode};
use oci_client::manifest::{OciImageIndex, OciManifest};
use oci_client::secrets::RegistryAuth;
use oci_client::{Client, Reference};

/// Resolves image digests against a remote OCI registry.
///
/// Only manifests are fetched; the registry is never written to.
pub struct OciRegistryClient {
    client: Client,
    auth: RegistryAuth,
    platform: Option<Platform>,
}

impl OciRegistryClient {
    pub fn new(config: RegistryConfig) -> Self {
        let client = Client::new(ClientConfig {
            protocol: config.protocol.into(),
            ..Default::default()
        });

        Self {
            client,
            auth: (&config.auth).into(),
            platform: config.platform,
        }
    }
}

#[async_trait]
impl DigestResolver for OciRegistryClient {
    async fn resolve_digest(&self, reference: &str) -> Result<DigestSet, ResolutionFailure> {
        let image = reference
            .parse::<Reference>()
            .map_err(|e| ResolutionFailure::InvalidReference(e.to_string()))?;

        debug!("Fetching manifest for {}", image.whole());
        let (manifest, digest) = self
            .client
            .pull_manifest(&image, &self.auth)
            .await
            .map_err(classify_error)?;

        let digest = match manifest {
            OciManifest::Image(_) => digest,
            OciManifest::ImageIndex(index) => {
                select_platform_digest(&index, self.platform.as_ref())?
            }
        };

        info!("Resolved {reference} to {digest}");
        Ok(DigestSet::parse(&digest)?)
    }
}

fn classify_error(error: OciDistributionError) -> ResolutionFailure {
    match error {
        OciDistributionError::ImageManifestNotFoundError(_) => ResolutionFailure::NotFound,
        OciDistributionError::ServerError { code: 404, .. } => ResolutionFailure::NotFound,
        OciDistributionError::RegistryError { envelope, .. }
            if envelope.errors.iter().any(|e| {
                matches!(
                    e.code,
                    OciErrorCode::ManifestUnknown | OciErrorCode::NameUnknown
                )
            }) =>
        {
            ResolutionFailure::NotFound
        }
        other => ResolutionFailure::Unreachable(other.to_string()),
    }
}

/// Pick the single index entry for `platform`.
fn select_platform_digest(
    index: &OciImageIndex,
    platform: Option<&Platform>,
) -> Result<String, ResolutionFailure> {
    let Some(platform) = platform else {
        return Err(ResolutionFailure::Ambiguous(format!(
            "reference is an image index with {} manifest(s) and no platform was given",
            index.manifests.len()
        )));
    };

    let mut matching = index.manifests.iter().filter(|entry| {
        entry
            .platform
            .as_ref()
            .is_some_and(|p| platform.matches(&p.os, &p.architecture, p.variant.as_deref()))
    });

    match (matching.next(), matching.next()) {
        (Some(entry), None) => Ok(entry.digest.clone()),
        (None, _) => Err(ResolutionFailure::NotFound),
        (Some(_), Some(_)) => Err(ResolutionFailure::Ambiguous(format!(
            "several manifests match platform {platform}"
        ))),
    }
}
