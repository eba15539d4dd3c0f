//! # Container Registry Access
//!
//! The subject resolver depends only on [`DigestResolver`], so tests and
//! alternative registries can substitute their own implementation.
//! [`OciRegistryClient`] is the production implementation.

pub mod config;
pub mod oci;

pub use config::{Auth, ClientProtocol, RegistryConfig};
pub use oci::OciRegistryClient;

use crate::error::ResolutionFailure;
use crate::in_toto::DigestSet;

use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

/// Read-only capability to look up the manifest digest of an image.
#[async_trait]
pub trait DigestResolver: Send + Sync {
    /// Resolve `reference` (`registry/repository[:tag]`) to the content
    /// digest of a single image manifest.
    async fn resolve_digest(&self, reference: &str) -> Result<DigestSet, ResolutionFailure>;
}

/// Platform selector for image indexes, written `os/arch[/variant]`.
///
/// ```
/// use slsa_provenance::registry::Platform;
///
/// let platform: Platform = "linux/arm64/v8".parse().unwrap();
/// assert_eq!(platform.os, "linux");
/// assert_eq!(platform.architecture, "arm64");
/// assert_eq!(platform.variant.as_deref(), Some("v8"));
/// assert!("linux".parse::<Platform>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub os: String,
    pub architecture: String,
    pub variant: Option<String>,
}

impl Platform {
    /// Whether an index entry's platform fields describe this platform.
    /// A selector without a variant matches any variant.
    pub fn matches(&self, os: &str, architecture: &str, variant: Option<&str>) -> bool {
        self.os == os
            && self.architecture == architecture
            && match &self.variant {
                Some(wanted) => variant == Some(wanted.as_str()),
                None => true,
            }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        match parts.as_slice() {
            [os, arch] if !os.is_empty() && !arch.is_empty() => Ok(Platform {
                os: os.to_string(),
                architecture: arch.to_string(),
                variant: None,
            }),
            [os, arch, variant] if !os.is_empty() && !arch.is_empty() && !variant.is_empty() => {
                Ok(Platform {
                    os: os.to_string(),
                    architecture: arch.to_string(),
                    variant: Some(variant.to_string()),
                })
            }
            _ => Err(format!(
                "invalid platform '{s}', expected os/arch[/variant]"
            )),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.architecture)?;
        if let Some(variant) = &self.variant {
            write!(f, "/{variant}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_round_trips_display() {
        for text in ["linux/amd64", "linux/arm/v7"] {
            let platform: Platform = text.parse().unwrap();
            assert_eq!(platform.to_string(), text);
        }
    }

    #[test]
    fn test_platform_rejects_malformed() {
        for text in ["", "linux", "linux/", "/amd64", "a/b/c/d", "linux/arm/"] {
            assert!(text.parse::<Platform>().is_err(), "{text} should not parse");
        }
    }

    #[test]
    fn test_platform_matching() {
        let any_arm: Platform = "linux/arm".parse().unwrap();
        assert!(any_arm.matches("linux", "arm", Some("v7")));
        assert!(any_arm.matches("linux", "arm", None));
        assert!(!any_arm.matches("windows", "arm", None));

        let v7: Platform = "linux/arm/v7".parse().unwrap();
        assert!(v7.matches("linux", "arm", Some("v7")));
        assert!(!v7.matches("linux", "arm", Some("v6")));
        assert!(!v7.matches("linux", "arm", None));
    }
}
