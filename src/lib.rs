//! # SLSA Provenance
//!
//! Generates SLSA v0.2 build provenance for artifacts produced by GitHub
//! Actions workflows.
//!
//! A run resolves the artifact subjects (container image digests from an OCI
//! registry, or files on disk), maps the workflow `github` and `runner`
//! contexts onto a provenance predicate, records the build materials and
//! writes the resulting in-toto statement to disk in a single atomic step.
//!
//! ## Quick Start
//!
//! Attest an image pushed earlier in the workflow:
//! ```bash
//! slsa-provenance container \
//!     --github-context="${{ toJSON(github) }}" \
//!     --runner-context="${{ toJSON(runner) }}" \
//!     --repository=ghcr.io/acme/app \
//!     --tags=v1.2.0,latest \
//!     --output-path=provenance.json
//! ```
//!
//! Attest release binaries:
//! ```bash
//! slsa-provenance files \
//!     --github-context=@github.json \
//!     --runner-context=@runner.json \
//!     --artifact-path=dist/
//! ```

pub mod cli;
pub mod error;
pub mod github;
pub mod hash;
pub mod in_toto;
pub mod registry;
pub mod slsa;
pub mod storage;
pub mod subject;
#[cfg(test)]
mod tests;

// Re-export error types
pub use error::{Error, Result};

/// Initialize logging for the CLI
///
/// # Examples
///
/// ```
/// use slsa_provenance::init_logging;
///
/// // Might fail if a logger is already installed
/// let result = init_logging();
/// assert!(result.is_ok() || result.is_err());
/// ```
pub fn init_logging() -> Result<()> {
    env_logger::try_init().map_err(|e| Error::InitializationError(e.to_string()))
}

// Re-export commonly used types and traits
pub use registry::DigestResolver;
pub use storage::traits::StatementStore;
