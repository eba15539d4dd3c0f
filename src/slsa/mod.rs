//! # SLSA (Supply-chain Levels for Software Artifacts) Provenance
//!
//! This module assembles SLSA v0.2 build provenance statements for
//! artifacts produced by GitHub Actions workflows.
//!
//! SLSA provenance records:
//! - What was built (the statement subjects)
//! - How it was built (build type, workflow entry point, parameters)
//! - Who built it (the builder identity)
//! - What went into it (materials)
//!
//! ## Key Components
//!
//! - [`provenance`] - The predicate data model
//! - [`generators`] - Constructors and fixed identifiers for predicate parts
//! - [`statement`] - Statement assembly and material recording
//! - [`materials`] - Loading operator-supplied materials
//! - [`pipeline`] - End-to-end generation for images and files
//!
//! ## Examples
//!
//! ```no_run
//! use slsa_provenance::registry::{OciRegistryClient, RegistryConfig};
//! use slsa_provenance::slsa::config::{ContainerSubjectConfig, ProvenanceConfig};
//! use slsa_provenance::slsa::pipeline::generate_container_provenance;
//! use slsa_provenance::storage::FilesystemStorage;
//! use std::sync::Arc;
//!
//! # async fn run(config: ProvenanceConfig) -> slsa_provenance::Result<()> {
//! let image = ContainerSubjectConfig {
//!     repository: "ghcr.io/acme/app".to_string(),
//!     digest: None,
//!     tags: vec!["v1.2.0".to_string()],
//! };
//! let client = OciRegistryClient::new(RegistryConfig::default());
//! let store = Arc::new(FilesystemStorage::new(&config.output_path));
//!
//! generate_container_provenance(&config, &image, &client, store).await?;
//! # Ok(())
//! # }
//! ```
pub mod config;
pub mod generators;
pub mod materials;
pub mod pipeline;
pub mod provenance;
pub mod statement;

/// The SLSA v0.2 provenance in-toto predicate type URI.
///
/// ```
/// use slsa_provenance::slsa::PROVENANCE_PREDICATE_TYPE_V02;
///
/// assert_eq!(PROVENANCE_PREDICATE_TYPE_V02, "https://slsa.dev/provenance/v0.2");
/// ```
pub const PROVENANCE_PREDICATE_TYPE_V02: &str = "https://slsa.dev/provenance/v0.2";
