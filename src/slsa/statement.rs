//! Provenance statement assembly.
//!
//! A statement moves through two value states. [`assemble_statement`]
//! validates the subjects and yields an [`AssembledStatement`] whose
//! materials are empty. [`AssembledStatement::append_materials`] validates a
//! whole batch and yields the final [`Statement`], which has no mutators and
//! is handed to a [`crate::storage::StatementStore`].

use crate::error::{Error, Result};
use crate::in_toto::{STATEMENT_TYPE_V01, Subject};
use crate::slsa::PROVENANCE_PREDICATE_TYPE_V02;
use crate::slsa::generators::{GITHUB_ACTIONS_BUILD_TYPE, generate_build_provenance_v02};
use crate::slsa::provenance::{BuildMetadata, Builder, Invocation, Material, Provenance};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An in-toto statement carrying a SLSA provenance predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    #[serde(rename = "_type")]
    statement_type: String,
    #[serde(rename = "predicateType")]
    predicate_type: String,
    subject: Vec<Subject>,
    predicate: Provenance,
}

impl Statement {
    pub fn statement_type(&self) -> &str {
        &self.statement_type
    }

    pub fn predicate_type(&self) -> &str {
        &self.predicate_type
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subject
    }

    pub fn predicate(&self) -> &Provenance {
        &self.predicate
    }

    /// Serialize as pretty JSON with a trailing newline.
    ///
    /// Field order is fixed by the type definitions and every map is sorted,
    /// so equal statements always produce identical bytes.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = serde_json::to_vec_pretty(self)?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    /// Parse a serialized statement, rejecting foreign schema identifiers and
    /// subject sets that would not pass assembly.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let statement: Statement = serde_json::from_slice(bytes)?;

        if statement.statement_type != STATEMENT_TYPE_V01 {
            return Err(Error::Serialization(format!(
                "unexpected statement type '{}'",
                statement.statement_type
            )));
        }
        if statement.predicate_type != PROVENANCE_PREDICATE_TYPE_V02 {
            return Err(Error::Serialization(format!(
                "unexpected predicate type '{}'",
                statement.predicate_type
            )));
        }
        check_subjects(&statement.subject)?;

        Ok(statement)
    }
}

/// A statement whose subjects and predicate are fixed but whose materials
/// have not been recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledStatement {
    statement: Statement,
}

impl AssembledStatement {
    pub fn statement(&self) -> &Statement {
        &self.statement
    }

    /// Append `materials`, in order, producing the final statement.
    ///
    /// Every material is checked before any is appended, so a failed call
    /// records nothing and `self` is left as it was.
    pub fn append_materials(&self, materials: &[Material]) -> Result<Statement> {
        for (index, material) in materials.iter().enumerate() {
            material.check().map_err(|reason| Error::Material {
                index,
                uri: material.uri.clone(),
                reason,
            })?;
        }

        let mut statement = self.statement.clone();
        statement
            .predicate
            .materials
            .extend(materials.iter().cloned());
        info!("Recorded {} material(s)", materials.len());

        Ok(statement)
    }

    /// Finish without recording any materials.
    pub fn into_statement(self) -> Statement {
        self.statement
    }
}

/// Combine subjects with builder and invocation metadata.
///
/// Subject order and multiplicity are preserved. Fails when there are no
/// subjects, when a subject has an empty name or an invalid digest, when two
/// subjects share a name but not a digest, or when the builder id is empty.
///
/// ```
/// use slsa_provenance::in_toto::{DigestSet, Subject};
/// use slsa_provenance::slsa::generators::*;
/// use slsa_provenance::slsa::statement::assemble_statement;
/// use slsa_provenance::hash::DigestAlgorithm;
///
/// let digest = DigestSet::from_hex(DigestAlgorithm::Sha256, &"a".repeat(64)).unwrap();
/// let source = make_config_source_v02(
///     "git+https://github.com/acme/app",
///     DigestSet::from_hex(DigestAlgorithm::Sha1, &"b".repeat(40)).unwrap(),
///     "build.yml",
/// );
/// let assembled = assemble_statement(
///     vec![Subject::new("ghcr.io/acme/app:v1", digest)],
///     make_builder_v02(GITHUB_HOSTED_BUILDER_ID),
///     make_invocation_v02(source, None, None),
///     make_build_metadata_v02("1"),
/// )
/// .unwrap();
///
/// assert!(assembled.statement().predicate().materials.is_empty());
/// assert!(assemble_statement(
///     vec![],
///     make_builder_v02(GITHUB_HOSTED_BUILDER_ID),
///     assembled.statement().predicate().invocation.clone(),
///     make_build_metadata_v02("1"),
/// )
/// .is_err());
/// ```
pub fn assemble_statement(
    subjects: Vec<Subject>,
    builder: Builder,
    invocation: Invocation,
    metadata: BuildMetadata,
) -> Result<AssembledStatement> {
    check_subjects(&subjects)?;
    if builder.id.trim().is_empty() {
        return Err(Error::Assembly("builder id is empty".to_string()));
    }

    debug!(
        "Assembling statement for {} subject(s) built by {}",
        subjects.len(),
        builder.id
    );

    let predicate =
        generate_build_provenance_v02(builder, GITHUB_ACTIONS_BUILD_TYPE, invocation, metadata);

    Ok(AssembledStatement {
        statement: Statement {
            statement_type: STATEMENT_TYPE_V01.to_string(),
            predicate_type: PROVENANCE_PREDICATE_TYPE_V02.to_string(),
            subject: subjects,
            predicate,
        },
    })
}

fn check_subjects(subjects: &[Subject]) -> Result<()> {
    if subjects.is_empty() {
        return Err(Error::Assembly(
            "statement requires at least one subject".to_string(),
        ));
    }

    let mut seen = HashMap::with_capacity(subjects.len());
    for (index, subject) in subjects.iter().enumerate() {
        if subject.name.trim().is_empty() {
            return Err(Error::Assembly(format!("subject #{index} has an empty name")));
        }
        subject.digest.validate().map_err(|e| {
            Error::Assembly(format!(
                "subject '{}' has an invalid digest: {e}",
                subject.name
            ))
        })?;

        if let Some(previous) = seen.insert(subject.name.as_str(), &subject.digest) {
            if previous != &subject.digest {
                return Err(Error::Assembly(format!(
                    "subject '{}' is listed with conflicting digests {previous} and {}",
                    subject.name, subject.digest
                )));
            }
        }
    }

    Ok(())
}
