//! # in-toto Statement Primitives
//!
//! Digest sets and subjects shared by every in-toto attestation this crate
//! produces. The statement envelope itself lives with its predicate in
//! [`crate::slsa::statement`].
//!
//! See: <https://github.com/in-toto/attestation/blob/main/spec/v0.1.0/statement.md>

pub mod digest;

pub use digest::DigestSet;

use serde::{Deserialize, Serialize};

/// The in-toto v0.1 statement type URI, used as the `_type` field.
///
/// ```
/// use slsa_provenance::in_toto::STATEMENT_TYPE_V01;
///
/// assert_eq!(STATEMENT_TYPE_V01, "https://in-toto.io/Statement/v0.1");
/// ```
pub const STATEMENT_TYPE_V01: &str = "https://in-toto.io/Statement/v0.1";

/// An artifact being attested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Artifact name, e.g. a repository reference with tag.
    pub name: String,
    /// Content digests.
    pub digest: DigestSet,
}

impl Subject {
    pub fn new(name: impl Into<String>, digest: DigestSet) -> Self {
        Self {
            name: name.into(),
            digest,
        }
    }
}
