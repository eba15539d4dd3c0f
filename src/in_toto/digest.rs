use crate::error::DigestError;
use crate::hash::DigestAlgorithm;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// An in-toto digest set: algorithm name to lowercase hex digest.
///
/// Entries are kept sorted by algorithm so a set always serializes the same
/// way. Values deserialized from untrusted input are not checked until
/// [`DigestSet::validate`] runs.
///
/// ```
/// use slsa_provenance::in_toto::DigestSet;
///
/// let digest = DigestSet::parse(&format!("sha256:{}", "ab".repeat(32))).unwrap();
/// assert_eq!(digest.get("sha256"), Some("ab".repeat(32).as_str()));
/// assert!(DigestSet::parse("sha256:abc").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DigestSet(BTreeMap<String, String>);

impl DigestSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single-entry set, validated.
    pub fn from_hex(algorithm: DigestAlgorithm, hex: &str) -> Result<Self, DigestError> {
        let mut set = Self::new();
        set.insert(algorithm, hex)?;
        Ok(set)
    }

    /// Parse the `<algorithm>:<hex>` form used by container registries.
    pub fn parse(prefixed: &str) -> Result<Self, DigestError> {
        let (algorithm, hex) = prefixed
            .split_once(':')
            .ok_or_else(|| DigestError::Malformed(prefixed.to_string()))?;
        let algorithm = algorithm
            .parse::<DigestAlgorithm>()
            .map_err(|_| DigestError::UnknownAlgorithm(algorithm.to_string()))?;

        Self::from_hex(algorithm, hex)
    }

    /// Add or replace the entry for `algorithm`.
    pub fn insert(&mut self, algorithm: DigestAlgorithm, hex: &str) -> Result<(), DigestError> {
        check_entry(algorithm.as_str(), hex)?;
        self.0.insert(algorithm.as_str().to_string(), hex.to_string());
        Ok(())
    }

    pub fn get(&self, algorithm: &str) -> Option<&str> {
        self.0.get(algorithm).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Check that the set is non-empty and every entry uses a recognized
    /// algorithm with a digest of the right length in lowercase hex.
    pub fn validate(&self) -> Result<(), DigestError> {
        if self.0.is_empty() {
            return Err(DigestError::Empty);
        }
        self.0
            .iter()
            .try_for_each(|(algorithm, hex)| check_entry(algorithm, hex))
    }
}

impl From<BTreeMap<String, String>> for DigestSet {
    fn from(entries: BTreeMap<String, String>) -> Self {
        DigestSet(entries)
    }
}

impl fmt::Display for DigestSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (algorithm, hex) in &self.0 {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{algorithm}:{hex}")?;
            first = false;
        }
        Ok(())
    }
}

fn check_entry(algorithm: &str, hex: &str) -> Result<(), DigestError> {
    let parsed = algorithm
        .parse::<DigestAlgorithm>()
        .map_err(|_| DigestError::UnknownAlgorithm(algorithm.to_string()))?;

    if hex.len() != parsed.hex_len() {
        return Err(DigestError::Length {
            algorithm: algorithm.to_string(),
            expected: parsed.hex_len(),
            actual: hex.len(),
        });
    }

    if !hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
        return Err(DigestError::NotLowercaseHex(algorithm.to_string()));
    }

    Ok(())
}
