//! # Hash Module
//!
//! Digest algorithms recognized in provenance statements, and streaming
//! helpers to compute artifact digests.
//!
//! ## Algorithm Support
//!
//! - **SHA-1**: 160-bit (40 hex characters). Accepted for recording git
//!   commit ids only; never computed here.
//! - **SHA-256**: 256-bit (64 hex characters). Default for artifacts.
//! - **SHA-384**: 384-bit (96 hex characters)
//! - **SHA-512**: 512-bit (128 hex characters)
//!
//! ## Examples
//!
//! ```
//! use slsa_provenance::hash::{calculate_hash_with_algorithm, DigestAlgorithm};
//!
//! let hash = calculate_hash_with_algorithm(b"Hello, World!", DigestAlgorithm::Sha256).unwrap();
//! assert_eq!(hash.len(), 64);
//! ```

use crate::error::{Error, Result};
use sha2::{Digest, Sha256, Sha384, Sha512};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// A digest algorithm that may key an entry of a digest set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DigestAlgorithm {
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl DigestAlgorithm {
    /// Name as it appears in in-toto digest sets.
    pub fn as_str(&self) -> &'static str {
        match self {
            DigestAlgorithm::Sha1 => "sha1",
            DigestAlgorithm::Sha256 => "sha256",
            DigestAlgorithm::Sha384 => "sha384",
            DigestAlgorithm::Sha512 => "sha512",
        }
    }

    /// Length of the hex encoded digest.
    ///
    /// ```
    /// use slsa_provenance::hash::DigestAlgorithm;
    ///
    /// assert_eq!(DigestAlgorithm::Sha1.hex_len(), 40);
    /// assert_eq!(DigestAlgorithm::Sha512.hex_len(), 128);
    /// ```
    pub fn hex_len(&self) -> usize {
        match self {
            DigestAlgorithm::Sha1 => 40,
            DigestAlgorithm::Sha256 => 64,
            DigestAlgorithm::Sha384 => 96,
            DigestAlgorithm::Sha512 => 128,
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsing is case sensitive: digest set keys are lowercase.
impl FromStr for DigestAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "sha1" => Ok(DigestAlgorithm::Sha1),
            "sha256" => Ok(DigestAlgorithm::Sha256),
            "sha384" => Ok(DigestAlgorithm::Sha384),
            "sha512" => Ok(DigestAlgorithm::Sha512),
            other => Err(format!("unsupported digest algorithm '{other}'")),
        }
    }
}

/// Calculate the hex digest of `data`.
///
/// # Errors
///
/// Returns a `Validation` error for [`DigestAlgorithm::Sha1`], which is only
/// ever recorded, not produced.
pub fn calculate_hash_with_algorithm(data: &[u8], algorithm: DigestAlgorithm) -> Result<String> {
    match algorithm {
        DigestAlgorithm::Sha256 => Ok(hex::encode(Sha256::digest(data))),
        DigestAlgorithm::Sha384 => Ok(hex::encode(Sha384::digest(data))),
        DigestAlgorithm::Sha512 => Ok(hex::encode(Sha512::digest(data))),
        DigestAlgorithm::Sha1 => Err(unsupported(algorithm)),
    }
}

/// Calculate the SHA-256 digest of a file.
pub fn calculate_file_hash(path: impl AsRef<Path>) -> Result<String> {
    calculate_file_hash_with_algorithm(path, DigestAlgorithm::Sha256)
}

/// Calculate the digest of a file, streaming its contents in chunks.
///
/// ```no_run
/// use slsa_provenance::hash::{calculate_file_hash_with_algorithm, DigestAlgorithm};
///
/// let hash = calculate_file_hash_with_algorithm("image.tar", DigestAlgorithm::Sha512)?;
/// assert_eq!(hash.len(), 128);
/// # Ok::<(), slsa_provenance::error::Error>(())
/// ```
pub fn calculate_file_hash_with_algorithm(
    path: impl AsRef<Path>,
    algorithm: DigestAlgorithm,
) -> Result<String> {
    let file = File::open(path.as_ref())?;

    match algorithm {
        DigestAlgorithm::Sha256 => hash_reader::<Sha256, _>(file),
        DigestAlgorithm::Sha384 => hash_reader::<Sha384, _>(file),
        DigestAlgorithm::Sha512 => hash_reader::<Sha512, _>(file),
        DigestAlgorithm::Sha1 => Err(unsupported(algorithm)),
    }
}

fn unsupported(algorithm: DigestAlgorithm) -> Error {
    Error::Validation(format!("{algorithm} digests cannot be computed"))
}

/// Internal helper to hash data from a reader using streaming
fn hash_reader<D: Digest, R: Read>(mut reader: R) -> Result<String> {
    let mut hasher = D::new();
    let mut buffer = [0; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_calculate_hash_with_algorithms() -> Result<()> {
        let data = b"test data";

        let sha256 = calculate_hash_with_algorithm(data, DigestAlgorithm::Sha256)?;
        let sha384 = calculate_hash_with_algorithm(data, DigestAlgorithm::Sha384)?;
        let sha512 = calculate_hash_with_algorithm(data, DigestAlgorithm::Sha512)?;

        assert_eq!(sha256.len(), DigestAlgorithm::Sha256.hex_len());
        assert_eq!(sha384.len(), DigestAlgorithm::Sha384.hex_len());
        assert_eq!(sha512.len(), DigestAlgorithm::Sha512.hex_len());

        Ok(())
    }

    #[test]
    fn test_sha1_is_not_computed() {
        assert!(calculate_hash_with_algorithm(b"x", DigestAlgorithm::Sha1).is_err());
    }

    #[test]
    fn test_hash_known_values() -> Result<()> {
        assert_eq!(
            calculate_hash_with_algorithm(b"", DigestAlgorithm::Sha256)?,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            calculate_hash_with_algorithm(b"abc", DigestAlgorithm::Sha256)?,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        Ok(())
    }

    #[test]
    fn test_file_hash_matches_data_hash() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("artifact.bin");

        // larger than one read buffer
        let content: Vec<u8> = (0..20_000u32).map(|i| (i % 251) as u8).collect();
        fs::write(&file_path, &content)?;

        assert_eq!(
            calculate_file_hash(&file_path)?,
            calculate_hash_with_algorithm(&content, DigestAlgorithm::Sha256)?
        );
        Ok(())
    }

    #[test]
    fn test_file_not_found_error() {
        let dir = tempdir().unwrap();
        let result = calculate_file_hash(dir.path().join("missing"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_parse_algorithm() {
        assert_eq!("sha1".parse::<DigestAlgorithm>(), Ok(DigestAlgorithm::Sha1));
        assert_eq!(
            "sha384".parse::<DigestAlgorithm>(),
            Ok(DigestAlgorithm::Sha384)
        );
        assert!("SHA256".parse::<DigestAlgorithm>().is_err());
        assert!("md5".parse::<DigestAlgorithm>().is_err());
    }
}
