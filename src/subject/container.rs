use crate::error::{Error, ResolutionFailure, Result};
use crate::in_toto::{DigestSet, Subject};
use crate::registry::DigestResolver;

use log::{debug, info};

/// Produce the subjects for a container image.
///
/// Subject names are `repository:tag` for each tag, or the bare repository
/// when no tags are given. A supplied `digest` (`sha256:<hex>`) is trusted as
/// is; otherwise every name is resolved through `resolver`, and all of them
/// must resolve to the same digest.
///
/// # Errors
///
/// `Resolution` when the repository or a tag is blank, the digest is
/// malformed, the registry lookup fails, or tags disagree on the digest.
pub async fn resolve_subjects<R>(
    resolver: &R,
    repository: &str,
    digest: Option<&str>,
    tags: &[String],
) -> Result<Vec<Subject>>
where
    R: DigestResolver + ?Sized,
{
    let names = subject_names(repository, tags)?;

    let digest = match digest.map(str::trim).filter(|d| !d.is_empty()) {
        Some(supplied) => {
            debug!("Using supplied digest {supplied} for {repository}");
            DigestSet::parse(supplied).map_err(|e| Error::resolution(repository, e.into()))?
        }
        None => resolve_common_digest(resolver, &names).await?,
    };

    info!("Resolved {} subject(s) for {repository}", names.len());
    Ok(names
        .into_iter()
        .map(|name| Subject::new(name, digest.clone()))
        .collect())
}

fn subject_names(repository: &str, tags: &[String]) -> Result<Vec<String>> {
    let repository = repository.trim();
    if repository.is_empty() {
        return Err(Error::resolution(
            repository,
            ResolutionFailure::InvalidReference("repository is empty".to_string()),
        ));
    }
    if tags.is_empty() {
        return Ok(vec![repository.to_string()]);
    }

    tags.iter()
        .map(|tag| {
            let tag = tag.trim();
            if tag.is_empty() {
                Err(Error::resolution(
                    repository,
                    ResolutionFailure::InvalidReference("tag is empty".to_string()),
                ))
            } else {
                Ok(format!("{repository}:{tag}"))
            }
        })
        .collect()
}

async fn resolve_common_digest<R>(resolver: &R, names: &[String]) -> Result<DigestSet>
where
    R: DigestResolver + ?Sized,
{
    let (first, rest) = names.split_first().ok_or_else(|| {
        Error::resolution(
            "",
            ResolutionFailure::InvalidReference("no reference to resolve".to_string()),
        )
    })?;

    let expected = resolve_one(resolver, first).await?;
    for name in rest {
        let digest = resolve_one(resolver, name).await?;
        if digest != expected {
            return Err(Error::resolution(
                name.as_str(),
                ResolutionFailure::Ambiguous(format!(
                    "resolves to {digest} but {first} resolves to {expected}"
                )),
            ));
        }
    }

    Ok(expected)
}

async fn resolve_one<R>(resolver: &R, name: &str) -> Result<DigestSet>
where
    R: DigestResolver + ?Sized,
{
    resolver
        .resolve_digest(name)
        .await
        .map_err(|kind| Error::resolution(name, kind))
}
