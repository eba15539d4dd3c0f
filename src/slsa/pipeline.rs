use crate::error::{Error, Result};
use crate::github::{BuildContext, build_context};
use crate::in_toto::Subject;
use crate::registry::DigestResolver;
use crate::slsa::config::{ContainerSubjectConfig, ProvenanceConfig};
use crate::slsa::materials::load_materials_files;
use crate::slsa::provenance::Material;
use crate::slsa::statement::{Statement, assemble_statement};
use crate::storage::StatementStore;
use crate::subject::{resolve_file_subjects, resolve_subjects};

use log::info;
use std::path::Path;
use std::sync::Arc;

/// Generate, and store, provenance for a container image.
///
/// Subject resolution and build context extraction run concurrently; the
/// first failure of either is returned and nothing is stored.
pub async fn generate_container_provenance<R>(
    config: &ProvenanceConfig,
    image: &ContainerSubjectConfig,
    resolver: &R,
    store: Arc<dyn StatementStore>,
) -> Result<Statement>
where
    R: DigestResolver + ?Sized,
{
    let extra_materials = load_materials_files(&config.extra_materials)?;

    let (subjects, context) = tokio::try_join!(
        resolve_subjects(
            resolver,
            &image.repository,
            image.digest.as_deref(),
            &image.tags
        ),
        async { build_context(&config.github_context, &config.runner_context) },
    )?;

    finish(config, subjects, context, extra_materials, store).await
}

/// Generate, and store, provenance for build artifacts on disk.
pub async fn generate_file_provenance(
    config: &ProvenanceConfig,
    artifact_path: &Path,
    store: Arc<dyn StatementStore>,
) -> Result<Statement> {
    let extra_materials = load_materials_files(&config.extra_materials)?;

    let path = artifact_path.to_path_buf();
    let (subjects, context) = tokio::try_join!(
        async {
            tokio::task::spawn_blocking(move || resolve_file_subjects(&path))
                .await
                .map_err(|e| Error::Io(std::io::Error::other(e)))?
        },
        async { build_context(&config.github_context, &config.runner_context) },
    )?;

    finish(config, subjects, context, extra_materials, store).await
}

async fn finish(
    config: &ProvenanceConfig,
    subjects: Vec<Subject>,
    mut context: BuildContext,
    extra_materials: Vec<Material>,
    store: Arc<dyn StatementStore>,
) -> Result<Statement> {
    context.metadata.build_started_on = config.started_on;
    context.metadata.build_finished_on = config.finished_on;

    let assembled = assemble_statement(
        subjects,
        context.builder,
        context.invocation,
        context.metadata,
    )?;

    let mut materials = Vec::with_capacity(extra_materials.len() + 1);
    if config.include_source_material {
        materials.push(context.source);
    }
    materials.extend(extra_materials);
    let statement = assembled.append_materials(&materials)?;

    let (statement, location) = tokio::task::spawn_blocking(move || {
        let location = store.store_statement(&statement)?;
        Ok::<_, Error>((statement, location))
    })
    .await
    .map_err(|e| Error::Io(std::io::Error::other(e)))??;
    info!("Saving provenance to {location}");

    Ok(statement)
}
