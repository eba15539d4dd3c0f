use crate::error::{Error, Result};
use crate::slsa::provenance::Material;

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Read operator-supplied materials from JSON files.
///
/// Each file holds an array of `{"uri": ..., "digest": {...}}` objects. The
/// arrays are concatenated in the order the files are given. Entries are not
/// validated here; that happens when the batch is appended to a statement.
pub fn load_materials_files(paths: &[PathBuf]) -> Result<Vec<Material>> {
    let mut materials = Vec::new();
    for path in paths {
        let mut batch = load_materials_file(path)?;
        debug!("Loaded {} material(s) from {}", batch.len(), path.display());
        materials.append(&mut batch);
    }
    Ok(materials)
}

fn load_materials_file(path: &Path) -> Result<Vec<Material>> {
    let content = fs::read_to_string(path).map_err(|e| Error::Material {
        index: 0,
        uri: path.display().to_string(),
        reason: format!("cannot read materials file: {e}"),
    })?;

    serde_json::from_str(&content).map_err(|e| Error::Material {
        index: 0,
        uri: path.display().to_string(),
        reason: format!("malformed materials file: {e}"),
    })
}
