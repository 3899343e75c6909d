//! Copie des icônes de catégorie

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

/// Copie l'icône d'une catégorie si elle existe
///
/// Retourne le chemin de la copie, ou `None` si l'icône source est absente
/// (ce n'est pas une erreur). Une copie existante est écrasée.
pub fn copy_icon(source: &Path, target: &Path) -> Result<Option<PathBuf>> {
    if !source.is_file() {
        debug!(icon = %source.display(), "No icon for category");
        return Ok(None);
    }

    std::fs::copy(source, target).with_context(|| {
        format!(
            "Failed to copy icon {} to {}",
            source.display(),
            target.display()
        )
    })?;

    Ok(Some(target.to_path_buf()))
}
