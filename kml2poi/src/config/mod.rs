//! Configuration de l'export

use std::path::PathBuf;

use serde::Serialize;

/// Fichier d'entrée par défaut
pub const DEFAULT_INPUT: &str = "input_waypoints.kml";

/// Dossier de sortie par défaut
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Dossier source des icônes par défaut
pub const DEFAULT_ICON_DIR: &str = "bmp";

/// Extension des icônes attendues par le POI loader
pub const ICON_EXTENSION: &str = "bmp";

/// Emplacements de l'export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportConfig {
    /// Dossier racine de sortie (un sous-dossier par catégorie)
    pub output_dir: PathBuf,

    /// Dossier contenant les icônes `<categorie>.bmp`
    pub icon_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            icon_dir: PathBuf::from(DEFAULT_ICON_DIR),
        }
    }
}

impl ExportConfig {
    pub fn new(output_dir: impl Into<PathBuf>, icon_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            icon_dir: icon_dir.into(),
        }
    }

    /// Dossier de sortie d'une catégorie
    pub fn category_dir(&self, category: &str) -> PathBuf {
        self.output_dir.join(category)
    }

    /// Chemin du CSV d'une catégorie: `<output>/<cat>/<cat>.csv`
    pub fn csv_path(&self, category: &str) -> PathBuf {
        self.category_dir(category).join(format!("{}.csv", category))
    }

    /// Chemin de l'icône source d'une catégorie: `<icons>/<cat>.bmp`
    pub fn icon_source(&self, category: &str) -> PathBuf {
        self.icon_dir.join(icon_file_name(category))
    }

    /// Chemin de l'icône copiée dans le dossier de la catégorie
    pub fn icon_target(&self, category: &str) -> PathBuf {
        self.category_dir(category).join(icon_file_name(category))
    }
}

fn icon_file_name(category: &str) -> String {
    format!("{}.{}", category, ICON_EXTENSION)
}
