//! Types d'erreurs pour le crate kml-waypoints

use std::path::PathBuf;

use thiserror::Error;

/// Erreurs pouvant survenir lors du chargement d'un fichier KML
#[derive(Debug, Error)]
pub enum KmlError {
    /// Le fichier d'entrée n'existe pas
    #[error("Input file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// Erreur d'I/O lors de la lecture du fichier
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Contenu impossible à interpréter comme un document texte
    #[error("Parse error in {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },
}

impl KmlError {
    /// Crée une erreur de parsing avec contexte
    pub fn parse_error(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
