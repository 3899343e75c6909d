//! Export des waypoints vers les fichiers du POI loader
//!
//! Un passage linéaire: comptage, conversion numérique de toutes les
//! coordonnées, puis un dossier par catégorie avec son CSV et son icône.

pub mod icons;
pub mod poi_csv;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use geo::Point;
use thiserror::Error;
use tracing::{debug, info, warn};

use kml_waypoints::{Extraction, Waypoint};

use crate::config::ExportConfig;
use crate::report::ExportReport;

/// Erreurs de l'export détectées avant toute écriture
#[derive(Debug, Error, PartialEq)]
pub enum ExportError {
    /// Coordonnée absente d'un placemark
    #[error("Placemark #{placemark} ({}) has no {field}", .name.as_deref().unwrap_or("unnamed"))]
    MissingCoordinate {
        placemark: usize,
        field: &'static str,
        name: Option<String>,
    },

    /// Coordonnée non numérique
    #[error("Placemark #{placemark}: {field} '{value}' is not a valid number")]
    InvalidNumber {
        placemark: usize,
        field: &'static str,
        value: String,
    },

    /// Catégorie inutilisable comme nom de dossier
    #[error("Category '{0}' cannot be used as a directory name")]
    InvalidCategory(String),
}

/// Un waypoint prêt à écrire, coordonnées converties
#[derive(Debug, Clone, PartialEq)]
pub struct PoiRow {
    /// Position (x = longitude, y = latitude)
    pub position: Point<f64>,
    pub name: String,
    pub comment: String,
    pub category: Option<String>,
}

/// Convertit les coordonnées texte de tous les waypoints en `f64`
///
/// Échoue au premier waypoint invalide: aucune ligne partielle n'est produite.
/// Les numéros de placemark des erreurs commencent à 1.
pub fn coerce(waypoints: &[Waypoint]) -> Result<Vec<PoiRow>, ExportError> {
    waypoints
        .iter()
        .enumerate()
        .map(|(index, waypoint)| {
            let placemark = index + 1;
            let longitude = parse_coordinate(placemark, waypoint, "longitude", waypoint.longitude.as_deref())?;
            let latitude = parse_coordinate(placemark, waypoint, "latitude", waypoint.latitude.as_deref())?;

            Ok(PoiRow {
                position: Point::new(longitude, latitude),
                name: waypoint.name.clone().unwrap_or_default(),
                comment: waypoint.comment.clone().unwrap_or_default(),
                category: waypoint.category.clone(),
            })
        })
        .collect()
}

fn parse_coordinate(
    placemark: usize,
    waypoint: &Waypoint,
    field: &'static str,
    raw: Option<&str>,
) -> Result<f64, ExportError> {
    let raw = raw.ok_or_else(|| ExportError::MissingCoordinate {
        placemark,
        field,
        name: waypoint.name.clone(),
    })?;

    fast_float::parse::<f64, _>(raw.trim())
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ExportError::InvalidNumber {
            placemark,
            field,
            value: raw.to_string(),
        })
}

/// Vérifie qu'une catégorie peut servir de nom de dossier et de fichier
pub fn validate_category(category: &str) -> Result<(), ExportError> {
    if category == "." || category == ".." || category.contains(['/', '\\']) {
        return Err(ExportError::InvalidCategory(category.to_string()));
    }
    Ok(())
}

/// Exécute l'export complet d'une extraction
///
/// 1. Affiche les comptes (avant toute conversion, visibles même en cas d'échec)
/// 2. Convertit toutes les coordonnées, erreur fatale sans rien écrire
/// 3. Pour chaque catégorie: dossier, CSV, icône éventuelle
///
/// Les waypoints sans catégorie sont comptés mais n'apparaissent dans aucun CSV.
/// Une erreur d'I/O interrompt l'export; les catégories déjà écrites restent en place.
pub fn convert(extraction: &Extraction, config: &ExportConfig) -> Result<ExportReport> {
    convert_with_progress(extraction, config, &mut std::io::stdout().lock())
}

/// Comme [`convert`], les comptes étant écrits dans `progress`
pub fn convert_with_progress<W: Write>(
    extraction: &Extraction,
    config: &ExportConfig,
    progress: &mut W,
) -> Result<ExportReport> {
    let mut report = ExportReport::from_extraction(extraction);
    report.config = Some(config.clone());
    report
        .write_counts(progress)
        .context("Failed to write progress output")?;

    let rows = coerce(&extraction.waypoints)?;
    for category in &extraction.categories {
        validate_category(category)?;
    }

    if report.unset_category > 0 {
        warn!(
            count = report.unset_category,
            "Waypoints without category are not exported"
        );
    }

    for category in &extraction.categories {
        let category_rows: Vec<&PoiRow> = rows
            .iter()
            .filter(|row| row.category.as_deref() == Some(category.as_str()))
            .collect();

        let written = export_category(category, &category_rows, config)?;
        report.record_category(category, category_rows.len(), written.csv_path, written.icon);
    }

    info!(
        categories = report.categories_written,
        icons = report.icons_copied,
        output = %config.output_dir.display(),
        "Export complete"
    );

    Ok(report)
}

/// Fichiers produits pour une catégorie
struct CategoryOutput {
    csv_path: PathBuf,
    icon: Option<PathBuf>,
}

fn export_category(
    category: &str,
    rows: &[&PoiRow],
    config: &ExportConfig,
) -> Result<CategoryOutput> {
    let category_dir = config.category_dir(category);
    std::fs::create_dir_all(&category_dir)
        .with_context(|| format!("Failed to create directory: {}", category_dir.display()))?;

    let csv_path = config.csv_path(category);
    poi_csv::write_category_csv(&csv_path, rows)?;
    debug!(category, rows = rows.len(), path = %csv_path.display(), "CSV written");

    let icon = icons::copy_icon(&config.icon_source(category), &config.icon_target(category))?;

    info!(
        category,
        rows = rows.len(),
        icon = icon.is_some(),
        dir = %category_dir.display(),
        "Category exported"
    );

    Ok(CategoryOutput { csv_path, icon })
}
