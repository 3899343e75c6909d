//! Commande de conversion KML -> CSV
//!
//! Chargement, extraction puis export, dans un seul passage synchrone.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::ExportConfig;
use crate::report::ExportReport;

/// Exécute la conversion complète
///
/// Les erreurs remontent telles quelles: aucun nettoyage des fichiers
/// déjà écrits n'est tenté.
pub fn cmd_convert(
    input: &Path,
    config: &ExportConfig,
    report_path: Option<&Path>,
) -> Result<ExportReport> {
    let start = Instant::now();

    info!(
        input = %input.display(),
        output = %config.output_dir.display(),
        icons = %config.icon_dir.display(),
        "Starting conversion"
    );

    let extraction = kml_waypoints::parse(input)
        .with_context(|| format!("Failed to load {}", input.display()))?;

    info!(
        waypoints = extraction.waypoints.len(),
        categories = extraction.categories.len(),
        "Parsed"
    );

    let mut report = crate::export::convert(&extraction, config)?;
    report.input = Some(input.to_path_buf());
    report.set_duration(start.elapsed());
    report.display();

    if let Some(path) = report_path {
        report.save_to_file(path)?;
        info!(path = %path.display(), "Report saved");
    }

    info!("{}", report.summary());

    Ok(report)
}
