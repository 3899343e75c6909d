//! Rapport d'export
//!
//! Comptes par catégorie affichés avant la conversion, puis un résumé
//! des fichiers produits à la fin de l'export.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;

use kml_waypoints::Extraction;

use crate::config::ExportConfig;

/// Libellé du groupe des waypoints sans catégorie
pub const UNSET_LABEL: &str = "(unset)";

/// Statistiques d'une catégorie
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryStats {
    /// Waypoints extraits pour cette catégorie
    pub waypoints: usize,
    /// Lignes écrites dans le CSV
    pub rows_written: usize,
    /// CSV produit
    pub csv_path: Option<PathBuf>,
    /// Icône copiée, si présente
    pub icon: Option<PathBuf>,
}

/// Rapport complet d'export
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExportReport {
    /// Fichier KML source
    pub input: Option<PathBuf>,
    /// Emplacements utilisés
    pub config: Option<ExportConfig>,
    /// Durée totale
    pub duration_secs: f64,

    /// Nombre total de waypoints extraits
    pub total_waypoints: usize,
    /// Waypoints sans catégorie (non exportés)
    pub unset_category: usize,
    /// Statistiques par catégorie, triées par nom
    pub by_category: BTreeMap<String, CategoryStats>,

    /// Nombre de CSV écrits
    pub categories_written: usize,
    /// Nombre d'icônes copiées
    pub icons_copied: usize,
}

impl ExportReport {
    /// Initialise les comptes depuis une extraction
    pub fn from_extraction(extraction: &Extraction) -> Self {
        let mut report = Self {
            total_waypoints: extraction.waypoints.len(),
            ..Default::default()
        };

        for waypoint in &extraction.waypoints {
            match &waypoint.category {
                Some(category) => {
                    report
                        .by_category
                        .entry(category.clone())
                        .or_default()
                        .waypoints += 1
                }
                None => report.unset_category += 1,
            }
        }

        report
    }

    /// Enregistre une catégorie exportée
    pub fn record_category(
        &mut self,
        category: &str,
        rows_written: usize,
        csv_path: PathBuf,
        icon: Option<PathBuf>,
    ) {
        self.categories_written += 1;
        if icon.is_some() {
            self.icons_copied += 1;
        }

        let stats = self.by_category.entry(category.to_string()).or_default();
        stats.rows_written = rows_written;
        stats.csv_path = Some(csv_path);
        stats.icon = icon;
    }

    /// Définit la durée de l'export
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_secs = duration.as_secs_f64();
    }

    /// Lignes de comptage par catégorie, groupe sans catégorie en dernier
    pub fn count_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .by_category
            .iter()
            .map(|(category, stats)| format!("  {}: {}", category, stats.waypoints))
            .collect();

        if self.unset_category > 0 {
            lines.push(format!("  {}: {}", UNSET_LABEL, self.unset_category));
        }
        lines
    }

    /// Écrit les comptes avant conversion
    pub fn write_counts<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "{} waypoints loaded", self.total_waypoints)?;
        writeln!(out, "Counts by category:")?;
        for line in self.count_lines() {
            writeln!(out, "{}", line)?;
        }
        out.flush()
    }

    /// Affiche le rapport final sur la console
    pub fn display(&self) {
        println!("\n{}", "=".repeat(60));
        match &self.input {
            Some(input) => println!("EXPORT REPORT - {}", input.display()),
            None => println!("EXPORT REPORT"),
        }
        println!("{}", "=".repeat(60));

        println!("Duration: {:.2}s", self.duration_secs);
        println!(
            "Waypoints: {} loaded, {} without category",
            self.total_waypoints, self.unset_category
        );
        println!(
            "Categories: {} written, {} icons copied",
            self.categories_written, self.icons_copied
        );

        if !self.by_category.is_empty() {
            println!("\n--- BY CATEGORY ---");
            for (category, stats) in &self.by_category {
                let icon = if stats.icon.is_some() { " +icon" } else { "" };
                let path = stats
                    .csv_path
                    .as_deref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                println!(
                    "  {}: {} rows{} {}",
                    category, stats.rows_written, icon, path
                );
            }
        }

        println!("{}", "=".repeat(60));
    }

    /// Sauvegarde le rapport en JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        Ok(())
    }

    /// Affichage compact pour le résumé
    pub fn summary(&self) -> String {
        format!(
            "{} waypoints, {} categories, {} icons, {} without category",
            self.total_waypoints, self.categories_written, self.icons_copied, self.unset_category
        )
    }
}
