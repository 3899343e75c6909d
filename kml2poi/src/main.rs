//! Point d'entrée CLI pour kml2poi

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

use kml2poi::config::{DEFAULT_ICON_DIR, DEFAULT_INPUT, DEFAULT_OUTPUT_DIR};
use kml2poi::ExportConfig;

/// Convertir des waypoints KML en CSV par catégorie pour un POI loader
#[derive(Parser)]
#[command(name = "kml2poi")]
#[command(author, version)]
#[command(about = "Convertir des waypoints KML en CSV par catégorie (POI loader)")]
#[command(long_about = "Lit les <Placemark> d'un fichier KML, les regroupe par catégorie (styleUrl sans chiffres finaux) et écrit un CSV par catégorie.\n\nL'icône <catégorie>.bmp est copiée à côté du CSV si elle existe.")]
struct Cli {
    /// Fichier KML source
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Dossier de sortie (un sous-dossier par catégorie)
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Dossier des icônes <catégorie>.bmp
    #[arg(long, default_value = DEFAULT_ICON_DIR)]
    icons: PathBuf,

    /// Écrire le rapport d'export en JSON
    #[arg(long)]
    report: Option<PathBuf>,

    /// Augmenter la verbosité (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configurer le logging
    init_logging(cli.verbose, cli.quiet);

    let config = ExportConfig::new(cli.output, cli.icons);
    kml2poi::cli::cmd_convert(&cli.input, &config, cli.report.as_deref())?;

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
