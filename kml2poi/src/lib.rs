//! # kml2poi
//!
//! Conversion de waypoints KML en fichiers CSV par catégorie pour un POI loader
//! (ex: Garmin POI Loader), avec copie de l'icône `.bmp` de chaque catégorie.
//!
//! ## Features
//!
//! - Extraction tolérante des placemarks (crate `kml-waypoints`)
//! - Un dossier par catégorie: `<output>/<cat>/<cat>.csv` (+ `<cat>.bmp`)
//! - CSV `longitude,latitude,name,comment`, tous champs entre guillemets
//! - Rapport console et JSON optionnel
//!
//! ## Usage CLI
//!
//! ```bash
//! # Lit input_waypoints.kml, écrit dans output/
//! kml2poi
//!
//! # Fichier explicite, rapport JSON
//! kml2poi -i trip.kml --report report.json
//! ```

pub mod cli;
pub mod config;
pub mod export;
pub mod report;

pub use config::ExportConfig;
pub use export::{coerce, convert, convert_with_progress, ExportError, PoiRow};
pub use report::{CategoryStats, ExportReport};
