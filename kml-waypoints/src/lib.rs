//! # kml-waypoints
//!
//! Extraction tolérante des `<Placemark>` d'un fichier KML en waypoints plats.
//!
//! ## Features
//!
//! - Parsing tolérant via html5ever (`scraper`): balises non fermées, casse libre
//! - Décodage UTF-8 / UTF-16 (BOM) avec `encoding_rs`
//! - Sections CDATA des descriptions préservées
//! - Catégorie dérivée de `<styleUrl>` (`#campground3` -> `campground`)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kml_waypoints::parse;
//! use std::path::Path;
//!
//! let extraction = parse(Path::new("input_waypoints.kml"))?;
//! for category in &extraction.categories {
//!     println!("{}: {} waypoints", category, extraction.count_for(Some(category)));
//! }
//! ```

pub mod error;
pub mod loader;
pub mod parser;
pub mod types;

pub use error::KmlError;
pub use loader::{load, load_str};
pub use parser::coordinates::split_coordinates;
pub use parser::placemark::extract;
pub use parser::style::derive_category;
pub use types::{Extraction, Waypoint};

use std::path::Path;

/// Charge un fichier KML et en extrait les waypoints.
///
/// # Arguments
///
/// * `path` - Chemin vers le fichier KML
///
/// # Returns
///
/// Une `Extraction` contenant les waypoints dans l'ordre du document et
/// l'ensemble des catégories rencontrées.
///
/// # Errors
///
/// Retourne `KmlError` si le fichier est absent, illisible ou binaire.
pub fn parse(path: &Path) -> Result<Extraction, KmlError> {
    let document = loader::load(path)?;
    Ok(extract(&document))
}

/// Comme [`parse`], pour un document déjà en mémoire
pub fn parse_str(text: &str) -> Extraction {
    extract(&loader::load_str(text))
}
