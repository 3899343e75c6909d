//! Types de données pour le crate kml-waypoints

use std::collections::BTreeSet;

/// Un waypoint extrait d'un `<Placemark>`
///
/// Tous les champs sont optionnels: un placemark partiel produit quand même
/// un enregistrement, c'est à l'export de décider quoi en faire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Waypoint {
    /// Longitude brute (premier champ de `<coordinates>`)
    pub longitude: Option<String>,

    /// Latitude brute (second champ de `<coordinates>`)
    pub latitude: Option<String>,

    /// Texte de `<name>`
    pub name: Option<String>,

    /// Texte de `<description>`
    pub comment: Option<String>,

    /// Catégorie dérivée de `<styleUrl>` (ex: `#campground3` -> `campground`)
    pub category: Option<String>,
}

/// Résultat de l'extraction d'un document KML
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Waypoints dans l'ordre du document
    pub waypoints: Vec<Waypoint>,

    /// Catégories distinctes rencontrées
    pub categories: BTreeSet<String>,
}

impl Extraction {
    /// Nombre de waypoints d'une catégorie (`None` = sans catégorie)
    pub fn count_for(&self, category: Option<&str>) -> usize {
        self.waypoints
            .iter()
            .filter(|w| w.category.as_deref() == category)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}
