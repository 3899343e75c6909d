//! Parcours des `<Placemark>` et construction des waypoints

use std::sync::OnceLock;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, trace};

use crate::parser::coordinates::split_coordinates;
use crate::parser::style::derive_category;
use crate::types::{Extraction, Waypoint};

/// Sélecteurs des balises utiles (noms déjà en minuscules après parsing)
struct Selectors {
    placemark: Selector,
    coordinates: Selector,
    name: Selector,
    description: Selector,
    style_url: Selector,
}

fn selectors() -> &'static Selectors {
    static SELECTORS: OnceLock<Selectors> = OnceLock::new();
    SELECTORS.get_or_init(|| Selectors {
        placemark: Selector::parse("placemark").expect("placemark selector is valid"),
        coordinates: Selector::parse("coordinates").expect("coordinates selector is valid"),
        name: Selector::parse("name").expect("name selector is valid"),
        description: Selector::parse("description").expect("description selector is valid"),
        style_url: Selector::parse("styleurl").expect("styleurl selector is valid"),
    })
}

/// Extrait tous les placemarks d'un document, dans l'ordre du document
///
/// Les placemarks incomplets sont conservés avec leurs champs à `None`.
/// Chaque nouvelle catégorie est signalée une fois au niveau `info`.
pub fn extract(document: &Html) -> Extraction {
    let selectors = selectors();
    let mut extraction = Extraction::default();

    for (index, placemark) in document.select(&selectors.placemark).enumerate() {
        let waypoint = read_placemark(placemark, selectors);

        if let Some(category) = &waypoint.category {
            if extraction.categories.insert(category.clone()) {
                info!(category = %category, "Found category");
            }
        }

        trace!(index, ?waypoint, "Placemark extracted");
        extraction.waypoints.push(waypoint);
    }

    debug!(
        waypoints = extraction.waypoints.len(),
        categories = extraction.categories.len(),
        "Extraction complete"
    );

    extraction
}

fn read_placemark(placemark: ElementRef<'_>, selectors: &Selectors) -> Waypoint {
    let (longitude, latitude) = first_text(placemark, &selectors.coordinates)
        .map(|text| split_coordinates(&text))
        .unwrap_or((None, None));

    Waypoint {
        longitude,
        latitude,
        name: first_text(placemark, &selectors.name),
        comment: first_text(placemark, &selectors.description),
        category: first_text(placemark, &selectors.style_url)
            .and_then(|style| derive_category(&style)),
    }
}

/// Premier nœud texte direct non vide du premier élément correspondant
///
/// Seuls les enfants texte de l'élément comptent, pas ceux de ses descendants.
fn first_text(parent: ElementRef<'_>, selector: &Selector) -> Option<String> {
    parent
        .select(selector)
        .next()?
        .children()
        .filter_map(|node| node.value().as_text())
        .map(|text| text.trim())
        .find(|t| !t.is_empty())
        .map(str::to_string)
}
