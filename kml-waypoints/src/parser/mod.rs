//! Extraction des champs KML

pub mod coordinates;
pub mod placemark;
pub mod style;
