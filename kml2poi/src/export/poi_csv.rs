//! Écriture des CSV pour le POI loader
//!
//! Format: `longitude,latitude,name,comment`, tous les champs entre
//! guillemets (numériques compris), sans en-tête, fins de ligne `\n`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};

use super::PoiRow;

/// Écrit (ou écrase) le CSV d'une catégorie
pub fn write_category_csv(path: &Path, rows: &[&PoiRow]) -> Result<()> {
    let file =
        File::create(path).context(format!("Failed to create file: {}", path.display()))?;

    write_rows(BufWriter::new(file), rows)
        .with_context(|| format!("Failed to write CSV: {}", path.display()))
}

/// Écrit les lignes dans n'importe quel `Write`
fn write_rows<W: Write>(inner: W, rows: &[&PoiRow]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(inner);

    for row in rows {
        let longitude = format_coordinate(row.position.x());
        let latitude = format_coordinate(row.position.y());
        writer.write_record([
            longitude.as_str(),
            latitude.as_str(),
            row.name.as_str(),
            row.comment.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Représentation texte la plus courte qui relit la même valeur
fn format_coordinate(value: f64) -> String {
    value.to_string()
}
