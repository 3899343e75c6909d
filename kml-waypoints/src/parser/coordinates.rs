//! Découpage du texte de `<coordinates>`

/// Extrait longitude et latitude des deux premiers champs `lon,lat[,alt]`
///
/// Les champs sont nettoyés des espaces; un champ vide compte comme absent.
/// Pour une `LineString` (`lon,lat,alt lon,lat,alt ...`) seul le premier
/// point est retenu.
pub fn split_coordinates(text: &str) -> (Option<String>, Option<String>) {
    let mut fields = text.split(',').map(str::trim);

    let mut next_field = || {
        fields
            .next()
            .filter(|f| !f.is_empty())
            .map(str::to_string)
    };

    let longitude = next_field();
    let latitude = next_field();
    (longitude, latitude)
}
