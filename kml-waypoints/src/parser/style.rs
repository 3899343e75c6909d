//! Dérivation de la catégorie depuis `<styleUrl>`

/// Dérive une catégorie depuis une référence de style
///
/// Retire un seul `#` initial puis tous les chiffres finaux.
/// Retourne `None` si rien ne reste.
pub fn derive_category(style_ref: &str) -> Option<String> {
    let trimmed = style_ref.trim();
    let label = trimmed.strip_prefix('#').unwrap_or(trimmed);
    let label = label.trim_end_matches(|c: char| c.is_ascii_digit());

    if label.is_empty() {
        None
    } else {
        Some(label.to_string())
    }
}
