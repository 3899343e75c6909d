//! Chargement d'un fichier KML en arbre HTML tolérant
//!
//! Le KML réel est souvent approximatif (balises non fermées, casse
//! variable). On s'appuie sur html5ever via `scraper`, qui ne rejette
//! jamais un document: les noms de balises sont normalisés en minuscules
//! et les erreurs de structure sont réparées.
//!
//! Deux réécritures préalables rapprochent le texte du HTML attendu par
//! html5ever: les sections CDATA deviennent du texte échappé et les balises
//! auto-fermantes XML (`<Style id="a"/>`) sont développées.

use std::borrow::Cow;
use std::io::ErrorKind;
use std::path::Path;

use scraper::Html;
use tracing::{debug, trace, warn};

use crate::KmlError;

const CDATA_OPEN: &str = "<![CDATA[";
const CDATA_CLOSE: &str = "]]>";

/// Lit et parse un fichier KML
///
/// # Errors
///
/// - `KmlError::NotFound` si le chemin n'existe pas
/// - `KmlError::Io` pour toute autre erreur de lecture
/// - `KmlError::Parse` si le contenu n'est pas du texte
pub fn load(path: &Path) -> Result<Html, KmlError> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => KmlError::NotFound {
            path: path.to_path_buf(),
        },
        _ => KmlError::Io(e),
    })?;

    debug!(path = %path.display(), bytes = bytes.len(), "Input loaded");

    let text = decode(path, &bytes)?;
    Ok(load_str(&text))
}

/// Parse un document KML déjà en mémoire
pub fn load_str(text: &str) -> Html {
    let unwrapped = unwrap_cdata(text);
    let prepared = expand_self_closing(&unwrapped);
    let document = Html::parse_document(&prepared);

    if !document.errors.is_empty() {
        debug!(
            count = document.errors.len(),
            "Markup irregularities tolerated by lenient parser"
        );
        for err in &document.errors {
            trace!(error = %err, "Parser recovery");
        }
    }

    document
}

/// Décode les bytes en texte (UTF-8 par défaut, BOM respecté)
fn decode(path: &Path, bytes: &[u8]) -> Result<String, KmlError> {
    let (text, encoding, had_errors) = encoding_rs::UTF_8.decode(bytes);

    if had_errors {
        warn!(
            path = %path.display(),
            encoding = encoding.name(),
            "Invalid byte sequences replaced while decoding"
        );
    }

    if text.contains('\0') {
        return Err(KmlError::parse_error(
            path,
            "content is not text (NUL byte found)",
        ));
    }

    Ok(text.into_owned())
}

/// Remplace les sections CDATA par leur contenu échappé
///
/// Hors contenu étranger, html5ever transforme `<![CDATA[` en commentaire
/// qui se termine au premier `>`, ce qui casse les descriptions HTML.
fn unwrap_cdata(text: &str) -> Cow<'_, str> {
    if !text.contains(CDATA_OPEN) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(CDATA_OPEN) {
        out.push_str(&rest[..start]);
        let body = &rest[start + CDATA_OPEN.len()..];
        // Section non terminée: elle court jusqu'à la fin du document
        let (content, tail) = match body.find(CDATA_CLOSE) {
            Some(end) => (&body[..end], &body[end + CDATA_CLOSE.len()..]),
            None => (body, ""),
        };
        escape_into(&mut out, content);
        rest = tail;
    }
    out.push_str(rest);

    Cow::Owned(out)
}

/// Réécrit `<tag .../>` en `<tag ...></tag>`
///
/// html5ever ignore `/>` sur les éléments non vides: `<Style/>` ouvrirait
/// un bloc de texte brut jusqu'au prochain `</Style>`, et `<description/>`
/// engloberait ses voisins.
fn expand_self_closing(text: &str) -> Cow<'_, str> {
    if !text.contains("/>") {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + text.len() / 16);
    let mut rest = text;

    while let Some(lt) = rest.find('<') {
        out.push_str(&rest[..lt]);
        let tag = &rest[lt..];
        match self_closing_tag(tag) {
            Some((name, slash, end)) => {
                out.push_str(tag[..slash].trim_end());
                out.push_str("></");
                out.push_str(name);
                out.push('>');
                rest = &tag[end..];
            }
            None => {
                out.push('<');
                rest = &tag[1..];
            }
        }
    }
    out.push_str(rest);

    Cow::Owned(out)
}

/// Reconnaît une balise auto-fermante en tête de `tag`
///
/// Retourne le nom, la position du `/` final et la longueur de la balise.
/// Les `>` et `/` entre guillemets ne comptent pas.
fn self_closing_tag(tag: &str) -> Option<(&str, usize, usize)> {
    let bytes = tag.as_bytes();
    if !bytes.get(1)?.is_ascii_alphabetic() {
        return None;
    }

    let name_end = tag[1..]
        .find(|c: char| c.is_ascii_whitespace() || c == '/' || c == '>')?
        + 1;
    let name = &tag[1..name_end];

    let mut quote: Option<u8> = None;
    for (i, &b) in bytes.iter().enumerate().skip(name_end) {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None => match b {
                b'"' | b'\'' => quote = Some(b),
                b'>' if bytes[i - 1] == b'/' => return Some((name, i - 1, i + 1)),
                b'>' | b'<' => return None,
                _ => {}
            },
        }
    }

    None
}

fn escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}
