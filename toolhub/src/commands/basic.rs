//! # Comandos Básicos de Texto
//! src/commands/basic.rs
//!
//! - `uppercase`: Convertir a mayúsculas
//! - `slugify`: Convertir texto en un slug apto para URLs

use regex::Regex;
use std::sync::OnceLock;

/// Convierte el contenido a mayúsculas
///
/// Si los bytes son UTF-8 válido se usa la conversión Unicode completa;
/// si no, solo se convierten los caracteres ASCII y el resto queda igual.
///
/// # Ejemplo
/// ```
/// use toolhub::commands::uppercase;
///
/// assert_eq!(uppercase(b"Hello, World!"), b"HELLO, WORLD!");
/// ```
pub fn uppercase(input: &[u8]) -> Vec<u8> {
    match std::str::from_utf8(input) {
        Ok(text) => text.to_uppercase().into_bytes(),
        Err(_) => input.to_ascii_uppercase(),
    }
}

/// Corridas de caracteres no alfanuméricos
fn non_alnum() -> &'static Regex {
    static NON_ALNUM: OnceLock<Regex> = OnceLock::new();
    NON_ALNUM.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("static regex is valid"))
}

/// Convierte un texto en slug: minúsculas, cada corrida de caracteres no
/// alfanuméricos se reemplaza por un `-` y se recortan los guiones de los
/// extremos.
///
/// # Ejemplo
/// ```
/// use toolhub::commands::slugify;
///
/// assert_eq!(slugify("  Hello, World!  "), "hello-world");
/// ```
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    let slug = non_alnum().replace_all(&lower, "-");
    slug.trim_matches('-').to_string()
}
