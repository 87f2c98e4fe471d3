//! # Comandos de Codificación
//! src/commands/encoding.rs
//!
//! - `hash`: SHA256 en hexadecimal
//! - `base64_encode` / `base64_decode`: alfabeto estándar con padding

use crate::error::ToolError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sha2::{Digest, Sha256};

/// Calcula el hash SHA256 del contenido y lo retorna en hex (minúsculas)
pub fn hash(input: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input);
    format!("{:x}", hasher.finalize())
}

pub fn base64_encode(input: &[u8]) -> String {
    STANDARD.encode(input)
}

/// Decodifica base64 estándar
///
/// Los saltos de línea (`\r`, `\n`) se ignoran, así un archivo con newline
/// final o con líneas cortadas decodifica igual. Caracteres fuera del
/// alfabeto, padding faltante o espacios siguen siendo errores.
pub fn base64_decode(input: &str) -> Result<Vec<u8>, ToolError> {
    let compact: String = input.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();
    Ok(STANDARD.decode(compact)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== HASH ====================

    #[test]
    fn test_hash_empty_input() {
        assert_eq!(
            hash(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_hash_hello() {
        assert_eq!(
            hash(b"hello"),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_hash_hello_world() {
        assert_eq!(
            hash(b"hello world"),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_hash_same_input_same_hash() {
        assert_eq!(hash(b"test123"), hash(b"test123"));
        assert_ne!(hash(b"test123"), hash(b"test124"));
    }

    #[test]
    fn test_hash_is_lowercase_hex() {
        let h = hash(b"anything");
        assert_eq!(h.len(), 64);
        assert!(h.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    // ==================== BASE64 ====================

    #[test]
    fn test_encode_cases() {
        let cases = [
            ("hello", "aGVsbG8="),
            ("hello world", "aGVsbG8gd29ybGQ="),
            ("", ""),
            ("Hello, World!", "SGVsbG8sIFdvcmxkIQ=="),
            ("foo@bar.com", "Zm9vQGJhci5jb20="),
            ("abc123", "YWJjMTIz"),
            ("Café", "Q2Fmw6k="),
            ("a", "YQ=="),
            ("hello\nworld", "aGVsbG8Kd29ybGQ="),
        ];

        for (input, expected) in cases {
            assert_eq!(base64_encode(input.as_bytes()), expected, "input {:?}", input);
        }
    }

    #[test]
    fn test_decode_valid() {
        assert_eq!(base64_decode("aGVsbG8=").unwrap(), b"hello");
        assert_eq!(base64_decode("SGVsbG8sIFdvcmxkIQ==").unwrap(), b"Hello, World!");
        assert_eq!(base64_decode("Q2Fmw6k=").unwrap(), "Café".as_bytes());
        assert!(base64_decode("").unwrap().is_empty());
    }

    #[test]
    fn test_decode_invalid_characters() {
        assert!(matches!(
            base64_decode("hello!!!"),
            Err(ToolError::InvalidBase64(_))
        ));
    }

    #[test]
    fn test_decode_missing_padding() {
        assert!(base64_decode("aGVsbG8").is_err());
    }

    #[test]
    fn test_decode_plain_text() {
        assert!(base64_decode("this is not base64").is_err());
    }

    #[test]
    fn test_decode_trailing_newline() {
        assert_eq!(base64_decode("aGVsbG8=\n").unwrap(), b"hello");
        assert_eq!(base64_decode("aGVsbG8=\r\n").unwrap(), b"hello");
    }

    #[test]
    fn test_decode_wrapped_lines() {
        let wrapped = "SGVsbG8s\nIFdvcmxk\r\nIQ==\n";
        assert_eq!(base64_decode(wrapped).unwrap(), b"Hello, World!");
    }

    #[test]
    fn test_decode_whitespace_in_middle() {
        assert!(base64_decode("aGVs bG8=").is_err());
    }

    #[test]
    fn test_round_trip_unicode() {
        let text = "Hello 👋 World 🌍";
        let decoded = base64_decode(&base64_encode(text.as_bytes())).unwrap();
        assert_eq!(decoded, text.as_bytes());
    }
}
