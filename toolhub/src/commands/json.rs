//! # Comandos JSON
//! src/commands/json.rs
//!
//! Formateo (pretty-print) y minificado de documentos JSON. Ambos validan
//! el documento antes de reescribirlo.
//!
//! El pretty-print pasa por `Value` (las claves salen ordenadas); el
//! minificado solo quita espacios y deja claves y números tal como vienen.

use crate::error::ToolError;
use serde::de::IgnoredAny;
use serde_json::Value;

/// Valida el JSON y lo reescribe con indentación de dos espacios
pub fn json_pretty(input: &str) -> Result<String, ToolError> {
    let value = parse(input)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Valida el JSON y elimina los espacios en blanco fuera de los strings
pub fn json_minify(input: &str) -> Result<String, ToolError> {
    check_not_empty(input)?;
    serde_json::from_str::<IgnoredAny>(input)?;

    let mut out = String::with_capacity(input.len());
    let mut in_string = false;
    let mut escaped = false;

    for c in input.chars() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            ' ' | '\t' | '\n' | '\r' => {}
            '"' => {
                in_string = true;
                out.push(c);
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}

fn parse(input: &str) -> Result<Value, ToolError> {
    check_not_empty(input)?;
    Ok(serde_json::from_str(input)?)
}

fn check_not_empty(input: &str) -> Result<(), ToolError> {
    if input.trim().is_empty() {
        return Err(ToolError::EmptyInput);
    }
    Ok(())
}
