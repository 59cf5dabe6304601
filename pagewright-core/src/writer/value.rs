//! Value encoder: semantic [`Object`]s to PDF wire syntax.
//!
//! Strings and dates pass through the optional [`ObjectCipher`] before
//! escaping. Byte strings, names and numbers are never encrypted.

use crate::encryption::ObjectCipher;
use crate::error::{PdfError, Result};
use crate::objects::{Dictionary, Object};
use crate::structure::NameTree;
use chrono::{DateTime, Utc};

const NUMBER_LIMIT: f64 = 1e21;

/// Encodes `object`, encrypting string payloads with `cipher` when given.
pub fn encode(object: &Object, cipher: Option<&ObjectCipher>) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    write_value(&mut out, object, cipher)?;
    Ok(out)
}

/// Encodes a dictionary body.
pub fn encode_dictionary(dict: &Dictionary, cipher: Option<&ObjectCipher>) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    write_dictionary(&mut out, dict, cipher)?;
    Ok(out)
}

/// Rounds to six fractional digits (half up) and prints the shortest form.
///
/// Magnitudes of 1e21 and above, NaN and infinities are rejected.
pub fn format_number(n: f64) -> Result<String> {
    if !n.is_finite() || n <= -NUMBER_LIMIT || n >= NUMBER_LIMIT {
        return Err(PdfError::Validation(format!("unsupported number: {n}")));
    }
    let scaled = n * 1e6;
    let floor = scaled.floor();
    let rounded = (if scaled - floor >= 0.5 { floor + 1.0 } else { floor }) / 1e6;
    if rounded == 0.0 {
        return Ok("0".to_string());
    }
    Ok(rounded.to_string())
}

/// `D:YYYYMMDDHHmmSSZ`
pub fn format_pdf_date(date: &DateTime<Utc>) -> String {
    date.format("D:%Y%m%d%H%M%SZ").to_string()
}

/// Text string bytes: ASCII as is, anything else as UTF-16BE with a BOM.
pub fn encode_text(text: &str) -> Vec<u8> {
    if text.is_ascii() {
        return text.as_bytes().to_vec();
    }
    let mut out = Vec::with_capacity(2 + text.len() * 2);
    out.extend_from_slice(&[0xFE, 0xFF]);
    for unit in text.encode_utf16() {
        out.extend_from_slice(&unit.to_be_bytes());
    }
    out
}

/// Applies the literal string escape table.
pub fn escape_string(bytes: &[u8], out: &mut Vec<u8>) {
    for &b in bytes {
        match b {
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\t' => out.extend_from_slice(b"\\t"),
            0x08 => out.extend_from_slice(b"\\b"),
            0x0C => out.extend_from_slice(b"\\f"),
            b'(' => out.extend_from_slice(b"\\("),
            b')' => out.extend_from_slice(b"\\)"),
            b'\\' => out.extend_from_slice(b"\\\\"),
            other => out.push(other),
        }
    }
}

/// `(text)` for a content stream shown with a WinAnsi-encoded simple font.
///
/// Characters up to U+007F and from U+00A0 to U+00FF map to their own byte;
/// anything else becomes `?`.
pub fn encode_winansi_literal(text: &str) -> Vec<u8> {
    let bytes: Vec<u8> = text
        .chars()
        .map(|c| match u32::from(c) {
            code @ (0x00..=0x7F | 0xA0..=0xFF) => code as u8,
            _ => b'?',
        })
        .collect();
    let mut out = Vec::with_capacity(bytes.len() + 2);
    out.push(b'(');
    escape_string(&bytes, &mut out);
    out.push(b')');
    out
}

fn write_literal(out: &mut Vec<u8>, raw: &[u8], cipher: Option<&ObjectCipher>) -> Result<()> {
    out.push(b'(');
    match cipher {
        Some(cipher) => escape_string(&cipher.encrypt(raw)?, out),
        None => escape_string(raw, out),
    }
    out.push(b')');
    Ok(())
}

fn is_regular_name_byte(b: u8) -> bool {
    matches!(b, b'!'..=b'~')
        && !matches!(
            b,
            b'#' | b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%'
        )
}

fn write_name(out: &mut Vec<u8>, name: &str) {
    out.push(b'/');
    for &b in name.as_bytes() {
        if is_regular_name_byte(b) {
            out.push(b);
        } else {
            out.extend_from_slice(format!("#{b:02X}").as_bytes());
        }
    }
}

fn write_dictionary(out: &mut Vec<u8>, dict: &Dictionary, cipher: Option<&ObjectCipher>) -> Result<()> {
    out.extend_from_slice(b"<<");
    for (key, value) in dict.iter() {
        out.push(b'\n');
        write_name(out, key);
        out.push(b' ');
        write_value(out, value, cipher)?;
    }
    out.extend_from_slice(b"\n>>");
    Ok(())
}

fn write_name_tree(out: &mut Vec<u8>, tree: &NameTree, cipher: Option<&ObjectCipher>) -> Result<()> {
    out.extend_from_slice(b"<<");
    if let Some((first, last)) = tree.limits() {
        out.extend_from_slice(b"\n  /Limits [");
        write_literal(out, &encode_text(first), cipher)?;
        out.push(b' ');
        write_literal(out, &encode_text(last), cipher)?;
        out.push(b']');
    }
    out.extend_from_slice(b"\n  /Names [");
    for (key, value) in tree.iter() {
        out.extend_from_slice(b"\n    ");
        write_literal(out, &encode_text(key), cipher)?;
        out.push(b' ');
        write_value(out, value, cipher)?;
    }
    out.extend_from_slice(b"\n]\n>>");
    Ok(())
}

fn write_value(out: &mut Vec<u8>, object: &Object, cipher: Option<&ObjectCipher>) -> Result<()> {
    match object {
        Object::Null => out.extend_from_slice(b"null"),
        Object::Boolean(b) => out.extend_from_slice(if *b { b"true" } else { b"false" }),
        Object::Integer(i) => out.extend_from_slice(i.to_string().as_bytes()),
        Object::Real(f) => out.extend_from_slice(format_number(*f)?.as_bytes()),
        Object::Name(name) => write_name(out, name),
        Object::String(text) => write_literal(out, &encode_text(text), cipher)?,
        Object::ByteString(bytes) => {
            out.push(b'<');
            for b in bytes {
                out.extend_from_slice(format!("{b:02x}").as_bytes());
            }
            out.push(b'>');
        }
        Object::Date(date) => write_literal(out, format_pdf_date(date).as_bytes(), cipher)?,
        Object::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b' ');
                }
                write_value(out, item, cipher)?;
            }
            out.push(b']');
        }
        Object::Dictionary(dict) => write_dictionary(out, dict, cipher)?,
        Object::Reference(id) => {
            out.extend_from_slice(format!("{} {} R", id.number(), id.generation()).as_bytes())
        }
        Object::NameTree(tree) => write_name_tree(out, tree, cipher)?,
    }
    Ok(())
}
