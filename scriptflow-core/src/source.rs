//! Script text acquisition with encoding fallback
//!
//! PowerShell scripts in the wild show up as UTF-8 (with or without BOM),
//! UTF-16 in either byte order (the Windows editors' favorite), or a legacy
//! single-byte encoding. Decoders are tried in priority order and the first
//! success wins; Latin-1 is the total fallback, so only I/O failures abort a
//! file. Decode failure is fatal for the whole file — the core never sees
//! partially decoded text.

use anyhow::{Context, Result};
use std::path::Path;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];

/// Read a script file as lines of text, trying encodings in priority order:
/// UTF-8 with BOM, plain UTF-8, BOM-sniffed UTF-16, UTF-16LE, UTF-16BE,
/// Latin-1.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read script file: {}", path.display()))?;
    let text = decode(&bytes)
        .with_context(|| format!("Could not decode script file: {}", path.display()))?;
    Ok(split_lines(&text))
}

/// Decode raw bytes with the fallback chain. The UTF-8 BOM variant runs
/// before plain UTF-8 because a BOM is itself valid UTF-8 and would
/// otherwise leak a U+FEFF into the first line.
pub fn decode(bytes: &[u8]) -> Result<String> {
    decode_utf8_bom(bytes)
        .or_else(|| decode_utf8(bytes))
        .or_else(|| decode_utf16_bom(bytes))
        .or_else(|| decode_utf16(bytes, false))
        .or_else(|| decode_utf16(bytes, true))
        .or_else(|| Some(decode_latin1(bytes)))
        .context("no encoding produced valid text")
}

fn decode_utf8(bytes: &[u8]) -> Option<String> {
    std::str::from_utf8(bytes).ok().map(str::to_string)
}

fn decode_utf8_bom(bytes: &[u8]) -> Option<String> {
    let rest = bytes.strip_prefix(&UTF8_BOM)?;
    decode_utf8(rest)
}

/// UTF-16 with byte order taken from the BOM; no BOM means no match here
/// (the explicit LE/BE decoders are next in the chain).
fn decode_utf16_bom(bytes: &[u8]) -> Option<String> {
    if let Some(rest) = bytes.strip_prefix(&UTF16_LE_BOM) {
        decode_utf16(rest, false)
    } else if let Some(rest) = bytes.strip_prefix(&UTF16_BE_BOM) {
        decode_utf16(rest, true)
    } else {
        None
    }
}

fn decode_utf16(bytes: &[u8], big_endian: bool) -> Option<String> {
    if bytes.len() % 2 != 0 {
        return None;
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| {
            if big_endian {
                u16::from_be_bytes([pair[0], pair[1]])
            } else {
                u16::from_le_bytes([pair[0], pair[1]])
            }
        })
        .collect();
    let text = String::from_utf16(&units).ok()?;
    // A stray BOM survives explicit-endian decoding; drop it.
    Some(text.strip_prefix('\u{FEFF}').unwrap_or(&text).to_string())
}

/// Latin-1 maps every byte to a code point, so this never fails.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Split decoded text into lines, tolerating CRLF and a missing final
/// newline. Line numbering downstream is 1-based over this sequence.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}
