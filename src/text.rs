//! Text normalization applied at the ingestion boundary.
//!
//! Payloads from the law service mix composed and decomposed hangul and
//! carry inconsistent line endings; everything downstream assumes NFC and
//! `\n`-separated lines.

use unicode_normalization::UnicodeNormalization;

/// Normalize article text from the remote payload.
///
/// NFC-normalizes the string, converts Windows line endings, strips
/// trailing whitespace per line, and trims the whole block.
#[must_use]
pub fn normalize_text(text: &str) -> String {
    let composed: String = text.nfc().collect();
    composed
        .replace("\r\n", "\n")
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
