//! Quote file loading and saving.
//!
//! Turns raw bytes of unknown encoding into text the codec can read
//! (encoding detection, BOM and line-ending cleanup) and writes exports
//! back to disk.

use std::path::Path;

use serde::Serialize;

use crate::codec::{to_csv, try_from_csv};
use crate::error::{LoadError, LoadResult};
use crate::logs::{log_info, log_success};
use crate::models::{ParsedQuote, QuoteRecord};

/// A parsed quote plus how its bytes were decoded.
#[derive(Debug, Clone, Serialize)]
pub struct LoadedQuote {
    pub parsed: ParsedQuote,
    pub encoding: String,
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let charset = chardet::detect(bytes).0;

    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes with the named encoding.
///
/// Invalid UTF-8 and unknown labels fall back to lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> LoadResult<String> {
    let label = encoding.to_lowercase();
    match label.as_str() {
        "utf-8" | "utf8" | "ascii" => Ok(String::from_utf8_lossy(bytes).into_owned()),
        "iso-8859-1" | "latin-1" | "latin1" => {
            Ok(encoding_rs::ISO_8859_15.decode(bytes).0.into_owned())
        }
        _ => match encoding_rs::Encoding::for_label(label.as_bytes()) {
            Some(enc) => {
                let (text, _, had_errors) = enc.decode(bytes);
                if had_errors {
                    return Err(LoadError::Encoding(encoding.to_string()));
                }
                Ok(text.into_owned())
            }
            None => Ok(String::from_utf8_lossy(bytes).into_owned()),
        },
    }
}

/// Strip a BOM and turn `\r\n` / `\r` line endings into `\n`.
pub fn normalize_text(content: &str) -> String {
    content
        .trim_start_matches('\u{feff}')
        .replace("\r\n", "\n")
        .replace('\r', "\n")
}

/// Decode and parse a quote document from bytes.
pub fn load_quote_bytes(bytes: &[u8]) -> LoadResult<LoadedQuote> {
    if bytes.is_empty() {
        return Err(LoadError::EmptyFile);
    }

    let encoding = detect_encoding(bytes);
    log_info(format!("Detected encoding: {}", encoding));

    let text = normalize_text(&decode_content(bytes, &encoding)?);
    let parsed = try_from_csv(&text)?;

    Ok(LoadedQuote { parsed, encoding })
}

/// Read and parse a quote CSV file.
pub fn load_quote_csv<P: AsRef<Path>>(path: P) -> LoadResult<LoadedQuote> {
    log_info(format!("Reading quote CSV: {}", path.as_ref().display()));
    let bytes = std::fs::read(path.as_ref())?;
    load_quote_bytes(&bytes)
}

/// Read a quote record saved as JSON.
pub fn read_quote_json<P: AsRef<Path>>(path: P) -> LoadResult<QuoteRecord> {
    let content = std::fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&content)?)
}

/// Export `record` as canonical CSV to `path`.
pub fn write_quote_csv<P: AsRef<Path>>(record: &QuoteRecord, path: P) -> LoadResult<()> {
    let csv = to_csv(record);
    std::fs::write(path.as_ref(), &csv)?;
    log_success(format!(
        "Wrote {} lines to {}",
        csv.lines().count(),
        path.as_ref().display()
    ));
    Ok(())
}
