//! Printable-character scrubbing for the character column.

use encoding_rs::Encoding;

use super::types::error::{DumpError, Result};

/// Resolves a text encoding label (e.g. `"utf-8"`, `"gbk"`) to an
/// `encoding_rs` encoding.
///
/// # Errors
/// Returns `DumpError::UnknownEncoding` for labels `encoding_rs` does not
/// recognize.
pub fn parse_encoding(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.as_bytes())
        .ok_or_else(|| DumpError::UnknownEncoding(label.to_string()))
}

/// Maps raw bytes to their printable representation for the `|...|`
/// column. Scrubbing never fails: anything undecodable or unprintable
/// degrades to `.`.
#[derive(Debug, Clone, Copy)]
pub struct CharFormatter {
    encoding: Option<&'static Encoding>,
}

impl CharFormatter {
    /// Byte mode when `encoding` is `None`: printable ASCII passes
    /// through, everything else becomes `.`. With an encoding, bytes are
    /// decoded first and unprintable or invalid characters become `.`.
    pub fn new(encoding: Option<&'static Encoding>) -> Self {
        CharFormatter { encoding }
    }

    pub fn scrub(&self, raw: &[u8]) -> String {
        match self.encoding {
            None => raw
                .iter()
                .map(|&b| if (0x20..=0x7e).contains(&b) { b as char } else { '.' })
                .collect(),
            Some(encoding) => {
                // Invalid sequences decode to U+FFFD, which is scrubbed
                // along with control characters.
                let (text, _, _) = encoding.decode(raw);
                text.chars()
                    .map(|c| {
                        if c == '\u{FFFD}' || c.is_control() {
                            '.'
                        } else {
                            c
                        }
                    })
                    .collect()
            }
        }
    }
}
