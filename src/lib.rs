//! # hexfmt
//!
//! A hexdump-style formatter for byte streams: decodes fixed-width typed
//! words (integers, floats, chars; configurable endianness and base),
//! formats them into fixed-width columns, collapses repeated rows, and
//! renders aligned lines with optional ANSI highlighting.
//!
//! ```no_run
//! use hexfmt::Dumper;
//!
//! # fn main() -> hexfmt::Result<()> {
//! let dumper = Dumper::builder().word_type("uint16_le").columns(8).build()?;
//! let mut out = Vec::new();
//! dumper.dump(&b"hello world"[..], &mut out)?;
//! # Ok(())
//! # }
//! ```
pub mod dump;

// Re-export the main types for convenience
pub use dump::{
    Base, DumpError, Dumper, DumperBuilder, Endian, Kind, Lines, Result, Rule, Style, Theme,
    WordType,
};

/// Dumps a byte slice to a `String` with the default configuration
/// (1-byte unsigned words, base 16, 16 columns, character column on).
pub fn hexdump(data: &[u8]) -> Result<String> {
    let dumper = Dumper::builder().build()?;
    let mut out = Vec::new();
    dumper.dump(data, &mut out)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}
