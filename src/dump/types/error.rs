//! Custom error types for the hexfmt crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
///
/// Every variant except `Io` is a configuration-time failure: it is
/// surfaced by [`DumperBuilder::build`](crate::dump::DumperBuilder::build)
/// before a single byte is read. Decode-time anomalies (a short trailing
/// word, an invalid byte sequence under a text encoding) are not errors
/// and are reflected in the output instead.
#[derive(Debug, Error)]
pub enum DumpError {
    /// An error originating from the byte source or the output sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The requested word type name is not in the type registry.
    #[error("Unknown word type: {0:?}")]
    UnknownType(String),

    /// A word size outside the supported set {1, 2, 4, 8}.
    #[error("Unsupported word size: {0} (expected 1, 2, 4, or 8 bytes)")]
    UnsupportedSize(usize),

    /// The base/type combination is semantically invalid (e.g. float words
    /// have no octal or binary rendering).
    #[error("{kind} words cannot be formatted in base {base}")]
    IncompatibleType { kind: &'static str, base: u32 },

    /// The configured numeric base is not one of 16, 10, 8, or 2.
    #[error("Unsupported numeric base: {0} (expected 16, 10, 8, or 2)")]
    UnsupportedBase(u32),

    /// The configured character-column encoding label is not recognized.
    #[error("Unknown text encoding: {0:?}")]
    UnknownEncoding(String),

    /// A style name used in a theme is not in the style table.
    #[error("Unknown style name: {0:?}")]
    UnknownStyle(String),

    /// A highlight pattern failed to compile as a regular expression.
    #[error("Invalid highlight pattern: {0}")]
    BadPattern(#[from] regex::Error),

    /// A structurally invalid configuration value (e.g. zero columns).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A convenience `Result` type alias using the crate's `DumpError` type.
pub type Result<T> = std::result::Result<T, DumpError>;
