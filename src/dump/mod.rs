//! Core dump pipeline module.
//!
//! Data flows through a chain of lazy, pull-based stages:
//!
//! ```text
//! byte source → ByteReader → WordDecoder → RowAssembler → Lines
//!                                              (NumericFormatter,
//!                                               CharFormatter, Theme)
//! ```
//!
//! Each stage is an `Iterator` yielding `Result` items; errors from the
//! byte source propagate through the chain unmodified.

pub mod types;

pub mod assembler;
pub mod chars;
pub mod decoder;
pub mod dumper;
pub mod numeric;
pub mod reader;
pub mod renderer;
pub mod style;

pub use dumper::{Dumper, DumperBuilder};
pub use numeric::{Base, NumericFormatter};
pub use renderer::Lines;
pub use style::{Rule, Style, Theme};
pub use types::error::{DumpError, Result};
pub use types::models::{DecodedWord, Row, RowEvent, Value};
pub use types::word_type::{Endian, Kind, WordType};
