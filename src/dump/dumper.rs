//! Dump configuration and the top-level entry points.

use std::io::{Read, Write};

use log::{debug, info};

use super::assembler::RowAssembler;
use super::chars::{parse_encoding, CharFormatter};
use super::decoder::WordDecoder;
use super::numeric::{Base, NumericFormatter};
use super::reader::ByteReader;
use super::renderer::Lines;
use super::style::{Rule, Theme};
use super::types::error::{DumpError, Result};
use super::types::word_type::{Endian, Kind, WordType};

/// A fully resolved dump configuration.
///
/// Built once from a [`DumperBuilder`]; every option (type registry
/// lookup, base compatibility, encoding, styles) is validated before any
/// byte is read, so the pipeline itself only ever fails on I/O. A
/// `Dumper` is immutable and can drive any number of dump operations.
#[derive(Debug)]
pub struct Dumper {
    word: WordType,
    columns: usize,
    base: Base,
    zero_pad: bool,
    repeating: bool,
    skip: u64,
    length: Option<u64>,
    pub(super) group_columns: Option<usize>,
    pub(super) numeric: NumericFormatter,
    pub(super) index: NumericFormatter,
    pub(super) chars: Option<CharFormatter>,
    theme: Option<Theme>,
    /// Width of a full numeric field: `columns` values plus separators.
    pub(super) numeric_field_width: usize,
}

impl Dumper {
    pub fn builder() -> DumperBuilder {
        DumperBuilder::new()
    }

    pub fn word_type(&self) -> &WordType {
        &self.word
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn base(&self) -> Base {
        self.base
    }

    /// 1-byte word types are cacheable: at most 256 distinct formatted
    /// strings per dump.
    pub(super) fn cacheable(&self) -> bool {
        self.word.size == 1 && self.word.kind != Kind::Float
    }

    /// Rough per-line capacity hint for the renderer.
    pub(super) fn line_width(&self) -> usize {
        self.index.width() + self.numeric_field_width + self.columns * self.word.size + 8
    }

    pub(super) fn index_rule(&self) -> Option<&Rule> {
        self.theme.as_ref().and_then(|t| t.index.as_ref())
    }

    pub(super) fn numeric_rule(&self) -> Option<&Rule> {
        self.theme.as_ref().and_then(|t| t.numeric.as_ref())
    }

    pub(super) fn chars_rule(&self) -> Option<&Rule> {
        self.theme.as_ref().and_then(|t| t.chars.as_ref())
    }

    /// Returns the lazy line iterator for one pass over `source`.
    ///
    /// The source is consumed byte-at-a-time; restarting a dump requires a
    /// fresh source. Lines come out in order: data rows, `*` repeat
    /// markers, and one final line holding the total byte offset.
    pub fn lines<R: Read>(&self, source: R) -> Lines<'_, R> {
        debug!(
            "Starting dump: {} x{} columns, base {}",
            self.word.kind.name(),
            self.columns,
            self.base.radix()
        );
        let reader = ByteReader::new(source, self.skip, self.length);
        let decoder = WordDecoder::new(reader, self.word, self.zero_pad);
        let rows = RowAssembler::new(decoder, self.columns, !self.repeating, 0);
        Lines::new(self, rows)
    }

    /// Dumps `source` into `sink` and returns the total bytes consumed.
    ///
    /// # Errors
    /// Propagates source read errors and sink write errors unmodified.
    pub fn dump<R: Read, W: Write>(&self, source: R, sink: &mut W) -> Result<u64> {
        let mut lines = self.lines(source);
        for line in &mut lines {
            sink.write_all(line?.as_bytes())?;
        }
        Ok(lines.bytes_consumed())
    }
}

/// Builder for [`Dumper`] configurations.
///
/// All validation is deferred to [`build`](DumperBuilder::build), which
/// fails fast on any invalid combination before data is touched.
#[derive(Debug, Clone)]
pub struct DumperBuilder {
    word_type: String,
    columns: Option<usize>,
    base: Option<u32>,
    index_base: u32,
    group_columns: Option<usize>,
    zero_pad: bool,
    repeating: bool,
    chars_column: bool,
    encoding: Option<String>,
    skip: u64,
    length: Option<u64>,
    theme: Option<Theme>,
}

impl Default for DumperBuilder {
    fn default() -> Self {
        DumperBuilder {
            word_type: "byte".to_string(),
            columns: None,
            base: None,
            index_base: 16,
            group_columns: None,
            zero_pad: false,
            repeating: false,
            chars_column: true,
            encoding: None,
            skip: 0,
            length: None,
            theme: None,
        }
    }
}

impl DumperBuilder {
    pub fn new() -> Self {
        DumperBuilder::default()
    }

    /// Selects the word type by registry name (default `"byte"`).
    pub fn word_type(mut self, name: &str) -> Self {
        self.word_type = name.to_string();
        self
    }

    /// Words per row. Defaults to `16 / word size`.
    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Numeric base: 16, 10, 8, or 2. Defaults to 16, or 10 for float and
    /// char types.
    pub fn base(mut self, radix: u32) -> Self {
        self.base = Some(radix);
        self
    }

    /// Base for the offset column (default 16, independent of the data
    /// base).
    pub fn index_base(mut self, radix: u32) -> Self {
        self.index_base = radix;
        self
    }

    /// Inserts an extra separating space every `group` numeric columns.
    pub fn group_columns(mut self, group: usize) -> Self {
        self.group_columns = Some(group);
        self
    }

    /// Zero-pads a trailing partial word so it still decodes.
    pub fn zero_pad(mut self, enable: bool) -> Self {
        self.zero_pad = enable;
        self
    }

    /// Shows every row instead of collapsing repeats.
    pub fn repeating(mut self, enable: bool) -> Self {
        self.repeating = enable;
        self
    }

    /// Enables or disables the `|...|` character column. Forced off for
    /// char/uchar word types regardless of this setting.
    pub fn chars_column(mut self, enable: bool) -> Self {
        self.chars_column = enable;
        self
    }

    /// Text encoding for character-column scrubbing; without one, bytes
    /// outside printable ASCII become `.`.
    pub fn encoding(mut self, label: &str) -> Self {
        self.encoding = Some(label.to_string());
        self
    }

    /// Bytes to consume and discard before the first dumped byte.
    pub fn skip(mut self, bytes: u64) -> Self {
        self.skip = bytes;
        self
    }

    /// Maximum number of bytes to read.
    pub fn length(mut self, bytes: u64) -> Self {
        self.length = Some(bytes);
        self
    }

    /// Per-column styling rules.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Resolves every option into a ready-to-run [`Dumper`].
    ///
    /// # Errors
    /// - `UnknownType` for unrecognized type names
    /// - `UnsupportedBase` for bases outside {16, 10, 8, 2}
    /// - `IncompatibleType` for float words in base 8 or 2
    /// - `UnknownEncoding` for unrecognized encoding labels
    /// - `InvalidConfig` for zero `columns` or `group_columns`
    pub fn build(self) -> Result<Dumper> {
        let word = WordType::lookup(&self.word_type)?;

        let base = match self.base {
            Some(radix) => Base::from_radix(radix)?,
            None => match word.kind {
                Kind::Float | Kind::Char => Base::Dec,
                Kind::Int | Kind::UInt => Base::Hex,
            },
        };
        let numeric = NumericFormatter::new(&word, base)?;

        // The offset column is formatted as a 4-byte unsigned word in the
        // index base.
        let index_type = WordType {
            kind: Kind::UInt,
            size: 4,
            signed: false,
            endian: Endian::native(),
        };
        let index = NumericFormatter::new(&index_type, Base::from_radix(self.index_base)?)?;

        let columns = match self.columns {
            Some(0) => {
                return Err(DumpError::InvalidConfig("columns must be at least 1".to_string()))
            }
            Some(columns) => columns,
            None => (16 / word.size).max(1),
        };
        if self.group_columns == Some(0) {
            return Err(DumpError::InvalidConfig(
                "group_columns must be at least 1".to_string(),
            ));
        }

        // Char-typed dumps show characters inline; the side column is
        // forced off.
        let chars = if word.kind == Kind::Char || !self.chars_column {
            None
        } else {
            let encoding = self.encoding.as_deref().map(parse_encoding).transpose()?;
            Some(CharFormatter::new(encoding))
        };

        let numeric_field_width = field_width(columns, numeric.width(), self.group_columns);

        info!(
            "Dump configured: type={}, columns={}, base={}, chars={}",
            self.word_type,
            columns,
            base.radix(),
            chars.is_some()
        );

        Ok(Dumper {
            word,
            columns,
            base,
            zero_pad: self.zero_pad,
            repeating: self.repeating,
            skip: self.skip,
            length: self.length,
            group_columns: self.group_columns,
            numeric,
            index,
            chars,
            theme: self.theme,
            numeric_field_width,
        })
    }
}

/// Width of a full row's numeric field: `columns` fixed-width values, one
/// space between neighbors, and an extra space at each group boundary.
fn field_width(columns: usize, value_width: usize, group: Option<usize>) -> usize {
    let separators = columns.saturating_sub(1);
    let group_extras = match group {
        Some(group) => columns.saturating_sub(1) / group,
        None => 0,
    };
    columns * value_width + separators + group_extras
}
