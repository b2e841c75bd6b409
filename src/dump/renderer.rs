//! Rendering assembled rows into aligned text lines.

use std::io::Read;

use super::assembler::RowAssembler;
use super::decoder::WordDecoder;
use super::dumper::Dumper;
use super::reader::ByteReader;
use super::style::Rule;
use super::types::error::Result;
use super::types::models::{Row, RowEvent, Value};

/// Lazy line iterator over one dump operation.
///
/// Yields one formatted line per row event, a `*` line per repeat marker,
/// and, after the data is exhausted, exactly one trailer line holding the
/// final total byte offset. Created by [`Dumper::lines`].
pub struct Lines<'a, R: Read> {
    config: &'a Dumper,
    rows: RowAssembler<WordDecoder<ByteReader<R>>>,
    /// Formatted-string cache for 1-byte word types (256 possible
    /// values); larger types skip it.
    cache: Option<Vec<Option<String>>>,
    done: bool,
}

impl<'a, R: Read> Lines<'a, R> {
    pub(super) fn new(
        config: &'a Dumper,
        rows: RowAssembler<WordDecoder<ByteReader<R>>>,
    ) -> Self {
        let cache = if config.cacheable() {
            Some(vec![None; 256])
        } else {
            None
        };
        Lines { config, rows, cache, done: false }
    }

    /// Total bytes consumed from the source so far.
    pub fn bytes_consumed(&self) -> u64 {
        self.rows.bytes_consumed()
    }

    fn push_styled(&self, line: &mut String, rule: Option<&Rule>, text: &str) {
        match rule {
            Some(rule) => line.push_str(&rule.apply(text)),
            None => line.push_str(text),
        }
    }

    /// Appends one formatted value, going through the cache for 1-byte
    /// types.
    fn push_value(&mut self, field: &mut String, value: Value) {
        let key = match value {
            Value::UInt(v) => v as u8 as usize,
            Value::Int(v) => v as u8 as usize,
            Value::Float(_) => {
                self.config.numeric.format_into(field, value);
                return;
            }
        };

        match &mut self.cache {
            Some(cache) => {
                let entry = &mut cache[key];
                if entry.is_none() {
                    *entry = Some(self.config.numeric.format(value));
                }
                if let Some(text) = entry {
                    field.push_str(text);
                }
            }
            None => self.config.numeric.format_into(field, value),
        }
    }

    fn render_row(&mut self, row: &Row) -> String {
        let value_width = self.config.numeric.width();
        let mut line = String::with_capacity(self.config.line_width());

        let index = self.config.index.format(Value::UInt(row.offset));
        self.push_styled(&mut line, self.config.index_rule(), &index);
        line.push_str("  ");

        let mut field = String::with_capacity(self.config.numeric_field_width);
        for (i, slot) in row.values.iter().enumerate() {
            if i > 0 {
                field.push(' ');
                if let Some(group) = self.config.group_columns {
                    if i % group == 0 {
                        field.push(' ');
                    }
                }
            }
            match slot {
                Some(value) => self.push_value(&mut field, *value),
                // Undecoded trailing word: blank slot, chars only.
                None => field.extend(std::iter::repeat(' ').take(value_width)),
            }
        }

        if self.config.chars.is_some() {
            // Left-justify so a short final row still aligns the char
            // column.
            while field.len() < self.config.numeric_field_width {
                field.push(' ');
            }
        }
        self.push_styled(&mut line, self.config.numeric_rule(), &field);

        if let Some(chars) = &self.config.chars {
            let bytes: Vec<u8> = row.raw.iter().flatten().copied().collect();
            let scrubbed = chars.scrub(&bytes);
            line.push_str("  |");
            self.push_styled(&mut line, self.config.chars_rule(), &scrubbed);
            line.push('|');
        }

        line.push('\n');
        line
    }

    fn render_trailer(&self) -> String {
        let mut line = String::new();
        let index = self.config.index.format(Value::UInt(self.rows.bytes_consumed()));
        self.push_styled(&mut line, self.config.index_rule(), &index);
        line.push('\n');
        line
    }
}

impl<'a, R: Read> Iterator for Lines<'a, R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.rows.next() {
            Some(Ok(RowEvent::Row(row))) => Some(Ok(self.render_row(&row))),
            Some(Ok(RowEvent::Repeat)) => Some(Ok("*\n".to_string())),
            Some(Err(e)) => {
                self.done = true;
                Some(Err(e))
            }
            None => {
                self.done = true;
                Some(Ok(self.render_trailer()))
            }
        }
    }
}
