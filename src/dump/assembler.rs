//! Grouping decoded words into rows and collapsing repeated rows.

use super::types::error::Result;
use super::types::models::{DecodedWord, Row, RowEvent};

/// Buffers decoded words into rows of `columns` words, tracking the
/// running byte offset, and (unless disabled) collapses consecutive
/// duplicate rows into a single [`RowEvent::Repeat`] marker.
///
/// Duplicate detection compares one row of look-back by content (values
/// and raw bytes), never by offset. The marker is emitted when a run
/// starts; later rows of the same run are swallowed, so a run ending at
/// stream end needs no flushing. The very first row is never a repeat.
pub struct RowAssembler<I> {
    words: I,
    columns: usize,
    offset: u64,
    collapse: bool,
    /// Content of the last row emitted as-is; the comparison target.
    previous: Option<Row>,
    in_repeat: bool,
    done: bool,
}

impl<I: Iterator<Item = Result<DecodedWord>>> RowAssembler<I> {
    /// `base_offset` seeds the index column (it does not skip input; the
    /// reader already handled any skip).
    pub fn new(words: I, columns: usize, collapse: bool, base_offset: u64) -> Self {
        RowAssembler {
            words,
            columns,
            offset: base_offset,
            collapse,
            previous: None,
            in_repeat: false,
            done: false,
        }
    }

    /// Total bytes consumed so far, including rows swallowed by repeat
    /// collapsing. After exhaustion this is the dump's final offset.
    pub fn bytes_consumed(&self) -> u64 {
        self.offset
    }

    /// Pulls up to `columns` words into one row. `Ok(None)` means the
    /// word stream is exhausted.
    fn next_row(&mut self) -> Result<Option<Row>> {
        let mut values = Vec::with_capacity(self.columns);
        let mut raw = Vec::with_capacity(self.columns);

        while values.len() < self.columns {
            match self.words.next() {
                Some(Ok(word)) => {
                    values.push(word.value);
                    raw.push(word.raw);
                }
                Some(Err(e)) => return Err(e),
                None => break,
            }
        }

        if values.is_empty() {
            return Ok(None);
        }

        let row = Row { offset: self.offset, values, raw };
        self.offset += row.byte_len() as u64;
        Ok(Some(row))
    }
}

impl<I: Iterator<Item = Result<DecodedWord>>> Iterator for RowAssembler<I> {
    type Item = Result<RowEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let row = match self.next_row() {
                Ok(Some(row)) => row,
                Ok(None) => {
                    self.done = true;
                    return None;
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            };

            if self.collapse {
                if let Some(previous) = &self.previous {
                    if previous.same_content(&row) {
                        if self.in_repeat {
                            // Still inside a run; swallow and keep pulling.
                            continue;
                        }
                        self.in_repeat = true;
                        return Some(Ok(RowEvent::Repeat));
                    }
                }
                self.in_repeat = false;
                self.previous = Some(row.clone());
            }

            return Some(Ok(RowEvent::Row(row)));
        }
    }
}
