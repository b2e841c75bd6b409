//! Lazy byte reading with skip and length windowing.

use std::io::{Bytes, Read};

use super::types::error::Result;

/// Pulls bytes one at a time from any [`Read`] source, optionally
/// discarding a leading `skip` and capping the yield at `limit` bytes.
///
/// Single pass: the reader is exhausted once iteration ends, and restart
/// requires a fresh source. I/O errors surface as `Err` items and end the
/// iteration.
pub struct ByteReader<R: Read> {
    source: Bytes<R>,
    skip: u64,
    remaining: Option<u64>,
    skipped: bool,
}

impl<R: Read> ByteReader<R> {
    pub fn new(source: R, skip: u64, limit: Option<u64>) -> Self {
        ByteReader {
            source: source.bytes(),
            skip,
            remaining: limit,
            skipped: false,
        }
    }

    /// Consumes and discards the leading `skip` bytes.
    ///
    /// A source shorter than the skip is not an error; the reader simply
    /// yields nothing afterwards.
    fn discard_skip(&mut self) -> Result<()> {
        for _ in 0..self.skip {
            match self.source.next() {
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            }
        }
        Ok(())
    }
}

impl<R: Read> Iterator for ByteReader<R> {
    type Item = Result<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.skipped {
            self.skipped = true;
            if let Err(e) = self.discard_skip() {
                self.remaining = Some(0);
                return Some(Err(e));
            }
        }

        if self.remaining == Some(0) {
            return None;
        }

        match self.source.next() {
            Some(Ok(byte)) => {
                if let Some(n) = self.remaining.as_mut() {
                    *n -= 1;
                }
                Some(Ok(byte))
            }
            Some(Err(e)) => {
                self.remaining = Some(0);
                Some(Err(e.into()))
            }
            None => None,
        }
    }
}
