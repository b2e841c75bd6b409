//! Grouping raw bytes into fixed-size words and decoding them.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use super::types::error::{DumpError, Result};
use super::types::models::{DecodedWord, Value};
use super::types::word_type::{Endian, Kind, WordType};

/// Decodes a full word slice into a numeric value.
///
/// `bytes` must be exactly `word.size` long; byte order follows
/// `word.endian` (little: least-significant byte first).
pub fn decode_value(bytes: &[u8], word: &WordType) -> Result<Value> {
    let value = match (word.kind, word.signed) {
        (Kind::Float, _) => match word.size {
            4 => Value::Float(read_f32(bytes, word.endian) as f64),
            8 => Value::Float(read_f64(bytes, word.endian)),
            other => return Err(DumpError::UnsupportedSize(other)),
        },
        (Kind::Int, _) | (Kind::Char, true) => Value::Int(match word.size {
            1 => bytes[0] as i8 as i64,
            2 => read_u16(bytes, word.endian) as i16 as i64,
            4 => read_u32(bytes, word.endian) as i32 as i64,
            8 => read_u64(bytes, word.endian) as i64,
            other => return Err(DumpError::UnsupportedSize(other)),
        }),
        (Kind::UInt, _) | (Kind::Char, false) => Value::UInt(match word.size {
            1 => bytes[0] as u64,
            2 => read_u16(bytes, word.endian) as u64,
            4 => read_u32(bytes, word.endian) as u64,
            8 => read_u64(bytes, word.endian),
            other => return Err(DumpError::UnsupportedSize(other)),
        }),
    };
    Ok(value)
}

fn read_u16(bytes: &[u8], endian: Endian) -> u16 {
    match endian {
        Endian::Little => LittleEndian::read_u16(bytes),
        Endian::Big => BigEndian::read_u16(bytes),
    }
}

fn read_u32(bytes: &[u8], endian: Endian) -> u32 {
    match endian {
        Endian::Little => LittleEndian::read_u32(bytes),
        Endian::Big => BigEndian::read_u32(bytes),
    }
}

fn read_u64(bytes: &[u8], endian: Endian) -> u64 {
    match endian {
        Endian::Little => LittleEndian::read_u64(bytes),
        Endian::Big => BigEndian::read_u64(bytes),
    }
}

fn read_f32(bytes: &[u8], endian: Endian) -> f32 {
    match endian {
        Endian::Little => LittleEndian::read_f32(bytes),
        Endian::Big => BigEndian::read_f32(bytes),
    }
}

fn read_f64(bytes: &[u8], endian: Endian) -> f64 {
    match endian {
        Endian::Little => LittleEndian::read_f64(bytes),
        Endian::Big => BigEndian::read_f64(bytes),
    }
}

/// Groups an incoming byte stream into `word.size`-sized chunks and
/// decodes each into a [`DecodedWord`].
///
/// The final chunk may be shorter than a full word. With `zero_pad` it is
/// extended with trailing zero bytes and decoded normally (the padded
/// bytes are reported as the word's raw bytes); without, it is yielded
/// with `value: None` so the character column can still show its bytes.
pub struct WordDecoder<I> {
    bytes: I,
    word: WordType,
    zero_pad: bool,
    done: bool,
}

impl<I: Iterator<Item = Result<u8>>> WordDecoder<I> {
    pub fn new(bytes: I, word: WordType, zero_pad: bool) -> Self {
        WordDecoder { bytes, word, zero_pad, done: false }
    }
}

impl<I: Iterator<Item = Result<u8>>> Iterator for WordDecoder<I> {
    type Item = Result<DecodedWord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut raw = Vec::with_capacity(self.word.size);
        while raw.len() < self.word.size {
            match self.bytes.next() {
                Some(Ok(byte)) => raw.push(byte),
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                None => break,
            }
        }

        if raw.is_empty() {
            self.done = true;
            return None;
        }

        if raw.len() < self.word.size {
            self.done = true;
            if !self.zero_pad {
                return Some(Ok(DecodedWord { raw, value: None }));
            }
            raw.resize(self.word.size, 0);
        }

        match decode_value(&raw, &self.word) {
            Ok(value) => Some(Ok(DecodedWord { raw, value: Some(value) })),
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
