//! Fixed-width numeric formatting.
//!
//! A [`NumericFormatter`] is resolved once at configuration time from the
//! word type and target base into a single formatting strategy; per-value
//! formatting never re-inspects the type. The formatted width is constant
//! for every valid value of the type, which is what lets the line renderer
//! align columns without measuring anything.

use std::fmt::Write;

use super::types::error::{DumpError, Result};
use super::types::models::Value;
use super::types::word_type::{Kind, WordType};

/// Numeral system used to render a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base {
    Hex,
    Dec,
    Oct,
    Bin,
}

impl Base {
    /// Maps a numeric radix to a `Base`.
    pub fn from_radix(radix: u32) -> Result<Self> {
        match radix {
            16 => Ok(Base::Hex),
            10 => Ok(Base::Dec),
            8 => Ok(Base::Oct),
            2 => Ok(Base::Bin),
            other => Err(DumpError::UnsupportedBase(other)),
        }
    }

    pub fn radix(&self) -> u32 {
        match self {
            Base::Hex => 16,
            Base::Dec => 10,
            Base::Oct => 8,
            Base::Bin => 2,
        }
    }
}

/// Unsigned magnitude width for an integer word of `size` bytes.
fn int_width(base: Base, size: usize) -> Result<usize> {
    let width = match (base, size) {
        (Base::Hex, 1) => 2,
        (Base::Hex, 2) => 4,
        (Base::Hex, 4) => 8,
        (Base::Hex, 8) => 16,
        (Base::Dec, 1) => 3,
        (Base::Dec, 2) => 5,
        (Base::Dec, 4) => 10,
        (Base::Dec, 8) => 20,
        (Base::Oct, 1) => 3,
        (Base::Oct, 2) => 6,
        (Base::Oct, 4) => 11,
        (Base::Oct, 8) => 22,
        (Base::Bin, 1) => 8,
        (Base::Bin, 2) => 16,
        (Base::Bin, 4) => 32,
        (Base::Bin, 8) => 64,
        (_, other) => return Err(DumpError::UnsupportedSize(other)),
    };
    Ok(width)
}

/// Magnitude width for a float word, or the incompatible-base error.
fn float_width(base: Base, size: usize) -> Result<usize> {
    match (base, size) {
        (Base::Oct, _) | (Base::Bin, _) => Err(DumpError::IncompatibleType {
            kind: "float",
            base: base.radix(),
        }),
        (Base::Hex, 4) | (Base::Hex, 8) => Ok(20),
        (Base::Dec, 4) => Ok(12),
        (Base::Dec, 8) => Ok(20),
        (_, other) => Err(DumpError::UnsupportedSize(other)),
    }
}

/// Formatting strategy, fixed at construction.
#[derive(Debug, Clone, Copy)]
enum Strategy {
    /// Left-zero-padded unsigned magnitude.
    Unsigned,
    /// `' '`/`'-'` sign column plus left-zero-padded magnitude.
    Signed,
    /// Literal character / escape sequence with numeric fallback.
    CharOrInt { signed: bool },
    /// Scientific notation with a fixed fractional digit count.
    Exponential { frac: usize },
    /// Hexadecimal floating point with a fixed mantissa digit count.
    HexFloat { mant: usize },
}

/// Formats decoded values into fixed-width strings for one `(type, base)`
/// combination.
#[derive(Debug, Clone)]
pub struct NumericFormatter {
    base: Base,
    /// Magnitude width, excluding the sign column.
    digits: usize,
    /// Total formatted width, including the sign column when signed.
    width: usize,
    strategy: Strategy,
}

impl NumericFormatter {
    /// Resolves the formatter for a word type and base.
    ///
    /// # Errors
    /// - `IncompatibleType` for float words in base 8 or 2
    /// - `UnsupportedSize` for word sizes outside {1, 2, 4, 8}
    pub fn new(word: &WordType, base: Base) -> Result<Self> {
        let (digits, strategy) = match word.kind {
            Kind::Float => {
                let digits = float_width(base, word.size)?;
                let strategy = match base {
                    Base::Dec => Strategy::Exponential {
                        frac: if word.size == 4 { 6 } else { 14 },
                    },
                    // Only Hex remains; float_width rejected Oct and Bin.
                    _ => Strategy::HexFloat {
                        mant: if word.size == 4 { 6 } else { 13 },
                    },
                };
                (digits, strategy)
            }
            Kind::Char => (
                int_width(base, word.size)?,
                Strategy::CharOrInt { signed: word.signed },
            ),
            Kind::Int => (int_width(base, word.size)?, Strategy::Signed),
            Kind::UInt => (int_width(base, word.size)?, Strategy::Unsigned),
        };

        let width = digits + usize::from(word.signed);
        Ok(NumericFormatter { base, digits, width, strategy })
    }

    /// Total width of every string this formatter produces.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn format(&self, value: Value) -> String {
        let mut out = String::with_capacity(self.width);
        self.format_into(&mut out, value);
        out
    }

    /// Appends the fixed-width rendering of `value` to `out`.
    pub fn format_into(&self, out: &mut String, value: Value) {
        match self.strategy {
            Strategy::Unsigned => self.push_magnitude(out, as_magnitude(value)),
            Strategy::Signed => self.push_signed(out, value),
            Strategy::CharOrInt { signed } => self.push_char_or_int(out, value, signed),
            Strategy::Exponential { frac } => {
                self.push_float(out, value, format_exponential(as_f64(value).abs(), frac));
            }
            Strategy::HexFloat { mant } => {
                self.push_float(out, value, format_hex_float(as_f64(value).abs(), mant));
            }
        }
    }

    fn push_magnitude(&self, out: &mut String, magnitude: u64) {
        let digits = self.digits;
        let _ = match self.base {
            Base::Hex => write!(out, "{:0digits$x}", magnitude),
            Base::Dec => write!(out, "{:0digits$}", magnitude),
            Base::Oct => write!(out, "{:0digits$o}", magnitude),
            Base::Bin => write!(out, "{:0digits$b}", magnitude),
        };
    }

    fn push_signed(&self, out: &mut String, value: Value) {
        let (sign, magnitude) = match value {
            Value::Int(v) => (v < 0, v.unsigned_abs()),
            Value::UInt(v) => (false, v),
            Value::Float(v) => (v.is_sign_negative(), v.abs() as u64),
        };
        out.push(if sign { '-' } else { ' ' });
        self.push_magnitude(out, magnitude);
    }

    fn push_char_or_int(&self, out: &mut String, value: Value, signed: bool) {
        let byte = match value {
            Value::UInt(v) => v as u8,
            Value::Int(v) => v as u8,
            Value::Float(v) => v as u8,
        };

        if (0x20..=0x7e).contains(&byte) {
            let _ = write!(out, "{:>width$}", byte as char, width = self.width);
        } else if let Some(escape) = escape_sequence(byte) {
            let _ = write!(out, "{:>width$}", escape, width = self.width);
        } else if signed {
            self.push_signed(out, value);
        } else {
            self.push_magnitude(out, as_magnitude(value));
        }
    }

    fn push_float(&self, out: &mut String, value: Value, magnitude: String) {
        out.push(if as_f64(value).is_sign_negative() { '-' } else { ' ' });
        let _ = write!(out, "{:>digits$}", magnitude, digits = self.digits);
    }
}

fn as_magnitude(value: Value) -> u64 {
    match value {
        Value::UInt(v) => v,
        Value::Int(v) => v as u64,
        Value::Float(v) => v as u64,
    }
}

fn as_f64(value: Value) -> f64 {
    match value {
        Value::Float(v) => v,
        Value::Int(v) => v as f64,
        Value::UInt(v) => v as f64,
    }
}

/// Escape sequences for the control bytes that render symbolically in
/// char-or-int mode. All other non-printable bytes fall back to numeric.
fn escape_sequence(byte: u8) -> Option<&'static str> {
    match byte {
        0x00 => Some("\\0"),
        0x07 => Some("\\a"),
        0x08 => Some("\\b"),
        0x09 => Some("\\t"),
        0x0a => Some("\\n"),
        0x0b => Some("\\v"),
        0x0c => Some("\\f"),
        0x0d => Some("\\r"),
        _ => None,
    }
}

/// Renders a non-negative float in scientific notation: one leading digit,
/// `frac` fractional digits, and a signed two-digit-minimum exponent
/// (`1.500000e+02`).
fn format_exponential(magnitude: f64, frac: usize) -> String {
    if magnitude.is_nan() {
        return "NaN".to_string();
    }
    if magnitude.is_infinite() {
        return "inf".to_string();
    }

    let rendered = format!("{:.*e}", frac, magnitude);
    // `{:e}` produces a bare exponent ("1.500000e2"); rewrite it with an
    // explicit sign and two-digit minimum.
    match rendered.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(rest) => ('-', rest),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => rendered,
    }
}

/// Renders a non-negative float in hexadecimal floating-point notation
/// (`0x1.99999ap+0`), with `mant` mantissa hex digits.
fn format_hex_float(magnitude: f64, mant: usize) -> String {
    if magnitude.is_nan() {
        return "NaN".to_string();
    }
    if magnitude.is_infinite() {
        return "inf".to_string();
    }

    let bits = magnitude.to_bits();
    let exp_bits = ((bits >> 52) & 0x7ff) as i64;
    let mantissa = bits & 0x000f_ffff_ffff_ffff;

    // 52 mantissa bits as 13 hex digits, truncated to the requested count.
    // A value decoded from 4 bytes occupies only the leading digits, so
    // truncation is exact.
    let full = format!("{:013x}", mantissa);
    let digits = &full[..mant.min(full.len())];

    let (lead, exponent) = if exp_bits == 0 {
        // Zero and subnormals share the 0x0. prefix.
        (0, if mantissa == 0 { 0 } else { -1022 })
    } else {
        (1, exp_bits - 1023)
    };

    format!("0x{}.{}p{:+}", lead, digits, exponent)
}
