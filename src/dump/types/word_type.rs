//! Scalar word types and the named type registry.
//!
//! A [`WordType`] describes how a fixed-size slice of bytes is decoded into
//! one numeric value: its byte width, signedness, numeric kind, and byte
//! order. Instances are created once from [`WordType::lookup`] at
//! configuration time and are immutable afterwards.

use super::error::{DumpError, Result};

/// Numeric kind of a decoded word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Two's-complement signed integer.
    Int,
    /// Unsigned integer.
    UInt,
    /// IEEE-754 floating point (4 or 8 bytes).
    Float,
    /// One-byte value rendered char-or-int (literal character, escape
    /// sequence, or numeric fallback).
    Char,
}

impl Kind {
    /// Human-readable kind name, used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Int => "int",
            Kind::UInt => "uint",
            Kind::Float => "float",
            Kind::Char => "char",
        }
    }
}

/// Byte order of a multi-byte word.
///
/// There is no `Native` variant: native-endian aliases are resolved to the
/// actual host byte order when the type is looked up, so decode never has
/// to re-inspect the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

impl Endian {
    /// The host byte order.
    pub fn native() -> Self {
        if cfg!(target_endian = "big") {
            Endian::Big
        } else {
            Endian::Little
        }
    }
}

/// An immutable description of one scalar word type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordType {
    pub kind: Kind,
    /// Byte width, one of {1, 2, 4, 8}.
    pub size: usize,
    pub signed: bool,
    /// Resolved byte order. Meaningless (but stored) for 1-byte kinds.
    pub endian: Endian,
}

impl WordType {
    fn new(kind: Kind, size: usize, signed: bool, endian: Endian) -> Self {
        WordType { kind, size, signed, endian }
    }

    /// Validates that `size` is a decodable word width.
    pub fn check_size(size: usize) -> Result<()> {
        match size {
            1 | 2 | 4 | 8 => Ok(()),
            other => Err(DumpError::UnsupportedSize(other)),
        }
    }

    /// Resolves a named type alias to a canonical `WordType`.
    ///
    /// Multi-byte names accept `_le`, `_be`, and `_ne` suffixes; a bare
    /// name (or `_ne`) resolves to the host byte order. One-byte names
    /// take no suffix.
    ///
    /// # Errors
    /// Returns `DumpError::UnknownType` for unrecognized names.
    pub fn lookup(name: &str) -> Result<Self> {
        let (stem, endian) = split_endian(name);

        let ty = match stem {
            "byte" | "uint8" => Some((Kind::UInt, 1, false)),
            "int8" => Some((Kind::Int, 1, true)),
            "char" => Some((Kind::Char, 1, true)),
            "uchar" => Some((Kind::Char, 1, false)),

            "short" | "int16" => Some((Kind::Int, 2, true)),
            "ushort" | "uint16" => Some((Kind::UInt, 2, false)),

            "int" | "int32" => Some((Kind::Int, 4, true)),
            "uint" | "uint32" => Some((Kind::UInt, 4, false)),

            "long" | "longlong" | "int64" => Some((Kind::Int, 8, true)),
            "ulong" | "ulonglong" | "uint64" => Some((Kind::UInt, 8, false)),

            "float" | "float32" => Some((Kind::Float, 4, true)),
            "double" | "float64" => Some((Kind::Float, 8, true)),

            _ => None,
        };

        match ty {
            // Endian suffixes are meaningless on 1-byte types.
            Some((_, 1, _)) if endian_suffix(name) => {
                Err(DumpError::UnknownType(name.to_string()))
            }
            Some((kind, size, signed)) => Ok(Self::new(kind, size, signed, endian)),
            None => Err(DumpError::UnknownType(name.to_string())),
        }
    }
}

fn endian_suffix(name: &str) -> bool {
    name.ends_with("_le") || name.ends_with("_be") || name.ends_with("_ne")
}

/// Strips a trailing endian suffix, resolving it to a concrete byte order.
fn split_endian(name: &str) -> (&str, Endian) {
    if let Some(stem) = name.strip_suffix("_le") {
        (stem, Endian::Little)
    } else if let Some(stem) = name.strip_suffix("_be") {
        (stem, Endian::Big)
    } else if let Some(stem) = name.strip_suffix("_ne") {
        (stem, Endian::native())
    } else {
        (name, Endian::native())
    }
}
