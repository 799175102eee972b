//! `TermDecoder`: External Term Format (BERT) decoder.
//!
//! Reads the 131 version byte, then decodes exactly one tagged term with a
//! recursive descent over [`TermTag`]. Every length, arity and count read
//! from the wire is checked against the bytes that remain before anything
//! is allocated or sliced.

use std::borrow::Cow;

use bert_buffers::Reader;

use crate::constants::{TermTag, FLOAT_TEXT_LEN, FORMAT_VERSION};
use crate::error::BertError;
use crate::term::Term;

/// Decoder configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Maximum container nesting. The top-level term sits at depth 0.
    pub max_depth: usize,
    /// Fail on unrecognized tags instead of decoding them as an empty list.
    pub strict_tags: bool,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_depth: 512,
            strict_tags: false,
        }
    }
}

/// An unrecognized tag byte that was decoded leniently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownTag {
    pub tag: u8,
    /// Buffer offset of the tag byte.
    pub offset: usize,
}

/// External Term Format decoder.
///
/// One decoder may be reused for many buffers; it keeps no state between
/// calls other than the reports (unknown tags, replaced text) of the most
/// recent call.
#[derive(Debug, Default)]
pub struct TermDecoder {
    options: DecoderOptions,
    unknown: Vec<UnknownTag>,
    replaced_text: Vec<usize>,
}

impl TermDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DecoderOptions) -> Self {
        Self {
            options,
            unknown: Vec::new(),
            replaced_text: Vec::new(),
        }
    }

    /// Unrecognized tags seen by the last decode call, in buffer order.
    pub fn unknown_tags(&self) -> &[UnknownTag] {
        &self.unknown
    }

    /// Offsets of UTF-8 text fields from the last decode call that held
    /// invalid sequences and were decoded with U+FFFD replacements.
    pub fn replaced_text(&self) -> &[usize] {
        &self.replaced_text
    }

    /// Decodes the single term held in `input`. Bytes after the term are
    /// ignored.
    pub fn decode(&mut self, input: &[u8]) -> Result<Term, BertError> {
        self.decode_with_consumed(input).map(|(term, _)| term)
    }

    /// Decodes one term and returns it with the number of bytes consumed,
    /// version byte included.
    pub fn decode_with_consumed(&mut self, input: &[u8]) -> Result<(Term, usize), BertError> {
        self.unknown.clear();
        self.replaced_text.clear();
        let mut r = Reader::new(input);
        let version = r.u8()?;
        if version != FORMAT_VERSION {
            return Err(BertError::Format(version));
        }
        let term = self.read_any(&mut r, 0)?;
        Ok((term, r.x))
    }

    fn read_any(&mut self, r: &mut Reader, depth: usize) -> Result<Term, BertError> {
        if depth > self.options.max_depth {
            return Err(BertError::DepthLimitExceeded(self.options.max_depth));
        }
        let offset = r.x;
        let byte = r.u8()?;
        match TermTag::try_from(byte) {
            Ok(tag) => self.read_tagged(r, tag, depth),
            Err(tag) => self.read_unknown(tag, offset),
        }
    }

    fn read_tagged(&mut self, r: &mut Reader, tag: TermTag, depth: usize) -> Result<Term, BertError> {
        match tag {
            TermTag::SmallInteger => Ok(Term::Integer(r.u8()? as i64)),
            TermTag::Integer => Ok(Term::Integer(r.i32()? as i64)),
            TermTag::FloatText => read_float_text(r),
            TermTag::NewFloat => Ok(Term::Float(r.f64()?)),
            TermTag::Atom => {
                let len = r.u16()? as usize;
                read_latin1(r, len)
            }
            TermTag::SmallAtom => {
                let len = r.u8()? as usize;
                read_latin1(r, len)
            }
            TermTag::AtomUtf8 => {
                let len = r.u16()? as usize;
                self.read_utf8(r, len)
            }
            TermTag::SmallAtomUtf8 => {
                let len = r.u8()? as usize;
                self.read_utf8(r, len)
            }
            TermTag::Binary => {
                let len = r.u32()? as usize;
                self.read_utf8(r, len)
            }
            TermTag::Charlist => {
                let len = r.u16()? as usize;
                Ok(Term::Bytes(r.buf(len)?.to_vec()))
            }
            TermTag::SmallTuple => {
                let arity = r.u8()? as usize;
                self.read_seq(r, arity, depth)
            }
            TermTag::LargeTuple => {
                let arity = r.u32()? as usize;
                self.read_seq(r, arity, depth)
            }
            TermTag::Nil => Ok(Term::List(Vec::new())),
            TermTag::List => {
                let len = r.u32()? as usize;
                // The elements plus the tail term.
                ensure_terms(r, len, 1, 1)?;
                let items = self.read_seq(r, len, depth)?;
                self.read_any(r, depth + 1)?;
                Ok(items)
            }
            TermTag::Map => {
                let count = r.u32()? as usize;
                ensure_terms(r, count, 2, 0)?;
                let mut pairs = Vec::with_capacity(count);
                for _ in 0..count {
                    let key = self.read_any(r, depth + 1)?;
                    let value = self.read_any(r, depth + 1)?;
                    pairs.push((key, value));
                }
                Ok(Term::Map(pairs))
            }
            TermTag::SmallBignum => {
                let len = r.u8()? as usize;
                read_bignum(r, len)
            }
            TermTag::LargeBignum => {
                let len = r.u32()? as usize;
                read_bignum(r, len)
            }
        }
    }

    fn read_seq(&mut self, r: &mut Reader, len: usize, depth: usize) -> Result<Term, BertError> {
        ensure_terms(r, len, 1, 0)?;
        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            items.push(self.read_any(r, depth + 1)?);
        }
        Ok(Term::List(items))
    }

    fn read_utf8(&mut self, r: &mut Reader, len: usize) -> Result<Term, BertError> {
        let offset = r.x;
        let text = String::from_utf8_lossy(r.buf(len)?);
        if let Cow::Owned(_) = text {
            tracing::warn!(offset, len, "invalid UTF-8 in text term, replaced with U+FFFD");
            self.replaced_text.push(offset);
        }
        Ok(Term::Str(text.into_owned()))
    }

    fn read_unknown(&mut self, tag: u8, offset: usize) -> Result<Term, BertError> {
        if self.options.strict_tags {
            return Err(BertError::UnrecognizedTag { tag, offset });
        }
        tracing::warn!(tag, offset, "unrecognized term tag, decoding as empty list");
        self.unknown.push(UnknownTag { tag, offset });
        Ok(Term::List(Vec::new()))
    }
}

/// Fails unless `count` terms of at least `bytes_each` bytes, plus `extra`
/// more terms, could still fit in the buffer.
fn ensure_terms(r: &Reader, count: usize, bytes_each: usize, extra: usize) -> Result<(), BertError> {
    let needed = count.saturating_mul(bytes_each).saturating_add(extra);
    r.ensure(needed)?;
    Ok(())
}

/// `ATOM_EXT` and `SMALL_ATOM_EXT` carry Latin-1; every byte is one `char`.
fn read_latin1(r: &mut Reader, len: usize) -> Result<Term, BertError> {
    Ok(Term::Str(r.buf(len)?.iter().map(|&b| b as char).collect()))
}

/// Fixed-width `%.20e` text, NUL padded. The text up to the first NUL must
/// parse as an `f64` in full; trailing garbage is `InvalidFloat`.
fn read_float_text(r: &mut Reader) -> Result<Term, BertError> {
    let raw = r.buf(FLOAT_TEXT_LEN)?;
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    let text = String::from_utf8_lossy(&raw[..end]);
    let text = text.trim();
    text.parse::<f64>()
        .map(Term::Float)
        .map_err(|_| BertError::InvalidFloat(text.to_string()))
}

/// Sign byte followed by `len` magnitude bytes, least significant first.
///
/// Values outside the `i128` range decode to a (lossy) `Term::Float`.
fn read_bignum(r: &mut Reader, len: usize) -> Result<Term, BertError> {
    r.ensure(len.saturating_add(1))?;
    let negative = r.u8()? != 0;
    let digits = r.buf(len)?;
    let exact = digits.iter().rev().try_fold(0u128, |acc, &digit| {
        acc.checked_mul(256)?.checked_add(digit as u128)
    });
    let value = exact.and_then(|magnitude| {
        if !negative {
            i128::try_from(magnitude).ok()
        } else if magnitude == i128::MIN.unsigned_abs() {
            Some(i128::MIN)
        } else {
            i128::try_from(magnitude).ok().map(|m| -m)
        }
    });
    Ok(match value {
        Some(value) => match i64::try_from(value) {
            Ok(small) => Term::Integer(small),
            Err(_) => Term::BigInt(value),
        },
        None => {
            let magnitude = digits.iter().rev().fold(0f64, |acc, &d| acc * 256.0 + d as f64);
            Term::Float(if negative { -magnitude } else { magnitude })
        }
    })
}
