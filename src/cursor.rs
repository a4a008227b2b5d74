use byteorder::{BigEndian, ByteOrder};

use crate::error::{ParseError, Result};
use crate::parse_err;

/// A monotonic, non-backtracking positional reader over an immutable byte
/// buffer. All multi-byte reads are big-endian, matching the wire format of
/// the Java Object Serialization Stream Protocol.
///
/// Every read that would run past the end of the buffer fails with
/// [`ParseError::PrematureEndOfInput`] instead of panicking.
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Moves the position forward by `n` bytes, returning the position it
    /// was at before advancing.
    pub fn advance(&mut self, n: usize) -> Result<usize> {
        let start = self.pos;
        let end = start.checked_add(n).unwrap_or(usize::MAX);
        if end > self.data.len() {
            return parse_err!(PrematureEndOfInput {
                position: start,
                needed: n,
                available: self.data.len() - start.min(self.data.len())
            });
        }
        self.pos = end;
        Ok(start)
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let start = self.advance(n)?;
        Ok(&self.data[start..start + n])
    }

    pub fn u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn i8(&mut self) -> Result<i8> {
        Ok(self.u8()? as i8)
    }

    pub fn u16be(&mut self) -> Result<u16> {
        Ok(BigEndian::read_u16(self.take(2)?))
    }

    pub fn i16be(&mut self) -> Result<i16> {
        Ok(BigEndian::read_i16(self.take(2)?))
    }

    pub fn u32be(&mut self) -> Result<u32> {
        Ok(BigEndian::read_u32(self.take(4)?))
    }

    pub fn i32be(&mut self) -> Result<i32> {
        Ok(BigEndian::read_i32(self.take(4)?))
    }

    pub fn f32be(&mut self) -> Result<f32> {
        Ok(BigEndian::read_f32(self.take(4)?))
    }

    pub fn f64be(&mut self) -> Result<f64> {
        Ok(BigEndian::read_f64(self.take(8)?))
    }

    /// Returns the next `n` bytes rendered as lowercase hex, zero-padded.
    pub fn hex(&mut self, n: usize) -> Result<String> {
        let bytes = self.take(n)?;
        let mut out = String::with_capacity(n * 2);
        for b in bytes {
            out.push_str(&format!("{:02x}", b));
        }
        Ok(out)
    }

    /// Returns an opaque byte-buffer view of length `n`, copied out of the
    /// input so the returned value tree can outlive the cursor's buffer.
    pub fn slice(&mut self, n: usize) -> Result<Vec<u8>> {
        Ok(self.take(n)?.to_vec())
    }

    /// `utf_short`: a u16 length followed by that many UTF-8 bytes.
    pub fn utf_short(&mut self) -> Result<String> {
        let len = self.u16be()? as usize;
        self.read_utf8(len)
    }

    /// `utf_long`: a u32 high-half (must be zero) followed by a u32 low-half
    /// length and that many UTF-8 bytes.
    pub fn utf_long(&mut self) -> Result<String> {
        let high = self.u32be()?;
        if high != 0 {
            return parse_err!(LongStringOverflow {
                position: self.pos
            });
        }
        let len = self.u32be()? as usize;
        self.read_utf8(len)
    }

    fn read_utf8(&mut self, len: usize) -> Result<String> {
        let start = self.pos;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|_| ParseError::InvalidUtf8 { position: start })
    }
}
