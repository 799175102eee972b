//! Binary buffer reader with cursor tracking.

use crate::BufferError;

/// A binary buffer reader over an immutable byte slice.
///
/// The cursor `x` only moves forward and never passes the end of the slice.
/// All multi-byte integers are read big-endian (network order).
///
/// # Example
///
/// ```
/// use bert_buffers::Reader;
///
/// let data = [0x01, 0x02, 0x03];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.u8(), Ok(0x01));
/// assert_eq!(reader.u16(), Ok(0x0203));
/// assert!(reader.u8().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    /// The underlying byte slice.
    pub uint8: &'a [u8],
    /// Current cursor position.
    pub x: usize,
}

impl<'a> Reader<'a> {
    pub fn new(uint8: &'a [u8]) -> Self {
        Self { uint8, x: 0 }
    }

    /// Number of bytes left after the cursor.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.uint8.len() - self.x
    }

    /// Fails unless `n` more bytes are available from the cursor.
    #[inline]
    pub fn ensure(&self, n: usize) -> Result<(), BufferError> {
        let remaining = self.remaining();
        if n > remaining {
            Err(BufferError::EndOfBuffer {
                offset: self.x,
                needed: n,
                remaining,
            })
        } else {
            Ok(())
        }
    }

    #[inline]
    fn take<const N: usize>(&mut self) -> Result<[u8; N], BufferError> {
        self.ensure(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.uint8[self.x..self.x + N]);
        self.x += N;
        Ok(out)
    }

    #[inline]
    pub fn u8(&mut self) -> Result<u8, BufferError> {
        self.take::<1>().map(|b| b[0])
    }

    #[inline]
    pub fn u16(&mut self) -> Result<u16, BufferError> {
        self.take::<2>().map(u16::from_be_bytes)
    }

    #[inline]
    pub fn u32(&mut self) -> Result<u32, BufferError> {
        self.take::<4>().map(u32::from_be_bytes)
    }

    #[inline]
    pub fn i32(&mut self) -> Result<i32, BufferError> {
        self.take::<4>().map(i32::from_be_bytes)
    }

    /// Reads an IEEE-754 binary64 value.
    #[inline]
    pub fn f64(&mut self) -> Result<f64, BufferError> {
        self.take::<8>().map(f64::from_be_bytes)
    }

    /// Returns the next `size` bytes and advances past them.
    pub fn buf(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        self.ensure(size)?;
        let start = self.x;
        self.x += size;
        Ok(&self.uint8[start..self.x])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_big_endian_integers() {
        let data = [0x01, 0x02, 0x03, 0xff, 0xff, 0xff, 0xfe, 0x00, 0x00, 0x01, 0x00];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u8(), Ok(0x01));
        assert_eq!(reader.u16(), Ok(0x0203));
        assert_eq!(reader.i32(), Ok(-2));
        assert_eq!(reader.u32(), Ok(256));
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn f64_is_big_endian_binary64() {
        let data = std::f64::consts::PI.to_be_bytes();
        let mut reader = Reader::new(&data);
        assert_eq!(reader.f64(), Ok(std::f64::consts::PI));
    }

    #[test]
    fn short_read_reports_position_and_keeps_cursor() {
        let data = [0u8; 3];
        let mut reader = Reader::new(&data);
        reader.u8().unwrap();
        assert_eq!(
            reader.u32(),
            Err(BufferError::EndOfBuffer {
                offset: 1,
                needed: 4,
                remaining: 2
            })
        );
        assert_eq!(reader.x, 1);
    }

    #[test]
    fn buf_returns_subslice() {
        let data = [1u8, 2, 3, 4, 5];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.buf(3), Ok([1u8, 2, 3].as_ref()));
        assert_eq!(reader.x, 3);
        assert!(reader.buf(3).is_err());
        assert_eq!(reader.x, 3);
    }

    #[test]
    fn huge_length_does_not_overflow() {
        let data = [0u8; 2];
        let mut reader = Reader::new(&data);
        reader.u8().unwrap();
        assert!(reader.buf(usize::MAX).is_err());
    }
}
