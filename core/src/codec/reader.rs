use crate::codec::error::{DecodeError, DecodeErrorKind};
use crate::codec::half::f16_bits_to_f64;
use crate::types::{Width, discriminant_width};
use tracing::warn;

/// Little-endian cursor over a borrowed byte buffer.
///
/// Every read checks the remaining length first and fails with
/// [`DecodeErrorKind::UnexpectedEof`] instead of panicking. A failed read
/// leaves the cursor where it was.
#[derive(Debug, Clone)]
pub struct ByteReader<'b> {
    buf: &'b [u8],
    pos: usize,
}

impl<'b> ByteReader<'b> {
    pub fn new(buf: &'b [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Start reading at `pos`. A position past the end is allowed; reads
    /// from it fail.
    pub fn at(buf: &'b [u8], pos: usize) -> Self {
        Self { buf, pos }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn eof(&self, needed: usize) -> DecodeError {
        DecodeError::new(
            DecodeErrorKind::UnexpectedEof {
                needed,
                available: self.remaining(),
            },
            self.pos,
        )
    }

    /// Take the next `n` bytes.
    pub fn take(&mut self, n: usize) -> Result<&'b [u8], DecodeError> {
        let end = self.pos.checked_add(n).ok_or_else(|| self.eof(n))?;
        let bytes = self.buf.get(self.pos..end).ok_or_else(|| self.eof(n))?;
        self.pos = end;
        Ok(bytes)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Decode a bool (1 byte, any nonzero value is true).
    pub fn read_bool(&mut self) -> Result<bool, DecodeError> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.array::<1>()?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        Ok(u16::from_le_bytes(self.array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        Ok(u32::from_le_bytes(self.array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64, DecodeError> {
        Ok(u64::from_le_bytes(self.array()?))
    }

    pub fn read_i8(&mut self) -> Result<i8, DecodeError> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_i16(&mut self) -> Result<i16, DecodeError> {
        Ok(i16::from_le_bytes(self.array()?))
    }

    pub fn read_i32(&mut self) -> Result<i32, DecodeError> {
        Ok(i32::from_le_bytes(self.array()?))
    }

    pub fn read_i64(&mut self) -> Result<i64, DecodeError> {
        Ok(i64::from_le_bytes(self.array()?))
    }

    /// Read an unsigned integer of the given width, zero-extended.
    pub fn read_uint(&mut self, width: Width) -> Result<u64, DecodeError> {
        let bytes = self.take(width.bytes())?;
        let mut out = [0u8; 8];
        out[..bytes.len()].copy_from_slice(bytes);
        Ok(u64::from_le_bytes(out))
    }

    /// Read a two's-complement integer of the given width, sign-extended.
    pub fn read_int(&mut self, width: Width) -> Result<i64, DecodeError> {
        let raw = self.read_uint(width)?;
        let shift = 64 - width.bits();
        Ok(((raw << shift) as i64) >> shift)
    }

    pub fn read_f16(&mut self) -> Result<f64, DecodeError> {
        Ok(f16_bits_to_f64(self.read_u16()?))
    }

    pub fn read_f32(&mut self) -> Result<f32, DecodeError> {
        Ok(f32::from_le_bytes(self.array()?))
    }

    pub fn read_f64(&mut self) -> Result<f64, DecodeError> {
        Ok(f64::from_le_bytes(self.array()?))
    }

    /// Read a NUL-terminated UTF-8 string and step past the terminator.
    ///
    /// A string needs at least one byte. When no terminator is found the
    /// rest of the buffer is the string, unless `strict` is set.
    pub fn read_cstr(&mut self, strict: bool) -> Result<String, DecodeError> {
        let start = self.pos;
        let rest = self.buf.get(start..).unwrap_or_default();
        if rest.is_empty() {
            return Err(self.eof(1));
        }

        let (bytes, consumed) = match rest.iter().position(|&b| b == 0) {
            Some(end) => (&rest[..end], end + 1),
            None if strict => {
                return Err(DecodeError::new(
                    DecodeErrorKind::UnterminatedString,
                    start,
                ));
            }
            None => {
                warn!(position = start, len = rest.len(), "String ends at end of buffer");
                (rest, rest.len())
            }
        };

        let s = core::str::from_utf8(bytes)
            .map_err(|_| DecodeError::new(DecodeErrorKind::InvalidUtf8, start))?;
        self.pos += consumed;
        Ok(s.to_string())
    }

    /// Read an enum discriminant sized for `variant_count` variants.
    pub fn read_discriminant(&mut self, variant_count: usize) -> Result<u64, DecodeError> {
        self.read_uint(discriminant_width(variant_count as u64))
    }
}
