//! Variable-length integer encoding.
//!
//! Unsigned quantities are stored in 7-bit groups, least significant
//! group first, one byte per group; every byte except the last has its
//! high bit set. Values 0..=0x7f therefore occupy a single byte.
//!
//! ```text
//! 0x00           =   0x00
//! 0x7f           =   0x7f
//! 0x80 0x01      =   0x80
//! 0xff 0x7f      = 0x3fff
//! 0x80 0x80 0x01 = 0x4000
//! ```

use std::io::{Read, Write};

use crate::error::ArchiveError;

/// Writes an unsigned quantity in variable-length form.
pub fn write_unsigned<W: Write>(w: &mut W, mut val: u64) -> Result<(), ArchiveError> {
    while val >= 0x80 {
        w.write_all(&[(val as u8 & 0x7f) | 0x80])?;
        val >>= 7;
    }
    w.write_all(&[val as u8])?;
    Ok(())
}

/// Reads an unsigned quantity in variable-length form.
///
/// Fails with [`ArchiveError::VarintOverflow`] when the encoded value
/// does not fit in 64 bits, and [`ArchiveError::UnexpectedEof`] on
/// truncation.
pub fn read_unsigned<R: Read>(r: &mut R) -> Result<u64, ArchiveError> {
    let mut ret: u64 = 0;
    let mut shift: u32 = 0;
    loop {
        let b = read_u8(r)?;
        let group = u64::from(b & 0x7f);
        if shift >= 64 || (shift == 63 && group > 1) {
            return Err(ArchiveError::VarintOverflow);
        }
        ret |= group << shift;
        if b & 0x80 == 0 {
            return Ok(ret);
        }
        shift += 7;
    }
}

pub(crate) fn read_u8<R: Read>(r: &mut R) -> Result<u8, ArchiveError> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf).map_err(ArchiveError::from_io)?;
    Ok(buf[0])
}
