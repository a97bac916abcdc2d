//! Low-level byte reading utilities.
//!
//! All readers operate on a `&mut &[u8]` cursor: reading advances the slice
//! in place, which keeps both the record stream and the LevelDB parsers
//! allocation-free at this layer.

use byteorder::{ByteOrder, LittleEndian};

use super::types::error::{Result, RootlistError};

/// Takes the next `n` bytes from the cursor.
pub fn take<'a>(buf: &mut &'a [u8], n: usize) -> Result<&'a [u8]> {
    if buf.len() < n {
        return Err(RootlistError::TruncatedRecord {
            needed: n,
            remaining: buf.len(),
        });
    }
    let (head, tail) = buf.split_at(n);
    *buf = tail;
    Ok(head)
}

/// Reads a base-128 varint (LSB first, high bit is the continuation flag).
///
/// Used both by the rootlist record stream and by LevelDB's length prefixes
/// and block handles.
pub fn read_varint(buf: &mut &[u8]) -> Result<u64> {
    let mut value: u64 = 0;
    let mut shift = 0u32;
    loop {
        let byte = take(buf, 1)?[0];
        if shift >= 64 || (shift == 63 && byte > 1) {
            return Err(RootlistError::InvalidFormat(
                "varint overflows 64 bits".to_string(),
            ));
        }
        value |= u64::from(byte & 0x7f) << shift;
        if byte & 0x80 == 0 {
            return Ok(value);
        }
        shift += 7;
    }
}

/// Reads a varint and converts it to a usable in-memory length.
pub fn read_varint_len(buf: &mut &[u8]) -> Result<usize> {
    let value = read_varint(buf)?;
    usize::try_from(value)
        .map_err(|_| RootlistError::InvalidFormat(format!("length {} exceeds address space", value)))
}

/// Reads a single byte.
pub fn read_u8(buf: &mut &[u8]) -> Result<u8> {
    Ok(take(buf, 1)?[0])
}

/// Reads a 2-byte little-endian number.
pub fn read_u16_le(buf: &mut &[u8]) -> Result<u16> {
    Ok(LittleEndian::read_u16(take(buf, 2)?))
}

/// Reads a 4-byte little-endian number.
pub fn read_u32_le(buf: &mut &[u8]) -> Result<u32> {
    Ok(LittleEndian::read_u32(take(buf, 4)?))
}

/// Reads an 8-byte little-endian number.
pub fn read_u64_le(buf: &mut &[u8]) -> Result<u64> {
    Ok(LittleEndian::read_u64(take(buf, 8)?))
}
