//! Block decompression for PersistentCache data.
//!
//! LevelDB stores each block either plain or snappy-compressed, flagged by a
//! one-byte marker in the block trailer:
//! - 0: no compression
//! - 1: snappy
//!
//! Snappy is block-oriented: a declared uncompressed length followed by
//! literal/copy instructions referencing a sliding window of already-decoded
//! output. A copy whose offset reaches outside that window is corruption,
//! reported as [`RootlistError::MalformedBlock`] rather than truncated
//! silently.
//!
//! Snappy support lives behind the default-on `snappy` cargo feature. When
//! compiled out, a compressed block fails with
//! [`RootlistError::UnsupportedCompression`] naming the missing feature.

use log::trace;

use crate::rootlist::types::error::{Result, RootlistError};

/// Storage marker for a block, as written in the block trailer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockCompression {
    None,
    Snappy,
}

impl TryFrom<u8> for BlockCompression {
    type Error = RootlistError;
    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Snappy),
            _ => Err(RootlistError::UnrecognizedCacheFormat(value)),
        }
    }
}

/// Decodes a raw block payload according to its storage marker.
///
/// Purely functional byte transform: plain payloads are returned as-is,
/// snappy payloads are decompressed, unknown markers fail with
/// [`RootlistError::UnrecognizedCacheFormat`].
pub fn decode_block(payload: &[u8], marker: u8) -> Result<Vec<u8>> {
    match BlockCompression::try_from(marker)? {
        BlockCompression::None => {
            trace!("Plain block, {} bytes", payload.len());
            Ok(payload.to_vec())
        }
        BlockCompression::Snappy => decompress_snappy(payload),
    }
}

#[cfg(feature = "snappy")]
fn decompress_snappy(payload: &[u8]) -> Result<Vec<u8>> {
    trace!("Decompressing snappy block, {} bytes compressed", payload.len());
    snap::raw::Decoder::new()
        .decompress_vec(payload)
        .map_err(|e| RootlistError::MalformedBlock(e.to_string()))
}

#[cfg(not(feature = "snappy"))]
fn decompress_snappy(_payload: &[u8]) -> Result<Vec<u8>> {
    Err(RootlistError::UnsupportedCompression)
}
