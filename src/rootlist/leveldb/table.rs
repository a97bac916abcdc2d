//! Bare-bones reader for LevelDB `.ldb` (sorted table) files.
//!
//! A table ends with a 48-byte footer holding block handles for the
//! metaindex and index blocks plus a magic number. The index block maps the
//! largest key of each data block to that block's handle, so a lookup
//! navigates footer → index → one data block. Blocks store their entries
//! with shared-prefix key compression and end with a restart-offset array;
//! a one-byte storage marker after the block data feeds the decompressor.
//!
//! Keys in both index and data blocks are *internal* keys: the user key
//! followed by an 8-byte trailer (operation type plus a 7-byte sequence
//! number). Index navigation uses Spotify's custom "greenbase" comparator,
//! which sorts the 0x1d group separator after every other byte.

use log::trace;

use crate::rootlist::codec::compression;
use crate::rootlist::types::error::{Result, RootlistError};
use crate::rootlist::utils;

const FOOTER_SIZE: usize = 48;
const MAGIC_NUMBER: u64 = 0xdb47_7524_8b80_fb57;
/// Internal key trailer: 1 type byte + 7 sequence bytes.
const KEY_TRAILER_SIZE: usize = 8;
/// Block trailer: storage marker byte + crc32.
const BLOCK_TRAILER_SIZE: usize = 5;

/// A (offset, size) pair locating one block inside the table file.
#[derive(Debug, Clone, Copy)]
struct BlockHandle {
    offset: usize,
    size: usize,
}

impl BlockHandle {
    fn read(buf: &mut &[u8]) -> Result<Self> {
        Ok(Self {
            offset: utils::read_varint_len(buf)?,
            size: utils::read_varint_len(buf)?,
        })
    }
}

/// Finds the value stored under `target_key` in one table file's bytes.
///
/// Repeated keys are ordered last-inserted first, so the first exact match
/// in the first candidate data block is the current value. Returns
/// `Ok(None)` when the table does not contain the key.
///
/// # Errors
/// [`RootlistError::InvalidFormat`] when the file is structurally corrupt.
pub fn find(data: &[u8], target_key: &[u8]) -> Result<Option<Vec<u8>>> {
    lookup(data, target_key).map_err(super::structural_error)
}

fn lookup(data: &[u8], target_key: &[u8]) -> Result<Option<Vec<u8>>> {
    let index_handle = read_footer(data)?;
    let index_block = read_block(data, index_handle)?;

    for entry in block_entries(&index_block)? {
        let (internal_key, handle_bytes) = entry;
        let largest_key = user_key(&internal_key)?;
        // Index entries are ordered; the first block whose largest key is
        // >= the target is the only one that can contain it.
        if !key_less_or_equal(target_key, largest_key) {
            continue;
        }
        let mut handle_buf = handle_bytes.as_slice();
        let handle = BlockHandle::read(&mut handle_buf)?;
        trace!("Scanning data block at offset {}", handle.offset);
        let data_block = read_block(data, handle)?;
        for (internal_key, value) in block_entries(&data_block)? {
            if user_key(&internal_key)? == target_key {
                return Ok(Some(value));
            }
        }
        break;
    }
    Ok(None)
}

/// Validates the magic number and returns the index block handle.
fn read_footer(data: &[u8]) -> Result<BlockHandle> {
    if data.len() < FOOTER_SIZE {
        return Err(RootlistError::InvalidFormat(
            "file too short for a table footer".to_string(),
        ));
    }
    let mut magic_buf = &data[data.len() - 8..];
    let magic = utils::read_u64_le(&mut magic_buf)?;
    if magic != MAGIC_NUMBER {
        return Err(RootlistError::InvalidFormat(format!(
            "bad table magic {:#018x}",
            magic
        )));
    }
    let mut footer = &data[data.len() - FOOTER_SIZE..];
    let _metaindex_handle = BlockHandle::read(&mut footer)?;
    BlockHandle::read(&mut footer)
}

/// Reads one block's data and decodes it according to its storage marker.
fn read_block(data: &[u8], handle: BlockHandle) -> Result<Vec<u8>> {
    let end = handle
        .offset
        .checked_add(handle.size)
        .filter(|end| {
            end.checked_add(BLOCK_TRAILER_SIZE)
                .map_or(false, |trailer_end| trailer_end <= data.len())
        })
        .ok_or_else(|| {
            RootlistError::InvalidFormat(format!(
                "block handle ({}, {}) outside file of {} bytes",
                handle.offset,
                handle.size,
                data.len()
            ))
        })?;
    let marker = data[end];
    compression::decode_block(&data[handle.offset..end], marker)
}

/// Decodes a block's shared-prefix-compressed entry list.
///
/// Each entry is `shared`/`unshared`/`value_len` varints followed by the
/// unshared key bytes and the value; the key is the previous key's first
/// `shared` bytes plus the unshared suffix. A restart array trailer (ignored
/// beyond its length) closes the block.
fn block_entries(block: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
    if block.len() < 4 {
        return Err(RootlistError::InvalidFormat(
            "block too short for a restart trailer".to_string(),
        ));
    }
    let mut trailer = &block[block.len() - 4..];
    let num_restarts = utils::read_u32_le(&mut trailer)? as usize;
    let restart_offset = block
        .len()
        .checked_sub(4 * (1 + num_restarts))
        .ok_or_else(|| {
            RootlistError::InvalidFormat(format!(
                "restart array of {} entries exceeds block size",
                num_restarts
            ))
        })?;

    let mut entries = Vec::new();
    let mut last_key: Vec<u8> = Vec::new();
    let mut buf = &block[..restart_offset];
    while !buf.is_empty() {
        let shared = utils::read_varint_len(&mut buf)?;
        let unshared = utils::read_varint_len(&mut buf)?;
        let value_len = utils::read_varint_len(&mut buf)?;
        if shared > last_key.len() {
            return Err(RootlistError::InvalidFormat(format!(
                "entry shares {} bytes with a {}-byte key",
                shared,
                last_key.len()
            )));
        }
        let mut key = last_key[..shared].to_vec();
        key.extend_from_slice(utils::take(&mut buf, unshared)?);
        let value = utils::take(&mut buf, value_len)?.to_vec();
        last_key = key.clone();
        entries.push((key, value));
    }
    Ok(entries)
}

/// Strips the 8-byte trailer off an internal key.
fn user_key(internal_key: &[u8]) -> Result<&[u8]> {
    internal_key
        .len()
        .checked_sub(KEY_TRAILER_SIZE)
        .map(|end| &internal_key[..end])
        .ok_or_else(|| {
            RootlistError::InvalidFormat("internal key shorter than its trailer".to_string())
        })
}

/// Spotify's "greenbase" key ordering.
///
/// Byte-wise comparison, except the 0x1d group separator sorts after every
/// other byte value; equal prefixes break ties on length.
pub fn key_less_or_equal(a: &[u8], b: &[u8]) -> bool {
    const GROUP_SEPARATOR: u8 = 0x1d;
    for (&x, &y) in a.iter().zip(b.iter()) {
        if x == GROUP_SEPARATOR && y != GROUP_SEPARATOR {
            return false;
        }
        if x != GROUP_SEPARATOR && y == GROUP_SEPARATOR {
            return true;
        }
        if x < y {
            return true;
        }
        if x > y {
            return false;
        }
    }
    a.len() <= b.len()
}
