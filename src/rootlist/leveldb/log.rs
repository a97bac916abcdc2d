//! Bare-bones reader for LevelDB `.log` (write-ahead) files.
//!
//! A log file is a sequence of 32 KiB blocks. Each block holds fragments
//! with a 7-byte header: crc32 (little-endian, not verified here), payload
//! length (u16 LE), and a fragment type. Fragments reassemble into write
//! batches; a batch is a sequence number, an operation count, and that many
//! put/delete operations with varint-length keys and values.
//!
//! The PersistentCache writes the freshest rootlist here, so log files are
//! examined before tables.

use log::warn;

use crate::rootlist::types::error::{Result, RootlistError};
use crate::rootlist::utils;

const BLOCK_SIZE: usize = 32 * 1024;
const FRAGMENT_HEADER_SIZE: usize = 7;

const FULL_FRAGMENT: u8 = 1;
const FIRST_FRAGMENT: u8 = 2;
const MIDDLE_FRAGMENT: u8 = 3;
const LAST_FRAGMENT: u8 = 4;

const OP_DELETE: u8 = 0;
const OP_PUT: u8 = 1;

/// Finds the current value for `target_key` in one log file's bytes.
///
/// Replays every batch in order and keeps the last operation touching the
/// key: a later put overwrites an earlier one, a later delete clears it.
/// Returns `Ok(None)` when the key never appears (or was deleted last).
///
/// # Errors
/// [`RootlistError::InvalidFormat`] when the file is structurally corrupt.
pub fn find(data: &[u8], target_key: &[u8]) -> Result<Option<Vec<u8>>> {
    lookup(data, target_key).map_err(super::structural_error)
}

fn lookup(data: &[u8], target_key: &[u8]) -> Result<Option<Vec<u8>>> {
    let mut last_value: Option<Vec<u8>> = None;
    let mut batch_buffer: Vec<u8> = Vec::new();

    for block in data.chunks(BLOCK_SIZE) {
        let mut buf = block;
        loop {
            // A trailer shorter than a fragment header is block padding.
            if buf.len() < FRAGMENT_HEADER_SIZE {
                break;
            }
            let _crc = utils::read_u32_le(&mut buf)?;
            let length = utils::read_u16_le(&mut buf)? as usize;
            let fragment_type = utils::read_u8(&mut buf)?;
            // Type 0 marks preallocated zero padding; skip the block rest.
            if fragment_type == 0 {
                break;
            }
            if length > buf.len() {
                return Err(RootlistError::InvalidFormat(format!(
                    "log fragment declares {} bytes, block has {}",
                    length,
                    buf.len()
                )));
            }
            let payload = utils::take(&mut buf, length)?;
            match fragment_type {
                FULL_FRAGMENT | FIRST_FRAGMENT | MIDDLE_FRAGMENT | LAST_FRAGMENT => {
                    batch_buffer.extend_from_slice(payload);
                    if fragment_type == FULL_FRAGMENT || fragment_type == LAST_FRAGMENT {
                        replay_batch(&batch_buffer, target_key, &mut last_value)?;
                        batch_buffer.clear();
                    }
                }
                other => {
                    return Err(RootlistError::InvalidFormat(format!(
                        "unknown log fragment type {}",
                        other
                    )));
                }
            }
        }
    }
    if !batch_buffer.is_empty() {
        warn!("Log file ends mid-batch; discarding {} bytes", batch_buffer.len());
    }
    Ok(last_value)
}

/// Replays one reassembled batch, updating `last_value` when the target key
/// is touched.
fn replay_batch(batch: &[u8], target_key: &[u8], last_value: &mut Option<Vec<u8>>) -> Result<()> {
    let mut buf = batch;
    let _sequence = utils::read_u64_le(&mut buf)?;
    let count = utils::read_u32_le(&mut buf)?;

    for _ in 0..count {
        let op = utils::read_u8(&mut buf)?;
        let key_len = utils::read_varint_len(&mut buf)?;
        let key = utils::take(&mut buf, key_len)?;
        match op {
            OP_PUT => {
                let value_len = utils::read_varint_len(&mut buf)?;
                let value = utils::take(&mut buf, value_len)?;
                if key == target_key {
                    *last_value = Some(value.to_vec());
                }
            }
            OP_DELETE => {
                if key == target_key {
                    *last_value = None;
                }
            }
            other => {
                return Err(RootlistError::InvalidFormat(format!(
                    "unknown batch operation {}",
                    other
                )));
            }
        }
    }
    Ok(())
}
