//! Lazy reader for the rootlist's tag/length/value record stream.
//!
//! The rootlist value resembles a minimal protobuf encoding: each record
//! starts with a varint tag packing `field_number << 3 | wire_kind`. For
//! varint records the payload is a second varint; for length-delimited
//! records a varint length prefixes the payload bytes.
//!
//! The reader is deliberately schema-free. It yields every well-formed
//! record, known field number or not, and leaves interpretation to the
//! projector. This is a forward-compatibility requirement: cache versions
//! that introduce new fields must parse cleanly, not error out.

use crate::rootlist::types::error::{Result, RootlistError};
use crate::rootlist::types::models::{Payload, Record, WireKind};
use crate::rootlist::utils;

/// Returns a lazy iterator over the records in `data`.
///
/// Single pass, not restartable. Iteration ends when the slice is exhausted
/// or a malformed record is hit; after yielding an error the iterator is
/// fused.
pub fn records(data: &[u8]) -> RecordIter<'_> {
    RecordIter { buf: data }
}

/// Iterator over the records of one byte slice.
///
/// Created by [`records()`]. Yields `Result<Record>`; errors are terminal.
#[derive(Debug, Clone)]
pub struct RecordIter<'a> {
    buf: &'a [u8],
}

impl<'a> RecordIter<'a> {
    fn read_record(&mut self) -> Result<Record<'a>> {
        let tag = utils::read_varint(&mut self.buf)?;
        let field = u32::try_from(tag >> 3)
            .map_err(|_| RootlistError::InvalidFormat(format!("field number {} too large", tag >> 3)))?;
        if field == 0 {
            return Err(RootlistError::InvalidFormat(
                "record with field number 0".to_string(),
            ));
        }
        let payload = match WireKind::try_from((tag & 0x7) as u8)? {
            WireKind::Varint => Payload::Varint(utils::read_varint(&mut self.buf)?),
            WireKind::LengthDelimited => {
                let len = utils::read_varint_len(&mut self.buf)?;
                Payload::Bytes(utils::take(&mut self.buf, len)?)
            }
        };
        Ok(Record { field, payload })
    }
}

impl<'a> Iterator for RecordIter<'a> {
    type Item = Result<Record<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.buf.is_empty() {
            return None;
        }
        match self.read_record() {
            Ok(record) => Some(Ok(record)),
            Err(e) => {
                // Fuse on error: a malformed stream has no usable remainder.
                self.buf = &[];
                Some(Err(e))
            }
        }
    }
}
