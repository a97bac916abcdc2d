//! Projection of raw records onto structural entries.
//!
//! Only two field numbers carry hierarchy structure:
//! - top level, field 2 (length-delimited): one rootlist item
//! - inside an item, field 1 (length-delimited): the item's `spotify:` URI
//!
//! Everything else the client stores alongside (format version varints, row
//! metadata, timestamps) is consumed by the record reader and dropped here.
//!
//! The URI itself tells the three structural token kinds apart:
//!
//! ```text
//! spotify:playlist:37i9dQZF1DXdCsscAsbRNz        → PlaylistRef
//! spotify:start-group:8212237ac7347bfe:Summer    → FolderStart
//! spotify:end-group:8212237ac7347bfe             → FolderEnd
//! ```
//!
//! A group id is zero-padded to 16 characters and wrapped into a full folder
//! uri (`spotify:user:<user>:folder:<id>`); the cache does not store the
//! user id, so the caller supplies one. Folder names arrive form-encoded
//! (`+` for space, percent escapes) and are decoded here.

use percent_encoding::percent_decode_str;

use crate::rootlist::format::records::{records, RecordIter};
use crate::rootlist::types::error::{Result, RootlistError};
use crate::rootlist::types::models::{Entry, Record};

/// Top-level field number holding one rootlist item message.
const ITEM_FIELD: u32 = 2;
/// Field number of the uri string inside an item message.
const ITEM_URI_FIELD: u32 = 1;

/// Lazy iterator projecting a record stream onto [`Entry`] values.
///
/// Records that are not structural are skipped, so a stream with unknown
/// fields projects identically to the same stream without them.
#[derive(Debug, Clone)]
pub struct EntryIter<'a> {
    records: RecordIter<'a>,
    user_id: &'a str,
}

impl<'a> EntryIter<'a> {
    /// Projects the rootlist value in `data`, building folder uris for
    /// `user_id`.
    pub fn new(data: &'a [u8], user_id: &'a str) -> Self {
        Self {
            records: records(data),
            user_id,
        }
    }
}

impl<'a> Iterator for EntryIter<'a> {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(e) => return Some(Err(e)),
            };
            let item = match record {
                Record { field: ITEM_FIELD, .. } => match record.bytes() {
                    Some(item) => item,
                    // Field 2 with varint wire kind is not an item.
                    None => continue,
                },
                _ => continue,
            };
            match project_item(item, self.user_id) {
                Ok(Some(entry)) => return Some(Ok(entry)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Projects one item message onto an entry.
///
/// Returns `Ok(None)` for items whose uri is not a structural kind (the
/// rootlist also references albums, shows, and the like).
fn project_item(item: &[u8], user_id: &str) -> Result<Option<Entry>> {
    let mut uri_bytes = None;
    for record in records(item) {
        let record = record?;
        if record.field == ITEM_URI_FIELD && uri_bytes.is_none() {
            uri_bytes = record.bytes();
        }
    }
    let uri_bytes = uri_bytes.ok_or(RootlistError::IncompleteEntry {
        uri: String::new(),
        missing: "item uri",
    })?;
    let uri = std::str::from_utf8(uri_bytes)
        .map_err(|_| RootlistError::InvalidFormat("item uri is not valid UTF-8".to_string()))?;

    let Some(rest) = uri.strip_prefix("spotify:") else {
        return Ok(None);
    };
    if rest.starts_with("playlist:") {
        return Ok(Some(Entry::PlaylistRef {
            uri: uri.to_string(),
        }));
    }
    if let Some(group) = rest.strip_prefix("start-group:") {
        let Some((id, name)) = group.split_once(':') else {
            return Err(RootlistError::IncompleteEntry {
                uri: uri.to_string(),
                missing: "folder name",
            });
        };
        if id.is_empty() {
            return Err(RootlistError::IncompleteEntry {
                uri: uri.to_string(),
                missing: "folder id",
            });
        }
        return Ok(Some(Entry::FolderStart {
            uri: folder_uri(user_id, id),
            name: decode_name(name),
        }));
    }
    if let Some(id) = rest.strip_prefix("end-group:") {
        if id.is_empty() {
            return Err(RootlistError::IncompleteEntry {
                uri: uri.to_string(),
                missing: "folder id",
            });
        }
        return Ok(Some(Entry::FolderEnd {
            uri: folder_uri(user_id, id),
        }));
    }
    Ok(None)
}

/// Builds the canonical folder uri from a group id.
///
/// Start and end markers must produce identical uris for the same id, or
/// the hierarchy builder could never match them up.
fn folder_uri(user_id: &str, id: &str) -> String {
    format!("spotify:user:{}:folder:{:0>16}", user_id, id)
}

/// Decodes a form-encoded folder name (`+` for space, percent escapes).
fn decode_name(raw: &str) -> String {
    let plus_decoded = raw.replace('+', " ");
    percent_decode_str(&plus_decoded)
        .decode_utf8_lossy()
        .into_owned()
}
