//! Core data structures for the rootlist format.
//!
//! This module defines the fundamental types used throughout the library:
//! - Wire-level records and their payloads
//! - Structural entries projected from records
//! - The folder/playlist tree handed to serialization

use serde::Serialize;

use super::error::{Result, RootlistError};

/// Wire kinds a record tag can carry.
///
/// The rootlist dialect only ever uses these two. Any other value is a hard
/// error: without a known kind the record's length cannot be determined, so
/// it cannot even be skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireKind {
    Varint = 0,
    LengthDelimited = 2,
}

impl TryFrom<u8> for WireKind {
    type Error = RootlistError;
    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::Varint),
            2 => Ok(Self::LengthDelimited),
            _ => Err(RootlistError::UnknownWireKind(value)),
        }
    }
}

/// Payload of a single record, borrowed from the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload<'a> {
    /// A varint-kind record's integer value.
    Varint(u64),
    /// A length-delimited record's raw bytes.
    Bytes(&'a [u8]),
}

/// One tag/length/value unit from the raw record stream.
///
/// Records for unknown field numbers are yielded like any other; deciding
/// which fields matter is the projector's job, which keeps the reader
/// forward-compatible with cache versions that introduce new fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    pub field: u32,
    pub payload: Payload<'a>,
}

impl<'a> Record<'a> {
    /// Returns the payload bytes if this is a length-delimited record.
    pub fn bytes(&self) -> Option<&'a [u8]> {
        match self.payload {
            Payload::Bytes(b) => Some(b),
            Payload::Varint(_) => None,
        }
    }
}

/// A structural token projected from the record stream.
///
/// Entries form an ordered sequence encoding a pre-order traversal of the
/// folder tree. Every `FolderStart` has exactly one matching `FolderEnd`
/// later in the sequence, nested strictly LIFO.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    FolderStart { uri: String, name: String },
    FolderEnd { uri: String },
    PlaylistRef { uri: String },
}

/// A node in the reconstructed hierarchy.
///
/// The tree is a strict rooted ownership tree: each parent owns its children
/// and there are no shared or back references, so cycles are impossible by
/// construction. The serialized field layout (`type`, `name`, `uri`,
/// `children`) is a contract with downstream consumers: a folder always
/// carries all three fields, a playlist only its uri.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Folder {
        name: String,
        uri: String,
        children: Vec<Node>,
    },
    Playlist {
        uri: String,
    },
}

impl Node {
    /// The synthetic root folder. It is unnamed and has no uri of its own;
    /// its children are the top-level folders and playlists.
    pub fn root() -> Self {
        Node::Folder {
            name: String::new(),
            uri: String::new(),
            children: Vec::new(),
        }
    }

    /// Returns this node's uri.
    pub fn uri(&self) -> &str {
        match self {
            Node::Folder { uri, .. } | Node::Playlist { uri } => uri,
        }
    }

    /// Returns the children if this node is a folder.
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Folder { children, .. } => Some(children),
            Node::Playlist { .. } => None,
        }
    }
}
