//! Custom error types for the spotify-folders crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
///
/// Every parsing stage either produces valid output or one of these kinds;
/// nothing is swallowed. All failures are terminal to the current parse —
/// the outcome is deterministic for a given input, so there is no retry.
#[derive(Debug, Error)]
pub enum RootlistError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// A block carries a storage marker that is neither plain nor snappy.
    /// Usually means the cache was written by an unsupported client version.
    #[error("Unrecognized cache block marker: {0:#04x}. Only plain (0) and snappy (1) blocks are supported.")]
    UnrecognizedCacheFormat(u8),

    /// A snappy-compressed block was found but snappy support was compiled out.
    #[error(
        "This cache stores data with snappy compression, but snappy support is \
         not available in this build. Rebuild with the `snappy` feature enabled \
         (it is part of the default feature set)."
    )]
    UnsupportedCompression,

    /// Decompression failed, typically a back-reference pointing outside the
    /// already-decoded output. Indicates a corrupt cache.
    #[error("Malformed compressed block: {0}")]
    MalformedBlock(String),

    /// A record declared more payload bytes than remain in the stream.
    #[error("Truncated record: {needed} bytes declared, {remaining} remaining")]
    TruncatedRecord { needed: usize, remaining: usize },

    /// A record tag carries a wire kind this reader cannot determine the
    /// length of, so it cannot even be skipped safely.
    #[error("Unknown wire kind {0} in record stream")]
    UnknownWireKind(u8),

    /// A structural marker is missing a required sub-field. A folder with no
    /// identifier could never be referenced, so nothing is fabricated.
    #[error("Incomplete entry {uri:?}: missing {missing}")]
    IncompleteEntry { uri: String, missing: &'static str },

    /// Folder start/end markers do not pair up.
    #[error("Unbalanced hierarchy: expected to close folder {expected:?}, found {found:?}")]
    UnbalancedHierarchy { expected: String, found: String },

    /// The requested folder identifier is absent from the tree. The only
    /// expected, non-corruption failure in the crate.
    #[error("No folder matching {0:?} in this hierarchy")]
    FolderNotFound(String),

    /// The data is structurally invalid (bad table magic, truncated LevelDB
    /// fragment, varint overflow, non-UTF-8 uri, ...).
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// A convenience `Result` type alias using the crate's `RootlistError` type.
pub type Result<T> = std::result::Result<T, RootlistError>;
