//! Rootlist format parsing layer.
//!
//! This is the mid-level layer between raw value bytes and the high-level
//! [`Rootlist`](crate::rootlist::Rootlist) reader.
//!
//! # Module Organization
//!
//! - [`records`]: Lazy tag/length/value record reader with unknown-field skip
//! - [`entries`]: Projects records onto structural folder/playlist entries
//! - [`tree`]: Rebuilds the folder tree from the entry stream and resolves
//!   subtrees by identifier
//!
//! # Data flow
//!
//! ```text
//! value bytes → records() → EntryIter → tree::build() → tree::resolve()
//! ```
//!
//! Each stage only consumes the previous one's output; nothing reaches
//! backward into an earlier stage.

pub mod entries;
pub mod records;
pub mod tree;
