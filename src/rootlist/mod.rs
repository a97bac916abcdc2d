//! Core rootlist reading module.
//!
//! Layering, bottom to top:
//! - [`utils`]: cursor-based byte readers shared by every parser
//! - [`codec`]: block decompression
//! - [`leveldb`]: bare-bones LevelDB log/table lookup for the rootlist value
//! - [`format`]: record stream → entries → tree
//! - [`locate`]: platform cache directories and candidate files
//! - [`reader`]: the [`Rootlist`] type tying the stages together

pub mod codec;
pub mod format;
pub mod leveldb;
pub mod locate;
mod reader;
pub mod types;
pub mod utils;

pub use reader::Rootlist;
pub use types::error::{Result, RootlistError};
