//! Codec layer: pure byte transforms with no I/O.
//!
//! Currently this is only block decompression; the PersistentCache does not
//! encrypt the rootlist.

pub mod compression;
