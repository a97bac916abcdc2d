//! # spotify-folders
//!
//! Recovers a Spotify user's playlist folder hierarchy from the desktop
//! client's local PersistentCache and exposes it as a navigable tree keyed
//! by URIs. The hierarchy is not available from the public Web API; it only
//! exists as the "rootlist" value inside a LevelDB on disk.
pub mod rootlist;

// Re-export the main types for convenience
pub use rootlist::{
    types::{
        error::{Result, RootlistError},
        models::{Entry, Node},
    },
    Rootlist,
};
