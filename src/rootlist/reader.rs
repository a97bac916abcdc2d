//! High-level reader joining the parsing stages together.

use log::{debug, info};

use super::format::entries::EntryIter;
use super::format::tree;
use super::types::error::Result;
use super::types::models::Node;

/// A parsed rootlist: the reconstructed folder hierarchy of one user.
///
/// Built once from one cache read and immutable afterwards. The tree's root
/// is a synthetic unnamed folder whose children are the user's top-level
/// folders and playlists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rootlist {
    root: Node,
}

impl Rootlist {
    /// Parses the raw rootlist value bytes for `user_id`.
    ///
    /// `data` is the value stored under the rootlist key in the
    /// PersistentCache LevelDB, already extracted and decompressed. The
    /// cache does not record the user id, so the caller supplies one (a
    /// placeholder like `"unknown"` works; it only shapes folder uris).
    ///
    /// # Errors
    /// Any record, projection, or balance failure from the underlying
    /// stages; see [`RootlistError`](super::types::error::RootlistError).
    pub fn parse(data: &[u8], user_id: &str) -> Result<Self> {
        info!("Parsing rootlist value: {} bytes, user {:?}", data.len(), user_id);
        let root = tree::build(EntryIter::new(data, user_id))?;
        debug!(
            "Hierarchy built: {} top-level nodes",
            root.children().map_or(0, <[Node]>::len)
        );
        Ok(Self { root })
    }

    /// Returns the root of the hierarchy.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Returns the subtree of the folder whose uri ends with `folder_id`,
    /// or the whole tree when `folder_id` is `None`.
    ///
    /// # Errors
    /// [`RootlistError::FolderNotFound`](super::types::error::RootlistError::FolderNotFound)
    /// when no folder matches.
    pub fn folder(&self, folder_id: Option<&str>) -> Result<&Node> {
        tree::resolve(&self.root, folder_id)
    }
}
