//! Rootlist lookup inside the PersistentCache LevelDB.
//!
//! The cache is an ordinary LevelDB directory; the folder hierarchy lives in
//! the value stored under `!pl#slc#\x1dspotify:user:<username>:rootlist#`.
//! Rather than depending on a LevelDB binding, two small read-only decoders
//! cover the cases that matter here:
//!
//! - [`log`]: write-ahead `.log` files (always uncompressed)
//! - [`table`]: sorted `.ldb` tables (blocks possibly snappy-compressed)
//!
//! Log files hold the freshest state, so they are searched first; files are
//! visited most-recently-modified first within each pass.

use std::fs;
use std::path::{Path, PathBuf};

use ::log::{debug, warn};

use super::types::error::{Result, RootlistError};

pub mod log;
pub mod table;

/// Re-expresses truncation from the shared byte readers as structural
/// corruption. `TruncatedRecord` is the rootlist record stream's kind; a
/// LevelDB file that runs out of declared bytes is corrupt, full stop.
fn structural_error(e: RootlistError) -> RootlistError {
    match e {
        RootlistError::TruncatedRecord { needed, remaining } => RootlistError::InvalidFormat(
            format!(
                "truncated structure: {} bytes declared, {} remaining",
                needed, remaining
            ),
        ),
        other => other,
    }
}

/// Builds the LevelDB key under which a user's rootlist is stored.
pub fn rootlist_key(username: &str) -> Vec<u8> {
    format!("!pl#slc#\u{1d}spotify:user:{}:rootlist#", username).into_bytes()
}

/// Derives the username from a cache file path.
///
/// Per-user data lives under a `<username>-user` directory; the first such
/// component on the way up from the file names the account.
pub fn username_from_path(path: &Path) -> Option<String> {
    path.components().rev().find_map(|component| {
        component
            .as_os_str()
            .to_str()
            .and_then(|name| name.strip_suffix("-user"))
            .map(str::to_string)
    })
}

/// Searches the candidate files for a rootlist value.
///
/// With a username only that account's key is looked up; without one, each
/// file's key is derived from its `<username>-user` path component. Files
/// that cannot be read or decoded are skipped with a warning so one stray
/// file cannot hide data in the others. Returns the winning username
/// together with the raw value.
pub fn find_rootlist(
    files: &[PathBuf],
    username: Option<&str>,
) -> Result<Option<(String, Vec<u8>)>> {
    // Logs carry the freshest writes; tables only after no log matched.
    for (extension, lookup) in [
        ("log", log::find as fn(&[u8], &[u8]) -> Result<Option<Vec<u8>>>),
        ("ldb", table::find),
    ] {
        for path in files {
            if path.extension().and_then(|e| e.to_str()) != Some(extension) {
                continue;
            }
            let file_username = match username {
                Some(name) => name.to_string(),
                None => match username_from_path(path) {
                    Some(name) => name,
                    None => continue,
                },
            };
            let data = match fs::read(path) {
                Ok(data) => data,
                Err(e) => {
                    warn!("Skipping unreadable {}: {}", path.display(), e);
                    continue;
                }
            };
            debug!("Searching {} ({} bytes)", path.display(), data.len());
            match lookup(&data, &rootlist_key(&file_username)) {
                Ok(Some(value)) => return Ok(Some((file_username, value))),
                Ok(None) => {}
                Err(e) => {
                    warn!("Skipping undecodable {}: {}", path.display(), e);
                }
            }
        }
    }
    Ok(None)
}
