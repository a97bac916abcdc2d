//! Platform-specific cache location and candidate file enumeration.
//!
//! The desktop client keeps one `<username>-user` directory per account
//! under a platform-dependent `Users` root. Nothing here parses cache
//! contents; this layer only hands complete file paths to the lookup in
//! [`leveldb`](super::leveldb).

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use directories::BaseDirs;
use log::debug;

/// Returns the default PersistentCache `Users` directory for this platform.
///
/// - macOS: `~/Library/Application Support/Spotify/PersistentCache/Users`
/// - Windows: the Microsoft-store package path under `%LOCALAPPDATA%` when
///   it exists, otherwise `%LOCALAPPDATA%\Spotify\Users`
/// - elsewhere: `$XDG_CACHE_HOME/spotify/Users` (defaulting to `~/.cache`)
pub fn default_cache_dir() -> Option<PathBuf> {
    let base = BaseDirs::new()?;
    #[cfg(target_os = "macos")]
    {
        Some(base.data_dir().join("Spotify/PersistentCache/Users"))
    }
    #[cfg(target_os = "windows")]
    {
        let store_path = base
            .data_local_dir()
            .join("Packages")
            .join("SpotifyAB.SpotifyMusic_zpdnekdrzrea0")
            .join("LocalState")
            .join("Spotify")
            .join("Users");
        if store_path.exists() {
            Some(store_path)
        } else {
            Some(base.data_local_dir().join("Spotify").join("Users"))
        }
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        Some(base.cache_dir().join("spotify/Users"))
    }
}

/// Lists the account names with cached data under `cache_dir`.
///
/// Accounts are the `<username>-user` subdirectories. A missing cache
/// directory yields an empty list, not an error.
pub fn usernames(cache_dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(cache_dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .flatten()
        .filter_map(|entry| {
            entry
                .file_name()
                .to_str()
                .and_then(|name| name.strip_suffix("-user"))
                .map(str::to_string)
        })
        .collect();
    names.sort();
    names
}

/// Returns the per-account directory inside the cache.
pub fn user_dir(cache_dir: &Path, username: &str) -> PathBuf {
    cache_dir.join(format!("{}-user", username))
}

/// Recursively lists every file under `dir`, most recently modified first.
///
/// The freshest file is the most likely to hold the current rootlist, so
/// the lookup visits files in this order.
pub fn candidate_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    collect_files(dir, &mut files);
    files.sort_by_key(|path| {
        std::cmp::Reverse(
            fs::metadata(path)
                .and_then(|meta| meta.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH),
        )
    });
    debug!("Found {} candidate files under {}", files.len(), dir.display());
    files
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_files(&path, files);
        } else {
            files.push(path);
        }
    }
}
