//! scan/library.rs
//! Filesystem walk for candidate audio files.
//!
//! Symlinked folders are followed. A link back to one of its own ancestors is reported
//! and skipped instead of being walked again.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::ScanError;

/// Every `.mp3` under `root`, in path order.
pub fn scan_mp3s(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut found = BTreeSet::new();
    collect_mp3s(root, &mut found)?;
    Ok(found.into_iter().collect())
}

/// Walks `root` into `found`. Paths already in the set are left alone, so overlapping
/// roots can share one set.
pub(crate) fn collect_mp3s(root: &Path, found: &mut BTreeSet<PathBuf>) -> Result<(), ScanError> {
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    for entry in WalkDir::new(root).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            // Root itself unreadable: nothing else to walk.
            Err(e) if e.depth() == 0 => {
                return Err(ScanError::Io {
                    path: root.to_path_buf(),
                    source: e.into(),
                });
            }
            Err(e) => {
                match e.loop_ancestor() {
                    Some(ancestor) => tracing::warn!(
                        "Skipping symlink loop at {} (points back to {})",
                        e.path().unwrap_or(root).display(),
                        ancestor.display()
                    ),
                    None => tracing::warn!("Skipping unreadable entry: {e}"),
                }
                continue;
            }
        };

        if entry.file_type().is_file() && is_mp3(entry.path()) {
            found.insert(entry.into_path());
        }
    }

    Ok(())
}

fn is_mp3(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mp3"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_mp3s_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("artist").join("album");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("top.MP3"), b"").unwrap();
        std::fs::write(nested.join("01.mp3"), b"").unwrap();
        std::fs::write(nested.join("cover.jpg"), b"").unwrap();
        std::fs::write(nested.join("notes"), b"").unwrap();

        let found = scan_mp3s(dir.path()).unwrap();

        assert_eq!(found, vec![nested.join("01.mp3"), dir.path().join("top.MP3")]);
    }

    #[test]
    fn rejects_non_directories() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.mp3");
        std::fs::write(&file, b"").unwrap();

        assert!(matches!(scan_mp3s(&file), Err(ScanError::NotADirectory(_))));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_loop_is_walked_once() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.mp3"), b"").unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("loop")).unwrap();

        let found = scan_mp3s(dir.path()).unwrap();

        assert_eq!(found, vec![dir.path().join("a.mp3")]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_folder_outside_the_root_is_followed() {
        let music = tempfile::tempdir().unwrap();
        let elsewhere = tempfile::tempdir().unwrap();
        std::fs::write(elsewhere.path().join("b.mp3"), b"").unwrap();
        std::os::unix::fs::symlink(elsewhere.path(), music.path().join("linked")).unwrap();

        let found = scan_mp3s(music.path()).unwrap();

        assert_eq!(found, vec![music.path().join("linked").join("b.mp3")]);
    }
}
