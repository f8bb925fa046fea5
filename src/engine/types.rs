//! engine/types.rs
//!
//! Raw, unvalidated per-file input for the catalog builder.
//!
//! Rule of thumb:
//! - These structs are "boring bags of data"
//! - No filesystem code
//! - No tag parsing code
//!
//! The scanner (or any other collaborator) fills a `RawMetadata` per audio file.
//! Everything is optional except the path and duration, and the builder resolves
//! missing values through [`Fallbacks`].

use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Default label used for a missing artist or album.
pub const UNKNOWN: &str = "Unknown";

/// Embedded cover art bytes, exactly as found in the file.
///
/// Equality and hashing are by content, so identical artwork embedded in
/// twenty files is one key in a map.
#[derive(Clone)]
pub struct RawImage {
    bytes: Arc<[u8]>,
}

impl RawImage {
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl PartialEq for RawImage {
    fn eq(&self, other: &Self) -> bool {
        self.bytes[..] == other.bytes[..]
    }
}

impl Eq for RawImage {}

impl Hash for RawImage {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes[..].hash(state);
    }
}

impl std::fmt::Debug for RawImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RawImage({} bytes)", self.bytes.len())
    }
}

/// Fixed strings substituted for missing tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fallbacks {
    pub artist: String,
    pub album: String,
}

impl Default for Fallbacks {
    fn default() -> Self {
        Self {
            artist: UNKNOWN.to_string(),
            album: UNKNOWN.to_string(),
        }
    }
}

impl Fallbacks {
    /// Same label for both axes.
    pub fn uniform(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            artist: label.clone(),
            album: label,
        }
    }
}

/// Anything with a length, maybe a year, maybe a track number.
/// Statistics are computed over this, so raw records and built songs share them.
pub trait SongLike {
    fn duration(&self) -> Duration;
    fn year(&self) -> Option<i32>;
    fn track(&self) -> Option<u32>;
}

/// One audio file's metadata, straight from the tag reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMetadata {
    /// Full file path on disk.
    /// This is the only thing we always have.
    pub path: PathBuf,

    pub track: Option<u32>,
    pub title: Option<String>,
    pub album: Option<String>,
    /// Per-track artist
    pub artist: Option<String>,
    /// TPE2 in ID3 land. Used for grouping when present.
    pub album_artist: Option<String>,

    pub cover: Option<RawImage>,

    pub duration: Duration,
    pub year: Option<i32>,
}

impl RawMetadata {
    /// A record with nothing but a path.
    pub fn bare(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            track: None,
            title: None,
            album: None,
            artist: None,
            album_artist: None,
            cover: None,
            duration: Duration::ZERO,
            year: None,
        }
    }

    /// Tag title, else the file name without extension.
    pub fn resolved_title(&self, fallbacks: &Fallbacks) -> String {
        present(&self.title)
            .map(str::to_owned)
            .or_else(|| file_stem(&self.path))
            .unwrap_or_else(|| fallbacks.artist.clone())
    }

    pub fn resolved_album(&self, fallbacks: &Fallbacks) -> String {
        present(&self.album)
            .unwrap_or(&fallbacks.album)
            .to_owned()
    }

    pub fn resolved_artist(&self, fallbacks: &Fallbacks) -> String {
        present(&self.artist)
            .unwrap_or(&fallbacks.artist)
            .to_owned()
    }

    /// Grouping key for artists: album artist first, then the track artist.
    pub fn resolved_album_artist(&self, fallbacks: &Fallbacks) -> String {
        match present(&self.album_artist) {
            Some(name) => name.to_owned(),
            None => self.resolved_artist(fallbacks),
        }
    }
}

impl SongLike for RawMetadata {
    fn duration(&self) -> Duration {
        self.duration
    }

    fn year(&self) -> Option<i32> {
        self.year
    }

    fn track(&self) -> Option<u32> {
        self.track
    }
}

/// Blank strings count as missing.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// Gets filename without extension.
/// Ex: 'song.mp3' -> 'song'
pub(crate) fn file_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
}
