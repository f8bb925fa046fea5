//! engine/model.rs
//! Artist / Album / Song.
//!
//! Entities are immutable and shared by `Arc` across the catalog's sequences and
//! grouping maps. Equality is by identity fields only, never by pointer:
//! - Artist: name
//! - Album: (artist, title)
//! - Song: file path

use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use super::artwork::Cover;
use super::stats::CollectionStats;
use super::types::SongLike;

#[derive(Debug, Clone)]
pub struct Artist {
    pub name: String,
    pub stats: CollectionStats,
}

impl Artist {
    /// `None` matches every artist.
    pub fn matches(&self, artist: Option<&Artist>) -> bool {
        artist.is_none_or(|a| self == a)
    }
}

impl PartialEq for Artist {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Artist {}

impl Hash for Artist {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

#[derive(Debug, Clone)]
pub struct Album {
    pub title: String,
    pub artist: Arc<Artist>,
    /// Most common artwork among the album's files.
    pub cover: Option<Cover>,
    pub stats: CollectionStats,
}

impl Album {
    /// "Artist - Title" when the artist isn't obvious from context.
    pub fn display_title(&self, with_artist: bool) -> String {
        if with_artist {
            format!("{} - {}", self.artist.name, self.title)
        } else {
            self.title.clone()
        }
    }

    pub fn matches(&self, artist: Option<&Artist>, album: Option<&Album>) -> bool {
        self.artist.matches(artist) && album.is_none_or(|a| self == a)
    }
}

impl PartialEq for Album {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title && self.artist == other.artist
    }
}

impl Eq for Album {}

impl Hash for Album {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.artist.hash(state);
        self.title.hash(state);
    }
}

#[derive(Debug, Clone)]
pub struct Song {
    pub path: PathBuf,
    pub track: Option<u32>,
    pub title: String,
    pub album: Arc<Album>,
    /// The file's own artwork. May differ from the album cover.
    pub cover: Option<Cover>,
    pub duration: Duration,
    pub year: Option<i32>,
}

impl Song {
    pub fn artist(&self) -> &Arc<Artist> {
        &self.album.artist
    }

    /// Where a playback collaborator opens the audio stream.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn matches(&self, artist: Option<&Artist>, album: Option<&Album>) -> bool {
        self.artist().matches(artist) && album.is_none_or(|a| *self.album == *a)
    }
}

impl PartialEq for Song {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Song {}

impl Hash for Song {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl SongLike for Song {
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
