//! engine/sorter.rs
//! The fixed set of sort choices per level, and what each one means as a comparator.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::model::{Album, Artist, Song};

/// A sort step that may be "keep the order you already have".
///
/// `Preserve` is not "any order": a stable sort with it is a no-op.
pub enum Comparator<T> {
    Preserve,
    By(fn(&T, &T) -> Ordering),
}

impl<T> Comparator<T> {
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        match self {
            Comparator::Preserve => Ordering::Equal,
            Comparator::By(cmp) => cmp(a, b),
        }
    }

    pub fn is_preserve(&self) -> bool {
        matches!(self, Comparator::Preserve)
    }
}

// Manual impls: derive would demand `T: Clone`.
impl<T> Clone for Comparator<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Comparator<T> {}

impl<T> fmt::Debug for Comparator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparator::Preserve => f.write_str("Preserve"),
            Comparator::By(_) => f.write_str("By(..)"),
        }
    }
}

/// Shared surface of the per-level sorter enums.
pub trait Sorter: Copy {
    /// What the UI calls this sort, `None` for "no sort".
    fn label(&self) -> Option<&'static str>;

    /// "all", "all by name", ...
    fn all_by_this(&self) -> String {
        match self.label() {
            Some(label) => format!("all by {label}"),
            None => "all".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ArtistSorter {
    None,
    #[default]
    Alphabetical,
    AlphabeticalDesc,
}

impl ArtistSorter {
    pub const ALL: [ArtistSorter; 3] = [
        ArtistSorter::None,
        ArtistSorter::Alphabetical,
        ArtistSorter::AlphabeticalDesc,
    ];

    pub fn comparator(&self) -> Comparator<Artist> {
        match self {
            ArtistSorter::None => Comparator::Preserve,
            ArtistSorter::Alphabetical => Comparator::By(artist_name),
            ArtistSorter::AlphabeticalDesc => Comparator::By(artist_name_desc),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ArtistSorter::None => "none",
            ArtistSorter::Alphabetical => "name",
            ArtistSorter::AlphabeticalDesc => "name-desc",
        }
    }
}

impl Sorter for ArtistSorter {
    fn label(&self) -> Option<&'static str> {
        match self {
            ArtistSorter::None => None,
            ArtistSorter::Alphabetical => Some("name"),
            ArtistSorter::AlphabeticalDesc => Some("name Z->A"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlbumSorter {
    None,
    Alphabetical,
    AlphabeticalDesc,
    /// Most common year among the album's songs; undated albums last.
    #[default]
    Year,
}

impl AlbumSorter {
    pub const ALL: [AlbumSorter; 4] = [
        AlbumSorter::None,
        AlbumSorter::Alphabetical,
        AlbumSorter::AlphabeticalDesc,
        AlbumSorter::Year,
    ];

    pub fn comparator(&self) -> Comparator<Album> {
        match self {
            AlbumSorter::None => Comparator::Preserve,
            AlbumSorter::Alphabetical => Comparator::By(album_title),
            AlbumSorter::AlphabeticalDesc => Comparator::By(album_title_desc),
            AlbumSorter::Year => Comparator::By(by_year),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AlbumSorter::None => "none",
            AlbumSorter::Alphabetical => "title",
            AlbumSorter::AlphabeticalDesc => "title-desc",
            AlbumSorter::Year => "year",
        }
    }
}

impl Sorter for AlbumSorter {
    fn label(&self) -> Option<&'static str> {
        match self {
            AlbumSorter::None => None,
            AlbumSorter::Alphabetical => Some("title"),
            AlbumSorter::AlphabeticalDesc => Some("title Z->A"),
            AlbumSorter::Year => Some("year"),
        }
    }
}

fn artist_name(a: &Artist, b: &Artist) -> Ordering {
    a.name.cmp(&b.name)
}

fn artist_name_desc(a: &Artist, b: &Artist) -> Ordering {
    artist_name(b, a)
}

fn album_title(a: &Album, b: &Album) -> Ordering {
    a.title.cmp(&b.title)
}

fn album_title_desc(a: &Album, b: &Album) -> Ordering {
    album_title(b, a)
}

fn song_title(a: &Song, b: &Song) -> Ordering {
    a.title.cmp(&b.title)
}

fn song_title_desc(a: &Song, b: &Song) -> Ordering {
    song_title(b, a)
}

/// Songs without a track number come first.
fn song_track(a: &Song, b: &Song) -> Ordering {
    a.track.cmp(&b.track)
}

fn by_year(a: &Album, b: &Album) -> Ordering {
    match (a.stats.year, b.stats.year) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.title.cmp(&b.title))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SongSorter {
    /// Only meaningful inside one album.
    Track,
    #[default]
    Alphabetical,
    AlphabeticalDesc,
}

impl SongSorter {
    pub const ALL: [SongSorter; 3] = [
        SongSorter::Track,
        SongSorter::Alphabetical,
        SongSorter::AlphabeticalDesc,
    ];

    pub fn comparator(&self) -> Comparator<Song> {
        match self {
            SongSorter::Track => Comparator::By(song_track),
            SongSorter::Alphabetical => Comparator::By(song_title),
            SongSorter::AlphabeticalDesc => Comparator::By(song_title_desc),
        }
    }

    pub fn in_album_only(&self) -> bool {
        matches!(self, SongSorter::Track)
    }

    /// "by track", "by title", ...
    pub fn by_this(&self) -> String {
        format!("by {}", self.label().unwrap_or_default())
    }

    pub fn name(&self) -> &'static str {
        match self {
            SongSorter::Track => "track",
            SongSorter::Alphabetical => "title",
            SongSorter::AlphabeticalDesc => "title-desc",
        }
    }
}

impl Sorter for SongSorter {
    fn label(&self) -> Option<&'static str> {
        Some(match self {
            SongSorter::Track => "track",
            SongSorter::Alphabetical => "title",
            SongSorter::AlphabeticalDesc => "title Z->A",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sorter {given:?}, expected one of: {expected}")]
pub struct ParseSorterError {
    given: String,
    expected: String,
}

fn parse_by_name<T: Copy>(
    s: &str,
    all: &[T],
    name: fn(&T) -> &'static str,
) -> Result<T, ParseSorterError> {
    let wanted = s.trim().to_ascii_lowercase();
    all.iter()
        .find(|v| name(*v) == wanted)
        .copied()
        .ok_or_else(|| ParseSorterError {
            given: s.to_string(),
            expected: all.iter().map(name).collect::<Vec<_>>().join(", "),
        })
}

impl FromStr for ArtistSorter {
    type Err = ParseSorterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_by_name(s, &Self::ALL, Self::name)
    }
}

impl FromStr for AlbumSorter {
    type Err = ParseSorterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_by_name(s, &Self::ALL, Self::name)
    }
}

impl FromStr for SongSorter {
    type Err = ParseSorterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_by_name(s, &Self::ALL, Self::name)
    }
}
