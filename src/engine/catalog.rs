//! engine/catalog.rs
//! The immutable catalog: songs, albums, artists + derived groupings.
//!
//! Invariants (checked in tests, relied on by the view):
//! - every song's album is in `albums`, every album's artist is in `artists`
//! - `songs_by_artist` / `songs_by_album` are exactly a group-by of `songs`
//! - no duplicate artists or albums
//! - sequence order is meaningful; only `sort` changes it
//!
//! Nothing here mutates after construction. Filter/sort return a new `Catalog`.

use std::collections::HashMap;
use std::sync::Arc;

use super::model::{Album, Artist, Song};
use super::stats::CollectionStats;

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    songs: Vec<Arc<Song>>,
    albums: Vec<Arc<Album>>,
    artists: Vec<Arc<Artist>>,

    songs_by_artist: HashMap<Arc<Artist>, Vec<Arc<Song>>>,
    songs_by_album: HashMap<Arc<Album>, Vec<Arc<Song>>>,
    stats: CollectionStats,
}

impl Catalog {
    /// Groupings and stats are derived here, eagerly, from `songs`.
    pub(crate) fn new(
        songs: Vec<Arc<Song>>,
        albums: Vec<Arc<Album>>,
        artists: Vec<Arc<Artist>>,
    ) -> Self {
        let songs_by_artist = group_by(&songs, |s| Arc::clone(s.artist()));
        let songs_by_album = group_by(&songs, |s| Arc::clone(&s.album));
        let stats = CollectionStats::of(songs.iter().map(|s| &**s));

        Self {
            songs,
            albums,
            artists,
            songs_by_artist,
            songs_by_album,
            stats,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn songs(&self) -> &[Arc<Song>] {
        &self.songs
    }

    pub fn albums(&self) -> &[Arc<Album>] {
        &self.albums
    }

    pub fn artists(&self) -> &[Arc<Artist>] {
        &self.artists
    }

    pub fn songs_by_artist(&self) -> &HashMap<Arc<Artist>, Vec<Arc<Song>>> {
        &self.songs_by_artist
    }

    pub fn songs_by_album(&self) -> &HashMap<Arc<Album>, Vec<Arc<Song>>> {
        &self.songs_by_album
    }

    /// Totals over every song in this catalog.
    pub fn stats(&self) -> &CollectionStats {
        &self.stats
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Songs of `artist`, in catalog order.
    ///
    /// # Panics
    /// If the artist has no entry in the grouping. That means the catalog was
    /// assembled inconsistently, which is a bug, not a runtime condition.
    pub fn songs_of_artist(&self, artist: &Artist) -> &[Arc<Song>] {
        match self.songs_by_artist.get(artist) {
            Some(songs) => songs,
            None => panic!(
                "catalog invariant violated: artist {:?} has no songs grouping",
                artist.name
            ),
        }
    }

    /// Songs of `album`, in catalog order.
    ///
    /// # Panics
    /// Same contract as [`Catalog::songs_of_artist`].
    pub fn songs_of_album(&self, album: &Album) -> &[Arc<Song>] {
        match self.songs_by_album.get(album) {
            Some(songs) => songs,
            None => panic!(
                "catalog invariant violated: album {:?} has no songs grouping",
                album.display_title(true)
            ),
        }
    }

    pub fn find_artist(&self, name: &str) -> Option<&Arc<Artist>> {
        self.artists.iter().find(|a| a.name == name)
    }

    pub fn find_album(&self, artist: &str, title: &str) -> Option<&Arc<Album>> {
        self.albums
            .iter()
            .find(|a| a.title == title && a.artist.name == artist)
    }
}

/// Order-preserving group-by: each value list keeps the order of `items`.
fn group_by<K, F>(items: &[Arc<Song>], key: F) -> HashMap<K, Vec<Arc<Song>>>
where
    K: Eq + std::hash::Hash,
    F: Fn(&Song) -> K,
{
    let mut out: HashMap<K, Vec<Arc<Song>>> = HashMap::new();
    for item in items {
        out.entry(key(&**item)).or_default().push(Arc::clone(item));
    }
    out
}
