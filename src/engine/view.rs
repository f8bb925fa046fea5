//! engine/view.rs
//! View configuration + flattening a catalog into display entries.
//!
//! Mode is decided by the config alone:
//! - album mode: an album sort is picked, or an album filter is set
//! - artist mode: not album mode, and an artist sort or filter is active
//! - otherwise: a flat song list

use std::sync::Arc;

use super::catalog::Catalog;
use super::model::{Album, Artist, Song};
use super::sorter::{AlbumSorter, ArtistSorter, SongSorter};

/// Every filter/sort selection the presentation side can make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    pub artist_sorter: ArtistSorter,
    pub album_sorter: AlbumSorter,
    /// Used when songs are listed outside an album.
    pub song_sorter: SongSorter,
    /// Used inside an album group.
    pub song_sorter_in_album: SongSorter,
    pub artist_filter: Option<Arc<Artist>>,
    pub album_filter: Option<Arc<Album>>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            artist_sorter: ArtistSorter::Alphabetical,
            album_sorter: AlbumSorter::Year,
            song_sorter: SongSorter::Alphabetical,
            song_sorter_in_album: SongSorter::Track,
            artist_filter: None,
            album_filter: None,
        }
    }
}

impl ViewConfig {
    pub fn is_album_mode(&self) -> bool {
        self.album_sorter != AlbumSorter::None || self.album_filter.is_some()
    }

    pub fn is_artist_mode(&self) -> bool {
        !self.is_album_mode()
            && (self.artist_sorter != ArtistSorter::None || self.artist_filter.is_some())
    }

    /// Clearing the artist clears the album too; a kept album must belong to the new artist.
    pub fn with_artist_filter(self, artist: Option<Arc<Artist>>) -> Self {
        match artist {
            None => Self {
                artist_filter: None,
                album_filter: None,
                ..self
            },
            Some(artist) => {
                let album_filter = self.album_filter.filter(|a| a.artist == artist);
                Self {
                    artist_filter: Some(artist),
                    album_filter,
                    ..self
                }
            }
        }
    }

    /// Picking an album also picks its artist.
    pub fn with_album_filter(self, album: Option<Arc<Album>>) -> Self {
        match album {
            None => Self {
                album_filter: None,
                ..self
            },
            Some(album) => Self {
                artist_filter: Some(Arc::clone(&album.artist)),
                album_filter: Some(album),
                ..self
            },
        }
    }

    /// An in-album-only sorter leaves the ungrouped song sort alone.
    pub fn with_song_sorter(self, sorter: SongSorter) -> Self {
        Self {
            song_sorter: if sorter.in_album_only() {
                self.song_sorter
            } else {
                sorter
            },
            song_sorter_in_album: sorter,
            ..self
        }
    }

    pub fn with_artist_sorter(self, sorter: ArtistSorter) -> Self {
        Self {
            artist_sorter: sorter,
            ..self
        }
    }

    pub fn with_album_sorter(self, sorter: AlbumSorter) -> Self {
        Self {
            album_sorter: sorter,
            ..self
        }
    }
}

/// One display unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEntry {
    Artist {
        artist: Arc<Artist>,
        songs: Vec<Arc<Song>>,
    },
    Album {
        album: Arc<Album>,
        songs: Vec<Arc<Song>>,
    },
    Song(Arc<Song>),
}

impl ViewEntry {
    pub fn songs(&self) -> &[Arc<Song>] {
        match self {
            ViewEntry::Artist { songs, .. } | ViewEntry::Album { songs, .. } => songs,
            ViewEntry::Song(song) => std::slice::from_ref(song),
        }
    }
}

impl Catalog {
    /// Flatten into entries for the presentation layer, in catalog order.
    ///
    /// Expects a catalog that was already filtered/sorted with the same `config`
    /// (see [`Catalog::filter_and_sort`]).
    pub fn to_view_entries(&self, config: &ViewConfig) -> Vec<ViewEntry> {
        if config.is_album_mode() {
            self.albums()
                .iter()
                .map(|album| ViewEntry::Album {
                    album: Arc::clone(album),
                    songs: self.songs_of_album(album).to_vec(),
                })
                .collect()
        } else if config.is_artist_mode() {
            self.artists()
                .iter()
                .map(|artist| ViewEntry::Artist {
                    artist: Arc::clone(artist),
                    songs: self.songs_of_artist(artist).to_vec(),
                })
                .collect()
        } else {
            self.songs()
                .iter()
                .map(|song| ViewEntry::Song(Arc::clone(song)))
                .collect()
        }
    }
}
