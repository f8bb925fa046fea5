//! engine/pipeline.rs
//! Filter + sort. Both take `&Catalog` and hand back a new one.
//!
//! Sort keys are layered so the hierarchy never falls apart:
//! - artists: `artist_cmp`
//! - albums:  (artist position, `album_cmp`)
//! - songs:   (artist position, album position, `song_cmp`)
//!
//! Every sort is stable, so `Comparator::Preserve` keeps the current order at its level.

use std::collections::HashMap;
use std::sync::Arc;

use super::catalog::Catalog;
use super::model::{Album, Artist, Song};
use super::sorter::{Comparator, SongSorter};
use super::view::ViewConfig;

impl Catalog {
    /// Keep what matches. `None` means no constraint on that axis.
    pub fn filter(&self, artist: Option<&Artist>, album: Option<&Album>) -> Catalog {
        let songs = self
            .songs()
            .iter()
            .filter(|s| s.matches(artist, album))
            .cloned()
            .collect();
        let albums = self
            .albums()
            .iter()
            .filter(|a| a.matches(artist, album))
            .cloned()
            .collect();
        let artists = self
            .artists()
            .iter()
            .filter(|a| a.matches(artist))
            .cloned()
            .collect();

        Catalog::new(songs, albums, artists)
    }

    pub fn sort(
        &self,
        artist_cmp: Comparator<Artist>,
        album_cmp: Comparator<Album>,
        song_cmp: Comparator<Song>,
    ) -> Catalog {
        let mut artists: Vec<Arc<Artist>> = self.artists().to_vec();
        artists.sort_by(|a, b| artist_cmp.compare(a, b));
        let artist_pos = positions(&artists);

        let mut albums: Vec<Arc<Album>> = self.albums().to_vec();
        albums.sort_by(|a, b| {
            artist_pos[&*a.artist]
                .cmp(&artist_pos[&*b.artist])
                .then_with(|| album_cmp.compare(a, b))
        });
        let album_pos = positions(&albums);

        let mut songs: Vec<Arc<Song>> = self.songs().to_vec();
        songs.sort_by(|a, b| {
            artist_pos[&**a.artist()]
                .cmp(&artist_pos[&**b.artist()])
                .then_with(|| album_pos[&*a.album].cmp(&album_pos[&*b.album]))
                .then_with(|| song_cmp.compare(a, b))
        });

        Catalog::new(songs, albums, artists)
    }

    /// Filter, then sort, as selected by `config`.
    ///
    /// The song comparator follows the mode: in album mode the in-album sorter applies,
    /// otherwise the ungrouped one (an in-album-only sorter there means "keep order").
    pub fn filter_and_sort(&self, config: &ViewConfig) -> Catalog {
        let song_cmp = if config.is_album_mode() {
            config.song_sorter_in_album.comparator()
        } else {
            ungrouped_song_comparator(config.song_sorter)
        };

        self.filter(config.artist_filter.as_deref(), config.album_filter.as_deref())
            .sort(
                config.artist_sorter.comparator(),
                config.album_sorter.comparator(),
                song_cmp,
            )
    }
}

fn ungrouped_song_comparator(sorter: SongSorter) -> Comparator<Song> {
    if sorter.in_album_only() {
        Comparator::Preserve
    } else {
        sorter.comparator()
    }
}

fn positions<T: Eq + std::hash::Hash>(items: &[Arc<T>]) -> HashMap<&T, usize> {
    items.iter().enumerate().map(|(i, x)| (&**x, i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::builder::build_catalog;
    use crate::engine::catalog::tests::assert_consistent;
    use crate::engine::sorter::{AlbumSorter, ArtistSorter};
    use crate::engine::types::RawMetadata;

    fn rec(file: &str, artist: &str, album: &str, track: u32, title: &str) -> RawMetadata {
        let mut r = RawMetadata::bare(file);
        r.artist = Some(artist.into());
        r.album = Some(album.into());
        r.track = Some(track);
        r.title = Some(title.into());
        r
    }

    fn library() -> Catalog {
        build_catalog(vec![
            rec("01.mp3", "Beta", "Second", 2, "b-second-2"),
            rec("02.mp3", "Alpha", "Zulu", 1, "a-zulu-1"),
            rec("03.mp3", "Beta", "First", 1, "b-first-1"),
            rec("04.mp3", "Alpha", "Able", 3, "a-able-3"),
            rec("05.mp3", "Beta", "Second", 1, "b-second-1"),
            rec("06.mp3", "Alpha", "Able", 1, "a-able-1"),
            rec("07.mp3", "Gamma", "Only", 1, "g-only-1"),
        ])
    }

    fn song_titles(c: &Catalog) -> Vec<&str> {
        c.songs().iter().map(|s| s.title.as_str()).collect()
    }

    fn album_titles(c: &Catalog) -> Vec<&str> {
        c.albums().iter().map(|a| a.title.as_str()).collect()
    }

    fn artist_names(c: &Catalog) -> Vec<&str> {
        c.artists().iter().map(|a| a.name.as_str()).collect()
    }

    /// Songs of one album sit together; albums of one artist sit together.
    fn assert_contiguous(c: &Catalog) {
        fn runs<K: PartialEq>(keys: Vec<K>) -> bool {
            let mut closed: Vec<&K> = Vec::new();
            for (i, k) in keys.iter().enumerate() {
                if i > 0 && keys[i - 1] != *k {
                    closed.push(&keys[i - 1]);
                    if closed.contains(&k) {
                        return false;
                    }
                }
            }
            true
        }
        assert!(runs(c.songs().iter().map(|s| Arc::clone(&s.album)).collect()));
        assert!(runs(c.albums().iter().map(|a| Arc::clone(&a.artist)).collect()));
    }

    #[test]
    fn preserve_everywhere_is_identity() {
        let c = library();
        let sorted = c.sort(Comparator::Preserve, Comparator::Preserve, Comparator::Preserve);

        assert_eq!(song_titles(&sorted), song_titles(&c));
        assert_eq!(album_titles(&sorted), album_titles(&c));
        assert_eq!(artist_names(&sorted), artist_names(&c));
        assert_consistent(&sorted);
    }

    #[test]
    fn full_sort_orders_every_level() {
        let sorted = library().sort(
            ArtistSorter::Alphabetical.comparator(),
            AlbumSorter::Alphabetical.comparator(),
            SongSorter::Track.comparator(),
        );

        assert_eq!(artist_names(&sorted), ["Alpha", "Beta", "Gamma"]);
        assert_eq!(album_titles(&sorted), ["Able", "Zulu", "First", "Second", "Only"]);
        assert_eq!(
            song_titles(&sorted),
            [
                "a-able-1",
                "a-able-3",
                "a-zulu-1",
                "b-first-1",
                "b-second-1",
                "b-second-2",
                "g-only-1"
            ]
        );
        assert_consistent(&sorted);
        assert_contiguous(&sorted);
    }

    #[test]
    fn album_sort_without_artist_sort_keeps_artist_blocks() {
        let c = library();
        let sorted = c.sort(
            Comparator::Preserve,
            AlbumSorter::AlphabeticalDesc.comparator(),
            SongSorter::AlphabeticalDesc.comparator(),
        );

        assert_eq!(artist_names(&sorted), artist_names(&c));
        assert_eq!(album_titles(&sorted), ["Second", "First", "Zulu", "Able", "Only"]);
        assert_contiguous(&sorted);
        assert_consistent(&sorted);
    }

    #[test]
    fn song_sort_alone_stays_inside_albums() {
        let sorted = library().sort(
            Comparator::Preserve,
            Comparator::Preserve,
            SongSorter::AlphabeticalDesc.comparator(),
        );
        assert_contiguous(&sorted);
        assert_eq!(song_titles(&sorted)[..2], ["b-second-2", "b-second-1"]);
    }

    #[test]
    fn descending_artist_sort() {
        let sorted = library().sort(
            ArtistSorter::AlphabeticalDesc.comparator(),
            Comparator::Preserve,
            Comparator::Preserve,
        );
        assert_eq!(artist_names(&sorted), ["Gamma", "Beta", "Alpha"]);
        assert_eq!(sorted.songs()[0].title, "g-only-1");
        assert_contiguous(&sorted);
    }

    #[test]
    fn filter_by_artist() {
        let c = library();
        let alpha = Arc::clone(c.find_artist("Alpha").unwrap());
        let f = c.filter(Some(&alpha), None);

        assert_eq!(artist_names(&f), ["Alpha"]);
        assert_eq!(album_titles(&f), ["Zulu", "Able"]);
        assert_eq!(f.songs().len(), 3);
        assert!(f.songs().iter().all(|s| *s.artist() == alpha));
        assert_consistent(&f);
    }

    #[test]
    fn filter_by_artist_and_album() {
        let c = library();
        let beta = Arc::clone(c.find_artist("Beta").unwrap());
        let second = Arc::clone(c.find_album("Beta", "Second").unwrap());
        let f = c.filter(Some(&beta), Some(&second));

        assert_eq!(artist_names(&f), ["Beta"]);
        assert_eq!(album_titles(&f), ["Second"]);
        assert_eq!(song_titles(&f), ["b-second-2", "b-second-1"]);
        assert_consistent(&f);
    }

    #[test]
    fn filter_matches_exactly_the_predicate() {
        let c = library();
        let artists: Vec<Option<Arc<Artist>>> = std::iter::once(None)
            .chain(c.artists().iter().cloned().map(Some))
            .collect();
        let albums: Vec<Option<Arc<Album>>> = std::iter::once(None)
            .chain(c.albums().iter().cloned().map(Some))
            .collect();

        for artist in &artists {
            for album in &albums {
                let (ar, al) = (artist.as_deref(), album.as_deref());
                let f = c.filter(ar, al);

                let kept_songs = c.songs().iter().filter(|s| s.matches(ar, al)).count();
                let kept_albums = c.albums().iter().filter(|a| a.matches(ar, al)).count();
                let kept_artists = c.artists().iter().filter(|a| a.matches(ar)).count();

                assert_eq!(f.songs().len(), kept_songs);
                assert_eq!(f.albums().len(), kept_albums);
                assert_eq!(f.artists().len(), kept_artists);
                assert!(f.songs().iter().all(|s| s.matches(ar, al)));
                assert!(f.albums().iter().all(|a| a.matches(ar, al)));
                assert!(f.artists().iter().all(|a| a.matches(ar)));

                for s in f.songs() {
                    assert!(f.songs_of_album(&s.album).contains(s));
                    assert!(f.songs_of_artist(s.artist()).contains(s));
                }
            }
        }
    }

    #[test]
    fn no_filter_keeps_everything_in_order() {
        let c = library();
        let f = c.filter(None, None);
        assert_eq!(song_titles(&f), song_titles(&c));
        assert_eq!(album_titles(&f), album_titles(&c));
    }

    #[test]
    fn filter_and_sort_uses_track_order_in_album_mode() {
        let c = library();
        let beta = Arc::clone(c.find_artist("Beta").unwrap());
        let second = Arc::clone(c.find_album("Beta", "Second").unwrap());

        let config = ViewConfig::default()
            .with_artist_filter(Some(beta))
            .with_album_filter(Some(second));
        let out = c.filter_and_sort(&config);

        assert_eq!(song_titles(&out), ["b-second-1", "b-second-2"]);
    }

    #[test]
    fn filter_and_sort_ignores_track_order_outside_albums() {
        let c = library();
        let config = ViewConfig {
            artist_sorter: ArtistSorter::None,
            album_sorter: AlbumSorter::None,
            song_sorter: SongSorter::Track,
            ..ViewConfig::default()
        };
        assert!(!config.is_album_mode());

        let out = c.filter_and_sort(&config);
        assert_eq!(song_titles(&out), song_titles(&c));
    }
}
