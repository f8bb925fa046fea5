//! engine/builder.rs
//! Raw records -> Catalog.
//!
//! Pipeline:
//!   (A) decode every distinct cover once (parallel, joined before continuing)
//!   (B) group by resolved album artist -> one Artist per group
//!   (C) group by (Artist, resolved album title) -> one Album per group
//!   (D) one Song per record, no record is ever dropped
//!
//! Output order:
//! - artists: first-encountered
//! - albums: grouped by artist order, first-encountered within an artist
//! - songs: grouped by album order, input order within an album

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use super::artwork::{Cover, CoverDecoder, ImageDecoder, decode_covers};
use super::catalog::Catalog;
use super::model::{Album, Artist, Song};
use super::stats::{CollectionStats, most_common};
use super::types::{Fallbacks, RawImage, RawMetadata};

/// Build a catalog with default fallbacks and the `image` crate decoder.
pub fn build_catalog(records: Vec<RawMetadata>) -> Catalog {
    CatalogBuilder::new().build(records)
}

pub struct CatalogBuilder {
    fallbacks: Fallbacks,
    decoder: Box<dyn CoverDecoder>,
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self {
            fallbacks: Fallbacks::default(),
            decoder: Box::new(ImageDecoder),
        }
    }

    pub fn with_fallbacks(mut self, fallbacks: Fallbacks) -> Self {
        self.fallbacks = fallbacks;
        self
    }

    pub fn with_decoder(mut self, decoder: impl CoverDecoder + 'static) -> Self {
        self.decoder = Box::new(decoder);
        self
    }

    pub fn fallbacks(&self) -> &Fallbacks {
        &self.fallbacks
    }

    pub fn build(&self, records: Vec<RawMetadata>) -> Catalog {
        let started = Instant::now();

        // (A)
        let covers = decode_covers(
            records.iter().filter_map(|r| r.cover.as_ref()),
            self.decoder.as_ref(),
        );

        // Resolve every grouping key once up front.
        let keys: Vec<(String, String)> = records
            .iter()
            .map(|r| {
                (
                    r.resolved_album_artist(&self.fallbacks),
                    r.resolved_album(&self.fallbacks),
                )
            })
            .collect();

        // (B)
        let artist_groups = group_indices(keys.iter().map(|(artist, _)| artist.clone()));
        let artists: Vec<Arc<Artist>> = artist_groups
            .iter()
            .map(|(name, members)| {
                Arc::new(Artist {
                    name: name.clone(),
                    stats: CollectionStats::of(members.iter().map(|&i| &records[i])),
                })
            })
            .collect();
        let artist_pos: HashMap<&str, usize> = artists
            .iter()
            .enumerate()
            .map(|(i, a)| (a.name.as_str(), i))
            .collect();

        // (C) albums, grouped by artist position then first-seen
        let mut album_groups = group_indices(keys.iter().cloned());
        album_groups.sort_by_key(|((artist, _), _)| artist_pos[artist.as_str()]);

        let albums: Vec<Arc<Album>> = album_groups
            .iter()
            .map(|((artist, title), members)| {
                let artist = Arc::clone(&artists[artist_pos[artist.as_str()]]);
                let blobs: Vec<&RawImage> = members
                    .iter()
                    .filter_map(|&i| records[i].cover.as_ref())
                    .collect();
                let cover = most_common(blobs.iter().copied()).and_then(|b| lookup(&covers, b));

                Arc::new(Album {
                    title: title.clone(),
                    artist,
                    cover,
                    stats: CollectionStats::of(members.iter().map(|&i| &records[i])),
                })
            })
            .collect();

        // (D) songs, walked album by album so they come out grouped
        let mut songs: Vec<Arc<Song>> = Vec::with_capacity(records.len());
        for (album, (_, members)) in albums.iter().zip(album_groups.iter()) {
            for &i in members {
                let raw = &records[i];
                songs.push(Arc::new(Song {
                    path: raw.path.clone(),
                    track: raw.track,
                    title: raw.resolved_title(&self.fallbacks),
                    album: Arc::clone(album),
                    cover: raw.cover.as_ref().and_then(|b| lookup(&covers, b)),
                    duration: raw.duration,
                    year: raw.year,
                }));
            }
        }

        let catalog = Catalog::new(songs, albums, artists);

        tracing::info!(
            "Catalog has {} artists, {} albums, {} songs",
            catalog.artists().len(),
            catalog.albums().len(),
            catalog.songs().len()
        );
        tracing::debug!("Catalog built in {:?}", started.elapsed());

        catalog
    }
}

/// Group positions by key, keeping keys in first-seen order.
fn group_indices<K>(keys: impl Iterator<Item = K>) -> Vec<(K, Vec<usize>)>
where
    K: Eq + std::hash::Hash + Clone,
{
    let mut slot: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<usize>)> = Vec::new();

    for (i, key) in keys.enumerate() {
        let at = *slot.entry(key.clone()).or_insert_with(|| {
            groups.push((key, Vec::new()));
            groups.len() - 1
        });
        groups[at].1.push(i);
    }
    groups
}

fn lookup(covers: &HashMap<RawImage, Option<Cover>>, blob: &RawImage) -> Option<Cover> {
    covers.get(blob).cloned().flatten()
}
