//! Melodex
//!
//! Builds a normalized music catalog (artists -> albums -> songs) from raw per-file
//! metadata and serves filtered, sorted views of it.
//!
//! - [`engine`]: catalog model, builder, filter/sort pipeline, view entries
//! - [`scan`]: walks folders and reads ID3 tags into raw records for the engine

pub mod engine;
pub mod scan;

pub use engine::artwork::{Cover, CoverDecoder, DecodeError, ImageDecoder};
pub use engine::builder::{CatalogBuilder, build_catalog};
pub use engine::catalog::Catalog;
pub use engine::model::{Album, Artist, Song};
pub use engine::sorter::{AlbumSorter, ArtistSorter, Comparator, SongSorter, Sorter};
pub use engine::stats::CollectionStats;
pub use engine::types::{Fallbacks, RawImage, RawMetadata, SongLike, UNKNOWN};
pub use engine::view::{ViewConfig, ViewEntry};
pub use scan::{ScanError, load_library};
