//! scan/mod.rs
//!
//! Feeds the catalog engine from disk:
//!   (A) discover paths -> Vec<PathBuf>
//!   (B) read tags -> Vec<RawMetadata> (one parallel task per file)
//!   (C) build -> Catalog
//!
//! A file that fails in (B) is logged and left out. It never fails the scan.

mod library;
mod probe;
mod tags;

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Instant;

use rayon::prelude::*;
use thiserror::Error;

use crate::engine::builder::CatalogBuilder;
use crate::engine::catalog::Catalog;
use crate::engine::types::RawMetadata;

pub use library::scan_mp3s;
pub use tags::read_record;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: tag read failed: {source}")]
    Tag {
        path: PathBuf,
        #[source]
        source: id3::Error,
    },

    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// `.mp3` files under all `roots`, sorted. A file reachable from two roots is listed once.
pub fn scan_paths(roots: &[PathBuf]) -> Result<Vec<PathBuf>, ScanError> {
    let mut found = BTreeSet::new();
    for root in roots {
        library::collect_mp3s(root, &mut found)?;
    }
    tracing::debug!("Found {} audio files under {} roots", found.len(), roots.len());
    Ok(found.into_iter().collect())
}

/// Read every file in parallel. Failures are logged and skipped.
pub fn read_records(paths: &[PathBuf]) -> Vec<RawMetadata> {
    let records: Vec<RawMetadata> = paths
        .par_iter()
        .filter_map(|path| match read_record(path) {
            Ok(raw) => Some(raw),
            Err(e) => {
                tracing::warn!("Error while parsing music file: {e}");
                None
            }
        })
        .collect();

    let skipped = paths.len() - records.len();
    if skipped > 0 {
        tracing::info!("Read {} files ({skipped} skipped)", records.len());
    } else {
        tracing::info!("Read {} files", records.len());
    }
    records
}

/// Scan, read, build.
pub fn load_library(roots: &[PathBuf], builder: &CatalogBuilder) -> Result<Catalog, ScanError> {
    let started = Instant::now();

    let paths = scan_paths(roots)?;
    let records = read_records(&paths);
    let catalog = builder.build(records);

    tracing::debug!("Load library took {:?}", started.elapsed());
    Ok(catalog)
}
