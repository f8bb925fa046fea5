//! engine/mod.rs
//!
//! The catalog engine:
//! - raw per-file metadata in (see `types`)
//! - an immutable, cross-referenced `Catalog` out (artists -> albums -> songs)
//! - filter/sort into new catalogs, then flatten into view entries
//!
//! No filesystem code and no tag parsing here. `crate::scan` does that.

pub mod artwork;
pub mod builder;
pub mod catalog;
pub mod model;
pub mod pipeline;
pub mod sorter;
pub mod stats;
pub mod types;
pub mod view;
