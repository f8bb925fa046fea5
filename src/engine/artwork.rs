//! engine/artwork.rs
//! Content-keyed cover decoding.
//!
//! - Every distinct blob is decoded exactly once, no matter how many files embed it.
//! - Decodes run in parallel on the rayon pool and are all joined before returning.
//! - A broken image never aborts the others: it is logged and maps to `None`.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use image::RgbaImage;
use rayon::prelude::*;
use thiserror::Error;

use super::types::RawImage;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("empty image data")]
    Empty,

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Turns raw bytes into pixels. Must be callable from many threads at once.
pub trait CoverDecoder: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<RgbaImage, DecodeError>;
}

/// Default decoder backed by the `image` crate (format is sniffed from the bytes).
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageDecoder;

impl CoverDecoder for ImageDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<RgbaImage, DecodeError> {
        if bytes.is_empty() {
            return Err(DecodeError::Empty);
        }
        Ok(image::load_from_memory(bytes)?.to_rgba8())
    }
}

/// A decoded cover. Cloning shares the pixels.
#[derive(Clone)]
pub struct Cover(Arc<RgbaImage>);

impl Cover {
    pub fn new(image: RgbaImage) -> Self {
        Self(Arc::new(image))
    }

    pub fn image(&self) -> &RgbaImage {
        &self.0
    }

    pub fn width(&self) -> u32 {
        self.0.width()
    }

    pub fn height(&self) -> u32 {
        self.0.height()
    }

    /// True when both came out of the same decode.
    pub fn ptr_eq(a: &Cover, b: &Cover) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl PartialEq for Cover {
    fn eq(&self, other: &Self) -> bool {
        Cover::ptr_eq(self, other) || *self.0 == *other.0
    }
}

impl std::fmt::Debug for Cover {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cover({}x{})", self.width(), self.height())
    }
}

/// Decode every distinct blob in `blobs`.
///
/// The result has one entry per distinct blob (failures included, as `None`).
pub fn decode_covers<'a, I>(
    blobs: I,
    decoder: &dyn CoverDecoder,
) -> HashMap<RawImage, Option<Cover>>
where
    I: IntoIterator<Item = &'a RawImage>,
{
    let distinct: Vec<&RawImage> = {
        let mut seen: HashSet<&RawImage> = HashSet::new();
        blobs.into_iter().filter(|b| seen.insert(*b)).collect()
    };

    tracing::debug!("decoding {} distinct covers", distinct.len());

    distinct
        .into_par_iter()
        .map(|raw| {
            let decoded = match decoder.decode(raw.bytes()) {
                Ok(img) => Some(Cover::new(img)),
                Err(e) => {
                    tracing::warn!("Error while decoding artwork ({} bytes): {e}", raw.len());
                    None
                }
            };
            (raw.clone(), decoded)
        })
        .collect()
}
