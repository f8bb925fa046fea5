//! scan/tags.rs
//! Read ID3 tags from an MP3 into a `RawMetadata`.
//!
//! - A file with no tag at all is still a song: every field comes back `None`.
//! - Any other tag error is a parse failure for that file.

use std::path::Path;
use std::time::Duration;

use id3::frame::{Content, PictureType};
use id3::{ErrorKind, Tag, TagLike};

use super::ScanError;
use super::probe::probe_duration;
use crate::engine::types::{RawImage, RawMetadata};

pub fn read_record(path: &Path) -> Result<RawMetadata, ScanError> {
    let tag = match Tag::read_from_path(path) {
        Ok(tag) => Some(tag),
        Err(e) if matches!(e.kind, ErrorKind::NoTag) => None,
        Err(source) => {
            return Err(ScanError::Tag {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let mut raw = match &tag {
        Some(tag) => build_from_tag(path, tag),
        None => RawMetadata::bare(path),
    };

    // Prefer the real stream length, then TLEN, then nothing.
    let tlen = tag
        .as_ref()
        .and_then(|t| t.duration())
        .map(|ms| Duration::from_millis(ms.into()));
    raw.duration = probe_duration(path).or(tlen).unwrap_or(Duration::ZERO);

    Ok(raw)
}

fn build_from_tag(path: &Path, tag: &Tag) -> RawMetadata {
    let track = tag
        .track()
        .or_else(|| parse_track(text_frame(tag, "TRCK").as_deref()));

    RawMetadata {
        path: path.to_path_buf(),
        track,
        title: tag.title().map(str::to_owned),
        album: tag.album().map(str::to_owned),
        artist: tag.artist().map(str::to_owned),
        album_artist: tag.album_artist().map(str::to_owned),
        cover: embedded_art(tag),
        duration: Duration::ZERO,
        year: tag.year().or_else(|| tag.date_recorded().map(|d| d.year)),
    }
}

/// Front cover if tagged as such, else the first picture of any kind.
fn embedded_art(tag: &Tag) -> Option<RawImage> {
    let mut pictures = tag.pictures().filter(|p| !p.data.is_empty());
    let first = pictures.next()?;
    let front = std::iter::once(first)
        .chain(pictures)
        .find(|p| p.picture_type == PictureType::CoverFront);

    Some(RawImage::new(front.unwrap_or(first).data.clone()))
}

fn text_frame(tag: &Tag, id: &str) -> Option<String> {
    match tag.get(id)?.content() {
        Content::Text(s) => Some(s.clone()),
        _ => None,
    }
}

/// "3" -> 3, "3/12" -> 3
fn parse_track(s: Option<&str>) -> Option<u32> {
    s?.split('/').next()?.trim().parse::<u32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use id3::frame::Picture;
    use id3::{Tag, Version};

    #[test]
    fn parse_track_forms() {
        assert_eq!(parse_track(Some("3")), Some(3));
        assert_eq!(parse_track(Some(" 3/12 ")), Some(3));
        assert_eq!(parse_track(Some("")), None);
        assert_eq!(parse_track(Some("abc")), None);
        assert_eq!(parse_track(None), None);
    }

    #[test]
    fn untagged_file_is_a_bare_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("No Tags.mp3");
        std::fs::write(&path, b"not really audio").unwrap();

        let raw = read_record(&path).unwrap();
        assert_eq!(raw.title, None);
        assert_eq!(raw.cover, None);
        assert_eq!(raw.duration, Duration::ZERO);
    }

    #[test]
    fn reads_written_tag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.mp3");
        std::fs::write(&path, b"").unwrap();

        let mut tag = Tag::new();
        tag.set_title("One");
        tag.set_artist("X");
        tag.set_album("Y");
        tag.set_album_artist("Various");
        tag.set_track(4);
        tag.set_year(2004);
        tag.set_duration(61_000);
        tag.add_frame(Picture {
            mime_type: "image/png".to_string(),
            picture_type: PictureType::Other,
            description: "back".to_string(),
            data: vec![9, 9],
        });
        tag.add_frame(Picture {
            mime_type: "image/png".to_string(),
            picture_type: PictureType::CoverFront,
            description: "front".to_string(),
            data: vec![1, 2, 3],
        });
        tag.write_to_path(&path, Version::Id3v23).unwrap();

        let raw = read_record(&path).unwrap();
        assert_eq!(raw.title.as_deref(), Some("One"));
        assert_eq!(raw.artist.as_deref(), Some("X"));
        assert_eq!(raw.album.as_deref(), Some("Y"));
        assert_eq!(raw.album_artist.as_deref(), Some("Various"));
        assert_eq!(raw.track, Some(4));
        assert_eq!(raw.year, Some(2004));
        assert_eq!(raw.cover, Some(RawImage::new(vec![1u8, 2, 3])));
        assert_eq!(raw.duration, Duration::from_millis(61_000));
    }

    #[test]
    fn first_picture_when_none_is_a_front_cover() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.mp3");
        std::fs::write(&path, b"").unwrap();

        let mut tag = Tag::new();
        tag.set_artist("X");
        for (kind, desc, data) in [
            (PictureType::CoverBack, "back", vec![7u8]),
            (PictureType::Artist, "band", vec![8u8]),
        ] {
            tag.add_frame(Picture {
                mime_type: "image/png".to_string(),
                picture_type: kind,
                description: desc.to_string(),
                data,
            });
        }
        tag.write_to_path(&path, Version::Id3v23).unwrap();

        let raw = read_record(&path).unwrap();
        assert_eq!(raw.cover, Some(RawImage::new(vec![7u8])));
        assert_eq!(raw.album_artist, None);
        assert_eq!(raw.artist.as_deref(), Some("X"));
    }
}
