//! Melodex CLI
//!
//! Scans folders for `.mp3` files, builds the catalog, and prints one filtered/sorted view.
//!
//! - `melodex ~/Music` -> albums by year, songs by track
//! - `melodex ~/Music --album-sort none --artist-sort name` -> grouped by artist
//! - `melodex ~/Music --artist "Some Band" --album "Some Album"`
//!
//! Logging goes to stderr, controlled by `RUST_LOG` (default `info`).

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use melodex::{
    AlbumSorter, ArtistSorter, Catalog, CatalogBuilder, Fallbacks, Song, SongSorter, Sorter,
    ViewConfig, ViewEntry, load_library,
};

#[derive(Parser, Debug)]
#[command(version, about = "Build a music catalog from MP3 tags and print a view of it")]
struct CliArgs {
    /// Folders to scan (recursively).
    #[arg(required = true)]
    roots: Vec<PathBuf>,

    /// none | name | name-desc
    #[arg(long, default_value = "name")]
    artist_sort: ArtistSorter,

    /// none | title | title-desc | year
    #[arg(long, default_value = "year")]
    album_sort: AlbumSorter,

    /// track | title | title-desc (track only applies inside albums)
    #[arg(long, default_value = "track")]
    song_sort: SongSorter,

    /// Only this album artist.
    #[arg(long)]
    artist: Option<String>,

    /// Only this album (needs --artist when the title is ambiguous).
    #[arg(long)]
    album: Option<String>,

    /// Label for missing artist/album tags.
    #[arg(long, default_value = melodex::UNKNOWN)]
    unknown: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    let builder = CatalogBuilder::new().with_fallbacks(Fallbacks::uniform(args.unknown.clone()));
    let catalog = load_library(&args.roots, &builder).context("scan failed")?;

    let config = view_config(&args, &catalog)?;
    let view = catalog.filter_and_sort(&config);

    println!(
        "{} · {} · songs {}",
        config.artist_sorter.all_by_this(),
        config.album_sorter.all_by_this(),
        config.song_sorter_in_album.by_this()
    );
    for entry in view.to_view_entries(&config) {
        print_entry(&entry);
    }

    Ok(())
}

fn view_config(args: &CliArgs, catalog: &Catalog) -> Result<ViewConfig> {
    let mut config = ViewConfig::default()
        .with_artist_sorter(args.artist_sort)
        .with_album_sorter(args.album_sort)
        .with_song_sorter(args.song_sort);

    if let Some(name) = &args.artist {
        let Some(artist) = catalog.find_artist(name) else {
            bail!("no artist named {name:?}");
        };
        config = config.with_artist_filter(Some(Arc::clone(artist)));
    }

    if let Some(title) = &args.album {
        let mut matches = catalog
            .albums()
            .iter()
            .filter(|a| a.title == *title && a.artist.matches(config.artist_filter.as_deref()));
        let Some(album) = matches.next() else {
            bail!("no album titled {title:?}");
        };
        if matches.next().is_some() {
            bail!("album title {title:?} is ambiguous, add --artist");
        }
        config = config.with_album_filter(Some(Arc::clone(album)));
    }

    Ok(config)
}

fn print_entry(entry: &ViewEntry) {
    match entry {
        ViewEntry::Album { album, songs } => {
            let year = album.stats.year.map(|y| format!(" ({y})")).unwrap_or_default();
            let art = if album.cover.is_some() { " [art]" } else { "" };
            println!(
                "\n{}{year}{art} · {} songs, {}",
                album.display_title(true),
                album.stats.count,
                fmt_duration(album.stats.total_duration)
            );
            songs.iter().for_each(|s| print_song(s, true));
        }
        ViewEntry::Artist { artist, songs } => {
            println!(
                "\n{} · {} songs, {}",
                artist.name,
                artist.stats.count,
                fmt_duration(artist.stats.total_duration)
            );
            songs.iter().for_each(|s| print_song(s, false));
        }
        ViewEntry::Song(song) => print_song(song, false),
    }
}

fn print_song(song: &Song, in_album: bool) {
    let track = song
        .track
        .map(|n| format!("{n:>2}"))
        .unwrap_or_else(|| "??".to_string());
    let duration = fmt_duration(song.duration);

    if in_album {
        println!("  {track}  {}  {duration}", song.title);
    } else {
        println!(
            "  {} - {} ({})  {duration}",
            song.artist().name,
            song.title,
            song.album.title
        );
    }
}

fn fmt_duration(d: Duration) -> String {
    let s = d.as_secs();
    let m = s / 60;
    let s = s % 60;
    format!("{m}:{s:02}")
}
