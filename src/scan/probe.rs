//! scan/probe.rs
//! Stream length via Symphonia. Probe only, nothing is decoded.

use std::fs::File;
use std::path::Path;
use std::time::Duration;

use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::units::TimeBase;

/// `None` when the container can't be probed or doesn't report a frame count.
pub(crate) fn probe_duration(path: &Path) -> Option<Duration> {
    let file = File::open(path).ok()?;
    let mss = MediaSourceStream::new(Box::new(file), MediaSourceStreamOptions::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = match symphonia::default::get_probe().format(
        &hint,
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    ) {
        Ok(p) => p,
        Err(e) => {
            tracing::debug!("Format probe failed for {}: {e}", path.display());
            return None;
        }
    };

    let track = probed.format.default_track()?;
    duration_from_params(track.codec_params.time_base, track.codec_params.n_frames)
}

fn duration_from_params(time_base: Option<TimeBase>, n_frames: Option<u64>) -> Option<Duration> {
    let t = time_base?.calc_time(n_frames?);
    // Time is { seconds: u64, frac: f64 } in symphonia 0.5.x.
    Some(Duration::from_secs(t.seconds) + Duration::from_secs_f64(t.frac))
}
