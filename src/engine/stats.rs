//! engine/stats.rs
//! Aggregate numbers over a group of songs (or raw records).

use std::collections::HashMap;
use std::time::Duration;

use super::types::SongLike;

/// Computed once per group. A new group means a new value, never an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollectionStats {
    pub count: usize,
    pub total_duration: Duration,
    /// Most common year among members that carry one.
    /// Ties go to the year seen first.
    pub year: Option<i32>,
    /// How many members carry a track number.
    pub tracks_present: usize,
}

impl CollectionStats {
    pub fn of<'a, S, I>(items: I) -> Self
    where
        S: SongLike + 'a,
        I: IntoIterator<Item = &'a S>,
    {
        let mut count = 0;
        let mut total_duration = Duration::ZERO;
        let mut tracks_present = 0;
        let mut years: Vec<i32> = Vec::new();

        for item in items {
            count += 1;
            total_duration += item.duration();
            if item.track().is_some() {
                tracks_present += 1;
            }
            if let Some(y) = item.year() {
                years.push(y);
            }
        }

        Self {
            count,
            total_duration,
            year: most_common(years.iter()).copied(),
            tracks_present,
        }
    }
}

/// Most frequent item. On a tie the earliest one wins.
pub(crate) fn most_common<'a, T, I>(items: I) -> Option<&'a T>
where
    T: Eq + std::hash::Hash + 'a,
    I: IntoIterator<Item = &'a T>,
{
    // (count, first index)
    let mut seen: HashMap<&T, (usize, usize)> = HashMap::new();
    for (i, item) in items.into_iter().enumerate() {
        seen.entry(item).or_insert((0, i)).0 += 1;
    }

    seen.into_iter()
        .max_by(|(_, (ca, ia)), (_, (cb, ib))| ca.cmp(cb).then(ib.cmp(ia)))
        .map(|(item, _)| item)
}
