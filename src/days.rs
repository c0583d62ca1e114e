//! Day linking: turns the date → place manifest into a chronologically
//! linked trip.
//!
//! Every [`DayRecord`] knows its own place plus the date and place of the
//! days immediately before and after it, which is all the page renderer
//! needs to draw the previous/next navigation. Ordering comes from the
//! sorted keys of the manifest map, never from the order rows appeared in.

use crate::manifest::ManifestError;
use crate::types::TripDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// A neighbouring day, as seen from a [`DayRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Neighbor {
    pub date: TripDate,
    pub place: String,
}

/// One trip day with links to its chronological neighbours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayRecord {
    pub date: TripDate,
    pub place: String,
    pub previous: Option<Neighbor>,
    pub next: Option<Neighbor>,
}

/// The linked trip, iterable in date order.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Trip {
    days: BTreeMap<TripDate, DayRecord>,
}

impl Trip {
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn get(&self, date: &TripDate) -> Option<&DayRecord> {
        self.days.get(date)
    }

    /// Days in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = &DayRecord> {
        self.days.values()
    }

    pub fn first(&self) -> Option<&DayRecord> {
        self.days.values().next()
    }

    pub fn last(&self) -> Option<&DayRecord> {
        self.days.values().next_back()
    }

    pub fn is_first(&self, date: &TripDate) -> bool {
        self.first().is_some_and(|d| d.date == *date)
    }

    pub fn is_last(&self, date: &TripDate) -> bool {
        self.last().is_some_and(|d| d.date == *date)
    }
}

/// Link every manifest day to its chronological neighbours.
///
/// The sorted entries are laid out in a vector once; each record then reads
/// its neighbours by index, so no state is threaded between iterations.
pub fn link_days(manifest: &BTreeMap<TripDate, String>) -> Result<Trip, ManifestError> {
    if manifest.is_empty() {
        return Err(ManifestError::Validation(
            "manifest has no days, nothing to anchor the index page".into(),
        ));
    }

    let ordered: Vec<(&TripDate, &String)> = manifest.iter().collect();
    let neighbor = |idx: Option<usize>| {
        idx.and_then(|i| ordered.get(i)).map(|(date, place)| Neighbor {
            date: **date,
            place: (*place).clone(),
        })
    };

    let days = ordered
        .iter()
        .enumerate()
        .map(|(idx, (date, place))| {
            let record = DayRecord {
                date: **date,
                place: (*place).clone(),
                previous: neighbor(idx.checked_sub(1)),
                next: neighbor(Some(idx + 1)),
            };
            (**date, record)
        })
        .collect();

    Ok(Trip { days })
}
