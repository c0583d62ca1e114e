//! Photo capture time resolution.
//!
//! Every photo is captioned with two clock readings: the time on the trip
//! and the time back home. Both come from one resolved capture time.
//!
//! ## Resolution priority
//!
//! - **EXIF** `DateTimeOriginal`, read by [`crate::exif`]. Cameras and phones
//!   write this in the clock of wherever the shutter fired, so it is already
//!   trip-local.
//! - **File creation time** otherwise (modification time on platforms that
//!   do not record creation), read on this machine's clock and shifted by
//!   `offset_hours` before use. The caller is told which source won so it
//!   can warn about the fallback.
//!
//! ## Home time
//!
//! Home time is trip time plus `offset_hours`, computed on the full date and
//! time. Crossing midnight moves the date as well, but only `HH:MM` is ever
//! displayed.

use crate::exif;
use chrono::{DateTime, Duration, Local, NaiveDateTime};
use serde::Serialize;
use std::path::Path;

/// Where a photo's capture time came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampSource {
    Exif,
    FileCreated,
}

/// A photo on a day page with its resolved clock readings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhotoEntry {
    pub filename: String,
    /// Capture time on the trip.
    pub taken: NaiveDateTime,
    /// The same instant on the home clock.
    pub home: NaiveDateTime,
    pub source: TimestampSource,
}

impl PhotoEntry {
    /// Build an entry from a resolved trip-local capture time.
    pub fn new(
        filename: impl Into<String>,
        taken: NaiveDateTime,
        source: TimestampSource,
        offset_hours: i32,
    ) -> Self {
        Self {
            filename: filename.into(),
            taken,
            home: shift_hours(taken, offset_hours),
            source,
        }
    }
}

/// Read a photo's capture time, falling back to the file's creation time.
pub fn resolve_photo(path: &Path, offset_hours: i32) -> std::io::Result<PhotoEntry> {
    let filename = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();

    let entry = match exif::read_date_time_original(path) {
        Some(taken) => PhotoEntry::new(filename, taken, TimestampSource::Exif, offset_hours),
        None => {
            let created = file_created_local(path)?;
            let taken = shift_hours(created, offset_hours);
            PhotoEntry::new(filename, taken, TimestampSource::FileCreated, offset_hours)
        }
    };
    Ok(entry)
}

/// Creation time of a file on this machine's clock.
fn file_created_local(path: &Path) -> std::io::Result<NaiveDateTime> {
    let meta = std::fs::metadata(path)?;
    let stamp = meta.created().or_else(|_| meta.modified())?;
    Ok(DateTime::<Local>::from(stamp).naive_local())
}

/// Move a clock reading by whole hours.
pub fn shift_hours(time: NaiveDateTime, hours: i32) -> NaiveDateTime {
    time + Duration::hours(i64::from(hours))
}

/// Caption fragment: `14:30 Switzerland time`.
pub fn clock_label(time: &NaiveDateTime, place: &str) -> String {
    format!("{} {} time", time.format("%H:%M"), place)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::jpeg_with_exif;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn home_time_applies_negative_offset() {
        let entry = PhotoEntry::new("a.jpg", at(2021, 8, 18, 14, 30), TimestampSource::Exif, -8);
        assert_eq!(clock_label(&entry.home, "California"), "06:30 California time");
        assert_eq!(entry.home.date(), entry.taken.date());
    }

    #[test]
    fn home_time_applies_positive_offset() {
        let entry = PhotoEntry::new("a.jpg", at(2021, 8, 18, 9, 5), TimestampSource::Exif, 3);
        assert_eq!(entry.home, at(2021, 8, 18, 12, 5));
    }

    #[test]
    fn home_time_rolls_back_over_midnight() {
        let entry = PhotoEntry::new("a.jpg", at(2021, 8, 18, 3, 15), TimestampSource::Exif, -8);
        assert_eq!(entry.home, at(2021, 8, 17, 19, 15));
        assert_eq!(clock_label(&entry.home, "California"), "19:15 California time");
    }

    #[test]
    fn zero_offset_keeps_time() {
        let t = at(2021, 8, 18, 14, 30);
        assert_eq!(shift_hours(t, 0), t);
    }

    #[test]
    fn clock_label_pads_hours_and_minutes() {
        assert_eq!(
            clock_label(&at(2021, 8, 18, 7, 4), "Switzerland"),
            "07:04 Switzerland time"
        );
    }

    #[test]
    fn resolve_photo_prefers_exif() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("IMG_0001.jpg");
        std::fs::write(&path, jpeg_with_exif(Some("2021:08:18 14:30:00"))).unwrap();

        let entry = resolve_photo(&path, -8).unwrap();
        assert_eq!(entry.filename, "IMG_0001.jpg");
        assert_eq!(entry.source, TimestampSource::Exif);
        assert_eq!(entry.taken, at(2021, 8, 18, 14, 30));
        assert_eq!(entry.home, at(2021, 8, 18, 6, 30));
    }

    #[test]
    fn resolve_photo_falls_back_to_file_time() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("IMG_0002.jpg");
        std::fs::write(&path, jpeg_with_exif(None)).unwrap();

        let entry = resolve_photo(&path, -8).unwrap();
        assert_eq!(entry.source, TimestampSource::FileCreated);
        assert_eq!(entry.home, shift_hours(entry.taken, -8));
    }

    #[test]
    fn resolve_missing_file_is_error() {
        let tmp = TempDir::new().unwrap();
        assert!(resolve_photo(&tmp.path().join("gone.jpg"), 0).is_err());
    }
}
