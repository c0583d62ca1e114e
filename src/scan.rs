//! Trip folder scanning.
//!
//! Stage 1 of the pipeline. Reads the manifest, links the days, and collects
//! the photos of each day together with their resolved capture times.
//!
//! ## Directory Structure
//!
//! ```text
//! 2021/switzerland/                # Base folder
//! ├── tripreport.csv               # Manifest: Date,Place
//! ├── 20210818/                    # Day folder, named YYYYMMDD
//! │   ├── IMG_0001.jpg
//! │   └── IMG_0002.HEIC
//! ├── 20210820/
//! │   └── IMG_0042.png
//! └── 20210819/                    # Not in the manifest: reported, ignored
//! ```
//!
//! ## Rules
//!
//! - Only files directly inside a day folder count; subfolders are ignored.
//! - Extensions are matched case-insensitively: jpg, jpeg, png, heic.
//! - Hidden files (leading `.`) are skipped; symlinks are followed.
//! - Files whose names are not valid UTF-8 are skipped with a warning.
//! - A manifest day without a folder still gets a page, with no photos.
//! - Photos are ordered by filename.

use crate::config::TripConfig;
use crate::days::{self, Trip};
use crate::manifest::{self, ManifestError};
use crate::metadata::{self, PhotoEntry, TimestampSource};
use crate::types::TripDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("{}: {source}", path.display())]
    Manifest {
        path: PathBuf,
        source: ManifestError,
    },
    #[error("Base folder is not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Progress reported while scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    /// A photo had no usable EXIF capture time; file time was used instead.
    MetadataMissing { path: PathBuf },
    /// A manifest day has no folder on disk.
    DayFolderMissing { path: PathBuf },
    /// An image whose name is not valid UTF-8 cannot be linked from a page.
    UnreadableName { path: PathBuf },
}

/// Scan output: the linked trip plus each day's photos.
#[derive(Debug, Serialize)]
pub struct TripScan {
    pub days: Trip,
    pub photos: BTreeMap<TripDate, Vec<PhotoEntry>>,
    /// Date-named folders that the manifest does not mention.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unlisted_folders: Vec<String>,
}

impl TripScan {
    /// Photos of a day, empty when the day has none.
    pub fn photos_for(&self, date: &TripDate) -> &[PhotoEntry] {
        self.photos.get(date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn photo_count(&self) -> usize {
        self.photos.values().map(Vec::len).sum()
    }
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "heic"];

pub fn scan(
    base: &Path,
    config: &TripConfig,
    mut on_event: impl FnMut(ScanEvent),
) -> Result<TripScan, ScanError> {
    if !base.is_dir() {
        return Err(ScanError::NotADirectory(base.to_path_buf()));
    }

    let manifest_path = config.manifest_path(base);
    let with_path = |source: ManifestError| ScanError::Manifest {
        path: manifest_path.clone(),
        source,
    };
    let entries = manifest::load_manifest(&manifest_path).map_err(with_path)?;
    let trip = days::link_days(&entries).map_err(with_path)?;

    let mut photos = BTreeMap::new();
    for day in trip.iter() {
        let folder = base.join(day.date.to_string());
        if !folder.is_dir() {
            on_event(ScanEvent::DayFolderMissing { path: folder });
            photos.insert(day.date, Vec::new());
            continue;
        }

        let mut entries = Vec::new();
        for path in collect_images(&folder)? {
            if path.file_name().and_then(|n| n.to_str()).is_none() {
                on_event(ScanEvent::UnreadableName { path });
                continue;
            }
            let entry = metadata::resolve_photo(&path, config.offset_hours)?;
            if entry.source == TimestampSource::FileCreated {
                on_event(ScanEvent::MetadataMissing { path });
            }
            entries.push(entry);
        }
        entries.sort_by(|a, b| a.filename.cmp(&b.filename));
        photos.insert(day.date, entries);
    }

    let unlisted_folders = find_unlisted_folders(base, &trip)?;

    Ok(TripScan {
        days: trip,
        photos,
        unlisted_folders,
    })
}

/// Image files directly inside `dir`, sorted by name.
fn collect_images(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut images = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        // path() checks follow symlinks; a dangling link is neither
        if entry.path().is_file() && is_image(entry.path()) {
            images.push(entry.into_path());
        }
    }
    Ok(images)
}

fn is_image(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(true);
    if hidden {
        return false;
    }
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

/// Date-named subfolders of `base` that have no manifest row.
fn find_unlisted_folders(base: &Path, trip: &Trip) -> Result<Vec<String>, ScanError> {
    let mut unlisted = Vec::new();
    for entry in WalkDir::new(base)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.path().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if let Ok(date) = name.parse::<TripDate>()
            && trip.get(&date).is_none()
        {
            unlisted.push(name);
        }
    }
    Ok(unlisted)
}
