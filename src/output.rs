//! CLI output formatting for the pipeline stages.
//!
//! Each stage has a `format_*` function returning `Vec<String>` so output can
//! be tested without capturing stdout, and a `print_*` wrapper that writes it.
//! Format functions are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Days
//! 001 Wednesday August 18, 2021 Geneva (2 photos)
//!     Source: 20210818/
//!     001 IMG_0001.jpg  14:30 Switzerland time 06:30 California time
//!     002 IMG_0002.jpg  15:02 Switzerland time 07:02 California time (file time)
//! 002 Friday August 20, 2021 Col du Grand Saint Bernard (0 photos)
//!     Source: 20210820/
//!
//! Unlisted folders
//!     20210819/
//! ```
//!
//! ## Generate
//!
//! ```text
//! Introduction → index.html (3 days)
//! 001 Wednesday August 18, 2021 Geneva → 20210818.html (2 photos)
//! ```
//!
//! Warnings go to stderr prefixed with `warning:`.

use crate::config::SiteInfo;
use crate::generate::GenerateEvent;
use crate::metadata::{self, TimestampSource};
use crate::scan::{ScanEvent, TripScan};
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn photo_count(n: usize) -> String {
    if n == 1 {
        "1 photo".to_string()
    } else {
        format!("{} photos", n)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ============================================================================
// Scan output
// ============================================================================

/// Format the scanned trip: each day with its photos and clock readings.
pub fn format_scan_output(scan: &TripScan, site: &SiteInfo) -> Vec<String> {
    let mut lines = vec!["Days".to_string()];

    for (i, day) in scan.days.iter().enumerate() {
        let photos = scan.photos_for(&day.date);
        lines.push(format!(
            "{} {} {} ({})",
            format_index(i + 1),
            day.date.long_form(),
            day.place,
            photo_count(photos.len())
        ));
        lines.push(format!("    Source: {}/", day.date));

        for (j, photo) in photos.iter().enumerate() {
            let fallback = match photo.source {
                TimestampSource::Exif => "",
                TimestampSource::FileCreated => " (file time)",
            };
            lines.push(format!(
                "    {} {}  {} {}{}",
                format_index(j + 1),
                photo.filename,
                metadata::clock_label(&photo.taken, &site.location),
                metadata::clock_label(&photo.home, &site.home),
                fallback
            ));
        }
    }

    if !scan.unlisted_folders.is_empty() {
        lines.push(String::new());
        lines.push("Unlisted folders".to_string());
        for folder in &scan.unlisted_folders {
            lines.push(format!("    {}/", folder));
        }
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(scan: &TripScan, site: &SiteInfo) {
    for line in format_scan_output(scan, site) {
        println!("{}", line);
    }
}

/// Format a scan warning.
pub fn format_scan_event(event: &ScanEvent) -> String {
    match event {
        ScanEvent::MetadataMissing { path } => format!(
            "warning: no exif found for {}, using file time",
            path.display()
        ),
        ScanEvent::DayFolderMissing { path } => format!(
            "warning: no folder for {}, page will have no photos",
            path.display()
        ),
        ScanEvent::UnreadableName { path } => format!(
            "warning: skipping {}, file name is not valid UTF-8",
            path.display()
        ),
    }
}

/// Print a scan warning to stderr.
pub fn print_scan_event(event: &ScanEvent) {
    eprintln!("{}", format_scan_event(event));
}

// ============================================================================
// Generate output
// ============================================================================

/// Format one written page.
pub fn format_generate_event(event: &GenerateEvent, position: usize) -> String {
    match event {
        GenerateEvent::IndexWritten { path, day_count } => format!(
            "Introduction → {} ({} days)",
            file_name(path),
            day_count
        ),
        GenerateEvent::DayWritten {
            path,
            date,
            place,
            photo_count: count,
        } => format!(
            "{} {} {} → {} ({})",
            format_index(position),
            date.long_form(),
            place,
            file_name(path),
            photo_count(*count)
        ),
    }
}

/// Final summary line after all pages are written.
pub fn format_generate_summary(scan: &TripScan, output_dir: &Path) -> String {
    format!(
        "Generated index and {} day pages ({}) in {}",
        scan.days.len(),
        photo_count(scan.photo_count()),
        output_dir.display()
    )
}

// ============================================================================
// Tests
// ============================================================================
