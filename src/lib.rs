//! # Trip Pages
//!
//! Builds a small static website from a vacation: one folder of photos per
//! day plus a manifest naming where each day was spent. The result is an
//! introduction page listing every day and one page per day, linked
//! previous/next, with every photo captioned by its capture time on the
//! trip and back home.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      tripreport.csv + YYYYMMDD/  →  TripScan   (linked days + photos)
//! 2. Generate  TripScan                    →  *.html     (index + day pages)
//! ```
//!
//! Scanning does all the reading (manifest, folders, EXIF); generating does
//! all the writing. Rendering is a pure function of the scan, so page markup
//! is tested without touching the filesystem.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: reads the manifest, links days, collects photos |
//! | [`generate`] | Stage 2: renders and writes the pages using Maud |
//! | [`manifest`] | `Date,Place` manifest parser |
//! | [`days`] | Day linker: chronological previous/next records |
//! | [`metadata`] | Capture time resolution: EXIF, then file time fallback |
//! | [`exif`] | Minimal EXIF `DateTimeOriginal` reader (JPEG, PNG, HEIC) |
//! | [`config`] | `config.toml` loading, validation, CLI overrides |
//! | [`types`] | [`types::TripDate`], the `YYYYMMDD` day key |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Fixed Offset
//!
//! The whole trip is assumed to sit in one timezone, a fixed number of hours
//! from home. There is no timezone database: photos taken at the home
//! airport before departure will show a wrong pair of times, and both are
//! printed so the mistake is easy to spot and fix by hand.
//!
//! ## Stop On Existing Pages
//!
//! Generated pages are often hand-edited afterwards. Unless overwriting is
//! enabled, the first page found already on disk stops the run, and pages
//! written before it stay as they are.
//!
//! ## Images Are Not Touched
//!
//! Pages reference photos by bare filename next to the page. Resizing and
//! copying the photos into place is left to an image tool; originals stay
//! in the day folders.

pub mod config;
pub mod days;
pub mod exif;
pub mod generate;
pub mod manifest;
pub mod metadata;
pub mod output;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
