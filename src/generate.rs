//! HTML page generation.
//!
//! Stage 2 of the pipeline. Takes the scanned trip and writes the site into
//! the output directory.
//!
//! ## Generated Pages
//!
//! - **Index page** (`index.html`): the "Introduction", listing every day
//! - **Day pages** (`YYYYMMDD.html`): the day's photos with capture times
//!
//! ## Page Layout
//!
//! Every page has the same three parts:
//!
//! ```text
//! ┌──────────┬──────────────────────────┬──────────┐
//! │ home     │ Switzerland 2021         │          │   header
//! ├──────────┼──────────────────────────┼──────────┤
//! │ Previous │ Friday August 20, 2021   │ Next     │   navigation
//! │ date     │ Col du Grand St Bernard  │ date     │
//! │ place    │                          │ place    │
//! └──────────┴──────────────────────────┴──────────┘
//!   body: day list (index) or photos (day page)
//!   navigation again
//! ```
//!
//! The first day's "Previous" leads back to the introduction; the last
//! day has no "Next" at all.
//!
//! ## Writing
//!
//! Pages are written index first, then days in date order. Unless
//! overwriting is enabled, finding a page already on disk stops the run;
//! pages written earlier in the run are left in place. Each page is rendered
//! in memory, written to a hidden sibling and renamed into place, so a page
//! is either complete or absent.

use crate::config::SiteInfo;
use crate::days::{DayRecord, Neighbor, Trip};
use crate::metadata::{self, PhotoEntry};
use crate::scan::TripScan;
use crate::types::TripDate;
use maud::{DOCTYPE, Markup, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{} already exists, specify overwrite", .0.display())]
    AlreadyExists(PathBuf),
}

/// Progress reported while writing pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateEvent {
    IndexWritten { path: PathBuf, day_count: usize },
    DayWritten {
        path: PathBuf,
        date: TripDate,
        place: String,
        photo_count: usize,
    },
}

pub const INDEX_PAGE: &str = "index.html";
const INTRODUCTION: &str = "Introduction";

/// Where a navigation cell leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavTarget {
    Introduction,
    Day(Neighbor),
}

/// The three cells of a navigation bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavBar {
    pub previous: Option<NavTarget>,
    pub current_date: Option<TripDate>,
    pub current_label: String,
    pub next: Option<NavTarget>,
}

impl NavBar {
    /// Index navigation: nothing before the introduction, the first day after.
    pub fn for_index(trip: &Trip) -> Self {
        Self {
            previous: None,
            current_date: None,
            current_label: INTRODUCTION.to_string(),
            next: trip.first().map(|first| {
                NavTarget::Day(Neighbor {
                    date: first.date,
                    place: first.place.clone(),
                })
            }),
        }
    }

    /// Day navigation: the first day points back to the introduction, the
    /// last day has no next cell.
    pub fn for_day(day: &DayRecord) -> Self {
        Self {
            previous: Some(
                day.previous
                    .clone()
                    .map_or(NavTarget::Introduction, NavTarget::Day),
            ),
            current_date: Some(day.date),
            current_label: day.place.clone(),
            next: day.next.clone().map(NavTarget::Day),
        }
    }
}

// ============================================================================
// Writing
// ============================================================================

/// Write the index and every day page into `output_dir`.
///
/// Returns the paths written, in order.
pub fn generate(
    scan: &TripScan,
    site: &SiteInfo,
    output_dir: &Path,
    overwrite: bool,
    mut on_event: impl FnMut(GenerateEvent),
) -> Result<Vec<PathBuf>, GenerateError> {
    fs::create_dir_all(output_dir)?;
    let mut written = Vec::new();

    let index_path = output_dir.join(INDEX_PAGE);
    let index = render_index(&scan.days, site);
    write_page(&index_path, &index.into_string(), overwrite)?;
    on_event(GenerateEvent::IndexWritten {
        path: index_path.clone(),
        day_count: scan.days.len(),
    });
    written.push(index_path);

    for day in scan.days.iter() {
        let photos = scan.photos_for(&day.date);
        let path = output_dir.join(day.date.page_name());
        let page = render_day(day, photos, site);
        write_page(&path, &page.into_string(), overwrite)?;
        on_event(GenerateEvent::DayWritten {
            path: path.clone(),
            date: day.date,
            place: day.place.clone(),
            photo_count: photos.len(),
        });
        written.push(path);
    }

    Ok(written)
}

/// Write one whole page, refusing to replace an existing file unless asked.
fn write_page(path: &Path, contents: &str, overwrite: bool) -> Result<(), GenerateError> {
    if !overwrite && path.exists() {
        return Err(GenerateError::AlreadyExists(path.to_path_buf()));
    }
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let staging = path.with_file_name(format!(".{name}.tmp"));
    let result = fs::write(&staging, contents).and_then(|()| fs::rename(&staging, path));
    if result.is_err() {
        let _ = fs::remove_file(&staging);
    }
    Ok(result?)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the document shell with the site header.
fn base_document(site: &SiteInfo, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (site.title) }
                link rel="stylesheet" href=(site.stylesheet) type="text/css";
            }
            body {
                (site_header(site))
                (content)
            }
        }
    }
}

/// Renders the header row: home link, site title, empty cell.
fn site_header(site: &SiteInfo) -> Markup {
    html! {
        table.site-header border="0" width="100%" {
            tbody {
                tr {
                    td width="33%" { a href=(site.home_link) { "home" } }
                    td width="34%" { h1 { (site.title) } }
                    td width="33%" {}
                }
            }
        }
    }
}

/// Renders a navigation bar.
pub fn render_nav(bar: &NavBar) -> Markup {
    html! {
        table.day-nav border="0" width="100%" {
            tbody {
                tr {
                    td.nav-previous width="33%" {
                        h5 {
                            @if let Some(target) = &bar.previous {
                                (nav_link(target, "Previous"))
                            }
                        }
                    }
                    td.nav-current width="34%" {
                        h2 {
                            @if let Some(date) = &bar.current_date {
                                (date.long_form()) br;
                            }
                            (bar.current_label)
                        }
                    }
                    td.nav-next width="33%" {
                        h6 {
                            @if let Some(target) = &bar.next {
                                (nav_link(target, "Next"))
                            }
                        }
                    }
                }
            }
        }
    }
}

fn nav_link(target: &NavTarget, word: &str) -> Markup {
    match target {
        NavTarget::Introduction => html! {
            a href=(INDEX_PAGE) { (word) } br;
            (INTRODUCTION)
        },
        NavTarget::Day(day) => html! {
            a href=(day.date.page_name()) { (word) } br;
            (day.date.long_form()) br;
            (day.place)
        },
    }
}

/// Renders one photo with its trip and home clock readings.
fn photo_block(photo: &PhotoEntry, site: &SiteInfo) -> Markup {
    html! {
        div.photo {
            img alt="" src=(photo.filename);
            p.times {
                (metadata::clock_label(&photo.taken, &site.location))
                " "
                (metadata::clock_label(&photo.home, &site.home))
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the introduction page listing every day.
pub fn render_index(trip: &Trip, site: &SiteInfo) -> Markup {
    let nav = render_nav(&NavBar::for_index(trip));

    let content = html! {
        (nav)
        main.index-page {
            ul.day-list {
                @for day in trip.iter() {
                    li {
                        a href=(day.date.page_name()) {
                            (day.date.long_form()) " " (day.place)
                        }
                    }
                }
            }
        }
        (nav)
    };

    base_document(site, content)
}

/// Renders a day page. `photos` are shown in the order given.
pub fn render_day(day: &DayRecord, photos: &[PhotoEntry], site: &SiteInfo) -> Markup {
    let nav = render_nav(&NavBar::for_day(day));

    let content = html! {
        (nav)
        main.day-page {
            @for photo in photos {
                (photo_block(photo, site))
            }
        }
        (nav)
    };

    base_document(site, content)
}

// ============================================================================
// Tests
// ============================================================================
