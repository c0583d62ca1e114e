//! Trip configuration.
//!
//! Everything the pipeline needs to know that is not in the folders
//! themselves: where the manifest lives, what to call home, how far home is
//! from the trip in hours, and whether existing pages may be replaced.
//!
//! ## Config File Location
//!
//! An optional `config.toml` in the base folder:
//!
//! ```text
//! 2021/switzerland/
//! ├── config.toml          # Optional
//! ├── tripreport.csv       # Manifest
//! ├── 20210818/            # One folder per day
//! │   └── IMG_0001.jpg
//! └── 20210820/
//!     └── IMG_0042.HEIC
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! manifest = "tripreport.csv"       # Relative to the base folder
//! home = "California"               # Label for home time
//! offset_hours = -8                 # Hours from trip time to home time
//! overwrite = false                 # Replace pages that already exist
//! stylesheet = "../../dusty.css"    # Linked from every page
//! home_link = "../../index.html"    # Target of the header "home" link
//!
//! # location = "Switzerland"        # Default: base folder name, capitalized
//! # title = "Switzerland 2021"      # Default: "<location> <parent folder name>"
//! ```
//!
//! Command-line flags override file values. Unknown keys are rejected to
//! catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Largest accepted distance between trip and home clocks.
const MAX_OFFSET_HOURS: i32 = 24;

/// Trip configuration loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TripConfig {
    /// Manifest path, relative to the base folder.
    pub manifest: String,
    /// Label for the home timezone ("California time").
    pub home: String,
    /// Hours added to trip time to get home time. May be negative.
    pub offset_hours: i32,
    /// Replace pages that already exist instead of aborting.
    pub overwrite: bool,
    /// Label for the trip timezone. Derived from the base folder when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Site title. Derived from the base folder when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Stylesheet href, relative to the generated pages.
    pub stylesheet: String,
    /// Target of the header "home" link.
    pub home_link: String,
}

impl Default for TripConfig {
    fn default() -> Self {
        Self {
            manifest: "tripreport.csv".to_string(),
            home: "California".to_string(),
            offset_hours: -8,
            overwrite: false,
            location: None,
            title: None,
            stylesheet: "../../dusty.css".to_string(),
            home_link: "../../index.html".to_string(),
        }
    }
}

/// Labels and links shared by every rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteInfo {
    pub title: String,
    pub location: String,
    pub home: String,
    pub stylesheet: String,
    pub home_link: String,
}

/// Overrides coming from the command line. `None` keeps the file value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub home: Option<String>,
    pub offset_hours: Option<i32>,
    pub overwrite: bool,
}

impl TripConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(-MAX_OFFSET_HOURS..=MAX_OFFSET_HOURS).contains(&self.offset_hours) {
            return Err(ConfigError::Validation(format!(
                "offset_hours must be between -{MAX_OFFSET_HOURS} and {MAX_OFFSET_HOURS}"
            )));
        }
        if self.home.trim().is_empty() {
            return Err(ConfigError::Validation("home must not be empty".into()));
        }
        if self.manifest.trim().is_empty() {
            return Err(ConfigError::Validation("manifest must not be empty".into()));
        }
        Ok(())
    }

    /// Apply command-line overrides on top of file values.
    ///
    /// `--overwrite` can only turn overwriting on; a config file that sets
    /// `overwrite = true` stays in effect.
    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(home) = overrides.home {
            self.home = home;
        }
        if let Some(offset) = overrides.offset_hours {
            self.offset_hours = offset;
        }
        self.overwrite |= overrides.overwrite;
        self
    }

    /// Absolute manifest path for a base folder.
    pub fn manifest_path(&self, base: &Path) -> PathBuf {
        base.join(&self.manifest)
    }

    /// Resolve the labels pages are rendered with.
    ///
    /// For a base folder `.../2021/switzerland` the defaults are location
    /// "Switzerland" and title "Switzerland 2021".
    pub fn site(&self, base: &Path) -> SiteInfo {
        let base = base.canonicalize().unwrap_or_else(|_| base.to_path_buf());
        let folder_name = |p: Option<&Path>| {
            p.and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        };

        let location = self
            .location
            .clone()
            .unwrap_or_else(|| capitalize(&folder_name(Some(base.as_path()))));
        let title = self.title.clone().unwrap_or_else(|| {
            let parent = folder_name(base.parent());
            if parent.is_empty() {
                location.clone()
            } else {
                format!("{location} {parent}")
            }
        });

        SiteInfo {
            title,
            location,
            home: self.home.clone(),
            stylesheet: self.stylesheet.clone(),
            home_link: self.home_link.clone(),
        }
    }
}

/// Uppercase the first character, lowercase the rest.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Load `config.toml` from the base folder.
///
/// Returns defaults if no config file exists.
pub fn load_config(base: &Path) -> Result<TripConfig, ConfigError> {
    let config_path = base.join("config.toml");
    if !config_path.exists() {
        return Ok(TripConfig::default());
    }
    let content = fs::read_to_string(&config_path)?;
    let config: TripConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// A documented stock `config.toml`.
pub fn stock_config_toml() -> &'static str {
    r#"# trip-pages configuration
#
# Place this file in the trip's base folder, next to the manifest.
# All options are optional; the values below are the defaults.

# Manifest listing each day as `Date,Place`, relative to this folder.
manifest = "tripreport.csv"

# Label for the home timezone, shown as "06:30 California time".
home = "California"

# Hours added to trip-local capture time to get home time.
# Negative when home is behind the trip (Switzerland -> California is -8).
offset_hours = -8

# Replace pages that already exist. When false, the run stops at the
# first page that is already on disk.
overwrite = false

# Stylesheet and header "home" link, relative to the generated pages.
stylesheet = "../../dusty.css"
home_link = "../../index.html"

# Label for trip-local time. Default: base folder name, capitalized.
# location = "Switzerland"

# Site title. Default: "<location> <parent folder name>".
# title = "Switzerland 2021"
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = TripConfig::default();
        assert_eq!(config.manifest, "tripreport.csv");
        assert_eq!(config.home, "California");
        assert_eq!(config.offset_hours, -8);
        assert!(!config.overwrite);
        assert_eq!(config.stylesheet, "../../dusty.css");
    }

    #[test]
    fn parse_partial_config() {
        let config: TripConfig = toml::from_str("home = \"Tokyo\"\noffset_hours = 7\n").unwrap();
        assert_eq!(config.home, "Tokyo");
        assert_eq!(config.offset_hours, 7);
        assert_eq!(config.manifest, "tripreport.csv");
    }

    #[test]
    fn unknown_key_rejected() {
        let result: Result<TripConfig, _> = toml::from_str("offset = 3\n");
        assert!(result.is_err());
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, TripConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "home = \"Berlin\"\noffset_hours = 0\noverwrite = true\n",
        )
        .unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.home, "Berlin");
        assert_eq!(config.offset_hours, 0);
        assert!(config.overwrite);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "home = ").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "offset_hours = 30\n").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn validate_offset_boundaries() {
        let mut config = TripConfig::default();
        config.offset_hours = 24;
        assert!(config.validate().is_ok());
        config.offset_hours = -24;
        assert!(config.validate().is_ok());
        config.offset_hours = -25;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_empty_home() {
        let config = TripConfig {
            home: "  ".into(),
            ..TripConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: TripConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, TripConfig::default());
    }

    #[test]
    fn overrides_replace_file_values() {
        let config = TripConfig::default().apply(Overrides {
            home: Some("Paris".into()),
            offset_hours: Some(0),
            overwrite: true,
        });
        assert_eq!(config.home, "Paris");
        assert_eq!(config.offset_hours, 0);
        assert!(config.overwrite);
    }

    #[test]
    fn overwrite_flag_cannot_disable_file_setting() {
        let config = TripConfig {
            overwrite: true,
            ..TripConfig::default()
        }
        .apply(Overrides::default());
        assert!(config.overwrite);
    }

    #[test]
    fn site_labels_derive_from_base_folder() {
        let tmp = TempDir::new().unwrap();
        let base = tmp.path().join("2021").join("switzerland");
        fs::create_dir_all(&base).unwrap();
        let site = TripConfig::default().site(&base);
        assert_eq!(site.location, "Switzerland");
        assert_eq!(site.title, "Switzerland 2021");
        assert_eq!(site.home, "California");
    }

    #[test]
    fn site_labels_prefer_config() {
        let tmp = TempDir::new().unwrap();
        let config = TripConfig {
            location: Some("Valais".into()),
            title: Some("Alps".into()),
            ..TripConfig::default()
        };
        let site = config.site(tmp.path());
        assert_eq!(site.location, "Valais");
        assert_eq!(site.title, "Alps");
    }

    #[test]
    fn capitalize_matches_title_case_of_first_letter() {
        assert_eq!(capitalize("switzerland"), "Switzerland");
        assert_eq!(capitalize("NEW-ZEALAND"), "New-zealand");
        assert_eq!(capitalize(""), "");
    }
}
