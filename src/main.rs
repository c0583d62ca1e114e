use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use trip_pages::config::{self, Overrides, TripConfig};
use trip_pages::{generate, output, scan};

/// Flags that override `config.toml` for any command that reads photos.
#[derive(clap::Args, Clone, Default)]
struct TripArgs {
    /// Label for home time (e.g. "California")
    #[arg(long)]
    home: Option<String>,

    /// Hours from trip time to home time, may be negative
    #[arg(long, allow_negative_numbers = true)]
    offset: Option<i32>,
}

#[derive(Parser)]
#[command(name = "trip-pages")]
#[command(about = "Static day-by-day website for vacation photos")]
#[command(long_about = "\
Static day-by-day website for vacation photos

One folder per day, named YYYYMMDD, plus a manifest naming each day's place.
Produces index.html (the introduction) and one YYYYMMDD.html per day, linked
previous/next, with each photo captioned by trip time and home time.

Base folder structure:

  2021/switzerland/
  ├── config.toml          # Optional settings (see gen-config)
  ├── tripreport.csv       # Date,Place
  ├── 20210818/
  │   ├── IMG_0001.jpg     # jpg, jpeg, png, heic (any case)
  │   └── IMG_0002.jpg
  └── 20210820/
      └── IMG_0042.HEIC

Capture time: EXIF DateTimeOriginal, else file creation time (with a warning).

Pages reference photos by bare filename; put resized copies next to the
pages yourself.")]
#[command(version)]
struct Cli {
    /// Base folder holding the manifest and day folders
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Output directory for the pages (default: the base folder)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan and write the index and day pages
    Build {
        /// Replace pages that already exist
        #[arg(long)]
        overwrite: bool,

        #[command(flatten)]
        trip: TripArgs,
    },
    /// Validate the manifest and folders and list what would be built
    Check(TripArgs),
    /// Print the linked days and photos as JSON
    Scan(TripArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Cli {
        source,
        output: output_dir,
        command,
    } = Cli::parse();

    match command {
        Command::Build { overwrite, trip } => {
            let config = resolve_config(&source, trip, overwrite)?;
            let site = config.site(&source);
            let output_dir = output_dir.unwrap_or_else(|| source.clone());

            println!("==> Stage 1: Scanning {}", source.display());
            let scanned = scan::scan(&source, &config, |e| output::print_scan_event(&e))?;
            output::print_scan_output(&scanned, &site);

            println!("==> Stage 2: Generating HTML → {}", output_dir.display());
            let mut position = 0;
            generate::generate(&scanned, &site, &output_dir, config.overwrite, |e| {
                println!("{}", output::format_generate_event(&e, position));
                position += 1;
            })?;
            println!("{}", output::format_generate_summary(&scanned, &output_dir));
        }
        Command::Check(trip) => {
            let config = resolve_config(&source, trip, false)?;
            let site = config.site(&source);
            println!("==> Checking {}", source.display());
            let scanned = scan::scan(&source, &config, |e| output::print_scan_event(&e))?;
            output::print_scan_output(&scanned, &site);
            println!("==> Trip is valid");
        }
        Command::Scan(trip) => {
            let config = resolve_config(&source, trip, false)?;
            let scanned = scan::scan(&source, &config, |e| output::print_scan_event(&e))?;
            println!("{}", serde_json::to_string_pretty(&scanned)?);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load `config.toml` from the base folder and apply command-line overrides.
fn resolve_config(
    source: &Path,
    trip: TripArgs,
    overwrite: bool,
) -> Result<TripConfig, config::ConfigError> {
    let config = config::load_config(source)?.apply(Overrides {
        home: trip.home,
        offset_hours: trip.offset,
        overwrite,
    });
    config.validate()?;
    Ok(config)
}
