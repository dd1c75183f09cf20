//! Command line configuration.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use hifitime::Epoch;
use log::LevelFilter;

use crate::catalog::CatalogOptions;
use crate::constants::{Degree, DEFAULT_HEIGHT, DEFAULT_MAGNITUDE_LIMIT, DEFAULT_WIDTH};
use crate::geocode::{GeocoderOptions, NOMINATIM_SEARCH_URL};
use crate::starminal_errors::StarminalError;
use crate::time::{epoch_now, parse_epoch};

#[derive(Parser, Debug, Clone)]
#[command(name = "starminal")]
#[command(about = "A simple stargazing program for your terminal")]
#[command(version)]
pub struct Cli {
    /// HYG star catalog (CSV)
    #[arg(long, global = true, default_value = "data/hyg_v42.csv")]
    pub catalog: Utf8PathBuf,

    /// Keep stars with an apparent magnitude at or below this value
    #[arg(long, global = true, default_value_t = DEFAULT_MAGNITUDE_LIMIT)]
    pub mag_limit: f64,

    /// Nominatim search endpoint
    #[arg(long, global = true, default_value = NOMINATIM_SEARCH_URL)]
    pub geocoder_url: String,

    /// Directory for screenshots and the session log
    #[arg(long, global = true, default_value = ".")]
    pub output_dir: Utf8PathBuf,

    /// Default log filter, overridden by RUST_LOG
    #[arg(long, global = true, default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Interactive sky view (default)
    Sky,

    /// Write a PNG of the sky above a place and exit
    Snapshot(SnapshotArgs),
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct SnapshotArgs {
    /// Postal code of the observer
    #[arg(long, required_unless_present = "lat", conflicts_with_all = ["lat", "lon"])]
    pub pincode: Option<String>,

    /// Observer latitude in degrees, north positive
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<Degree>,

    /// Observer longitude in degrees, east positive
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<Degree>,

    /// Canvas width in terminal cells
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Canvas height in terminal cells
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Observation instant (ISO 8601, UTC), defaults to now
    #[arg(long)]
    pub at: Option<String>,
}

/// Where a snapshot is taken from.
#[derive(Debug, Clone, PartialEq)]
pub enum Site {
    PostalCode(String),
    Coordinates { latitude: Degree, longitude: Degree },
}

impl Cli {
    /// The subcommand to run, `sky` when none is given.
    pub fn selected_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Sky)
    }

    pub fn catalog_options(&self) -> CatalogOptions {
        CatalogOptions {
            path: self.catalog.clone(),
            magnitude_limit: self.mag_limit,
        }
    }

    pub fn geocoder_options(&self) -> GeocoderOptions {
        GeocoderOptions {
            endpoint: self.geocoder_url.clone(),
            ..GeocoderOptions::default()
        }
    }
}

impl SnapshotArgs {
    pub fn site(&self) -> Result<Site, StarminalError> {
        match (&self.pincode, self.lat, self.lon) {
            (Some(code), _, _) => Ok(Site::PostalCode(code.clone())),
            (None, Some(latitude), Some(longitude)) => Ok(Site::Coordinates {
                latitude,
                longitude,
            }),
            _ => Err(StarminalError::InvalidCoordinate(
                "expected --pincode or both --lat and --lon".into(),
            )),
        }
    }

    pub fn instant(&self) -> Result<Epoch, StarminalError> {
        match &self.at {
            Some(at) => parse_epoch(at),
            None => epoch_now(),
        }
    }
}
