#![allow(dead_code)]

use approx::assert_relative_eq;
use camino::Utf8PathBuf;
use hifitime::Epoch;
use starminal::{CatalogOptions, StarCatalog, VisibleStar};

pub const MINI_HYG: &str = "tests/data/mini_hyg.csv";

/// 2024-06-21T00:00:00 UTC, the reference instant of the regression values.
pub fn golden_epoch() -> Epoch {
    Epoch::from_gregorian_utc_at_midnight(2024, 6, 21)
}

pub fn mini_catalog(magnitude_limit: f64) -> StarCatalog {
    StarCatalog::from_csv_path(&CatalogOptions {
        path: Utf8PathBuf::from(MINI_HYG),
        magnitude_limit,
    })
    .unwrap()
}

pub fn find<'a>(stars: &'a [VisibleStar], name: &str) -> &'a VisibleStar {
    stars
        .iter()
        .find(|s| s.name == name)
        .unwrap_or_else(|| panic!("{name} is not visible"))
}

pub fn assert_horizontal_close(actual: &VisibleStar, altitude: f64, azimuth: f64, epsilon: f64) {
    assert_relative_eq!(actual.altitude, altitude, epsilon = epsilon);
    assert_relative_eq!(actual.azimuth, azimuth, epsilon = epsilon);
}
