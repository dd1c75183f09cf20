mod common;

use approx::assert_relative_eq;
use camino::Utf8Path;
use hifitime::Epoch;
use starminal::constants::RASTER_SCALE;
use starminal::projection::Projector;
use starminal::render::{render_grid, render_raster, BACKGROUND};
use starminal::screenshot::save_screenshot;
use starminal::style::{ColorBucket, Glyph};
use starminal::time::SiderealClock;
use starminal::{compute_visible, ObserverLocation, StarminalError};

use crate::common::{assert_horizontal_close, find, golden_epoch, mini_catalog};

fn names(stars: &[starminal::VisibleStar]) -> Vec<&str> {
    stars.iter().map(|s| s.name.as_str()).collect()
}

#[test]
fn test_catalog_fixture() {
    let catalog = mini_catalog(15.0);
    let names: Vec<&str> = catalog.entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(
        names,
        ["Sol", "Sirius", "Vega", "Polaris", "Betelgeuse", "Equator18"]
    );

    let equator = &catalog.entries()[5];
    assert!(equator.color_index.is_nan());
    assert_eq!(equator.spectral_class, "");
    assert_eq!(catalog.entries()[2].constellation, "Lyr");

    assert_eq!(mini_catalog(2.0).len(), 5);
    assert_eq!(mini_catalog(1.0).len(), 4);
}

#[test]
fn test_missing_catalog_file() {
    let result = starminal::StarCatalog::from_csv_path(&starminal::CatalogOptions {
        path: "tests/data/does_not_exist.csv".into(),
        magnitude_limit: 15.0,
    });
    assert!(matches!(result, Err(StarminalError::IoError(_))));
}

#[test]
fn test_golden_sky_at_equator() {
    let epoch = golden_epoch();
    let clock = SiderealClock::new(&epoch, 0.0);
    assert_eq!(clock.julian_date, 2460482.5);
    assert_relative_eq!(clock.gmst, 17.978930305782704, epsilon = 1e-9);

    let observer = ObserverLocation::new(0.0, 0.0, "").unwrap();
    let stars = compute_visible(mini_catalog(15.0).entries(), &observer, &epoch);

    // Sol sits 0.3° below the horizon, Polaris 0.5° below
    assert_eq!(names(&stars), ["Vega", "Equator18"]);
    assert_horizontal_close(find(&stars, "Equator18"), 89.68395458674048, 90.0, 1e-9);
    assert_horizontal_close(find(&stars, "Vega"), 50.23831041417831, 11.666769538775457, 1e-8);
    assert!(find(&stars, "Equator18").color_index.is_nan());
}

#[test]
fn test_half_a_day_later() {
    let epoch = Epoch::from_gregorian_utc_hms(2024, 6, 21, 12, 0, 0);
    let observer = ObserverLocation::new(0.0, 0.0, "").unwrap();
    let stars = compute_visible(mini_catalog(15.0).entries(), &observer, &epoch);

    assert_eq!(names(&stars), ["Sirius", "Polaris", "Betelgeuse"]);
    assert_horizontal_close(find(&stars, "Sirius"), 70.01652605853518, 147.31377469790985, 1e-8);
    assert_horizontal_close(find(&stars, "Polaris"), 0.4507151601293435, 359.418279802174, 1e-8);
}

#[test]
fn test_paris() {
    let observer = ObserverLocation::new(48.8566, 2.3522, "France").unwrap();
    let stars = compute_visible(mini_catalog(15.0).entries(), &observer, &golden_epoch());

    assert_eq!(names(&stars), ["Sol", "Vega", "Polaris", "Equator18"]);
    assert_horizontal_close(find(&stars, "Vega"), 78.67917535990554, 150.1586598058356, 1e-8);
    assert_horizontal_close(find(&stars, "Polaris"), 48.421478668980534, 0.8981211091975557, 1e-8);
}

#[test]
fn test_grid_from_catalog() {
    let observer = ObserverLocation::new(0.0, 0.0, "").unwrap();
    let stars = compute_visible(mini_catalog(15.0).entries(), &observer, &golden_epoch());

    let grid = render_grid(&stars, 120, 40).unwrap();
    assert_eq!(grid.star_count(), 2);

    let projector = Projector::for_canvas(120, 40).unwrap();
    let zenith = find(&stars, "Equator18");
    let (col, row) = projector.cell_of(zenith.altitude, zenith.azimuth).unwrap();
    assert_eq!((col, row), (60, 20));
    assert_eq!(grid.get(col, row), Some((Glyph::Medium, ColorBucket::Neutral)));

    let vega = find(&stars, "Vega");
    let (col, row) = projector.cell_of(vega.altitude, vega.azimuth).unwrap();
    assert_eq!(grid.get(col, row), Some((Glyph::Bright, ColorBucket::BlueWhite)));
}

#[test]
fn test_raster_from_catalog() {
    let observer = ObserverLocation::new(0.0, 0.0, "").unwrap();
    let stars = compute_visible(mini_catalog(15.0).entries(), &observer, &golden_epoch());

    let img = render_raster(&stars, 120, 40).unwrap();
    assert_eq!(img.dimensions(), (120 * RASTER_SCALE, 40 * RASTER_SCALE));
    assert_eq!(img.get_pixel(240, 80).0, ColorBucket::Neutral.rgb());
    assert_eq!(*img.get_pixel(0, 0), BACKGROUND);
}

#[test]
fn test_snapshot_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = Utf8Path::from_path(dir.path()).unwrap();
    let observer = ObserverLocation::new(48.8566, 2.3522, "France").unwrap();
    let stars = compute_visible(mini_catalog(15.0).entries(), &observer, &golden_epoch());

    let path = save_screenshot(&stars, 80, 24, "75001", out_dir, &golden_epoch()).unwrap();
    assert_eq!(path, out_dir.join("starminal_75001_20240621_000000.png"));

    let img = image::open(&path).unwrap().to_rgb8();
    assert_eq!(img.dimensions(), (320, 96));
    assert!(img.pixels().any(|p| *p != BACKGROUND));
}
