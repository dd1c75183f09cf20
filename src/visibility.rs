use hifitime::Epoch;
use log::debug;

use crate::catalog::CatalogEntry;
use crate::constants::{Degree, Magnitude};
use crate::coordinates::equatorial_to_horizontal;
use crate::observer::ObserverLocation;
use crate::style::{ColorBucket, Glyph};
use crate::time::SiderealClock;

/// A catalog star above the horizon at one instant, for one observer.
///
/// Owns copies of the display attributes: it holds no reference to the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleStar {
    /// degrees, always > 0
    pub altitude: Degree,
    /// degrees, in [0, 360)
    pub azimuth: Degree,
    pub magnitude: Magnitude,
    pub color_index: f64,
    pub name: String,
    pub spectral_class: String,
}

impl VisibleStar {
    pub fn glyph(&self) -> Glyph {
        Glyph::for_magnitude(self.magnitude)
    }

    pub fn color_bucket(&self) -> ColorBucket {
        ColorBucket::for_color_index(self.color_index)
    }
}

/// Select the catalog entries above the horizon.
///
/// The sidereal time is computed once for the whole pass, then each entry is converted to
/// horizontal coordinates and kept iff its altitude is strictly positive.
///
/// Arguments
/// ---------
/// * `catalog`: the catalog entries, in catalog order
/// * `location`: the observer position
/// * `epoch`: the instant of observation
///
/// Return
/// ------
/// * the visible stars, in catalog order
pub fn compute_visible(
    catalog: &[CatalogEntry],
    location: &ObserverLocation,
    epoch: &Epoch,
) -> Vec<VisibleStar> {
    let clock = SiderealClock::new(epoch, location.longitude);

    let visible: Vec<VisibleStar> = catalog
        .iter()
        .filter_map(|entry| {
            let coord =
                equatorial_to_horizontal(clock.lst, entry.ra, entry.dec, location.latitude);
            coord.is_above_horizon().then(|| VisibleStar {
                altitude: coord.altitude,
                azimuth: coord.azimuth,
                magnitude: entry.magnitude,
                color_index: entry.color_index,
                name: entry.name.clone(),
                spectral_class: entry.spectral_class.clone(),
            })
        })
        .collect();

    debug!(
        "{} of {} stars above the horizon at lat={:.4} lon={:.4} (LST {:.4}h)",
        visible.len(),
        catalog.len(),
        location.latitude,
        location.longitude,
        clock.lst
    );
    visible
}

#[cfg(test)]
mod visibility_test {
    use super::*;
    use approx::assert_relative_eq;

    fn entry(id: &str, ra: f64, dec: f64, magnitude: f64) -> CatalogEntry {
        CatalogEntry {
            id: id.into(),
            ra,
            dec,
            magnitude,
            name: format!("star {id}"),
            constellation: String::new(),
            color_index: 0.65,
            spectral_class: "G2V".into(),
        }
    }

    fn solstice() -> Epoch {
        Epoch::from_gregorian_utc_hms(2024, 6, 21, 0, 0, 0)
    }

    #[test]
    fn test_golden_star() {
        let equator = ObserverLocation::new(0.0, 0.0, "").unwrap();
        let visible = compute_visible(&[entry("1", 18.0, 0.0, 1.0)], &equator, &solstice());

        assert_eq!(visible.len(), 1);
        assert_relative_eq!(visible[0].altitude, 89.68395458674048, epsilon = 1e-9);
        assert_relative_eq!(visible[0].azimuth, 90.0, epsilon = 1e-9);
        assert_eq!(visible[0].name, "star 1");
        assert_eq!(visible[0].spectral_class, "G2V");
        assert_eq!(visible[0].color_bucket(), ColorBucket::Yellow);
        assert_eq!(visible[0].glyph(), Glyph::Bright);
    }

    #[test]
    fn test_below_horizon_is_dropped() {
        // LST is ~18h: RA 6h sits on the anti-meridian, straight below an equator observer
        let equator = ObserverLocation::new(0.0, 0.0, "").unwrap();
        let catalog = [
            entry("up", 18.0, 0.0, 1.0),
            entry("down", 6.0, 0.0, 1.0),
            entry("up2", 17.0, 10.0, 6.0),
        ];
        let visible = compute_visible(&catalog, &equator, &solstice());
        let names: Vec<&str> = visible.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["star up", "star up2"]);
        assert!(visible.iter().all(|s| s.altitude > 0.0));
    }

    #[test]
    fn test_circumpolar_and_never_rising() {
        // from 60°N, Polaris-like stars are always up and far-south stars never are
        let north = ObserverLocation::new(60.0, 10.0, "").unwrap();
        let catalog = [entry("polar", 2.5, 89.26, 2.0), entry("south", 6.4, -52.7, -0.7)];
        for hour in [0, 6, 12, 18] {
            let epoch = Epoch::from_gregorian_utc_hms(2024, 3, 1, hour, 0, 0);
            let visible = compute_visible(&catalog, &north, &epoch);
            assert_eq!(visible.len(), 1);
            assert_eq!(visible[0].name, "star polar");
        }
    }

    #[test]
    fn test_observer_at_pole_keeps_azimuth_finite() {
        let pole = ObserverLocation::new(90.0, 0.0, "").unwrap();
        let visible = compute_visible(&[entry("1", 3.0, 45.0, 4.0)], &pole, &solstice());
        assert_eq!(visible.len(), 1);
        assert_relative_eq!(visible[0].altitude, 45.0, epsilon = 1e-9);
        assert_eq!(visible[0].azimuth, 0.0);
    }

    #[test]
    fn test_empty_catalog() {
        let here = ObserverLocation::new(12.97, 77.59, "India").unwrap();
        assert!(compute_visible(&[], &here, &solstice()).is_empty());
    }
}
