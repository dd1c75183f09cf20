//! # Equatorial → horizontal coordinates
//!
//! Converts a star's equatorial position (right ascension, declination) into the
//! observer-relative horizontal frame (altitude, azimuth), given the local sidereal time
//! and the observer latitude.
//!
//! ```text
//! (RA, LST) --hour angle--> H --spherical trigonometry (δ, φ)--> (alt, az)
//! ```
//!
//! ## Conventions
//!
//! - Hour angle is measured westward from the local meridian, in `[0, 2π)`.
//! - Azimuth is measured from north through east, in `[0°, 360°)`.
//! - Altitude is in `[-90°, 90°]`.
//!
//! ## Singularity
//!
//! The azimuth formula divides by `cos(alt)·cos(lat)`, which vanishes when the observer
//! stands on a pole or when the star is exactly at the zenith or nadir. In that case the
//! azimuth is meaningless and is set to `0°`, so no NaN ever reaches the projection.

use crate::constants::{Degree, Hour, Radian, AZIMUTH_SINGULARITY_EPS, DPI, RADEG, RADH};

/// Position of a star in the observer's horizontal frame, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalCoord {
    pub altitude: Degree,
    pub azimuth: Degree,
}

impl HorizontalCoord {
    /// True when the star is strictly above the horizon.
    pub fn is_above_horizon(&self) -> bool {
        self.altitude > 0.0
    }
}

/// Hour angle of a star from the local sidereal time.
///
/// Arguments
/// ---------
/// * `lst`: local sidereal time, in hours
/// * `ra`: right ascension of the star, in hours
///
/// Return
/// ------
/// * the hour angle in radians, in `[0, 2π)`
pub fn hour_angle_radians(lst: Hour, ra: Hour) -> Radian {
    let mut ha = lst - ra;
    if ha < 0.0 {
        ha += 24.0;
    }
    // -4e-16 + 24 rounds to 24.0
    if ha >= 24.0 {
        ha -= 24.0;
    }
    ha * RADH
}

/// Altitude and azimuth of a star.
///
/// Arguments
/// ---------
/// * `ha`: hour angle in radians
/// * `dec`: declination in radians
/// * `lat`: observer latitude in radians
///
/// Return
/// ------
/// * the horizontal coordinates in degrees, azimuth in `[0, 360)`
pub fn alt_az_degrees(ha: Radian, dec: Radian, lat: Radian) -> HorizontalCoord {
    let sin_alt = (dec.sin() * lat.sin() + dec.cos() * lat.cos() * ha.cos()).clamp(-1.0, 1.0);
    let alt = sin_alt.asin();

    let denominator = alt.cos() * lat.cos();
    let mut az = if denominator.abs() < AZIMUTH_SINGULARITY_EPS {
        0.0
    } else {
        let cos_az = ((dec.sin() - sin_alt * lat.sin()) / denominator).clamp(-1.0, 1.0);
        cos_az.acos()
    };

    // acos only covers [0, π]: a star west of the meridian is mirrored
    if ha.sin() > 0.0 {
        az = DPI - az;
    }
    if az >= DPI {
        az -= DPI;
    }

    let mut azimuth = az / RADEG;
    if azimuth >= 360.0 {
        azimuth -= 360.0;
    }

    HorizontalCoord {
        altitude: (alt / RADEG).clamp(-90.0, 90.0),
        azimuth,
    }
}

/// Convenience wrapper taking the catalog units directly.
///
/// Arguments
/// ---------
/// * `lst`: local sidereal time, in hours
/// * `ra`: right ascension, in hours
/// * `dec`: declination, in degrees
/// * `lat`: observer latitude, in degrees
pub fn equatorial_to_horizontal(lst: Hour, ra: Hour, dec: Degree, lat: Degree) -> HorizontalCoord {
    alt_az_degrees(hour_angle_radians(lst, ra), dec * RADEG, lat * RADEG)
}
