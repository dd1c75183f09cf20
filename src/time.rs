use hifitime::Epoch;
use std::str::FromStr;

use crate::constants::{
    Degree, Hour, JulianDate, DEG_PER_HOUR, GMST_AT_J2000_DEG, GMST_RATE_DEG_PER_DAY, JD_J2000,
};
use crate::starminal_errors::StarminalError;

/// Current UTC instant from the system clock.
pub fn epoch_now() -> Result<Epoch, StarminalError> {
    Ok(Epoch::now()?)
}

/// Parse an ISO 8601 instant such as `2024-06-21T00:00:00` (UTC unless a time scale
/// suffix is given).
pub fn parse_epoch(instant: &str) -> Result<Epoch, StarminalError> {
    Epoch::from_str(instant.trim()).map_err(|_| StarminalError::InvalidInstant(instant.into()))
}

/// Julian Date of an epoch, computed from its UTC Gregorian calendar breakdown.
///
/// January and February are counted as months 13 and 14 of the previous year so that
/// the leap day falls at the end of the computational year, then the Gregorian
/// century correction is applied.
///
/// Argument
/// --------
/// * `epoch`: the instant to convert
///
/// Return
/// ------
/// * the Julian Date in days, including the fraction of the day
pub fn julian_date(epoch: &Epoch) -> JulianDate {
    let (year, month, day, hour, minute, second, nanos) = epoch.to_gregorian_utc();

    let mut y = year as f64;
    let mut m = month as f64;
    let d = day as f64
        + hour as f64 / 24.0
        + minute as f64 / 1440.0
        + (second as f64 + nanos as f64 * 1e-9) / 86400.0;

    if m <= 2.0 {
        y -= 1.0;
        m += 12.0;
    }

    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + d + b - 1524.5
}

/// Greenwich Mean Sidereal Time from a Julian Date.
///
/// Linear model in days since J2000.0, reduced to `[0°, 360°)` and returned in hours.
///
/// Return
/// ------
/// * GMST in hours, in the interval `[0, 24)`
pub fn gmst_hours(jd: JulianDate) -> Hour {
    let days = jd - JD_J2000;
    let mut gmst = (GMST_AT_J2000_DEG + GMST_RATE_DEG_PER_DAY * days) % 360.0;
    if gmst < 0.0 {
        gmst += 360.0;
    }
    gmst / DEG_PER_HOUR
}

/// Local Sidereal Time for an observer at `longitude` (degrees, east positive).
///
/// Return
/// ------
/// * LST in hours, in the interval `[0, 24)`
pub fn lst_hours(gmst: Hour, longitude: Degree) -> Hour {
    let mut lst = (gmst + longitude / DEG_PER_HOUR) % 24.0;
    if lst < 0.0 {
        lst += 24.0;
    }
    // -1e-17 % 24 + 24 rounds to 24.0
    if lst >= 24.0 {
        lst -= 24.0;
    }
    lst
}

/// Sidereal time of one instant at one longitude.
///
/// Computed once per visibility pass and shared by every catalog entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiderealClock {
    pub julian_date: JulianDate,
    pub gmst: Hour,
    pub lst: Hour,
}

impl SiderealClock {
    pub fn new(epoch: &Epoch, longitude: Degree) -> Self {
        let julian_date = julian_date(epoch);
        let gmst = gmst_hours(julian_date);
        SiderealClock {
            julian_date,
            gmst,
            lst: lst_hours(gmst, longitude),
        }
    }
}
