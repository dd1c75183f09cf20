//! # Constants and type definitions for starminal
//!
//! This module centralizes the **astronomical constants**, **conversion factors**, the
//! **rendering thresholds** and the **type aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - Sidereal time polynomial coefficients and the J2000.0 reference epoch
//! - Unit conversions (degrees ↔ radians, hours ↔ radians)
//! - Magnitude bands shared by the glyph and dot-radius policies
//! - Canvas defaults for the terminal and raster renderers

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00:00)
pub const JD_J2000: f64 = 2_451_545.0;

/// GMST at J2000.0, in degrees
pub const GMST_AT_J2000_DEG: f64 = 280.460_618_37;

/// Rotation of the Earth relative to the stars, in degrees per day
pub const GMST_RATE_DEG_PER_DAY: f64 = 360.985_647_366_29;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Hours → radians
pub const RADH: f64 = DPI / 24.0;

/// Degrees of rotation per hour of sidereal time
pub const DEG_PER_HOUR: f64 = 15.0;

/// Below this value of `cos(alt)·cos(lat)` the azimuth is undefined
/// (observer on a pole, or star at the zenith/nadir).
pub const AZIMUTH_SINGULARITY_EPS: f64 = 1e-12;

// -------------------------------------------------------------------------------------------------
// Rendering policy
// -------------------------------------------------------------------------------------------------

/// Stars brighter than this magnitude are drawn with the bright glyph / largest dot
pub const BRIGHT_MAGNITUDE: f64 = 3.0;

/// Stars brighter than this magnitude (and not bright) are drawn with the medium glyph
pub const MEDIUM_MAGNITUDE: f64 = 5.0;

/// Default catalog cutoff: entries fainter than this are not loaded
pub const DEFAULT_MAGNITUDE_LIMIT: f64 = 15.0;

/// Pixels per terminal cell in raster snapshots
pub const RASTER_SCALE: u32 = 4;

/// Terminal size assumed before the first resize event
pub const DEFAULT_WIDTH: usize = 120;
pub const DEFAULT_HEIGHT: usize = 40;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;

/// Angle in radians
pub type Radian = f64;

/// Angle or time in hours
pub type Hour = f64;

/// Julian Date, in days
pub type JulianDate = f64;

/// Apparent visual magnitude (lower is brighter)
pub type Magnitude = f64;
