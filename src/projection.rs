//! # Stereographic sky projection
//!
//! Maps horizontal coordinates onto a flat disc, the way a fisheye lens pointed at the
//! zenith would see the sky:
//!
//! ```text
//! r = cos(alt) / (1 + sin(alt))      zenith → r = 0, horizon → r = 1
//! x = cx + r·sin(az)·R
//! y = cy − r·cos(az)·R               north up, east right, y grows downward
//! ```
//!
//! `R = min(width, height) / 2` so the horizon circle always fits inside the canvas.
//! Anything outside the canvas (its corners are outside the horizon circle) is dropped.

use nalgebra::Point2;

use crate::constants::{Degree, RADEG};
use crate::starminal_errors::StarminalError;

/// Canvas-local position, valid only for the canvas that produced it.
pub type ProjectedPoint = Point2<f64>;

/// Project one horizontal position onto a disc of `radius` centered on `center`.
///
/// Arguments
/// ---------
/// * `altitude`, `azimuth`: horizontal coordinates, in degrees
/// * `center`: canvas position of the zenith
/// * `radius`: canvas distance from the zenith to the horizon
pub fn project(
    altitude: Degree,
    azimuth: Degree,
    center: &ProjectedPoint,
    radius: f64,
) -> ProjectedPoint {
    let alt = altitude * RADEG;
    let az = azimuth * RADEG;

    let r = alt.cos() / (1.0 + alt.sin());
    let px = r * az.sin();
    let py = -r * az.cos();

    Point2::new(center.x + px * radius, center.y + py * radius)
}

/// Projection parameters of one render target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    pub width: usize,
    pub height: usize,
    pub center: ProjectedPoint,
    pub radius: f64,
}

impl Projector {
    /// Build the projector of a `width × height` canvas.
    ///
    /// Return
    /// ------
    /// * `CanvasNotReady` if either dimension is zero
    pub fn for_canvas(width: usize, height: usize) -> Result<Self, StarminalError> {
        if width == 0 || height == 0 {
            return Err(StarminalError::CanvasNotReady { width, height });
        }
        let cx = width as f64 / 2.0;
        let cy = height as f64 / 2.0;
        Ok(Projector {
            width,
            height,
            center: Point2::new(cx, cy),
            radius: cx.min(cy),
        })
    }

    pub fn project(&self, altitude: Degree, azimuth: Degree) -> ProjectedPoint {
        project(altitude, azimuth, &self.center, self.radius)
    }

    /// Integer cell (column, row) holding `point`, or `None` outside the canvas.
    pub fn to_cell(&self, point: &ProjectedPoint) -> Option<(usize, usize)> {
        let x = point.x.floor();
        let y = point.y.floor();
        if !(x >= 0.0 && y >= 0.0 && x < self.width as f64 && y < self.height as f64) {
            return None;
        }
        Some((x as usize, y as usize))
    }

    /// Project and discretize in one step.
    pub fn cell_of(&self, altitude: Degree, azimuth: Degree) -> Option<(usize, usize)> {
        self.to_cell(&self.project(altitude, azimuth))
    }
}
