//! # Sky rasterizers
//!
//! Two render targets share the [`Projector`](crate::projection::Projector) and the
//! [style policy](crate::style):
//!
//! - [`grid`]: a character grid for the terminal, one glyph per cell, with an overwrite
//!   priority so bright stars are never hidden by fainter ones.
//! - [`raster`]: an RGB pixel buffer at [`RASTER_SCALE`](crate::constants::RASTER_SCALE)×
//!   the cell resolution, one filled disc per star, later stars drawn on top.
//!
//! Both are plain functions over a slice of [`VisibleStar`](crate::visibility::VisibleStar):
//! a new grid or image is produced on every call and nothing is cached between frames.

pub mod grid;
pub mod raster;

pub use grid::{render_grid, Cell, SkyGrid};
pub use raster::{draw_stars, render_raster, BACKGROUND};
