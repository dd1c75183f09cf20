use crate::projection::Projector;
use crate::starminal_errors::StarminalError;
use crate::style::{ColorBucket, Glyph};
use crate::visibility::VisibleStar;

/// One character cell: `None` is empty sky.
pub type Cell = Option<(Glyph, ColorBucket)>;

/// Row-major grid of cells, rebuilt on every render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct SkyGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl SkyGrid {
    fn empty(width: usize, height: usize) -> Self {
        SkyGrid {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, col: usize, row: usize) -> Cell {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.cells[row * self.width + col]
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.width..(row + 1) * self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// Number of non-empty cells.
    pub fn star_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Write `glyph` unless the cell already shows a glyph of equal or higher priority.
    fn plot(&mut self, col: usize, row: usize, glyph: Glyph, color: ColorBucket) {
        let cell = &mut self.cells[row * self.width + col];
        let occupied = matches!(cell, Some((existing, _)) if *existing >= glyph);
        if !occupied {
            *cell = Some((glyph, color));
        }
    }
}

/// Render the visible stars into a `width × height` character grid.
///
/// Arguments
/// ---------
/// * `stars`: the visible stars, drawn in order
/// * `width`, `height`: the grid size, in cells
///
/// Return
/// ------
/// * the grid, or `CanvasNotReady` when a dimension is zero
pub fn render_grid(
    stars: &[VisibleStar],
    width: usize,
    height: usize,
) -> Result<SkyGrid, StarminalError> {
    let projector = Projector::for_canvas(width, height)?;
    let mut grid = SkyGrid::empty(width, height);

    for star in stars {
        let Some((col, row)) = projector.cell_of(star.altitude, star.azimuth) else {
            continue;
        };
        grid.plot(col, row, star.glyph(), star.color_bucket());
    }

    Ok(grid)
}
