use image::{Rgb, RgbImage};

use crate::constants::RASTER_SCALE;
use crate::projection::Projector;
use crate::starminal_errors::StarminalError;
use crate::style::dot_radius;
use crate::visibility::VisibleStar;

/// Night-sky background of snapshots.
pub const BACKGROUND: Rgb<u8> = Rgb([10, 10, 30]);

/// Render the visible stars into a new image of `RASTER_SCALE` pixels per cell.
///
/// Arguments
/// ---------
/// * `stars`: the visible stars, drawn in order
/// * `width`, `height`: the logical canvas, in cells
///
/// Return
/// ------
/// * the image, `CanvasNotReady` when a dimension is zero, or `CanvasTooLarge` when the
///   scaled size does not fit in `u32` pixels
pub fn render_raster(
    stars: &[VisibleStar],
    width: usize,
    height: usize,
) -> Result<RgbImage, StarminalError> {
    if width == 0 || height == 0 {
        return Err(StarminalError::CanvasNotReady { width, height });
    }
    let scaled = |cells: usize| {
        u32::try_from(cells)
            .ok()
            .and_then(|c| c.checked_mul(RASTER_SCALE))
    };
    let (Some(img_w), Some(img_h)) = (scaled(width), scaled(height)) else {
        return Err(StarminalError::CanvasTooLarge { width, height });
    };

    let mut img = RgbImage::from_pixel(img_w, img_h, BACKGROUND);
    draw_stars(&mut img, stars)?;
    Ok(img)
}

/// Draw one filled disc per star onto a caller-owned buffer.
///
/// The projection uses the buffer's own size, so the sky disc always fits it. Discs are
/// clipped at the border; a later star overwrites the pixels of an earlier one.
pub fn draw_stars(img: &mut RgbImage, stars: &[VisibleStar]) -> Result<(), StarminalError> {
    let (img_w, img_h) = img.dimensions();
    let projector = Projector::for_canvas(img_w as usize, img_h as usize)?;

    for star in stars {
        let Some((cx, cy)) = projector.cell_of(star.altitude, star.azimuth) else {
            continue;
        };
        let color = Rgb(star.color_bucket().rgb());
        let r = dot_radius(star.magnitude);
        let (cx, cy) = (cx as i64, cy as i64);

        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy > r * r {
                    continue;
                }
                let (sx, sy) = (cx + dx, cy + dy);
                if sx >= 0 && sy >= 0 && sx < img_w as i64 && sy < img_h as i64 {
                    img.put_pixel(sx as u32, sy as u32, color);
                }
            }
        }
    }
    Ok(())
}
