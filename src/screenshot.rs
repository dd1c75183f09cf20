use camino::{Utf8Path, Utf8PathBuf};
use hifitime::Epoch;
use image::ImageFormat;
use log::info;

use crate::render::render_raster;
use crate::starminal_errors::StarminalError;
use crate::visibility::VisibleStar;

/// File name of a snapshot: `starminal_<pincode>_<YYYYMMDD_HHMMSS>.png`.
///
/// Characters outside `[A-Za-z0-9_-]` in the postal code are replaced by `_` so that the
/// name is always a single path component.
pub fn screenshot_file_name(pincode: &str, taken_at: &Epoch) -> String {
    let pin: String = pincode
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let (y, m, d, hh, mm, ss, _) = taken_at.to_gregorian_utc();
    format!("starminal_{pin}_{y:04}{m:02}{d:02}_{hh:02}{mm:02}{ss:02}.png")
}

/// Render the stars as a PNG snapshot in `out_dir`.
///
/// Arguments
/// ---------
/// * `stars`: the visible stars
/// * `width`, `height`: the terminal canvas, in cells
/// * `pincode`: postal code shown in the file name
/// * `out_dir`: destination directory, created if missing
/// * `taken_at`: timestamp of the file name
///
/// Return
/// ------
/// * the path of the written file
pub fn save_screenshot(
    stars: &[VisibleStar],
    width: usize,
    height: usize,
    pincode: &str,
    out_dir: &Utf8Path,
    taken_at: &Epoch,
) -> Result<Utf8PathBuf, StarminalError> {
    let img = render_raster(stars, width, height)?;

    std::fs::create_dir_all(out_dir)?;
    let path = out_dir.join(screenshot_file_name(pincode, taken_at));
    img.save_with_format(&path, ImageFormat::Png)?;

    info!(
        "saved {}x{} snapshot of {} stars to {}",
        img.width(),
        img.height(),
        stars.len(),
        path
    );
    Ok(path)
}
