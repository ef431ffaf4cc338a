//! PNG export of rendered tilings
//!
//! Dominoes are rasterised as filled rectangles in the rotated diamond
//! frame, scaled by a fixed pixel factor and cropped to the bounding box of
//! the placed pieces. The colour of each rectangle is its parity class.

use image::{ImageBuffer, Rgba};

use crate::io::configuration::{BLUE_RGBA, CELL_PIXELS, GREEN_RGBA, RED_RGBA, YELLOW_RGBA};
use crate::io::error::{Result, SamplerError};
use crate::spatial::tiling::{Domino, DominoColor, Tiling};

const fn rgba_for(color: DominoColor) -> [u8; 4] {
    match color {
        DominoColor::Red => RED_RGBA,
        DominoColor::Green => GREEN_RGBA,
        DominoColor::Blue => BLUE_RGBA,
        DominoColor::Yellow => YELLOW_RGBA,
    }
}

struct Frame {
    min_x: i64,
    max_y: i64,
    width: u32,
    height: u32,
}

// Bounding box of the rectangle list in diamond coordinates
fn calculate_frame(dominoes: &[Domino]) -> Option<Frame> {
    let mut min_x = i64::MAX;
    let mut max_x = i64::MIN;
    let mut min_y = i64::MAX;
    let mut max_y = i64::MIN;

    for domino in dominoes {
        min_x = min_x.min(domino.x);
        max_x = max_x.max(domino.x + i64::from(domino.width));
        min_y = min_y.min(domino.y);
        max_y = max_y.max(domino.y + i64::from(domino.height));
    }

    if min_x >= max_x {
        return None;
    }

    Some(Frame {
        min_x,
        max_y,
        width: ((max_x - min_x) as u32) * CELL_PIXELS,
        height: ((max_y - min_y) as u32) * CELL_PIXELS,
    })
}

/// Export the tiling as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - The tiling holds no dominoes
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_tiling_as_png(tiling: &Tiling, output_path: &str) -> Result<()> {
    let dominoes = tiling.dominoes();
    let frame = calculate_frame(&dominoes).ok_or_else(|| SamplerError::InvariantViolated {
        operation: "PNG export",
        reason: "tiling holds no dominoes".to_string(),
    })?;

    let mut img = ImageBuffer::from_pixel(frame.width, frame.height, Rgba([0, 0, 0, 0]));

    for domino in &dominoes {
        let rgba = rgba_for(domino.color);
        let pixel = Rgba(rgba);

        let left = ((domino.x - frame.min_x) as u32) * CELL_PIXELS;
        // The diamond frame has y growing upwards; image rows grow downwards
        let top = ((frame.max_y - domino.y - i64::from(domino.height)) as u32) * CELL_PIXELS;
        let width = domino.width * CELL_PIXELS;
        let height = domino.height * CELL_PIXELS;

        for dy in 0..height {
            for dx in 0..width {
                let x = left + dx;
                let y = top + dy;
                if x < frame.width && y < frame.height {
                    img.put_pixel(x, y, pixel);
                }
            }
        }
    }

    if let Some(parent) = std::path::Path::new(output_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| SamplerError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }

    img.save(output_path).map_err(|e| SamplerError::ImageExport {
        path: output_path.into(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::export_tiling_as_png;
    use crate::spatial::tiling::Tiling;

    #[test]
    fn empty_tiling_is_rejected() {
        let tiling = Tiling::empty(4);
        assert!(export_tiling_as_png(&tiling, "unused.png").is_err());
    }

    #[test]
    fn export_writes_a_png_file() {
        let Ok(dir) = tempfile::tempdir() else {
            unreachable!("temporary directory unavailable");
        };
        let path = dir.path().join("order_one.png");
        let Some(path_str) = path.to_str() else {
            unreachable!("temporary path is not valid UTF-8");
        };

        let mut tiling = Tiling::empty(2);
        tiling.set(0, 0, true);
        tiling.set(1, 1, true);

        match export_tiling_as_png(&tiling, path_str) {
            Ok(()) => assert!(path.exists()),
            Err(error) => unreachable!("export failed: {error}"),
        }
    }
}
