//! Mask derivation from a picture by sampling cell centres

use std::collections::HashSet;
use std::path::Path;

use image::{Rgba, RgbImage, RgbaImage};
use log::debug;

use crate::io::error::{ImageAction, MazeError, Result, image_error};
use crate::io::image::save_image;
use crate::spatial::grid::grid_dimensions;
use crate::spatial::mask::Mask;

/// A mask read from an image, together with the area it covers
#[derive(Clone, Debug)]
pub struct MaskImage {
    /// Allowed cells and start
    pub mask: Mask,
    /// Source image width in pixels (the generation area width)
    pub area_width: usize,
    /// Source image height in pixels (the generation area height)
    pub area_height: usize,
    /// Cell edge length in pixels used for sampling
    pub cell_length: usize,
}

impl MaskImage {
    /// Load a mask from a PNG (or any format `image` decodes)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be opened or decoded
    /// - The image holds no whole cell of `cell_length`
    /// - No sampled cell centre matches any of `colors`
    pub fn from_png(path: &Path, cell_length: usize, colors: &[[u8; 3]]) -> Result<Self> {
        let img = image::open(path).map_err(|e| image_error(ImageAction::Load, path, e))?;

        debug!(
            "Loaded mask image {} ({}x{})",
            path.display(),
            img.width(),
            img.height()
        );

        Self::from_rgb(&img.to_rgb8(), cell_length, colors)
    }

    /// Derive a mask from an in-memory RGB image
    ///
    /// A cell is in-mask when the pixel at its centre
    /// (`i * cell_length + cell_length / 2`) has one of `colors`. The start
    /// is the first in-mask cell scanning columns left to right, each
    /// column top to bottom.
    ///
    /// # Errors
    ///
    /// Returns an error if the image holds no whole cell or no centre
    /// matches `colors`
    pub fn from_rgb(img: &RgbImage, cell_length: usize, colors: &[[u8; 3]]) -> Result<Self> {
        let (width, height) = (img.width() as usize, img.height() as usize);
        let (cols, rows) = grid_dimensions(width, height, cell_length)?;
        let palette: HashSet<[u8; 3]> = colors.iter().copied().collect();

        let mut selected = Vec::new();
        for i in 0..cols {
            for j in 0..rows {
                let [x, y] = sample_point([i, j], cell_length);
                if img
                    .get_pixel_checked(x, y)
                    .is_some_and(|pixel| palette.contains(&pixel.0))
                {
                    selected.push([i, j]);
                }
            }
        }

        let Some(&start) = selected.first() else {
            return Err(MazeError::EmptyMask {
                colors: colors.to_vec(),
            });
        };

        let mask = Mask::new(cols, rows, selected, start)?;

        Ok(Self {
            mask,
            area_width: width,
            area_height: height,
            cell_length,
        })
    }

    /// Write a black image marking each sampled in-mask centre in white
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the
    /// image cannot be saved
    pub fn export_sample_preview(&self, output_path: &Path) -> Result<()> {
        let mut preview = RgbaImage::from_pixel(
            self.area_width as u32,
            self.area_height as u32,
            Rgba([0, 0, 0, 255]),
        );

        for position in self.mask.positions() {
            let [x, y] = sample_point(position, self.cell_length);
            if let Some(pixel) = preview.get_pixel_mut_checked(x, y) {
                *pixel = Rgba([255, 255, 255, 255]);
            }
        }

        save_image(&preview, output_path)
    }
}

// Pixel at the centre of cell [i, j]
const fn sample_point(position: [usize; 2], cell_length: usize) -> [u32; 2] {
    [
        (position[0] * cell_length + cell_length / 2) as u32,
        (position[1] * cell_length + cell_length / 2) as u32,
    ]
}

/// Parse a `RRGGBB` hex colour, with or without a leading `#`
///
/// # Errors
///
/// Returns an error message if the text is not six hex digits
pub fn parse_hex_color(text: &str) -> std::result::Result<[u8; 3], String> {
    let digits = text.strip_prefix('#').unwrap_or(text);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("'{text}' is not a RRGGBB hex colour"));
    }

    let channel = |range: std::ops::Range<usize>| {
        digits
            .get(range)
            .and_then(|hex| u8::from_str_radix(hex, 16).ok())
            .ok_or_else(|| format!("'{text}' is not a RRGGBB hex colour"))
    };

    Ok([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}
