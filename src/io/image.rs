//! Frame rendering and PNG export of maze snapshots

use crate::io::configuration::Palette;
use crate::io::error::{ImageAction, IoContext, MazeError, Result, image_error};
use crate::maze::cell::Direction;
use crate::maze::snapshot::Snapshot;
use image::{ImageBuffer, Rgba, RgbaImage};
use std::path::Path;

/// Render one frame of the maze
///
/// Each cell occupies a `cell_pixels` square. Visited cells are filled, the
/// current cell is highlighted, and every wall still standing on an
/// in-mask cell is drawn as a one-pixel line along that cell's edge.
/// Out-of-mask cells keep the background colour.
pub fn render_snapshot(snapshot: &Snapshot, cell_pixels: u32, palette: &Palette) -> RgbaImage {
    let cell_pixels = cell_pixels.max(2);
    let width = snapshot.cols as u32 * cell_pixels + 1;
    let height = snapshot.rows as u32 * cell_pixels + 1;

    let mut img = ImageBuffer::from_pixel(width, height, Rgba(palette.background));

    for cell in &snapshot.cells {
        let x0 = cell.position[0] as u32 * cell_pixels;
        let y0 = cell.position[1] as u32 * cell_pixels;

        let fill = if cell.position == snapshot.current {
            Some(palette.current)
        } else if cell.visited {
            Some(palette.visited)
        } else {
            None
        };

        if let Some(color) = fill {
            fill_rect(&mut img, x0, y0, cell_pixels, cell_pixels, Rgba(color));
        }
    }

    // Walls last so fills never cover them
    for cell in &snapshot.cells {
        let x0 = cell.position[0] as u32 * cell_pixels;
        let y0 = cell.position[1] as u32 * cell_pixels;
        let wall = Rgba(palette.wall);

        for direction in Direction::ALL {
            if !cell.walls.get(direction.index()).copied().unwrap_or(false) {
                continue;
            }
            match direction {
                Direction::North => fill_rect(&mut img, x0, y0, cell_pixels + 1, 1, wall),
                Direction::East => {
                    fill_rect(&mut img, x0 + cell_pixels, y0, 1, cell_pixels + 1, wall);
                }
                Direction::South => {
                    fill_rect(&mut img, x0, y0 + cell_pixels, cell_pixels + 1, 1, wall);
                }
                Direction::West => fill_rect(&mut img, x0, y0, 1, cell_pixels + 1, wall),
            }
        }
    }

    img
}

fn fill_rect(img: &mut RgbaImage, x0: u32, y0: u32, w: u32, h: u32, color: Rgba<u8>) {
    let x_end = (x0 + w).min(img.width());
    let y_end = (y0 + h).min(img.height());
    for y in y0..y_end {
        for x in x0..x_end {
            img.put_pixel(x, y, color);
        }
    }
}

/// Render the snapshot and save it as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - The snapshot holds no cells
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_maze_png(
    snapshot: &Snapshot,
    cell_pixels: u32,
    palette: &Palette,
    output_path: &Path,
) -> Result<()> {
    if snapshot.cells.is_empty() {
        return Err(MazeError::NothingToRender {
            what: "snapshot has no in-mask cells",
        });
    }

    save_image(&render_snapshot(snapshot, cell_pixels, palette), output_path)
}

/// Create the directory that will hold `path`
///
/// # Errors
///
/// Returns an error if the directory cannot be created
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).io_context("create directory", parent)
        }
        _ => Ok(()),
    }
}

/// Save an image buffer, inferring the format from the extension
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or encoding
/// fails
pub fn save_image(img: &RgbaImage, output_path: &Path) -> Result<()> {
    ensure_parent_dir(output_path)?;
    img.save(output_path)
        .map_err(|e| image_error(ImageAction::Save, output_path, e))
}
