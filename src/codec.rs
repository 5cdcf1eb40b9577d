//! Reading and writing documents.
//!
//! Text files load as lines. `.ico` and `.png` files load as a pixel grid
//! where every cell is one pixel: a blank for transparent pixels, otherwise
//! the hex digit of the nearest colour in a fixed 16-colour palette.

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use tracing::{debug, info};

use crate::editor::{Document, Mode};
use crate::{Error, Result};

/// Side length of the grid a new icon starts with.
pub const NEW_ICON_SIZE: usize = 16;

/// Cell used for transparent pixels.
pub const TRANSPARENT: char = ' ';

/// Warning attached to a load that had to round colours.
pub const REDUCED_WARNING: &str = " (reduced to 16 colors)";

/// The 16 colours a cell can hold, indexed by hex digit.
pub const PALETTE: [[u8; 3]; 16] = [
    [0, 0, 0],
    [128, 0, 0],
    [0, 128, 0],
    [128, 128, 0],
    [0, 0, 128],
    [128, 0, 128],
    [0, 128, 128],
    [192, 192, 192],
    [128, 128, 128],
    [255, 0, 0],
    [0, 255, 0],
    [255, 255, 0],
    [0, 0, 255],
    [255, 0, 255],
    [0, 255, 255],
    [255, 255, 255],
];

/// A freshly loaded or prepared document.
#[derive(Debug)]
pub struct Loaded {
    pub doc: Document,
    pub mode: Mode,
    /// Appended to the "Loaded" status message; empty when nothing was lost.
    pub warning: String,
}

pub fn is_image_path(path: &Path) -> bool {
    matches!(extension(path).as_deref(), Some("ico" | "png"))
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// `icon.ico` → `icon.png` and back. `None` for anything else.
pub fn alternate_path(path: &Path) -> Option<PathBuf> {
    let other = match extension(path)?.as_str() {
        "ico" => "png",
        "png" => "ico",
        _ => return None,
    };
    Some(path.with_extension(other))
}

// ─── Palette ─────────────────────────────────────────────────────────────

/// Palette index of the colour closest to `rgb`, and whether it was exact.
pub fn nearest_palette_index(rgb: [u8; 3]) -> (usize, bool) {
    let distance = |c: &[u8; 3]| -> u32 {
        c.iter()
            .zip(rgb.iter())
            .map(|(a, b)| {
                let d = i32::from(*a) - i32::from(*b);
                (d * d) as u32
            })
            .sum()
    };
    let (index, best) = PALETTE
        .iter()
        .enumerate()
        .map(|(i, c)| (i, distance(c)))
        .min_by_key(|(_, d)| *d)
        .unwrap_or((0, u32::MAX));
    (index, best == 0)
}

fn cell_for_pixel(pixel: &Rgba<u8>) -> (char, bool) {
    let [r, g, b, a] = pixel.0;
    if a < 128 {
        return (TRANSPARENT, a == 0);
    }
    let (index, exact) = nearest_palette_index([r, g, b]);
    let cell = std::char::from_digit(index as u32, 16).unwrap_or(TRANSPARENT);
    (cell, exact && a == 255)
}

fn pixel_for_cell(cell: char) -> Rgba<u8> {
    match cell.to_digit(16) {
        Some(index) => {
            let [r, g, b] = PALETTE[index as usize];
            Rgba([r, g, b, 255])
        }
        None => Rgba([0, 0, 0, 0]),
    }
}

// ─── Load ────────────────────────────────────────────────────────────────

pub fn load(path: &Path) -> Result<Loaded> {
    if is_image_path(path) {
        load_image(path)
    } else {
        let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
        let text = String::from_utf8_lossy(&bytes);
        debug!(path = %path.display(), bytes = bytes.len(), "loaded text");
        Ok(Loaded {
            doc: Document::from_text(&text),
            mode: Mode::Text,
            warning: String::new(),
        })
    }
}

fn load_image(path: &Path) -> Result<Loaded> {
    let img = image::open(path)?.to_rgba8();
    let mut reduced = false;
    let rows: Vec<Vec<char>> = img
        .rows()
        .map(|row| {
            row.map(|pixel| {
                let (cell, exact) = cell_for_pixel(pixel);
                reduced |= !exact;
                cell
            })
            .collect()
        })
        .collect();
    debug!(path = %path.display(), width = img.width(), height = img.height(), reduced, "loaded image");
    Ok(Loaded {
        doc: Document::from_rows(rows),
        mode: Mode::Draw,
        warning: if reduced {
            REDUCED_WARNING.to_string()
        } else {
            String::new()
        },
    })
}

/// The document a file that does not exist yet starts out with.
pub fn prepare_empty(path: &Path) -> Loaded {
    let (doc, mode) = if is_image_path(path) {
        (
            Document::grid(NEW_ICON_SIZE, NEW_ICON_SIZE, TRANSPARENT),
            Mode::Draw,
        )
    } else {
        (Document::new(), Mode::Text)
    };
    Loaded {
        doc,
        mode,
        warning: String::new(),
    }
}

// ─── Save ────────────────────────────────────────────────────────────────

/// Writes `doc` to `path`, or to its alternate image format when
/// `alternate` is set. Returns the path that was written.
pub fn save(doc: &Document, path: &Path, trim_trailing: bool, alternate: bool) -> Result<PathBuf> {
    let target = if alternate {
        alternate_path(path).ok_or_else(|| Error::UnsupportedFormat(path.display().to_string()))?
    } else {
        path.to_path_buf()
    };
    if is_image_path(&target) {
        save_image(doc, &target)?;
    } else {
        std::fs::write(&target, doc.to_text(trim_trailing)).map_err(|e| Error::io(&target, e))?;
    }
    info!(path = %target.display(), lines = doc.len(), "saved");
    Ok(target)
}

fn save_image(doc: &Document, path: &Path) -> Result<()> {
    let width = doc.width().max(1);
    let height = doc.len();
    let mut img = RgbaImage::new(width as u32, height as u32);
    for (y, row) in doc.lines().enumerate() {
        for x in 0..width {
            let cell = row.get(x).copied().unwrap_or(TRANSPARENT);
            img.put_pixel(x as u32, y as u32, pixel_for_cell(cell));
        }
    }
    img.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_map_to_themselves() {
        for (i, rgb) in PALETTE.iter().enumerate() {
            assert_eq!(nearest_palette_index(*rgb), (i, true));
        }
    }

    #[test]
    fn off_palette_colour_is_rounded() {
        assert_eq!(nearest_palette_index([250, 10, 5]), (9, false));
        assert_eq!(nearest_palette_index([200, 200, 190]), (7, false));
    }

    #[test]
    fn translucent_pixels_become_blank() {
        assert_eq!(cell_for_pixel(&Rgba([255, 0, 0, 0])), (TRANSPARENT, true));
        assert_eq!(cell_for_pixel(&Rgba([255, 0, 0, 100])).0, TRANSPARENT);
        assert_eq!(cell_for_pixel(&Rgba([255, 0, 0, 255])), ('9', true));
    }

    #[test]
    fn non_digit_cells_are_transparent() {
        assert_eq!(pixel_for_cell('x').0[3], 0);
        assert_eq!(pixel_for_cell('F'), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn alternate_path_swaps_image_formats() {
        assert_eq!(alternate_path(Path::new("a/icon.ico")), Some(PathBuf::from("a/icon.png")));
        assert_eq!(alternate_path(Path::new("icon.PNG")), Some(PathBuf::from("icon.ico")));
        assert_eq!(alternate_path(Path::new("notes.txt")), None);
    }

    #[test]
    fn new_icons_start_as_a_blank_grid() {
        let loaded = prepare_empty(Path::new("new.ico"));
        assert_eq!(loaded.mode, Mode::Draw);
        assert_eq!(loaded.doc.len(), NEW_ICON_SIZE);
        assert_eq!(loaded.doc.width(), NEW_ICON_SIZE);
        let text = prepare_empty(Path::new("new.rs"));
        assert_eq!(text.mode, Mode::Text);
        assert!(text.doc.is_empty());
    }
}
