//! Pieces module - Tetromino shapes and rotation table
//!
//! Every piece kind has one compact base bitmap. The other three orientations
//! are derived at compile time by counter-clockwise rotation (reverse each
//! row, then transpose) and stored in a static table keyed by `(kind, rotation)`, so
//! rotating the active piece never touches shared shape data.

use crate::types::{PieceKind, Rotation, PIECE_KIND_COUNT};

/// Largest side length of any catalog bitmap.
pub const MAX_SHAPE_SIDE: usize = 4;

/// Immutable occupancy bitmap of a piece in one orientation.
///
/// Only the top-left `height` x `width` window of `rows` is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: [[u8; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE],
    width: u8,
    height: u8,
}

impl Shape {
    /// Build a shape from 0/1 rows. All rows must share the first row's length.
    pub const fn from_rows(src: &[&[u8]]) -> Self {
        let mut rows = [[0u8; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        let height = src.len();
        let width = src[0].len();
        let mut y = 0;
        while y < height {
            let mut x = 0;
            while x < width {
                rows[y][x] = src[y][x];
                x += 1;
            }
            y += 1;
        }
        Self {
            rows,
            width: width as u8,
            height: height as u8,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether the bitmap cell at column `x`, row `y` is occupied.
    pub fn is_set(&self, x: usize, y: usize) -> bool {
        x < self.width as usize && y < self.height as usize && self.rows[y][x] != 0
    }

    /// Occupied offsets `(dx, dy)` relative to the piece origin, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.height as usize).flat_map(move |y| {
            (0..self.width as usize)
                .filter(move |&x| self.rows[y][x] != 0)
                .map(move |x| (x as i8, y as i8))
        })
    }

    /// Bitmap rows as nested vectors (debugging and tests).
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.height as usize)
            .map(|y| self.rows[y][..self.width as usize].to_vec())
            .collect()
    }
}

/// Rotate a shape 90° counter-clockwise. Row `y` of the result is column
/// `old_w - 1 - y` of the input, read top to bottom.
///
/// The result's width is the input's height and vice versa.
pub const fn rotate_ccw(shape: Shape) -> Shape {
    let mut rows = [[0u8; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
    let old_w = shape.width as usize;
    let new_w = shape.height as usize;
    let new_h = shape.width as usize;
    let mut y = 0;
    while y < new_h {
        let mut x = 0;
        while x < new_w {
            rows[y][x] = shape.rows[x][old_w - 1 - y];
            x += 1;
        }
        y += 1;
    }
    Shape {
        rows,
        width: new_w as u8,
        height: new_h as u8,
    }
}

const BASE_SHAPES: [Shape; PIECE_KIND_COUNT] = [
    // I
    Shape::from_rows(&[&[1, 1, 1, 1]]),
    // O
    Shape::from_rows(&[&[1, 1], &[1, 1]]),
    // T
    Shape::from_rows(&[&[0, 1, 0], &[1, 1, 1]]),
    // S
    Shape::from_rows(&[&[0, 1, 1], &[1, 1, 0]]),
    // Z
    Shape::from_rows(&[&[1, 1, 0], &[0, 1, 1]]),
    // J
    Shape::from_rows(&[&[1, 0, 0], &[1, 1, 1]]),
    // L
    Shape::from_rows(&[&[0, 0, 1], &[1, 1, 1]]),
];

const fn build_table() -> [[Shape; 4]; PIECE_KIND_COUNT] {
    let mut table = [[BASE_SHAPES[0]; 4]; PIECE_KIND_COUNT];
    let mut k = 0;
    while k < PIECE_KIND_COUNT {
        let north = BASE_SHAPES[k];
        let west = rotate_ccw(north);
        let south = rotate_ccw(west);
        let east = rotate_ccw(south);
        table[k] = [north, west, south, east];
        k += 1;
    }
    table
}

static SHAPE_TABLE: [[Shape; 4]; PIECE_KIND_COUNT] = build_table();

/// Get the shape for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> &'static Shape {
    &SHAPE_TABLE[kind.color_id() as usize][rotation.index()]
}

/// Horizontally centered spawn column for a piece on a board `board_width` wide.
pub fn spawn_column(kind: PieceKind, board_width: u8) -> i8 {
    let shape = get_shape(kind, Rotation::North);
    (board_width.saturating_sub(shape.width()) / 2) as i8
}
