//! Pieces module - shape matrices and the falling piece
//!
//! A shape is a rectangular matrix of filled/empty flags. Rotation is the
//! matrix transform itself (no rotation states, no kick tables), so any
//! rectangular shape rotates, not just the seven tetrominoes.
//!
//! Nothing here checks legality. `Piece::rotate` and `Piece::move_by` change
//! geometry unconditionally; the session validates against the board and rolls
//! back.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::types::Color;

/// Rectangular cell matrix, row-major, `true` = filled
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct Shape {
    rows: Vec<Vec<bool>>,
}

impl Shape {
    /// Build a shape from 0/1 rows
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_engine_core::Shape;
    ///
    /// let t = Shape::from_rows(&[&[0, 1, 0], &[1, 1, 1]]).unwrap();
    /// assert_eq!((t.width(), t.height()), (3, 2));
    /// assert_eq!(t.filled_count(), 4);
    /// ```
    pub fn from_rows(rows: &[&[u8]]) -> Result<Self> {
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        if width == 0 {
            return Err(ConfigError::EmptyShape);
        }

        let mut out = Vec::with_capacity(rows.len());
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(ConfigError::RaggedShape {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            let mut flags = Vec::with_capacity(width);
            for (x, &value) in row.iter().enumerate() {
                match value {
                    0 => flags.push(false),
                    1 => flags.push(true),
                    _ => return Err(ConfigError::InvalidCell { row: y, col: x, value }),
                }
            }
            out.push(flags);
        }

        let shape = Self { rows: out };
        if shape.filled_count() == 0 {
            return Err(ConfigError::HollowShape);
        }
        Ok(shape)
    }

    pub fn width(&self) -> usize {
        self.rows[0].len()
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn filled_count(&self) -> usize {
        self.rows.iter().flatten().filter(|&&f| f).count()
    }

    /// Offsets `(col, row)` of every filled cell, relative to the top-left corner
    pub fn filled_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &filled)| filled)
                .map(move |(x, _)| (x as i32, y as i32))
        })
    }

    /// The shape turned 90° clockwise: transpose of the row-reversed matrix
    pub fn rotated_cw(&self) -> Self {
        let (w, h) = (self.width(), self.height());
        let rows = (0..w)
            .map(|x| (0..h).map(|y| self.rows[h - 1 - y][x]).collect())
            .collect();
        Self { rows }
    }

    /// Rows as 0/1 flags, the inverse of [`Shape::from_rows`]
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|&f| u8::from(f)).collect())
            .collect()
    }

    pub fn i() -> Self {
        Self::standard(&[&[1, 1, 1, 1]])
    }

    pub fn o() -> Self {
        Self::standard(&[&[1, 1], &[1, 1]])
    }

    pub fn t() -> Self {
        Self::standard(&[&[0, 1, 0], &[1, 1, 1]])
    }

    pub fn s() -> Self {
        Self::standard(&[&[0, 1, 1], &[1, 1, 0]])
    }

    pub fn z() -> Self {
        Self::standard(&[&[1, 1, 0], &[0, 1, 1]])
    }

    pub fn j() -> Self {
        Self::standard(&[&[1, 0, 0], &[1, 1, 1]])
    }

    pub fn l() -> Self {
        Self::standard(&[&[0, 0, 1], &[1, 1, 1]])
    }

    /// The seven tetrominoes in I, O, T, S, Z, J, L order
    pub fn standard_set() -> Vec<Self> {
        vec![
            Self::i(),
            Self::o(),
            Self::t(),
            Self::s(),
            Self::z(),
            Self::j(),
            Self::l(),
        ]
    }

    // Only for the literal tables above, which are well-formed.
    fn standard(rows: &[&[u8]]) -> Self {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|&v| v != 0).collect())
            .collect();
        Self { rows }
    }
}

impl TryFrom<Vec<Vec<u8>>> for Shape {
    type Error = ConfigError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self> {
        let rows: Vec<&[u8]> = rows.iter().map(Vec::as_slice).collect();
        Self::from_rows(&rows)
    }
}

impl From<Shape> for Vec<Vec<u8>> {
    fn from(shape: Shape) -> Self {
        shape.to_rows()
    }
}

/// A falling piece: shape, color and board offset of its top-left cell
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    pub shape: Shape,
    pub color: Color,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    pub fn new(shape: Shape, color: Color, x: i32, y: i32) -> Self {
        Self { shape, color, x, y }
    }

    /// Turn the shape 90° clockwise in place, keeping the top-left offset
    pub fn rotate(&mut self) {
        self.shape = self.shape.rotated_cw();
    }

    /// Translate by `(dx, dy)` without any checks
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Absolute board coordinates of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .filled_cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}
