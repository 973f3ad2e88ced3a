use serde::Serialize;

use crate::piece::Piece;
use crate::types::{Cell, Color, SessionState};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PieceSnapshot {
    pub x: i32,
    pub y: i32,
    pub width: usize,
    pub height: usize,
    pub color: Color,
    /// Absolute board coordinates of the filled cells
    pub cells: Vec<(i32, i32)>,
}

impl PieceSnapshot {
    /// Overwrite from a piece, reusing the cell buffer
    pub fn fill_from(&mut self, piece: &Piece) {
        self.x = piece.x;
        self.y = piece.y;
        self.width = piece.shape.width();
        self.height = piece.shape.height();
        self.color = piece.color;
        self.cells.clear();
        self.cells.extend(piece.cells());
    }
}

impl From<&Piece> for PieceSnapshot {
    fn from(piece: &Piece) -> Self {
        let mut s = Self::default();
        s.fill_from(piece);
        s
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major grid, `width * height` cells
    pub grid: Vec<Cell>,
    pub active: PieceSnapshot,
    /// Row the active piece would land on with a hard drop
    pub ghost_y: i32,
    pub held: Option<PieceSnapshot>,
    pub swap_allowed: bool,
    pub soft_drop: bool,
    pub score: u32,
    pub lines: u32,
    pub state: SessionState,
    pub seed: u32,
}

impl GameSnapshot {
    /// Cell at (x, y) of the captured grid, `None` when out of bounds
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.grid.get(y * self.width + x).copied()
    }
}
