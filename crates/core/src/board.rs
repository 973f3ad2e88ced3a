//! Board module - manages the game grid
//!
//! The board keeps two views of the settled cells:
//!
//! - the **locked-positions map** from `(x, y)` to color, which is authoritative;
//! - a flat row-major **grid** of [`Cell`]s, re-derived from the map after every
//!   lock and line clear, which renderers and row scans read.
//!
//! A coordinate is in the map iff its grid cell is filled.
//!
//! Coordinates: `(x, y)` with `x` in `0..width` (left to right) and `y` in
//! `0..height` (top to bottom). Rows above the board (`y < 0`) are open space:
//! pieces may overlap them without colliding.

use std::collections::HashMap;

use crate::piece::Piece;
use crate::types::{Cell, Color};

/// The game board - fixed `width` x `height` grid of locked cells
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    grid: Vec<Cell>,
    locked: HashMap<(i32, i32), Color>,
}

impl Board {
    /// Create a new empty board
    ///
    /// Dimensions are checked by [`GameConfig::validate`](crate::GameConfig::validate)
    /// before a session builds its board.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            grid: vec![None; width * height],
            locked: HashMap::new(),
        }
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return None;
        }
        Some((y as usize) * self.width + (x as usize))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.grid[idx])
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Whether a piece cell at (x, y) would be illegal: through a wall, through
    /// the floor, or onto a settled cell.
    fn blocks(&self, x: i32, y: i32) -> bool {
        x < 0 || x >= self.width as i32 || y >= self.height as i32 || self.is_occupied(x, y)
    }

    /// Check whether any filled cell of the piece breaches a wall or the floor,
    /// or lands on an occupied cell.
    pub fn is_colliding(&self, piece: &Piece) -> bool {
        piece.cells().any(|(x, y)| self.blocks(x, y))
    }

    /// Same check as [`Board::is_colliding`] with the piece shifted by `dy` rows
    fn collides_below(&self, piece: &Piece, dy: i32) -> bool {
        piece.cells().any(|(x, y)| self.blocks(x, y + dy))
    }

    /// Row the piece would settle on if dropped straight down
    ///
    /// Walks the piece down until the next step would collide. A piece that
    /// already collides stays where it is.
    pub fn hard_drop_destination(&self, piece: &Piece) -> i32 {
        let mut dy = 0;
        while !self.collides_below(piece, dy + 1) {
            dy += 1;
        }
        piece.y + dy
    }

    /// Commit every filled cell of the piece with the piece's color, then
    /// re-derive the grid.
    ///
    /// Cells outside the grid (above the top row, in practice) are dropped.
    pub fn lock(&mut self, piece: &Piece) {
        for (x, y) in piece.cells() {
            if self.index(x, y).is_none() {
                tracing::warn!(x, y, "locked cell outside the board is discarded");
                continue;
            }
            self.locked.insert((x, y), piece.color);
        }
        self.sync_grid();
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height {
            return false;
        }
        let start = y * self.width;
        self.grid[start..start + self.width]
            .iter()
            .all(|cell| cell.is_some())
    }

    /// Remove every full row, shift everything above each one down, and return
    /// how many rows went.
    ///
    /// Rows are scanned bottom to top against the pre-clear grid, so adjacent
    /// and non-adjacent full rows are all counted exactly once. Each surviving
    /// locked cell falls by the number of cleared rows beneath it.
    pub fn clear_lines(&mut self) -> usize {
        let cleared: Vec<i32> = (0..self.height)
            .rev()
            .filter(|&y| self.is_row_full(y))
            .map(|y| y as i32)
            .collect();

        if cleared.is_empty() {
            return 0;
        }

        let locked = std::mem::take(&mut self.locked);
        self.locked = locked
            .into_iter()
            .filter(|((_, y), _)| !cleared.contains(y))
            .map(|((x, y), color)| {
                let below = cleared.iter().filter(|&&row| row > y).count() as i32;
                ((x, y + below), color)
            })
            .collect();

        self.sync_grid();
        cleared.len()
    }

    /// Rebuild the grid from the locked-positions map
    fn sync_grid(&mut self) {
        self.grid.iter_mut().for_each(|cell| *cell = None);
        for (&(x, y), &color) in &self.locked {
            if let Some(idx) = self.index(x, y) {
                self.grid[idx] = Some(color);
            }
        }
    }

    /// Color locked at (x, y), if any
    pub fn locked_at(&self, x: i32, y: i32) -> Option<Color> {
        self.locked.get(&(x, y)).copied()
    }

    /// The authoritative locked-positions map
    pub fn locked_positions(&self) -> &HashMap<(i32, i32), Color> {
        &self.locked
    }

    /// Get a reference to the flat grid, row-major
    pub fn cells(&self) -> &[Cell] {
        &self.grid
    }

    /// Iterate grid rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.grid.chunks(self.width.max(1))
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.locked.clear();
        self.sync_grid();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Shape;
    use crate::types::DEFAULT_PALETTE;

    const RED: Color = DEFAULT_PALETTE[4];
    const BLUE: Color = DEFAULT_PALETTE[5];

    fn dot(x: i32, y: i32, color: Color) -> Piece {
        Piece::new(Shape::from_rows(&[&[1]]).unwrap(), color, x, y)
    }

    fn assert_synced(board: &Board) {
        for y in 0..board.height() as i32 {
            for x in 0..board.width() as i32 {
                assert_eq!(
                    board.get(x, y),
                    Some(board.locked_at(x, y)),
                    "grid and locked map disagree at ({}, {})",
                    x,
                    y
                );
            }
        }
        assert_eq!(
            board.cells().iter().filter(|c| c.is_some()).count(),
            board.locked_positions().len()
        );
    }

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(10, 20);
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(9, 0), Some(9));
        assert_eq!(board.index(0, 1), Some(10));
        assert_eq!(board.index(9, 19), Some(199));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(10, 0), None);
        assert_eq!(board.index(0, 20), None);
    }

    #[test]
    fn test_collision_exhaustive_single_cell() {
        let mut board = Board::new(4, 3);
        board.lock(&dot(1, 2, RED));

        for y in -2..5 {
            for x in -2..6 {
                let expected = x < 0 || x >= 4 || y >= 3 || (x, y) == (1, 2);
                assert_eq!(
                    board.is_colliding(&dot(x, y, BLUE)),
                    expected,
                    "dot at ({}, {})",
                    x,
                    y
                );
            }
        }
    }

    #[test]
    fn test_collision_ignores_empty_shape_cells() {
        let mut board = Board::new(10, 20);
        // T occupies (4,18) and (3..=5, 19); (3,18) and (5,18) are holes.
        board.lock(&dot(3, 18, RED));
        board.lock(&dot(5, 18, RED));
        let t = Piece::new(Shape::t(), BLUE, 3, 18);
        assert!(!board.is_colliding(&t));
    }

    #[test]
    fn test_lock_records_cells_and_syncs_grid() {
        let mut board = Board::new(10, 20);
        let piece = Piece::new(Shape::o(), RED, 3, 5);
        board.lock(&piece);

        for (x, y) in [(3, 5), (4, 5), (3, 6), (4, 6)] {
            assert_eq!(board.locked_at(x, y), Some(RED));
            assert_eq!(board.get(x, y), Some(Some(RED)));
        }
        assert_eq!(board.locked_positions().len(), 4);
        assert_synced(&board);
    }

    #[test]
    fn test_lock_is_idempotent() {
        let mut board = Board::new(10, 20);
        let piece = Piece::new(Shape::l(), RED, 0, 10);
        board.lock(&piece);
        let once = board.clone();
        board.lock(&piece);
        assert_eq!(board, once);
    }

    #[test]
    fn test_lock_discards_cells_above_board() {
        let mut board = Board::new(10, 20);
        let vertical = Piece::new(Shape::i().rotated_cw(), RED, 0, -2);
        board.lock(&vertical);
        assert_eq!(board.locked_positions().len(), 2);
        assert_synced(&board);
    }

    #[test]
    fn test_hard_drop_destination_empty_board() {
        let board = Board::new(10, 20);
        let piece = Piece::new(Shape::o(), RED, 4, 0);
        assert_eq!(board.hard_drop_destination(&piece), 18);
    }

    #[test]
    fn test_hard_drop_destination_stops_on_stack() {
        let mut board = Board::new(10, 20);
        board.lock(&dot(4, 15, BLUE));
        let piece = Piece::new(Shape::i(), RED, 3, 0);
        assert_eq!(board.hard_drop_destination(&piece), 14);
    }

    #[test]
    fn test_clear_lines_non_adjacent_rows() {
        let mut board = Board::new(3, 5);
        for x in 0..3 {
            board.lock(&dot(x, 4, RED));
            board.lock(&dot(x, 2, RED));
        }
        board.lock(&dot(0, 3, BLUE));
        board.lock(&dot(2, 1, BLUE));

        assert_eq!(board.clear_lines(), 2);
        assert_eq!(board.locked_positions().len(), 2);
        // (0,3) had one cleared row below it, (2,1) had two.
        assert_eq!(board.locked_at(0, 4), Some(BLUE));
        assert_eq!(board.locked_at(2, 3), Some(BLUE));
        assert_synced(&board);
    }

    #[test]
    fn test_clear_lines_adjacent_rows() {
        let mut board = Board::new(2, 4);
        for y in 1..4 {
            for x in 0..2 {
                board.lock(&dot(x, y, RED));
            }
        }
        board.lock(&dot(1, 0, BLUE));

        assert_eq!(board.clear_lines(), 3);
        assert_eq!(board.locked_at(1, 3), Some(BLUE));
        assert_eq!(board.locked_positions().len(), 1);
        assert_synced(&board);
    }

    #[test]
    fn test_clear_lines_twice_returns_zero() {
        let mut board = Board::new(4, 4);
        for x in 0..4 {
            board.lock(&dot(x, 3, RED));
        }
        assert_eq!(board.clear_lines(), 1);
        assert_eq!(board.clear_lines(), 0);
    }

    #[test]
    fn test_clear_empties_board() {
        let mut board = Board::new(10, 20);
        board.lock(&Piece::new(Shape::t(), RED, 0, 0));
        board.clear();
        assert!(board.locked_positions().is_empty());
        assert!(board.cells().iter().all(|c| c.is_none()));
    }
}
