//! Spawner - produces new pieces
//!
//! Shape and color are independent uniform draws from the configured catalog
//! and palette. There is no bag and no history: every draw is fresh.

use crate::error::{ConfigError, Result};
use crate::piece::{Piece, Shape};
use crate::rng::SimpleRng;
use crate::types::Color;

#[derive(Debug, Clone)]
pub struct Spawner {
    shapes: Vec<Shape>,
    palette: Vec<Color>,
    board_width: usize,
    rng: SimpleRng,
}

impl Spawner {
    pub fn new(
        shapes: Vec<Shape>,
        palette: Vec<Color>,
        board_width: usize,
        seed: u32,
    ) -> Result<Self> {
        if shapes.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        if palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(Self {
            shapes,
            palette,
            board_width,
            rng: SimpleRng::new(seed),
        })
    }

    /// Draw a random shape and color, placed at the spawn position
    pub fn spawn(&mut self) -> Piece {
        let shape_idx = self.rng.next_range(self.shapes.len() as u32) as usize;
        let color_idx = self.rng.next_range(self.palette.len() as u32) as usize;

        let shape = self.shapes[shape_idx].clone();
        let (x, y) = self.spawn_position(&shape);
        Piece::new(shape, self.palette[color_idx], x, y)
    }

    /// Top row, centered by integer division of both widths
    pub fn spawn_position(&self, shape: &Shape) -> (i32, i32) {
        let x = (self.board_width / 2) as i32 - (shape.width() / 2) as i32;
        (x, 0)
    }

    /// RNG state, enough to reproduce the remaining sequence
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}
