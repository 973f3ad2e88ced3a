//! Configuration for a game session
//!
//! Everything that would otherwise be a hardcoded constant lives here so tests
//! can build small boards, single-shape catalogs and fixed seeds.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::piece::Shape;
use crate::types::{
    Color, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_FALL_MS, DEFAULT_PALETTE,
    DEFAULT_SOFT_DROP_MS,
};

/// Main configuration for a game session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board width in cells
    pub board_width: usize,

    /// Board height in cells
    pub board_height: usize,

    /// Gravity interval in milliseconds
    pub fall_ms: u32,

    /// Gravity interval while soft drop is held
    pub soft_drop_ms: u32,

    /// Shapes the spawner draws from
    pub shapes: Vec<Shape>,

    /// Colors the spawner draws from
    pub palette: Vec<Color>,

    /// Seed for piece selection
    pub seed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: DEFAULT_BOARD_WIDTH,
            board_height: DEFAULT_BOARD_HEIGHT,
            fall_ms: DEFAULT_FALL_MS,
            soft_drop_ms: DEFAULT_SOFT_DROP_MS,
            shapes: Shape::standard_set(),
            palette: DEFAULT_PALETTE.to_vec(),
            seed: 1,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the board dimensions
    pub fn with_board_size(mut self, width: usize, height: usize) -> Self {
        self.board_width = width;
        self.board_height = height;
        self
    }

    /// Set the gravity interval in milliseconds
    pub fn with_fall_ms(mut self, fall_ms: u32) -> Self {
        self.fall_ms = fall_ms;
        self
    }

    /// Set the soft drop gravity interval in milliseconds
    pub fn with_soft_drop_ms(mut self, soft_drop_ms: u32) -> Self {
        self.soft_drop_ms = soft_drop_ms;
        self
    }

    /// Replace the shape catalog
    pub fn with_shapes(mut self, shapes: Vec<Shape>) -> Self {
        self.shapes = shapes;
        self
    }

    /// Replace the color palette
    pub fn with_palette(mut self, palette: Vec<Color>) -> Self {
        self.palette = palette;
        self
    }

    /// Set the RNG seed
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Reject configurations no session can be played on
    ///
    /// Every shape must fit the board in both orientations, otherwise a spawn or
    /// a rotation could never be legal.
    pub fn validate(&self) -> Result<()> {
        if self.board_width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if self.board_height == 0 {
            return Err(ConfigError::ZeroHeight);
        }
        if self.shapes.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }

        for (index, shape) in self.shapes.iter().enumerate() {
            let (w, h) = (shape.width(), shape.height());
            let longest = w.max(h);
            if longest > self.board_width || longest > self.board_height {
                return Err(ConfigError::ShapeTooLarge {
                    index,
                    width: w,
                    height: h,
                    board_width: self.board_width,
                    board_height: self.board_height,
                });
            }
        }

        Ok(())
    }
}
