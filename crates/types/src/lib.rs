//! Core types module - shared data structures and constants
//!
//! This module defines the plain data exchanged between the engine and whatever
//! drives it (a terminal loop, a window, a test harness). Nothing here knows about
//! collision or scoring rules.
//!
//! # Board Dimensions
//!
//! The default playfield is 10 columns by 20 rows. Coordinates are `(x, y)` with
//! `x` growing to the right and `y` growing downwards, so row 0 is the top row.
//!
//! # Timing Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_FALL_MS` | 500 | Gravity interval while no soft drop is held |
//! | `DEFAULT_SOFT_DROP_MS` | 50 | Gravity interval while soft drop is held |
//!
//! # Examples
//!
//! ```
//! use tetris_engine_types::{Direction, GameAction, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH};
//!
//! let action = GameAction::from_str("left").unwrap();
//! assert_eq!(action, GameAction::Move(Direction::Left));
//! assert_eq!(Direction::Down.delta(), (0, 1));
//!
//! assert_eq!(DEFAULT_BOARD_WIDTH, 10);
//! assert_eq!(DEFAULT_BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Default board width in cells
pub const DEFAULT_BOARD_WIDTH: usize = 10;

/// Default board height in cells
pub const DEFAULT_BOARD_HEIGHT: usize = 20;

/// Default gravity interval in milliseconds
pub const DEFAULT_FALL_MS: u32 = 500;

/// Default gravity interval while soft drop is held
pub const DEFAULT_SOFT_DROP_MS: u32 = 50;

/// Line clear scoring table, indexed by lines cleared at once.
///
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Opaque color token attached to a piece and to every cell it locks into.
///
/// Stored as RGB so a renderer can paint it directly; the engine only compares
/// tokens for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Default palette used by the spawner.
pub const DEFAULT_PALETTE: [Color; 7] = [
    Color::rgb(0, 255, 255),
    Color::rgb(255, 255, 0),
    Color::rgb(128, 0, 128),
    Color::rgb(0, 255, 0),
    Color::rgb(255, 0, 0),
    Color::rgb(0, 0, 255),
    Color::rgb(255, 165, 0),
];

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Color)`: Cell filled by a locked piece of that color
///
/// This is the only empty-cell representation; collision and line checks both
/// test `is_none()`.
pub type Cell = Option<Color>;

/// Direction of a single-cell translation
///
/// There is no `Up`: pieces only ever move sideways or towards the floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Down,
}

impl Direction {
    /// Offset `(dx, dy)` applied to a piece position
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Down => "down",
        }
    }
}

/// Discrete player actions accepted by the game session
///
/// Soft drop is not here: it is a held input, toggled with
/// `GameSession::set_soft_drop`, not a one-shot action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameAction {
    /// Move piece one cell in the given direction
    Move(Direction),
    /// Rotate piece 90° clockwise
    Rotate,
    /// Set the active piece aside, or swap with the held one
    Hold,
    /// Instantly drop piece to lowest valid position and lock it
    HardDrop,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_engine_types::{Direction, GameAction};
    ///
    /// assert_eq!(GameAction::from_str("Right"), Some(GameAction::Move(Direction::Right)));
    /// assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(GameAction::Move(Direction::Left)),
            "right" => Some(GameAction::Move(Direction::Right)),
            "down" => Some(GameAction::Move(Direction::Down)),
            "rotate" => Some(GameAction::Rotate),
            "hold" => Some(GameAction::Hold),
            "harddrop" => Some(GameAction::HardDrop),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Move(dir) => dir.as_str(),
            GameAction::Rotate => "rotate",
            GameAction::Hold => "hold",
            GameAction::HardDrop => "hardDrop",
        }
    }
}

/// Lifecycle of a game session
///
/// `GameOver` is terminal: a session in this state ignores every command until
/// it is restarted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Running,
    GameOver,
}

/// What a single command or tick did, for the driver to react to
///
/// Returned by every session command. A rejected command returns the default
/// (all false / zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Outcome {
    /// The active piece moved, rotated or was exchanged by hold
    pub moved: bool,
    /// A downward step was blocked: the piece rests on something
    pub landed: bool,
    /// The active piece was committed to the board and replaced
    pub locked: bool,
    pub lines_cleared: usize,
    pub score_delta: u32,
    /// The replacement piece overlapped settled cells; the session has ended
    pub game_over: bool,
}
