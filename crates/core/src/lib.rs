//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the rules of a falling-block puzzle: the board, the
//! falling piece, collision, locking, line clears and scoring. It has **zero
//! dependencies** on rendering, input devices or timers, which makes it:
//!
//! - **Deterministic**: Same seed and inputs produce identical sessions
//! - **Testable**: Every rule is exercised directly, without a terminal
//! - **Portable**: Any driver (terminal, window, headless) can host it
//!
//! # Module Structure
//!
//! - [`piece`]: Shape matrices, clockwise rotation and the falling piece
//! - [`board`]: Grid plus locked-positions map, collision, locking, line clears
//! - [`spawner`]: Uniform random shape and color selection
//! - [`scoring`]: Points per lines cleared at once
//! - [`game_state`]: The session state machine driven by actions and ticks
//! - [`config`]: Board size, gravity intervals, catalog and palette
//!
//! # Game Rules
//!
//! - **Uniform spawns**: Each piece draws shape and color independently
//! - **Plain rotation**: 90° clockwise, rejected in place when blocked (no kicks)
//! - **Hold**: Once per locked piece
//! - **Gravity locks**: A piece that cannot fall on a gravity step locks at once
//! - **Scoring**: 40 / 100 / 300 / 1200 for one to four lines
//!
//! # Example
//!
//! ```
//! use tetris_engine_core::{GameConfig, GameSession};
//! use tetris_engine_types::{Direction, GameAction};
//!
//! let mut game = GameSession::new(GameConfig::default().with_seed(12345)).unwrap();
//!
//! game.apply_action(GameAction::Move(Direction::Right));
//! game.apply_action(GameAction::Rotate);
//! let outcome = game.apply_action(GameAction::HardDrop);
//!
//! assert!(outcome.locked);
//! assert!(!game.is_game_over());
//! ```
//!
//! # Timing
//!
//! Call [`GameSession::tick`](game_state::GameSession::tick) once per frame
//! with the elapsed milliseconds, after applying that frame's actions.

pub mod board;
pub mod config;
pub mod error;
pub mod game_state;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod spawner;

pub use tetris_engine_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::GameConfig;
pub use error::{ConfigError, Result};
pub use game_state::GameSession;
pub use piece::{Piece, Shape};
pub use rng::SimpleRng;
pub use scoring::score_for;
pub use snapshot::{GameSnapshot, PieceSnapshot};
pub use spawner::Spawner;
