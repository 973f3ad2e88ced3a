//! Error types for session construction
//!
//! Play itself never fails: illegal moves are reverted in place. The only
//! errors are configurations that cannot produce a playable session.

use thiserror::Error;

/// Result type alias for configuration checks
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Reasons a configuration is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Board has no columns
    #[error("board width must be positive")]
    ZeroWidth,

    /// Board has no rows
    #[error("board height must be positive")]
    ZeroHeight,

    /// No shapes to spawn from
    #[error("shape catalog is empty")]
    EmptyCatalog,

    /// No colors to paint pieces with
    #[error("color palette is empty")]
    EmptyPalette,

    /// Shape matrix has no rows or no columns
    #[error("shape has no rows or columns")]
    EmptyShape,

    /// Shape matrix rows differ in length
    #[error("shape row {row} has {found} columns, expected {expected}")]
    RaggedShape {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Shape matrix has no filled cell
    #[error("shape has no filled cells")]
    HollowShape,

    /// A cell flag other than 0 or 1
    #[error("shape cell at row {row}, column {col} is {value}, expected 0 or 1")]
    InvalidCell { row: usize, col: usize, value: u8 },

    /// Shape cannot fit on the board in some rotation
    #[error("shape {index} ({width}x{height}) does not fit a {board_width}x{board_height} board")]
    ShapeTooLarge {
        index: usize,
        width: usize,
        height: usize,
        board_width: usize,
        board_height: usize,
    },
}
