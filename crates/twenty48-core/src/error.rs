//! Error types for board construction and game configuration.

use thiserror::Error;

use crate::board::Pos;

/// Errors raised when building or editing a [`Board`](crate::Board) from
/// external data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("row {row} has {len} cells but the board has {size} rows")]
    NotSquare { row: usize, len: usize, size: usize },
    #[error("invalid tile {value} at {pos}: expected 0 or a power of two >= 2")]
    InvalidTile { pos: Pos, value: u32 },
    #[error("position {pos} is outside a {size}x{size} board")]
    OutOfBounds { pos: Pos, size: usize },
}

/// Errors raised by [`GameConfig::validate`](crate::GameConfig::validate).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("board size must be at least 1")]
    ZeroSize,
    #[error("win tile {0} must be a power of two >= 4")]
    InvalidWinTile(u32),
    #[error("four-tile chance {0} must be within [0, 1]")]
    InvalidFourChance(f64),
    #[error("{start} starting tiles do not fit on a board with {cells} cells")]
    TooManyStartTiles { start: usize, cells: usize },
}
