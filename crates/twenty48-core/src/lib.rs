//! **twenty48-core**: the 2048 sliding-tile puzzle, minus presentation.
//!
//! This crate provides the board value type, the move engine (slide and
//! merge), random tile spawning, the game state machine and the
//! Elm-style application loop that drivers plug into. Rendering and input
//! live in driver crates behind the [`Driver`] and [`EventLoopDriver`]
//! traits.

pub mod app;
pub mod board;
pub mod config;
pub mod direction;
pub mod engine;
pub mod error;
pub mod game;
pub mod messages;
pub mod spawn;
pub mod style;

pub use app::{App, AppConfig, AppRunner, Driver, EventLoopDriver, Update, View};
pub use board::{Board, Pos};
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{Slide, can_move, legal_moves, merge_row, slide};
pub use error::{BoardError, ConfigError};
pub use game::{Game, Highlight, KeyOutcome, Status, Turn};
pub use messages::*;
pub use spawn::{Spawn, SpawnOutcome, spawn_tile};
pub use style::{Color, TileStyle, tile_style};
