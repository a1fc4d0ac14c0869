//! Game configuration: [`GameConfig`].

use crate::board::is_tile_value;
use crate::error::ConfigError;

/// Default board side length.
pub const DEFAULT_SIZE: usize = 4;
/// Default tile that counts as a win.
pub const DEFAULT_WIN_TILE: u32 = 2048;
/// Default probability that a spawned tile is a 4 rather than a 2.
pub const DEFAULT_FOUR_CHANCE: f64 = 0.1;
/// Default number of tiles placed when a game starts.
pub const DEFAULT_START_TILES: usize = 2;

/// Parameters of a single game.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct GameConfig {
    /// Board side length N.
    pub size: usize,
    /// Reaching this tile marks the game as won.
    pub win_tile: u32,
    /// Probability that a spawned tile is a 4.
    pub four_chance: f64,
    /// Tiles spawned by [`Game::start`](crate::Game::start).
    pub start_tiles: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            win_tile: DEFAULT_WIN_TILE,
            four_chance: DEFAULT_FOUR_CHANCE,
            start_tiles: DEFAULT_START_TILES,
        }
    }
}

impl GameConfig {
    /// Set the board size (builder).
    #[inline]
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Set the win tile (builder).
    #[inline]
    pub fn with_win_tile(mut self, win_tile: u32) -> Self {
        self.win_tile = win_tile;
        self
    }

    /// Set the probability of spawning a 4 (builder).
    #[inline]
    pub fn with_four_chance(mut self, four_chance: f64) -> Self {
        self.four_chance = four_chance;
        self
    }

    /// Set the number of starting tiles (builder).
    #[inline]
    pub fn with_start_tiles(mut self, start_tiles: usize) -> Self {
        self.start_tiles = start_tiles;
        self
    }

    /// Check that the parameters describe a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::ZeroSize);
        }
        if self.win_tile < 4 || !is_tile_value(self.win_tile) {
            return Err(ConfigError::InvalidWinTile(self.win_tile));
        }
        if !(0.0..=1.0).contains(&self.four_chance) {
            return Err(ConfigError::InvalidFourChance(self.four_chance));
        }
        let cells = self.size.saturating_mul(self.size);
        if self.start_tiles > cells {
            return Err(ConfigError::TooManyStartTiles {
                start: self.start_tiles,
                cells,
            });
        }
        Ok(())
    }
}
