//! Command-line arguments and configuration loading.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use thiserror::Error;

use twenty48_core::{ConfigError, Direction, GameConfig};

/// Play 2048 in the terminal.
#[derive(Debug, Parser)]
#[command(name = "twenty48", version, about)]
pub struct Args {
    /// Board side length.
    #[arg(short, long)]
    pub size: Option<usize>,

    /// Tile that counts as a win.
    #[arg(long)]
    pub win_tile: Option<u32>,

    /// Probability that a new tile is a 4.
    #[arg(long)]
    pub four_chance: Option<f64>,

    /// Number of tiles on a fresh board.
    #[arg(long)]
    pub start_tiles: Option<usize>,

    /// Seed for reproducible games.
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON game configuration; flags override its fields.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Play these moves without a terminal UI and print the board,
    /// e.g. `--play left,up,up`.
    #[arg(long, value_delimiter = ',', value_name = "DIRS")]
    pub play: Option<Vec<Direction>>,

    /// Write logs to this file (logging is off otherwise).
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, default_value = "info", value_name = "LEVEL")]
    pub log_level: String,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl Args {
    /// The game configuration: file (or defaults), then flag overrides.
    pub fn game_config(&self) -> Result<GameConfig, CliError> {
        let mut cfg = match &self.config {
            Some(path) => load_config(path)?,
            None => GameConfig::default(),
        };
        if let Some(size) = self.size {
            cfg.size = size;
        }
        if let Some(win_tile) = self.win_tile {
            cfg.win_tile = win_tile;
        }
        if let Some(four_chance) = self.four_chance {
            cfg.four_chance = four_chance;
        }
        if let Some(start_tiles) = self.start_tiles {
            cfg.start_tiles = start_tiles;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn load_config(path: &Path) -> Result<GameConfig, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
